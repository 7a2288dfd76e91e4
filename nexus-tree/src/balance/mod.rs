//! Balancing strategies.
//!
//! A [`Tree`](crate::Tree) keeps its ordering contract regardless of how it
//! stays balanced. The strategy is a type parameter; swapping it changes
//! rotation counts and tree shape, nothing a caller can observe through the
//! tree's API.
//!
//! | Strategy | Height bound | Notes |
//! |----------|--------------|-------|
//! | [`RedBlack`] | 2 log2(n+1) | Fewer rotations on removal (default) |
//! | [`Avl`] | ~1.44 log2(n+2) | Shallower, faster lookups |

mod avl;
pub(crate) mod links;
mod rb;

pub use avl::Avl;
pub use rb::RedBlack;

use crate::{Direction, Storage, TreeNode};
use links::Links;

mod sealed {
    pub trait Sealed {}
}

/// A self-balancing discipline for [`Tree`](crate::Tree).
///
/// Sealed: the crate ships [`RedBlack`] and [`Avl`]. The methods are
/// internal plumbing.
pub trait Balance: sealed::Sealed + Copy + Default + core::fmt::Debug {
    /// Links the unlinked element `idx` as the `dir` child of `parent`
    /// (`parent == NONE` means the tree is empty) and rebalances.
    #[doc(hidden)]
    fn link<T, S>(links: &mut Links<'_, T, S>, idx: S::Index, parent: S::Index, dir: Direction)
    where
        T: TreeNode<S::Index>,
        S: Storage<T>;

    /// Detaches the member `idx` and rebalances. The element's own link is
    /// left for the caller to reset.
    #[doc(hidden)]
    fn unlink<T, S>(links: &mut Links<'_, T, S>, idx: S::Index)
    where
        T: TreeNode<S::Index>,
        S: Storage<T>;

    /// Checks the strategy's balance rule over the subtree at `root`,
    /// returning the first offending element.
    #[doc(hidden)]
    fn check<T, S>(storage: &S, root: S::Index) -> Result<(), S::Index>
    where
        T: TreeNode<S::Index>,
        S: Storage<T>;
}

impl sealed::Sealed for RedBlack {}
impl sealed::Sealed for Avl {}
