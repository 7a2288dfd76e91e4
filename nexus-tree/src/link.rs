//! Embedded tree link and the trait that exposes it.
//!
//! Elements carry their own parent/child indices, so the tree needs no node
//! allocations of its own. An element can sit in several trees at once by
//! embedding one link per tree.

use crate::Index;

/// Side of an element in in-order (sorted) sequence.
///
/// `Before` is the smaller side (left subtree), `After` the larger side
/// (right subtree).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Toward the minimum.
    Before,
    /// Toward the maximum.
    After,
}

impl Direction {
    /// Returns the opposite direction.
    #[inline]
    pub const fn reverse(self) -> Self {
        match self {
            Direction::Before => Direction::After,
            Direction::After => Direction::Before,
        }
    }
}

/// Link field embedded in every element that participates in a tree.
///
/// Construct with [`TreeLink::new`] (or `Default`). The contents are owned by
/// the tree while the element is a member; after removal the link is reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeLink<Idx: Index> {
    parent: Idx,
    before: Idx,
    after: Idx,
    /// Strategy-specific: colour for red-black, balance factor for AVL.
    tag: i8,
    linked: bool,
}

impl<Idx: Index> Default for TreeLink<Idx> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Idx: Index> TreeLink<Idx> {
    /// Creates an unlinked link.
    #[inline]
    pub const fn new() -> Self {
        Self {
            parent: Idx::NONE,
            before: Idx::NONE,
            after: Idx::NONE,
            tag: 0,
            linked: false,
        }
    }

    /// Returns `true` if the owning element is currently in a tree.
    #[inline]
    pub const fn is_linked(&self) -> bool {
        self.linked
    }

    #[inline]
    pub(crate) const fn parent(&self) -> Idx {
        self.parent
    }

    #[inline]
    pub(crate) const fn child(&self, dir: Direction) -> Idx {
        match dir {
            Direction::Before => self.before,
            Direction::After => self.after,
        }
    }

    #[inline]
    pub(crate) const fn tag(&self) -> i8 {
        self.tag
    }

    #[inline]
    pub(crate) fn set_parent(&mut self, parent: Idx) {
        self.parent = parent;
    }

    #[inline]
    pub(crate) fn set_child(&mut self, dir: Direction, child: Idx) {
        match dir {
            Direction::Before => self.before = child,
            Direction::After => self.after = child,
        }
    }

    #[inline]
    pub(crate) fn set_tag(&mut self, tag: i8) {
        self.tag = tag;
    }

    /// Marks the link as a fresh leaf under `parent`.
    #[inline]
    pub(crate) fn attach(&mut self, parent: Idx, tag: i8) {
        self.parent = parent;
        self.before = Idx::NONE;
        self.after = Idx::NONE;
        self.tag = tag;
        self.linked = true;
    }

    #[inline]
    pub(crate) fn reset(&mut self) {
        *self = Self::new();
    }
}

/// Trait for types that can participate in a tree.
///
/// Implementors embed a [`TreeLink`] and hand it out by reference. The link
/// is an ordinary named field, so there is no offset bookkeeping.
///
/// # Example
///
/// ```
/// use nexus_tree::{TreeLink, TreeNode};
///
/// struct Timer {
///     deadline: u64,
///     callback_id: u32,
///     link: TreeLink<usize>,
/// }
///
/// impl TreeNode<usize> for Timer {
///     fn link(&self) -> &TreeLink<usize> { &self.link }
///     fn link_mut(&mut self) -> &mut TreeLink<usize> { &mut self.link }
/// }
/// ```
pub trait TreeNode<Idx: Index> {
    /// Returns the embedded link.
    fn link(&self) -> &TreeLink<Idx>;

    /// Returns the embedded link mutably.
    fn link_mut(&mut self) -> &mut TreeLink<Idx>;

    /// Returns `true` if this element is currently in a tree.
    #[inline]
    fn in_tree(&self) -> bool {
        self.link().is_linked()
    }
}
