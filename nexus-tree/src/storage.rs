//! Storage trait for caller-owned elements addressed by stable indices.
//!
//! The tree never owns an element. It reaches each one through the storage
//! the caller passes in and only touches the embedded [`TreeLink`].
//!
//! [`TreeLink`]: crate::TreeLink

use crate::Index;

/// Container of elements with stable indices.
///
/// # Requirements
///
/// An index must keep referring to the same element for as long as that
/// element is linked into a tree. Storage that shifts elements on removal
/// (e.g. `Vec::remove`) breaks this; removing from the *end* of a `Vec` or
/// using a slab is fine.
///
/// # Implementations
///
/// - `slab::Slab<T>` - growable, slot reuse
/// - `Vec<T>` - append-only pools
/// - `[T; N]` - fixed pools, e.g. a static table of timers
pub trait Storage<T> {
    /// Index type for this storage.
    type Index: Index;

    /// Returns a reference to the element at `index`, if present.
    fn get(&self, index: Self::Index) -> Option<&T>;

    /// Returns a mutable reference to the element at `index`, if present.
    fn get_mut(&mut self, index: Self::Index) -> Option<&mut T>;
}

/// Error returned when fixed-capacity storage is full.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Full<T>(pub T);

impl<T> Full<T> {
    /// Returns the value that could not be inserted.
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> core::fmt::Display for Full<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "storage is full")
    }
}

impl<T: core::fmt::Debug> std::error::Error for Full<T> {}

impl<T> Storage<T> for slab::Slab<T> {
    type Index = usize;

    #[inline]
    fn get(&self, index: usize) -> Option<&T> {
        slab::Slab::get(self, index)
    }

    #[inline]
    fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        slab::Slab::get_mut(self, index)
    }
}

impl<T> Storage<T> for Vec<T> {
    type Index = usize;

    #[inline]
    fn get(&self, index: usize) -> Option<&T> {
        self.as_slice().get(index)
    }

    #[inline]
    fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.as_mut_slice().get_mut(index)
    }
}

impl<T, const N: usize> Storage<T> for [T; N] {
    type Index = usize;

    #[inline]
    fn get(&self, index: usize) -> Option<&T> {
        self.as_slice().get(index)
    }

    #[inline]
    fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.as_mut_slice().get_mut(index)
    }
}
