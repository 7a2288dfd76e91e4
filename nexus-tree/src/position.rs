//! Position tokens produced by lookups.

use crate::{Direction, Index};

/// Where a lookup landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Place<Idx: Index> {
    /// The tree was empty; the next insert becomes the root.
    Empty,
    /// An element comparing equal to the target.
    Found(Idx),
    /// No equal element. A new element belongs immediately on the
    /// `direction` side of `neighbor`.
    Vacant {
        /// Last element visited by the search.
        neighbor: Idx,
        /// Side of `neighbor` the target sorts on.
        direction: Direction,
    },
}

/// Opaque result of [`Tree::find`](crate::Tree::find).
///
/// A position is only valid until the next structural change of the tree it
/// came from. Handing a stale position to [`Tree::insert`](crate::Tree::insert)
/// panics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position<Idx: Index> {
    place: Place<Idx>,
    epoch: u64,
}

impl<Idx: Index> Position<Idx> {
    #[inline]
    pub(crate) const fn new(place: Place<Idx>, epoch: u64) -> Self {
        Self { place, epoch }
    }

    #[inline]
    pub(crate) const fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Returns where the lookup landed.
    #[inline]
    pub const fn place(&self) -> Place<Idx> {
        self.place
    }

    /// Returns the matching element, if the lookup found one.
    #[inline]
    pub const fn found(&self) -> Option<Idx> {
        match self.place {
            Place::Found(idx) => Some(idx),
            _ => None,
        }
    }

    /// Returns `true` if the lookup found an equal element.
    #[inline]
    pub const fn is_found(&self) -> bool {
        matches!(self.place, Place::Found(_))
    }
}
