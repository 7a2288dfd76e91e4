//! Storage indices with a reserved "no element" value.
//!
//! Each [`TreeLink`](crate::TreeLink) stores three indices: parent and two
//! children. The integer's `MAX` marks an absent neighbour, so a link stays
//! three plain integers rather than three `Option<Idx>`.

/// An index into element storage, with `NONE` standing for "no element".
///
/// ```
/// use nexus_tree::{Index, TreeLink};
///
/// let link: TreeLink<u16> = TreeLink::new();
/// assert!(!link.is_linked());
///
/// assert_eq!(u16::NONE, u16::MAX);
/// assert_eq!(u16::NONE.into_option(), None);
/// assert_eq!(3u16.into_option(), Some(3));
/// ```
pub trait Index: Copy + Eq + core::fmt::Debug {
    /// The reserved "no element" value.
    const NONE: Self;

    /// Returns `true` for [`NONE`](Index::NONE).
    #[inline]
    fn is_none(self) -> bool {
        self == Self::NONE
    }

    /// Returns `true` for any real index.
    #[inline]
    fn is_some(self) -> bool {
        self != Self::NONE
    }

    /// Maps [`NONE`](Index::NONE) to `None` and a real index to `Some`.
    #[inline]
    fn into_option(self) -> Option<Self> {
        (self != Self::NONE).then_some(self)
    }
}

macro_rules! max_is_none {
    ($($ty:ty)*) => {
        $(impl Index for $ty {
            const NONE: Self = <$ty>::MAX;
        })*
    };
}

max_is_none!(u8 u16 u32 u64 usize);
