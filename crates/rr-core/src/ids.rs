//! Strongly typed, zero-cost identifier wrappers.
//!
//! Map nodes arrive with opaque string ids.  Graph construction interns each
//! one into a dense `NodeId` so the router can index flat `Vec`s; the string
//! is kept on the [`MapNode`](crate::MapNode) for hydration.

use std::fmt;

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Sentinel meaning "no valid ID".
            pub const INVALID: $name = $name(<$inner>::MAX);

            /// Cast to `usize` for direct use as a `Vec` index.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }

            /// The id at position `i` of a dense array.  Builders size their
            /// arrays from the same ids, so `i` always fits.
            #[inline(always)]
            pub fn from_index(i: usize) -> Self {
                debug_assert!(i < <$inner>::MAX as usize, "{} index {i} overflows", stringify!($name));
                $name(i as $inner)
            }
        }

        impl Default for $name {
            /// Returns the `INVALID` sentinel so uninitialized IDs are visibly invalid.
            #[inline(always)]
            fn default() -> Self {
                Self::INVALID
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl TryFrom<usize> for $name {
            type Error = std::num::TryFromIntError;
            fn try_from(n: usize) -> Result<$name, Self::Error> {
                <$inner>::try_from(n).map($name)
            }
        }
    };
}

typed_id! {
    /// Dense index of a map node, assigned in graph insertion order.
    pub struct NodeId(u32);
}

typed_id! {
    /// Index of a directed edge in CSR order.
    pub struct EdgeId(u32);
}
