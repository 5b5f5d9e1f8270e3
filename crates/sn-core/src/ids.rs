//! Strongly typed identifier wrappers for network nodes and edges.
//!
//! Both IDs are `Copy + Ord + Hash` so they key `BTreeMap`s and hash maps
//! without ceremony.  Unlike a dense array index, an id stays valid after
//! other entities are removed: networks allocate ids sequentially and never
//! reuse one.

use std::fmt;

/// Generate a typed ID wrapper around a primitive integer.
///
/// `$tag` prefixes the number in `Display` output (`n7`, `e12`).
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty) = $tag:literal;) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[cfg_attr(feature = "serde", serde(transparent))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Sentinel meaning "no valid ID" (`u32::MAX`).
            pub const INVALID: $name = $name(<$inner>::MAX);

            /// The raw integer as `usize`.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }

            /// The id allocated after this one.
            #[inline]
            pub fn next(self) -> $name {
                $name(self.0.saturating_add(1))
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::INVALID
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                if *self == Self::INVALID {
                    write!(f, "{}?", $tag)
                } else {
                    write!(f, "{}{}", $tag, self.0)
                }
            }
        }

        impl From<$inner> for $name {
            #[inline]
            fn from(n: $inner) -> Self {
                $name(n)
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
    /// Identifier of a spatial-network node.
    pub struct NodeId(u32) = "n";
}

typed_id! {
    /// Identifier of a spatial-network edge.  Parallel edges between the same
    /// pair of nodes each carry their own `EdgeId`.
    pub struct EdgeId(u32) = "e";
}
