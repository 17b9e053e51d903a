use core::fmt;
use core::num::NonZeroU32;

/// Declares a compact, copyable identifier for one kind of graph object.
///
/// - `u32` keeps memory small
/// - `NonZero` lets `Option<Id>` stay the same size as the id
/// - one type per object kind, so node and edge indices never mix
macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(NonZeroU32);

        impl $name {
            /// Create an id from a 0-based index by storing index+1.
            pub fn from_index(index: u32) -> Self {
                Self(NonZeroU32::MIN.saturating_add(index))
            }

            /// Recover the 0-based index.
            pub fn index(self) -> u32 {
                self.0.get() - 1
            }

            /// The index as a `usize`, for slice access.
            pub fn slot(self) -> usize {
                self.index() as usize
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.index())
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}{}", $prefix, self.index())
            }
        }
    };
}

define_id!(
    /// Identifier of a node, assigned in first-appearance order.
    NodeId,
    "n"
);

define_id!(
    /// Identifier of one edge occurrence in the input edge list.
    EdgeId,
    "e"
);
