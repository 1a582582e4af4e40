use core::fmt;

/// Failures reported by [`SBTree`](crate::SBTree).
///
/// Lookups that return a position (`find`, `lower_bound`, `select`, ...) never fail; they
/// report absence with the end position instead. `Error` is only produced by the checked
/// accessors ([`at`](crate::SBTree::at), [`at_mut`](crate::SBTree::at_mut)) and by the
/// fallible insertions (`try_insert_equal`, `try_insert_unique`).
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
#[non_exhaustive]
pub enum Error {
    /// A checked accessor was called on an empty tree.
    Uninitialized,
    /// A checked accessor was called with a key that is not in the tree.
    OutOfRange,
    /// The tree already holds [`max_size`](crate::SBTree::max_size) nodes.
    CapacityOverflow,
    /// The node storage could not grow.
    AllocFailed,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            Error::Uninitialized => "the tree is empty",
            Error::OutOfRange => "the key is not present in the tree",
            Error::CapacityOverflow => "the tree is at maximum capacity",
            Error::AllocFailed => "memory allocation for a tree node failed",
        };
        f.write_str(message)
    }
}

impl core::error::Error for Error {}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn display_messages() {
        assert_eq!(Error::Uninitialized.to_string(), "the tree is empty");
        assert_eq!(Error::OutOfRange.to_string(), "the key is not present in the tree");
        assert_eq!(Error::CapacityOverflow.to_string(), "the tree is at maximum capacity");
        assert_eq!(Error::AllocFailed.to_string(), "memory allocation for a tree node failed");
    }
}
