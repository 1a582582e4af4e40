/// A zero-based rank into the sorted order of a tree.
///
/// # Examples
///
/// ```
/// use sb_tree::{Rank, SBTree};
///
/// let tree = SBTree::from([30, 10, 20]);
///
/// assert_eq!(tree[Rank(0)], 10);
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Rank(pub usize);

/// The value [`SBTree::rank`](crate::SBTree::rank) returns for a key that is not present.
pub const NOT_PRESENT: usize = usize::MAX;
