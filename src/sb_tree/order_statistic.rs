use core::borrow::Borrow;
use core::ops::Index;

use super::{Position, SBTree};
use crate::compare::Compare;
use crate::{NOT_PRESENT, Rank};

impl<T, C> SBTree<T, C> {
    /// Returns the position of the element at 0-based sorted index `index`, or the end
    /// position if `index` is out of bounds.
    ///
    /// # Examples
    ///
    /// ```
    /// use sb_tree::SBTree;
    ///
    /// let tree = SBTree::from([10, 20, 30]);
    /// assert_eq!(tree.get(tree.select(1)), Some(&20));
    /// assert!(tree.select(3).is_end());
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    #[must_use]
    pub fn select(&self, index: usize) -> Position {
        Position(self.raw.select(index))
    }

    /// Returns the element at 0-based sorted index `index`, or `None` if it is out of bounds.
    #[must_use]
    pub fn get_by_rank(&self, index: usize) -> Option<&T> {
        self.get(self.select(index))
    }

    /// Returns the number of elements ordered before `key` if an equivalent element is
    /// present, or [`NOT_PRESENT`] otherwise. With duplicates, this is the index of the first
    /// equivalent element.
    ///
    /// # Examples
    ///
    /// ```
    /// use sb_tree::{NOT_PRESENT, SBTree};
    ///
    /// let mut tree = SBTree::new();
    /// tree.extend_equal([1, 3, 3, 5]);
    /// assert_eq!(tree.rank(&3), 1);
    /// assert_eq!(tree.rank(&4), NOT_PRESENT);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    #[must_use]
    pub fn rank<Q>(&self, key: &Q) -> usize
    where
        Q: ?Sized,
        T: Borrow<Q>,
        C: Compare<Q>,
    {
        self.rank_of(key).unwrap_or(NOT_PRESENT)
    }

    /// Like [`rank`](SBTree::rank), but returns `None` if no element is equivalent to `key`.
    #[must_use]
    pub fn rank_of<Q>(&self, key: &Q) -> Option<usize>
    where
        Q: ?Sized,
        T: Borrow<Q>,
        C: Compare<Q>,
    {
        self.raw.rank(key, &self.compare)
    }

    /// Returns the 0-based sorted index of the element at `position`. The end position has
    /// index `len()`.
    ///
    /// # Complexity
    ///
    /// O(log n)
    #[must_use]
    pub fn index_of(&self, position: Position) -> usize {
        position.0.map_or(self.len(), |h| self.raw.index_of(h))
    }
}

/// Indexes into the tree by rank.
///
/// # Panics
///
/// Panics if `rank` is out of bounds.
///
/// # Examples
///
/// ```
/// use sb_tree::{Rank, SBTree};
///
/// let tree = SBTree::from([10, 20, 30]);
/// assert_eq!(tree[Rank(1)], 20);
/// ```
impl<T, C> Index<Rank> for SBTree<T, C> {
    type Output = T;

    fn index(&self, rank: Rank) -> &Self::Output {
        self.get_by_rank(rank.0).expect("index out of bounds")
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn empty_tree_queries() {
        let tree: SBTree<i32> = SBTree::new();
        assert!(tree.select(0).is_end());
        assert_eq!(tree.rank(&3), NOT_PRESENT);
        assert_eq!(tree.rank_of(&3), None);
        assert_eq!(tree.index_of(tree.end()), 0);
    }

    #[test]
    fn select_and_rank_agree() {
        let tree: SBTree<u32> = (0..500).map(|k| k * 7 % 500).collect();
        for index in 0..500 {
            let position = tree.select(index);
            assert_eq!(tree.index_of(position), index);
            assert_eq!(tree.rank(tree.get(position).unwrap()), index);
        }
    }

    #[test]
    #[should_panic(expected = "index out of bounds")]
    fn index_out_of_bounds_panics() {
        let tree = SBTree::from([1]);
        let _ = tree[Rank(1)];
    }
}
