use super::SBTree;
use crate::raw::RawSBTree;

impl<T, C> SBTree<T, C> {
    /// Makes a new, empty `SBTree` ordered by `compare`, with room for at least `capacity`
    /// elements before node storage has to grow.
    ///
    /// # Examples
    ///
    /// ```
    /// use sb_tree::{Natural, SBTree};
    ///
    /// let tree: SBTree<i32> = SBTree::with_capacity_and_compare(16, Natural);
    /// assert!(tree.is_empty());
    /// assert!(tree.capacity() >= 16);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(capacity) for memory allocation.
    #[must_use]
    pub fn with_capacity_and_compare(capacity: usize, compare: C) -> Self {
        SBTree {
            raw: RawSBTree::with_capacity(capacity),
            compare,
        }
    }

    /// Returns the number of elements the tree can hold without growing its node storage.
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.raw.capacity()
    }

    /// Returns the largest number of elements any tree can hold.
    ///
    /// # Examples
    ///
    /// ```
    /// use sb_tree::SBTree;
    ///
    /// assert!(SBTree::<u8>::max_size() >= usize::from(u16::MAX));
    /// ```
    #[must_use]
    pub const fn max_size() -> usize {
        RawSBTree::<T>::max_size()
    }
}

impl<T> SBTree<T> {
    /// Makes a new, empty `SBTree` ordered by [`Ord`], with room for at least `capacity`
    /// elements.
    ///
    /// # Examples
    ///
    /// ```
    /// use sb_tree::SBTree;
    ///
    /// let tree: SBTree<i32> = SBTree::with_capacity(32);
    /// assert_eq!(tree.capacity(), 32);
    /// ```
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        SBTree::with_capacity_and_compare(capacity, crate::Natural)
    }
}
