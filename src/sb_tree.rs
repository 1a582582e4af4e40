use alloc::vec;
use core::borrow::Borrow;
use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};
use core::iter::FusedIterator;
use core::ops::{Bound, RangeBounds};

use crate::compare::{Compare, Natural};
use crate::raw::{Handle, RawSBTree, Side};
use crate::{Error, WalkState};

mod capacity;
mod cursor;
mod order_statistic;

pub use cursor::{Cursor, CursorMut};

/// An ordered container based on a size-balanced tree.
///
/// Elements are kept sorted by the comparator `C` (by default [`Natural`], the element's
/// [`Ord`]). Both multiset and set semantics are available: [`insert_equal`] keeps
/// duplicates after any equivalent elements, [`insert_unique`] rejects them.
///
/// Every node records the size of its subtree, so besides the usual lookups the tree answers
/// [`select`] (the k-th smallest element) and [`rank`] (how many elements come before a key)
/// in O(log n).
///
/// It is a logic error for an element to be modified in such a way that its ordering relative
/// to any other element, as determined by the comparator, changes while it is in the tree.
/// The behavior resulting from such a logic error is not specified, but will be encapsulated
/// to the `SBTree` that observed the logic error and not result in undefined behavior.
///
/// [`insert_equal`]: SBTree::insert_equal
/// [`insert_unique`]: SBTree::insert_unique
/// [`select`]: SBTree::select
/// [`rank`]: SBTree::rank
///
/// # Examples
///
/// ```
/// use sb_tree::SBTree;
///
/// let mut tree = SBTree::new();
/// tree.insert_equal(2);
/// tree.insert_equal(2);
/// tree.insert_unique(1);
/// let (_, inserted) = tree.insert_unique(2);
/// assert!(!inserted);
///
/// assert_eq!(tree.len(), 3);
/// assert!(tree.iter().eq(&[1, 2, 2]));
/// ```
///
/// A `SBTree` with a known list of elements can be initialized from an array, which keeps
/// only the first of any equivalent elements:
///
/// ```
/// use sb_tree::SBTree;
///
/// let tree = SBTree::from([3, 1, 3, 2]);
/// assert!(tree.iter().eq(&[1, 2, 3]));
/// ```
pub struct SBTree<T, C = Natural> {
    raw: RawSBTree<T>,
    compare: C,
}

/// A position in a [`SBTree`]: one of its elements, or the end position one past the last.
///
/// A position stays valid while its element remains in the tree, whatever else is inserted
/// or removed. Using a position after its element was removed, or with a different tree, is a
/// logic error and may panic or refer to an unrelated element.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct Position(Option<Handle>);

impl Position {
    /// Returns `true` if this is the end position.
    #[must_use]
    pub const fn is_end(self) -> bool {
        self.0.is_none()
    }
}

/// An iterator over the elements of a `SBTree` in ascending order.
///
/// This `struct` is created by the [`iter`] method on [`SBTree`].
/// See its documentation for more.
///
/// # Examples
///
/// ```
/// use sb_tree::SBTree;
///
/// let tree = SBTree::from([3, 1, 2]);
/// let mut iter = tree.iter();
/// assert_eq!(iter.next(), Some(&1));
/// assert_eq!(iter.next_back(), Some(&3));
/// assert_eq!(iter.next(), Some(&2));
/// assert_eq!(iter.next(), None);
/// ```
///
/// [`iter`]: SBTree::iter
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Iter<'a, T> {
    tree: &'a RawSBTree<T>,
    front: Option<Handle>,
    back: Option<Handle>,
    remaining: usize,
}

/// An iterator over a sub-range of elements in a `SBTree`.
///
/// This `struct` is created by the [`range`] method on [`SBTree`].
/// See its documentation for more.
///
/// [`range`]: SBTree::range
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Range<'a, T> {
    inner: Iter<'a, T>,
}

/// An owning iterator over the elements of a `SBTree` in ascending order.
///
/// This `struct` is created by the [`into_iter`] method on [`SBTree`]
/// (provided by the [`IntoIterator`] trait).
///
/// [`into_iter`]: SBTree#method.into_iter
pub struct IntoIter<T> {
    inner: vec::IntoIter<T>,
}

/// One step of a full-structure walk.
#[derive(Debug)]
pub struct WalkStep<'a, T> {
    /// The element the walk is on.
    pub value: &'a T,
    /// How the walk arrived here.
    pub state: WalkState,
    /// The number of elements in the subtree rooted at this element.
    pub size: usize,
}

// Manual impls: `WalkStep` only holds a reference to `T`.
impl<T> Clone for WalkStep<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for WalkStep<'_, T> {}

/// A stack-free traversal over the structure of a `SBTree`.
///
/// Every element is visited when the walk first descends to it, and again each time the walk
/// climbs back to it from a finished child, which [`WalkState::Parent`] marks. The steps
/// reproduce the shape of the tree exactly, so they can drive structural copies or
/// pretty-printers without recursion.
///
/// This `struct` is created by the [`walk`] and [`walk_rev`] methods on [`SBTree`].
///
/// [`walk`]: SBTree::walk
/// [`walk_rev`]: SBTree::walk_rev
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Walk<'a, T> {
    tree: &'a RawSBTree<T>,
    next: Option<(Handle, WalkState)>,
    first: Side,
}

impl<T> SBTree<T> {
    /// Makes a new, empty `SBTree` ordered by [`Ord`].
    ///
    /// Does not allocate anything on its own.
    ///
    /// # Examples
    ///
    /// ```
    /// use sb_tree::SBTree;
    ///
    /// let mut tree: SBTree<i32> = SBTree::new();
    /// assert!(tree.is_empty());
    /// ```
    #[must_use]
    pub const fn new() -> Self {
        Self::with_compare(Natural)
    }
}

impl<T, C> SBTree<T, C> {
    /// Makes a new, empty `SBTree` ordered by `compare`.
    ///
    /// # Examples
    ///
    /// ```
    /// use sb_tree::SBTree;
    ///
    /// let mut tree = SBTree::with_compare(|a: &&str, b: &&str| a.len().cmp(&b.len()));
    /// tree.insert_unique("ccc");
    /// tree.insert_unique("a");
    /// assert_eq!(tree.first(), Some(&"a"));
    /// ```
    #[must_use]
    pub const fn with_compare(compare: C) -> Self {
        SBTree {
            raw: RawSBTree::new(),
            compare,
        }
    }

    /// Returns a reference to the comparator.
    #[must_use]
    pub const fn compare(&self) -> &C {
        &self.compare
    }

    /// Returns the number of elements in the tree.
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub const fn len(&self) -> usize {
        self.raw.len()
    }

    /// Returns `true` if the tree contains no elements.
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Returns the position of the smallest element, or [`end`](SBTree::end) if the tree is
    /// empty.
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub const fn begin(&self) -> Position {
        Position(self.raw.first())
    }

    /// Returns the end position, one past the largest element.
    #[must_use]
    pub const fn end(&self) -> Position {
        Position(None)
    }

    /// Returns the position after `position`. The successor of the largest element is the
    /// end position.
    ///
    /// # Panics
    ///
    /// Panics if `position` is the end position.
    ///
    /// # Complexity
    ///
    /// O(log n) worst case, O(1) amortized over a full traversal.
    #[must_use]
    pub fn successor(&self, position: Position) -> Position {
        let handle = position.0.expect("`SBTree::successor()` - cannot advance past the end position!");
        Position(self.raw.successor(handle))
    }

    /// Returns the position before `position`. The predecessor of the end position is the
    /// largest element; the predecessor of the smallest element is the end position.
    ///
    /// # Examples
    ///
    /// ```
    /// use sb_tree::SBTree;
    ///
    /// let tree = SBTree::from([1, 2]);
    /// let last = tree.predecessor(tree.end());
    /// assert_eq!(tree.get(last), Some(&2));
    /// assert!(tree.predecessor(tree.begin()).is_end());
    /// ```
    #[must_use]
    pub fn predecessor(&self, position: Position) -> Position {
        Position(self.raw.predecessor(position.0))
    }

    /// Returns the element at `position`, or `None` for the end position.
    #[must_use]
    pub fn get(&self, position: Position) -> Option<&T> {
        position.0.map(|h| self.raw.value(h))
    }

    /// Returns a mutable reference to the element at `position`, or `None` for the end
    /// position.
    ///
    /// The element must not be changed in a way that alters its ordering.
    #[must_use]
    pub fn get_mut(&mut self, position: Position) -> Option<&mut T> {
        position.0.map(|h| self.raw.value_mut(h))
    }

    /// Returns the smallest element.
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub fn first(&self) -> Option<&T> {
        self.get(self.begin())
    }

    /// Returns the largest element.
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub fn last(&self) -> Option<&T> {
        self.raw.last().map(|h| self.raw.value(h))
    }

    /// Gets an iterator that visits the elements in ascending order. Use `.rev()` for
    /// descending order.
    ///
    /// # Examples
    ///
    /// ```
    /// use sb_tree::SBTree;
    ///
    /// let tree = SBTree::from([3, 1, 2]);
    /// assert!(tree.iter().rev().eq(&[3, 2, 1]));
    /// ```
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            tree: &self.raw,
            front: self.raw.first(),
            back: self.raw.last(),
            remaining: self.raw.len(),
        }
    }

    /// Gets a full-structure walk that descends into left children first.
    ///
    /// # Examples
    ///
    /// ```
    /// use sb_tree::{SBTree, WalkState};
    ///
    /// let tree = SBTree::from([2, 1, 3]);
    /// let steps: Vec<_> = tree.walk().map(|step| (*step.value, step.state)).collect();
    /// assert_eq!(
    ///     steps,
    ///     [(2, WalkState::Root), (1, WalkState::Left), (3, WalkState::Sibling), (2, WalkState::Parent)]
    /// );
    /// ```
    pub fn walk(&self) -> Walk<'_, T> {
        self.walk_from(Side::Left)
    }

    /// Gets a full-structure walk that mirrors [`walk`](SBTree::walk), descending into right
    /// children first.
    pub fn walk_rev(&self) -> Walk<'_, T> {
        self.walk_from(Side::Right)
    }

    fn walk_from(&self, first: Side) -> Walk<'_, T> {
        Walk {
            tree: &self.raw,
            next: self.raw.root().map(|h| (h, WalkState::Root)),
            first,
        }
    }

    /// Returns a read-only cursor at `position`.
    pub fn cursor(&self, position: Position) -> Cursor<'_, T, C> {
        Cursor::new(self, position)
    }

    /// Returns a cursor at `position` that can modify or remove elements.
    pub fn cursor_mut(&mut self, position: Position) -> CursorMut<'_, T, C> {
        CursorMut::new(self, position)
    }

    /// Removes the element at `position` and returns the position that followed it.
    ///
    /// # Panics
    ///
    /// Panics if `position` is the end position.
    ///
    /// # Examples
    ///
    /// ```
    /// use sb_tree::SBTree;
    ///
    /// let mut tree = SBTree::from([1, 2, 3]);
    /// let next = tree.erase(tree.find(&2));
    /// assert_eq!(tree.get(next), Some(&3));
    /// assert!(tree.iter().eq(&[1, 3]));
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log² n) worst case
    pub fn erase(&mut self, position: Position) -> Position {
        let handle = position.0.expect("`SBTree::erase()` - cannot erase the end position!");
        let next = self.raw.successor(handle);
        self.raw.erase(handle);
        Position(next)
    }

    /// Removes the element at `position` and returns it, or returns `None` for the end
    /// position.
    pub fn remove(&mut self, position: Position) -> Option<T> {
        position.0.map(|h| self.raw.erase(h))
    }

    /// Removes every element from `first` up to, but not including, `last`, and returns
    /// `last`.
    ///
    /// # Panics
    ///
    /// Panics if `last` does not follow `first`.
    ///
    /// # Examples
    ///
    /// ```
    /// use sb_tree::SBTree;
    ///
    /// let mut tree = SBTree::from([1, 2, 3, 4, 5]);
    /// let from = tree.find(&2);
    /// let to = tree.find(&4);
    /// tree.erase_range(from, to);
    /// assert!(tree.iter().eq(&[1, 4, 5]));
    /// ```
    pub fn erase_range(&mut self, first: Position, last: Position) -> Position {
        if first == self.begin() && last.is_end() {
            self.clear();
            return last;
        }

        let mut current = first;
        while current != last {
            current = self.erase(current);
        }
        last
    }

    /// Removes and returns the smallest element.
    ///
    /// # Complexity
    ///
    /// O(log² n) worst case
    pub fn pop_first(&mut self) -> Option<T> {
        self.remove(self.begin())
    }

    /// Removes and returns the largest element.
    pub fn pop_last(&mut self) -> Option<T> {
        self.raw.last().map(|h| self.raw.erase(h))
    }

    /// Clears the tree, removing all elements.
    ///
    /// # Complexity
    ///
    /// O(n), in constant stack space.
    pub fn clear(&mut self) {
        self.raw.clear();
    }

    /// Exchanges the contents and comparators of two trees.
    ///
    /// # Complexity
    ///
    /// O(1)
    pub fn swap(&mut self, other: &mut Self) {
        log::debug!("swapping trees of {} and {} elements", self.len(), other.len());
        core::mem::swap(self, other);
    }
}

impl<T, C: Compare<T>> SBTree<T, C> {
    /// Inserts `value`, keeping any equivalent elements, and returns its position. The new
    /// element follows every element equivalent to it.
    ///
    /// # Panics
    ///
    /// Panics if the tree already holds [`max_size`](SBTree::max_size) elements or node
    /// storage cannot grow. See [`try_insert_equal`](SBTree::try_insert_equal).
    ///
    /// # Complexity
    ///
    /// O(log² n) worst case
    pub fn insert_equal(&mut self, value: T) -> Position {
        match self.try_insert_equal(value) {
            Ok(position) => position,
            Err(err) => panic!("`SBTree::insert_equal()` - {err}!"),
        }
    }

    /// Inserts `value`, keeping any equivalent elements, and returns its position.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CapacityOverflow`] or [`Error::AllocFailed`] if no node could be
    /// allocated; the tree is unchanged.
    pub fn try_insert_equal(&mut self, value: T) -> Result<Position, Error> {
        self.raw.insert_equal(value, &self.compare).map(|h| Position(Some(h)))
    }

    /// Inserts `value` unless an equivalent element is present.
    ///
    /// Returns the position of the inserted element and `true`, or the position of the
    /// existing equivalent element and `false`, in which case `value` is dropped.
    ///
    /// # Panics
    ///
    /// Panics if a node is needed and none can be allocated. See
    /// [`try_insert_unique`](SBTree::try_insert_unique).
    ///
    /// # Examples
    ///
    /// ```
    /// use sb_tree::SBTree;
    ///
    /// let mut tree = SBTree::new();
    /// let (first, inserted) = tree.insert_unique(5);
    /// assert!(inserted);
    /// assert_eq!(tree.insert_unique(5), (first, false));
    /// assert_eq!(tree.len(), 1);
    /// ```
    pub fn insert_unique(&mut self, value: T) -> (Position, bool) {
        match self.try_insert_unique(value) {
            Ok(result) => result,
            Err(err) => panic!("`SBTree::insert_unique()` - {err}!"),
        }
    }

    /// Inserts `value` unless an equivalent element is present.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CapacityOverflow`] or [`Error::AllocFailed`] if `value` is new and no
    /// node could be allocated; the tree is unchanged.
    pub fn try_insert_unique(&mut self, value: T) -> Result<(Position, bool), Error> {
        self.raw
            .insert_unique(value, &self.compare)
            .map(|(h, inserted)| (Position(Some(h)), inserted))
    }

    /// Builds an element from `args` and inserts it like [`insert_equal`](SBTree::insert_equal).
    ///
    /// # Examples
    ///
    /// ```
    /// use sb_tree::SBTree;
    ///
    /// let mut tree: SBTree<String> = SBTree::new();
    /// tree.emplace_equal("b");
    /// tree.emplace_equal("a");
    /// assert_eq!(tree.first().map(String::as_str), Some("a"));
    /// ```
    pub fn emplace_equal<A>(&mut self, args: A) -> Position
    where
        T: From<A>,
    {
        self.insert_equal(T::from(args))
    }

    /// Builds an element from `args` and inserts it like
    /// [`insert_unique`](SBTree::insert_unique).
    pub fn emplace_unique<A>(&mut self, args: A) -> (Position, bool)
    where
        T: From<A>,
    {
        self.insert_unique(T::from(args))
    }

    /// Inserts `n` copies of `value` and returns the position of the first, or the end
    /// position when `n` is zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use sb_tree::SBTree;
    ///
    /// let mut tree = SBTree::from([1, 3]);
    /// let first = tree.insert_equal_n(3, &2);
    /// assert_eq!(tree.index_of(first), 1);
    /// assert_eq!(tree.count(&2), 3);
    /// ```
    pub fn insert_equal_n(&mut self, n: usize, value: &T) -> Position
    where
        T: Clone,
    {
        let mut first = self.end();
        for i in 0..n {
            let position = self.insert_equal(value.clone());
            if i == 0 {
                first = position;
            }
        }
        first
    }

    /// Inserts every element of `iter`, keeping duplicates.
    pub fn extend_equal<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert_equal(value);
        }
    }

    /// Inserts every element of `iter` that has no equivalent in the tree yet.
    pub fn extend_unique<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert_unique(value);
        }
    }

    /// Replaces the contents of the tree with the elements of `iter`, keeping duplicates.
    pub fn assign_equal<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.clear();
        self.extend_equal(iter);
    }

    /// Replaces the contents of the tree with the elements of `iter`, keeping only the first
    /// of any equivalent elements.
    pub fn assign_unique<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.clear();
        self.extend_unique(iter);
    }
}

impl<T, C> SBTree<T, C> {
    /// Returns the position of the first element equivalent to `key`, or the end position.
    ///
    /// # Examples
    ///
    /// ```
    /// use sb_tree::SBTree;
    ///
    /// let tree = SBTree::from([1, 2, 3]);
    /// assert_eq!(tree.get(tree.find(&2)), Some(&2));
    /// assert!(tree.find(&4).is_end());
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    #[must_use]
    pub fn find<Q>(&self, key: &Q) -> Position
    where
        Q: ?Sized,
        T: Borrow<Q>,
        C: Compare<Q>,
    {
        Position(self.raw.find(key, &self.compare))
    }

    /// Returns `true` if the tree contains an element equivalent to `key`.
    #[must_use]
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        Q: ?Sized,
        T: Borrow<Q>,
        C: Compare<Q>,
    {
        !self.find(key).is_end()
    }

    /// Returns the position of the first element not ordered before `key`.
    #[must_use]
    pub fn lower_bound<Q>(&self, key: &Q) -> Position
    where
        Q: ?Sized,
        T: Borrow<Q>,
        C: Compare<Q>,
    {
        Position(self.raw.lower_bound(key, &self.compare))
    }

    /// Returns the position of the first element ordered after `key`.
    #[must_use]
    pub fn upper_bound<Q>(&self, key: &Q) -> Position
    where
        Q: ?Sized,
        T: Borrow<Q>,
        C: Compare<Q>,
    {
        Position(self.raw.upper_bound(key, &self.compare))
    }

    /// Returns the positions delimiting the elements equivalent to `key`, as
    /// `(lower_bound, upper_bound)`.
    #[must_use]
    pub fn equal_range<Q>(&self, key: &Q) -> (Position, Position)
    where
        Q: ?Sized,
        T: Borrow<Q>,
        C: Compare<Q>,
    {
        (self.lower_bound(key), self.upper_bound(key))
    }

    /// Returns the number of elements equivalent to `key`.
    ///
    /// # Complexity
    ///
    /// O(log n)
    #[must_use]
    pub fn count<Q>(&self, key: &Q) -> usize
    where
        Q: ?Sized,
        T: Borrow<Q>,
        C: Compare<Q>,
    {
        let (lower, upper) = self.equal_range(key);
        self.index_of(upper) - self.index_of(lower)
    }

    /// Returns the first element equivalent to `key`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Uninitialized`] if the tree is empty, or [`Error::OutOfRange`] if no
    /// element is equivalent to `key`.
    ///
    /// # Examples
    ///
    /// ```
    /// use sb_tree::{Error, SBTree};
    ///
    /// let mut tree = SBTree::new();
    /// assert_eq!(tree.at(&1), Err(Error::Uninitialized));
    /// tree.insert_unique(1);
    /// assert_eq!(tree.at(&1), Ok(&1));
    /// assert_eq!(tree.at(&2), Err(Error::OutOfRange));
    /// ```
    pub fn at<Q>(&self, key: &Q) -> Result<&T, Error>
    where
        Q: ?Sized,
        T: Borrow<Q>,
        C: Compare<Q>,
    {
        let handle = self.locate(key)?;
        Ok(self.raw.value(handle))
    }

    /// Returns a mutable reference to the first element equivalent to `key`.
    ///
    /// The element must not be changed in a way that alters its ordering.
    ///
    /// # Errors
    ///
    /// As for [`at`](SBTree::at).
    pub fn at_mut<Q>(&mut self, key: &Q) -> Result<&mut T, Error>
    where
        Q: ?Sized,
        T: Borrow<Q>,
        C: Compare<Q>,
    {
        let handle = self.locate(key)?;
        Ok(self.raw.value_mut(handle))
    }

    fn locate<Q>(&self, key: &Q) -> Result<Handle, Error>
    where
        Q: ?Sized,
        T: Borrow<Q>,
        C: Compare<Q>,
    {
        if self.is_empty() {
            return Err(Error::Uninitialized);
        }
        self.raw.find(key, &self.compare).ok_or(Error::OutOfRange)
    }

    /// Removes every element equivalent to `key` and returns how many were removed.
    ///
    /// # Examples
    ///
    /// ```
    /// use sb_tree::SBTree;
    ///
    /// let mut tree = SBTree::new();
    /// tree.extend_equal([2, 2, 2]);
    /// assert_eq!(tree.erase_key(&2), 3);
    /// assert!(tree.is_empty());
    /// ```
    pub fn erase_key<Q>(&mut self, key: &Q) -> usize
    where
        Q: ?Sized,
        T: Borrow<Q>,
        C: Compare<Q>,
    {
        let (lower, upper) = self.equal_range(key);
        let count = self.index_of(upper) - self.index_of(lower);
        self.erase_range(lower, upper);
        count
    }

    /// Constructs a double-ended iterator over a sub-range of elements.
    ///
    /// # Examples
    ///
    /// ```
    /// use sb_tree::SBTree;
    ///
    /// let tree = SBTree::from([1, 2, 3, 4, 5]);
    /// assert!(tree.range(2..4).eq(&[2, 3]));
    /// assert!(tree.range(..=2).rev().eq(&[2, 1]));
    /// assert_eq!(tree.range(4..).len(), 2);
    /// ```
    pub fn range<Q, R>(&self, range: R) -> Range<'_, T>
    where
        Q: ?Sized,
        T: Borrow<Q>,
        C: Compare<Q>,
        R: RangeBounds<Q>,
    {
        let start = match range.start_bound() {
            Bound::Included(key) => self.lower_bound(key),
            Bound::Excluded(key) => self.upper_bound(key),
            Bound::Unbounded => self.begin(),
        };
        let end = match range.end_bound() {
            Bound::Included(key) => self.upper_bound(key),
            Bound::Excluded(key) => self.lower_bound(key),
            Bound::Unbounded => self.end(),
        };

        let remaining = self.index_of(end).saturating_sub(self.index_of(start));
        Range {
            inner: Iter {
                tree: &self.raw,
                front: start.0,
                back: self.raw.predecessor(end.0),
                remaining,
            },
        }
    }
}

impl<T: Hash, C> Hash for SBTree<T, C> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_usize(self.len());
        for elt in self {
            elt.hash(state);
        }
    }
}

impl<T: PartialEq, C> PartialEq for SBTree<T, C> {
    fn eq(&self, other: &SBTree<T, C>) -> bool {
        self.len() == other.len() && self.iter().zip(other).all(|(a, b)| a == b)
    }
}

impl<T: Eq, C> Eq for SBTree<T, C> {}

impl<T: PartialOrd, C> PartialOrd for SBTree<T, C> {
    fn partial_cmp(&self, other: &SBTree<T, C>) -> Option<Ordering> {
        self.iter().partial_cmp(other.iter())
    }
}

impl<T: Ord, C> Ord for SBTree<T, C> {
    fn cmp(&self, other: &SBTree<T, C>) -> Ordering {
        self.iter().cmp(other.iter())
    }
}

impl<T: Clone, C: Clone> Clone for SBTree<T, C> {
    fn clone(&self) -> Self {
        SBTree {
            raw: self.raw.clone(),
            compare: self.compare.clone(),
        }
    }
}

impl<T: fmt::Debug, C> fmt::Debug for SBTree<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T, C: Default> Default for SBTree<T, C> {
    fn default() -> Self {
        SBTree::with_compare(C::default())
    }
}

impl<T, C: Compare<T> + Default> FromIterator<T> for SBTree<T, C> {
    /// Collects the elements, keeping only the first of any equivalent elements.
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = SBTree::default();
        tree.extend_unique(iter);
        tree
    }
}

impl<T, C: Compare<T>> Extend<T> for SBTree<T, C> {
    /// Inserts the elements that have no equivalent in the tree yet.
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.extend_unique(iter);
    }
}

impl<'a, T: 'a + Copy, C: Compare<T>> Extend<&'a T> for SBTree<T, C> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend_unique(iter.into_iter().copied());
    }
}

impl<T: Ord, const N: usize> From<[T; N]> for SBTree<T> {
    /// Converts a `[T; N]` into a `SBTree<T>`, keeping only the first of any equal elements.
    fn from(arr: [T; N]) -> Self {
        arr.into_iter().collect()
    }
}

impl<T, C> IntoIterator for SBTree<T, C> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    /// Gets an iterator for moving out the tree's contents in ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// use sb_tree::SBTree;
    ///
    /// let tree = SBTree::from([3, 1, 2]);
    /// let v: Vec<_> = tree.into_iter().collect();
    /// assert_eq!(v, [1, 2, 3]);
    /// ```
    fn into_iter(mut self) -> IntoIter<T> {
        IntoIter {
            inner: self.raw.drain_to_vec().into_iter(),
        }
    }
}

impl<'a, T, C> IntoIterator for &'a SBTree<T, C> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        if self.remaining == 0 {
            return None;
        }
        let handle = self.front?;
        self.front = self.tree.successor(handle);
        self.remaining -= 1;
        Some(self.tree.value(handle))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }

    fn last(mut self) -> Option<&'a T> {
        self.next_back()
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    fn next_back(&mut self) -> Option<&'a T> {
        if self.remaining == 0 {
            return None;
        }
        let handle = self.back?;
        self.back = self.tree.predecessor(Some(handle));
        self.remaining -= 1;
        Some(self.tree.value(handle))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<T> FusedIterator for Iter<'_, T> {}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Iter { ..*self }
    }
}

impl<T: fmt::Debug> fmt::Debug for Iter<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<'a, T> Iterator for Range<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }

    fn last(mut self) -> Option<&'a T> {
        self.next_back()
    }
}

impl<'a, T> DoubleEndedIterator for Range<'a, T> {
    fn next_back(&mut self) -> Option<&'a T> {
        self.inner.next_back()
    }
}

impl<T> ExactSizeIterator for Range<'_, T> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<T> FusedIterator for Range<'_, T> {}

impl<T> Clone for Range<'_, T> {
    fn clone(&self) -> Self {
        Range {
            inner: self.inner.clone(),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Range<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Range").field("inner", &self.inner).finish()
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<T> {
        self.inner.next_back()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<T> FusedIterator for IntoIter<T> {}

impl<T: fmt::Debug> fmt::Debug for IntoIter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IntoIter").field(&self.inner.as_slice()).finish()
    }
}

impl<'a, T> Iterator for Walk<'a, T> {
    type Item = WalkStep<'a, T>;

    fn next(&mut self) -> Option<WalkStep<'a, T>> {
        let (handle, state) = self.next?;
        self.next = self.tree.walk_step(handle, state, self.first);
        Some(WalkStep {
            value: self.tree.value(handle),
            state,
            size: self.tree.size_of(Some(handle)),
        })
    }
}

impl<T> FusedIterator for Walk<'_, T> {}

impl<T> Clone for Walk<'_, T> {
    fn clone(&self) -> Self {
        Walk { ..*self }
    }
}

impl<T> fmt::Debug for Walk<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Walk").field("next", &self.next).finish_non_exhaustive()
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn positions_survive_unrelated_mutation() {
        let mut tree = SBTree::new();
        let (seven, _) = tree.insert_unique(7);
        for key in 0..100 {
            if key != 7 {
                tree.insert_unique(key);
            }
        }
        for key in (0..100).filter(|k| k % 3 == 0 && *k != 7) {
            tree.erase(tree.find(&key));
        }
        assert_eq!(tree.get(seven), Some(&7));
        assert_eq!(tree.index_of(seven), tree.rank(&7));
        tree.raw.validate_invariants();
    }

    #[test]
    fn iterators_meet_in_the_middle() {
        let tree: SBTree<i32> = (0..10).collect();
        let mut iter = tree.iter();
        let mut seen = Vec::new();
        while let (Some(a), Some(b)) = (iter.next(), iter.next_back()) {
            seen.push((*a, *b));
        }
        assert_eq!(seen, [(0, 9), (1, 8), (2, 7), (3, 6), (4, 5)]);
        assert_eq!(iter.next(), None);
        assert_eq!(iter.len(), 0);
    }

    #[test]
    fn empty_and_inverted_ranges() {
        let tree = SBTree::from([1, 2, 3]);
        assert_eq!(tree.range(5..).count(), 0);
        assert_eq!(tree.range(2..2).count(), 0);
        assert_eq!(tree.range((Bound::Excluded(3), Bound::Excluded(1))).count(), 0);
        assert_eq!(tree.range::<i32, _>(..).len(), 3);
    }

    #[test]
    #[should_panic(expected = "`SBTree::erase()` - cannot erase the end position!")]
    fn erasing_end_panics() {
        let mut tree = SBTree::from([1]);
        tree.erase(tree.end());
    }

    #[test]
    #[should_panic(expected = "`SBTree::successor()` - cannot advance past the end position!")]
    fn advancing_past_end_panics() {
        let tree: SBTree<i32> = SBTree::new();
        let _ = tree.successor(tree.end());
    }

    #[test]
    #[should_panic(expected = "`SBTree::insert_equal()` - the tree is at maximum capacity!")]
    fn insert_past_max_size_panics() {
        let mut tree = SBTree::new();
        for key in 0..=SBTree::<u32>::max_size() {
            tree.insert_equal(key as u32);
        }
    }

    #[test]
    fn swap_exchanges_comparators() {
        type ByFn = fn(&i32, &i32) -> Ordering;

        let mut ascending: SBTree<i32, ByFn> = SBTree::with_compare(|a, b| a.cmp(b));
        ascending.extend_unique([1, 2]);
        let mut descending: SBTree<i32, ByFn> = SBTree::with_compare(|a, b| b.cmp(a));
        descending.extend_unique([8, 9]);

        ascending.swap(&mut descending);
        assert!(ascending.iter().eq(&[9, 8]));
        assert!(descending.iter().eq(&[1, 2]));

        ascending.insert_unique(10);
        assert_eq!(ascending.first(), Some(&10));
    }

    #[test]
    fn walk_step_sizes_and_reverse_order() {
        let tree = SBTree::from([4, 2, 6, 1, 3, 5, 7]);
        let first: Vec<(i32, usize)> = tree
            .walk()
            .filter(|s| s.state.is_first_visit())
            .map(|s| (*s.value, s.size))
            .collect();
        assert_eq!(first, [(4, 7), (2, 3), (1, 1), (3, 1), (6, 3), (5, 1), (7, 1)]);

        let mirrored: Vec<i32> = tree.walk_rev().filter(|s| s.state.is_first_visit()).map(|s| *s.value).collect();
        assert_eq!(mirrored, [4, 6, 7, 5, 2, 3, 1]);
        assert_eq!(tree.walk().count(), 10);
    }
}
