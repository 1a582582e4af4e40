use core::borrow::Borrow;
use core::cmp::Ordering;

use super::handle::Handle;
use super::raw_sb_tree::RawSBTree;
use crate::compare::Compare;

impl<T> RawSBTree<T> {
    /// The first node not ordered before `key`, or `None` if every node is.
    pub(crate) fn lower_bound<Q, C>(&self, key: &Q, compare: &C) -> Option<Handle>
    where
        Q: ?Sized,
        T: Borrow<Q>,
        C: Compare<Q> + ?Sized,
    {
        self.lower_bound_with_rank(key, compare).0
    }

    /// The first node ordered after `key`, or `None` if no node is.
    pub(crate) fn upper_bound<Q, C>(&self, key: &Q, compare: &C) -> Option<Handle>
    where
        Q: ?Sized,
        T: Borrow<Q>,
        C: Compare<Q> + ?Sized,
    {
        let mut candidate = None;
        let mut current = self.root();
        while let Some(handle) = current {
            if compare.compare(key, self.value(handle).borrow()) == Ordering::Less {
                candidate = Some(handle);
                current = self.left(handle);
            } else {
                current = self.right(handle);
            }
        }
        candidate
    }

    /// The first node equal to `key`.
    pub(crate) fn find<Q, C>(&self, key: &Q, compare: &C) -> Option<Handle>
    where
        Q: ?Sized,
        T: Borrow<Q>,
        C: Compare<Q> + ?Sized,
    {
        self.lower_bound(key, compare)
            .filter(|&h| compare.compare(key, self.value(h).borrow()) != Ordering::Less)
    }

    /// The number of nodes ordered before `key`, if `key` is present.
    pub(crate) fn rank<Q, C>(&self, key: &Q, compare: &C) -> Option<usize>
    where
        Q: ?Sized,
        T: Borrow<Q>,
        C: Compare<Q> + ?Sized,
    {
        let (candidate, rank) = self.lower_bound_with_rank(key, compare);
        let candidate = candidate?;
        (compare.compare(key, self.value(candidate).borrow()) != Ordering::Less).then_some(rank)
    }

    /// The node at 0-based in-order position `index`.
    pub(crate) fn select(&self, mut index: usize) -> Option<Handle> {
        let mut current = self.root();
        while let Some(handle) = current {
            let left_size = self.size_of(self.left(handle));
            match index.cmp(&left_size) {
                Ordering::Equal => return Some(handle),
                Ordering::Less => current = self.left(handle),
                Ordering::Greater => {
                    index -= left_size + 1;
                    current = self.right(handle);
                }
            }
        }
        None
    }

    // Binary descent shared by `lower_bound` and `rank`: every step right skips the left
    // subtree and the node itself, all of which are ordered before `key`.
    fn lower_bound_with_rank<Q, C>(&self, key: &Q, compare: &C) -> (Option<Handle>, usize)
    where
        Q: ?Sized,
        T: Borrow<Q>,
        C: Compare<Q> + ?Sized,
    {
        let mut candidate = None;
        let mut before = 0;
        let mut current = self.root();
        while let Some(handle) = current {
            if compare.compare(self.value(handle).borrow(), key) == Ordering::Less {
                before += self.size_of(self.left(handle)) + 1;
                current = self.right(handle);
            } else {
                candidate = Some(handle);
                current = self.left(handle);
            }
        }
        (candidate, before)
    }
}
