use alloc::vec::Vec;
use core::cmp::Ordering;

use super::arena::Arena;
use super::handle::Handle;
use super::node::{Header, Node, Side};
use super::walk::WalkState;
use crate::Error;
use crate::compare::Compare;

/// The size-balanced tree engine backing `SBTree`.
///
/// Nodes live in an arena and refer to each other by [`Handle`]. The sentinel is the
/// separate [`Header`]; an absent handle (`None`) plays the role of the end position.
pub(crate) struct RawSBTree<T> {
    /// Arena storing all tree nodes.
    pub(super) nodes: Arena<Node<T>>,
    /// Root, extremes and element count.
    pub(super) header: Header,
    /// Deepest rebalance recursion observed since the last reset.
    #[cfg(test)]
    pub(crate) max_rebalance_depth: usize,
}

impl<T> RawSBTree<T> {
    /// Creates a new, empty tree.
    pub(crate) const fn new() -> Self {
        Self {
            nodes: Arena::new(),
            header: Header::new(),
            #[cfg(test)]
            max_rebalance_depth: 0,
        }
    }

    /// Creates a new tree with room for `capacity` nodes.
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Arena::with_capacity(capacity),
            header: Header::new(),
            #[cfg(test)]
            max_rebalance_depth: 0,
        }
    }

    pub(crate) fn capacity(&self) -> usize {
        self.nodes.capacity()
    }

    pub(crate) const fn max_size() -> usize {
        Arena::<Node<T>>::max_size()
    }

    pub(crate) const fn len(&self) -> usize {
        self.header.len
    }

    pub(crate) const fn is_empty(&self) -> bool {
        self.header.root.is_none()
    }

    pub(crate) const fn root(&self) -> Option<Handle> {
        self.header.root
    }

    /// The minimum node, in O(1).
    pub(crate) const fn first(&self) -> Option<Handle> {
        self.header.leftmost
    }

    /// The maximum node, in O(1).
    pub(crate) const fn last(&self) -> Option<Handle> {
        self.header.rightmost
    }

    #[inline]
    pub(crate) fn node(&self, handle: Handle) -> &Node<T> {
        self.nodes.get(handle)
    }

    #[inline]
    pub(crate) fn node_mut(&mut self, handle: Handle) -> &mut Node<T> {
        self.nodes.get_mut(handle)
    }

    #[inline]
    pub(crate) fn value(&self, handle: Handle) -> &T {
        self.nodes.get(handle).value()
    }

    #[inline]
    pub(crate) fn value_mut(&mut self, handle: Handle) -> &mut T {
        self.nodes.get_mut(handle).value_mut()
    }

    #[inline]
    pub(crate) fn parent(&self, handle: Handle) -> Option<Handle> {
        self.nodes.get(handle).parent()
    }

    #[inline]
    pub(crate) fn left(&self, handle: Handle) -> Option<Handle> {
        self.nodes.get(handle).left()
    }

    #[inline]
    pub(crate) fn right(&self, handle: Handle) -> Option<Handle> {
        self.nodes.get(handle).right()
    }

    /// Size of the subtree at `handle`; an absent subtree is empty.
    #[inline]
    pub(crate) fn size_of(&self, handle: Option<Handle>) -> usize {
        handle.map_or(0, |h| self.nodes.get(h).size().to_usize())
    }

    /// Which side of its parent `handle` hangs from; the root reports `None`.
    pub(crate) fn side_of(&self, handle: Handle) -> Option<Side> {
        let parent = self.parent(handle)?;
        if self.right(parent) == Some(handle) {
            Some(Side::Right)
        } else {
            Some(Side::Left)
        }
    }

    /// Descends left edges from `handle` until exhausted.
    pub(crate) fn leftmost(&self, mut handle: Handle) -> Handle {
        while let Some(left) = self.left(handle) {
            handle = left;
        }
        handle
    }

    /// Descends right edges from `handle` until exhausted.
    pub(crate) fn rightmost(&self, mut handle: Handle) -> Handle {
        while let Some(right) = self.right(handle) {
            handle = right;
        }
        handle
    }

    /// The in-order successor of `handle`; `None` is the end position.
    pub(crate) fn successor(&self, mut handle: Handle) -> Option<Handle> {
        if let Some(right) = self.right(handle) {
            return Some(self.leftmost(right));
        }
        while let Some(parent) = self.parent(handle) {
            if self.right(parent) != Some(handle) {
                return Some(parent);
            }
            handle = parent;
        }
        None
    }

    /// The in-order predecessor of `position`. The predecessor of the end position is the
    /// maximum; the predecessor of the minimum is the end position.
    pub(crate) fn predecessor(&self, position: Option<Handle>) -> Option<Handle> {
        let Some(mut handle) = position else {
            return self.header.rightmost;
        };
        if let Some(left) = self.left(handle) {
            return Some(self.rightmost(left));
        }
        while let Some(parent) = self.parent(handle) {
            if self.left(parent) != Some(handle) {
                return Some(parent);
            }
            handle = parent;
        }
        None
    }

    /// The 0-based in-order index of `handle`, found by climbing to the root.
    pub(crate) fn index_of(&self, mut handle: Handle) -> usize {
        let mut index = self.size_of(self.left(handle));
        while let Some(parent) = self.parent(handle) {
            if self.right(parent) == Some(handle) {
                index += self.size_of(self.left(parent)) + 1;
            }
            handle = parent;
        }
        index
    }

    /// Points the edge that led to `old` at `new`; a root `old` re-anchors the header.
    pub(super) fn replace_child(&mut self, parent: Option<Handle>, old: Handle, new: Option<Handle>) {
        match parent {
            None => self.header.root = new,
            Some(p) => {
                let node = self.nodes.get_mut(p);
                if node.left() == Some(old) {
                    node.set_left(new);
                } else {
                    node.set_right(new);
                }
            }
        }
    }

    fn add_to_ancestors(&mut self, mut handle: Option<Handle>, grow: bool) {
        while let Some(h) = handle {
            let node = self.nodes.get_mut(h);
            let size = if grow {
                node.size().increment()
            } else {
                node.size().decrement()
            };
            node.set_size(size);
            handle = node.parent();
        }
    }

    fn attach_root(&mut self, handle: Handle) {
        self.header.root = Some(handle);
        self.header.leftmost = Some(handle);
        self.header.rightmost = Some(handle);
        self.header.len = 1;
    }

    /// Hangs the detached leaf `child` on the empty `side` edge of `parent`, extending the
    /// header's extremes when the leaf becomes the new minimum or maximum.
    fn link(&mut self, parent: Handle, side: Side, child: Handle) {
        self.nodes.get_mut(parent).set_child(side, Some(child));
        self.nodes.get_mut(child).set_parent(Some(parent));
        match side {
            Side::Left if self.header.leftmost == Some(parent) => self.header.leftmost = Some(child),
            Side::Right if self.header.rightmost == Some(parent) => self.header.rightmost = Some(child),
            _ => {}
        }
        self.header.len += 1;
    }

    /// Removes the node at `handle` and returns its value.
    pub(crate) fn erase(&mut self, handle: Handle) -> T {
        let node = self.nodes.get(handle);
        let (parent, left, right) = (node.parent(), node.left(), node.right());

        match (left, right) {
            (Some(left), Some(right)) => self.erase_inner(handle, parent, left, right),
            (child, None) | (None, child) => {
                let side = self.side_of(handle);
                if let Some(child) = child {
                    self.nodes.get_mut(child).set_parent(parent);
                }
                self.replace_child(parent, handle, child);

                if self.header.leftmost == Some(handle) {
                    self.header.leftmost = child.map_or(parent, |c| Some(self.leftmost(c)));
                }
                if self.header.rightmost == Some(handle) {
                    self.header.rightmost = child.map_or(parent, |c| Some(self.rightmost(c)));
                }

                self.add_to_ancestors(parent, false);
                if let (Some(parent), Some(side)) = (parent, side) {
                    self.rebalance_climb(parent, side, false);
                }
            }
        }

        self.header.len -= 1;
        self.nodes.take(handle).into_value()
    }

    /// Splices out a node with two children by relinking a replacement into its place.
    ///
    /// The replacement comes from the subtree that is not larger: the leftmost node of the
    /// right subtree when `size(left) >= size(right)`, else the rightmost node of the left.
    fn erase_inner(&mut self, handle: Handle, parent: Option<Handle>, left: Handle, right: Handle) {
        let near = if self.size_of(Some(left)) >= self.size_of(Some(right)) {
            Side::Right
        } else {
            Side::Left
        };
        let far = near.opposite();
        let (near_child, far_child) = match near {
            Side::Right => (right, left),
            Side::Left => (left, right),
        };

        // The replacement hangs off the `far` edge of its parent unless it is the near child
        // itself.
        let replacement = match near {
            Side::Right => self.leftmost(right),
            Side::Left => self.rightmost(left),
        };
        let replacement_parent =
            self.parent(replacement).expect("`RawSBTree::erase()` - replacement has no parent!");
        let detached_from = if replacement == near_child { near } else { far };

        self.add_to_ancestors(Some(replacement_parent), false);

        // The far subtree of the erased node moves under the replacement.
        self.nodes.get_mut(far_child).set_parent(Some(replacement));
        self.nodes.get_mut(replacement).set_child(far, Some(far_child));

        let start = if replacement == near_child {
            replacement
        } else {
            let orphan = self.node(replacement).child(near);
            self.nodes.get_mut(replacement_parent).set_child(far, orphan);
            if let Some(orphan) = orphan {
                self.nodes.get_mut(orphan).set_parent(Some(replacement_parent));
            }
            self.nodes.get_mut(near_child).set_parent(Some(replacement));
            self.nodes.get_mut(replacement).set_child(near, Some(near_child));
            replacement_parent
        };

        self.replace_child(parent, handle, Some(replacement));
        let size = self.node(handle).size();
        let node = self.nodes.get_mut(replacement);
        node.set_parent(parent);
        node.set_size(size);

        self.rebalance_climb(start, detached_from, false);
    }

    /// Destroys every node without recursion: descend leftmost-first, then right, and drop
    /// each leaf as it is exhausted. Slots are not recycled, since the arena is emptied after.
    pub(crate) fn clear(&mut self) {
        let Some(mut current) = self.header.root else {
            return;
        };
        log::debug!("clearing {} nodes", self.header.len);

        loop {
            current = self.leftmost(current);
            if let Some(right) = self.right(current) {
                current = right;
                continue;
            }

            let parent = self.parent(current);
            self.replace_child(parent, current, None);
            self.nodes.discard(current);
            match parent {
                Some(parent) => current = parent,
                None => break,
            }
        }

        self.nodes.clear();
        self.header.reset();
    }

    /// Takes every value out in ascending order, leaving the tree empty.
    pub(crate) fn drain_to_vec(&mut self) -> Vec<T> {
        let mut handles = Vec::with_capacity(self.header.len);
        let mut current = self.header.leftmost;
        while let Some(handle) = current {
            handles.push(handle);
            current = self.successor(handle);
        }

        let values = handles.into_iter().map(|h| self.nodes.take(h).into_value()).collect();
        self.nodes.clear();
        self.header.reset();
        values
    }
}

impl<T> RawSBTree<T> {
    /// Inserts `value` after any run of equal elements. Always succeeds unless node storage
    /// is exhausted, in which case the tree is left untouched.
    pub(crate) fn insert_equal<C>(&mut self, value: T, compare: &C) -> Result<Handle, Error>
    where
        C: Compare<T> + ?Sized,
    {
        let new = self.nodes.try_alloc(Node::new(value))?;
        let Some(mut current) = self.header.root else {
            self.attach_root(new);
            return Ok(new);
        };

        let side = loop {
            let node = self.nodes.get_mut(current);
            node.set_size(node.size().increment());

            let side = match compare.compare(self.value(new), self.value(current)) {
                Ordering::Less => Side::Left,
                Ordering::Equal | Ordering::Greater => Side::Right,
            };
            match self.node(current).child(side) {
                Some(child) => current = child,
                None => break side,
            }
        };

        self.link(current, side, new);
        self.rebalance_climb(current, side, true);
        Ok(new)
    }

    /// Inserts `value` unless an equal element is present, in which case the existing node
    /// is returned with `false` and `value` is dropped.
    pub(crate) fn insert_unique<C>(&mut self, value: T, compare: &C) -> Result<(Handle, bool), Error>
    where
        C: Compare<T> + ?Sized,
    {
        let Some(mut current) = self.header.root else {
            let new = self.nodes.try_alloc(Node::new(value))?;
            self.attach_root(new);
            return Ok((new, true));
        };

        let side = loop {
            let side = match compare.compare(&value, self.value(current)) {
                Ordering::Less => Side::Left,
                Ordering::Greater => Side::Right,
                Ordering::Equal => {
                    log::trace!("rejected duplicate at {current:?}");
                    return Ok((current, false));
                }
            };
            match self.node(current).child(side) {
                Some(child) => current = child,
                None => break side,
            }
        };

        let new = self.nodes.try_alloc(Node::new(value))?;
        self.add_to_ancestors(Some(current), true);
        self.link(current, side, new);
        self.rebalance_climb(current, side, true);
        Ok((new, true))
    }
}

impl<T: Clone> Clone for RawSBTree<T> {
    /// Deep copy driven by the full-structure walk, so no recursion is needed whatever the
    /// shape of the source.
    fn clone(&self) -> Self {
        let mut copy = Self::with_capacity(self.len());
        let Some(root) = self.header.root else {
            return copy;
        };

        let copy_of = |src: &Self, handle: Handle, parent: Option<Handle>| {
            let node = src.node(handle);
            Node::with_size(node.value().clone(), parent, node.size())
        };

        let copy_root = copy.nodes.alloc(copy_of(self, root, None));
        let mut dst = copy_root;
        let mut at = (root, WalkState::Root);

        while let Some((src, state)) = self.walk_step(at.0, at.1, Side::Left) {
            match state {
                WalkState::Left | WalkState::Right => {
                    let side = if state == WalkState::Left { Side::Left } else { Side::Right };
                    let child = copy.nodes.alloc(copy_of(self, src, Some(dst)));
                    copy.node_mut(dst).set_child(side, Some(child));
                    dst = child;
                }
                WalkState::Sibling => {
                    let parent = copy.parent(dst).expect("`RawSBTree::clone()` - sibling has no parent!");
                    let sibling = copy.nodes.alloc(copy_of(self, src, Some(parent)));
                    copy.node_mut(parent).set_right(Some(sibling));
                    dst = sibling;
                }
                WalkState::Parent => {
                    dst = copy.parent(dst).expect("`RawSBTree::clone()` - climbed above the root!");
                }
                WalkState::Root => {}
            }
            at = (src, state);
        }

        copy.header = Header {
            root: Some(copy_root),
            leftmost: Some(copy.leftmost(copy_root)),
            rightmost: Some(copy.rightmost(copy_root)),
            len: self.header.len,
        };
        log::debug!("cloned {} nodes", copy.header.len);
        copy
    }
}
