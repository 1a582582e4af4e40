use super::handle::Handle;
use super::size::Size;

/// One element of the tree.
///
/// `left` and `right` are the owning edges of the node graph; `parent` is a back-reference
/// used only for navigation and is never followed to release storage.
pub(crate) struct Node<T> {
    value: T,
    parent: Option<Handle>,
    left: Option<Handle>,
    right: Option<Handle>,
    // The number of nodes in the subtree rooted here, including this one.
    size: Size,
}

impl<T> Node<T> {
    /// Creates a detached leaf holding `value`.
    pub(crate) fn new(value: T) -> Self {
        Self {
            value,
            parent: None,
            left: None,
            right: None,
            size: Size::ONE,
        }
    }

    /// Creates a detached node that claims a subtree of `size` nodes, for structural copies.
    pub(crate) fn with_size(value: T, parent: Option<Handle>, size: Size) -> Self {
        Self {
            value,
            parent,
            left: None,
            right: None,
            size,
        }
    }

    #[inline]
    pub(crate) fn value(&self) -> &T {
        &self.value
    }

    #[inline]
    pub(crate) fn value_mut(&mut self) -> &mut T {
        &mut self.value
    }

    pub(crate) fn into_value(self) -> T {
        self.value
    }

    #[inline]
    pub(crate) fn parent(&self) -> Option<Handle> {
        self.parent
    }

    #[inline]
    pub(crate) fn set_parent(&mut self, parent: Option<Handle>) {
        self.parent = parent;
    }

    #[inline]
    pub(crate) fn left(&self) -> Option<Handle> {
        self.left
    }

    #[inline]
    pub(crate) fn set_left(&mut self, left: Option<Handle>) {
        self.left = left;
    }

    #[inline]
    pub(crate) fn right(&self) -> Option<Handle> {
        self.right
    }

    #[inline]
    pub(crate) fn set_right(&mut self, right: Option<Handle>) {
        self.right = right;
    }

    /// Returns the child on `side`.
    #[inline]
    pub(crate) fn child(&self, side: Side) -> Option<Handle> {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    #[inline]
    pub(crate) fn set_child(&mut self, side: Side, child: Option<Handle>) {
        match side {
            Side::Left => self.left = child,
            Side::Right => self.right = child,
        }
    }

    #[inline]
    pub(crate) fn size(&self) -> Size {
        self.size
    }

    #[inline]
    pub(crate) fn set_size(&mut self, size: Size) {
        self.size = size;
    }
}

/// One of the two child edges of a node.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Side {
    Left,
    Right,
}

impl Side {
    pub(crate) const fn opposite(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// The sentinel: the anchor for the end position and O(1) access to root, minimum and
/// maximum. It never holds a value.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct Header {
    /// The root node; `None` when the tree is empty.
    pub(crate) root: Option<Handle>,
    /// The leftmost (minimum) node; `None` when the tree is empty.
    pub(crate) leftmost: Option<Handle>,
    /// The rightmost (maximum) node; `None` when the tree is empty.
    pub(crate) rightmost: Option<Handle>,
    /// Number of elements; always equal to the root's subtree size.
    pub(crate) len: usize,
}

impl Header {
    pub(crate) const fn new() -> Self {
        Self {
            root: None,
            leftmost: None,
            rightmost: None,
            len: 0,
        }
    }

    /// Resets the sentinel to the empty state.
    pub(crate) fn reset(&mut self) {
        *self = Self::new();
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn new_node_is_a_detached_leaf() {
        let node = Node::new(7);
        assert_eq!(*node.value(), 7);
        assert!(node.parent().is_none());
        assert!(node.left().is_none());
        assert!(node.right().is_none());
        assert_eq!(node.size(), Size::ONE);
    }

    #[test]
    fn child_by_side() {
        let mut node = Node::new(0);
        let h = Handle::from_index(3);
        node.set_child(Side::Right, Some(h));
        assert_eq!(node.child(Side::Right), Some(h));
        assert_eq!(node.right(), Some(h));
        assert!(node.child(Side::Right.opposite()).is_none());
    }

    #[test]
    fn header_reset() {
        let mut header = Header::new();
        header.root = Some(Handle::from_index(0));
        header.len = 1;
        header.reset();
        assert_eq!(header, Header::default());
    }
}
