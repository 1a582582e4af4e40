use core::fmt;

use super::{Position, SBTree};

/// A read-only cursor over a `SBTree`.
///
/// A cursor always rests on an element or on the end position. Moving forward past the last
/// element reaches the end position; moving forward again wraps to the first element. Moving
/// backward mirrors this.
///
/// This `struct` is created by [`SBTree::cursor`], or from a [`CursorMut`] with
/// [`as_cursor`](CursorMut::as_cursor) or [`into_cursor`](CursorMut::into_cursor).
///
/// # Examples
///
/// ```
/// use sb_tree::SBTree;
///
/// let tree = SBTree::from([1, 2, 3]);
/// let mut cursor = tree.cursor(tree.find(&2));
/// assert_eq!(cursor.get(), Some(&2));
/// cursor.move_next();
/// assert_eq!(cursor.get(), Some(&3));
/// cursor.move_next();
/// assert_eq!(cursor.get(), None);
/// cursor.move_prev();
/// assert_eq!(cursor.index(), 2);
/// ```
pub struct Cursor<'a, T, C> {
    tree: &'a SBTree<T, C>,
    position: Position,
}

/// A cursor over a `SBTree` that can change or remove the element it rests on.
///
/// This `struct` is created by [`SBTree::cursor_mut`]. A `CursorMut` can be viewed as a
/// [`Cursor`], but not the other way around.
///
/// # Examples
///
/// ```
/// use sb_tree::SBTree;
///
/// let mut tree = SBTree::from([1, 2, 3, 4]);
/// let mut cursor = tree.cursor_mut(tree.begin());
/// while let Some(&value) = cursor.get() {
///     if value % 2 == 0 {
///         cursor.remove_current();
///     } else {
///         cursor.move_next();
///     }
/// }
/// assert!(tree.iter().eq(&[1, 3]));
/// ```
pub struct CursorMut<'a, T, C> {
    tree: &'a mut SBTree<T, C>,
    position: Position,
}

impl<'a, T, C> Cursor<'a, T, C> {
    pub(super) fn new(tree: &'a SBTree<T, C>, position: Position) -> Self {
        Cursor { tree, position }
    }

    /// Returns the position the cursor rests on.
    #[must_use]
    pub fn position(&self) -> Position {
        self.position
    }

    /// Returns the element the cursor rests on, or `None` at the end position.
    #[must_use]
    pub fn get(&self) -> Option<&'a T> {
        self.tree.get(self.position)
    }

    /// Returns the 0-based sorted index of the current element; `len()` at the end position.
    #[must_use]
    pub fn index(&self) -> usize {
        self.tree.index_of(self.position)
    }

    /// Moves to the next element, or from the last element to the end position, or from the
    /// end position to the first element.
    pub fn move_next(&mut self) {
        self.position = if self.position.is_end() {
            self.tree.begin()
        } else {
            self.tree.successor(self.position)
        };
    }

    /// Moves to the previous element, or from the first element to the end position, or
    /// from the end position to the last element.
    pub fn move_prev(&mut self) {
        self.position = self.tree.predecessor(self.position);
    }
}

impl<T, C> Clone for Cursor<'_, T, C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, C> Copy for Cursor<'_, T, C> {}

impl<T: fmt::Debug, C> fmt::Debug for Cursor<'_, T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Cursor").field(&self.get()).finish()
    }
}

impl<'a, T, C> CursorMut<'a, T, C> {
    pub(super) fn new(tree: &'a mut SBTree<T, C>, position: Position) -> Self {
        CursorMut { tree, position }
    }

    /// Returns the position the cursor rests on.
    #[must_use]
    pub fn position(&self) -> Position {
        self.position
    }

    /// Returns the element the cursor rests on, or `None` at the end position.
    #[must_use]
    pub fn get(&self) -> Option<&T> {
        self.tree.get(self.position)
    }

    /// Returns a mutable reference to the element the cursor rests on.
    ///
    /// The element must not be changed in a way that alters its ordering.
    #[must_use]
    pub fn get_mut(&mut self) -> Option<&mut T> {
        self.tree.get_mut(self.position)
    }

    /// Returns the 0-based sorted index of the current element; `len()` at the end position.
    #[must_use]
    pub fn index(&self) -> usize {
        self.tree.index_of(self.position)
    }

    /// Moves to the next element. See [`Cursor::move_next`].
    pub fn move_next(&mut self) {
        self.position = if self.position.is_end() {
            self.tree.begin()
        } else {
            self.tree.successor(self.position)
        };
    }

    /// Moves to the previous element. See [`Cursor::move_prev`].
    pub fn move_prev(&mut self) {
        self.position = self.tree.predecessor(self.position);
    }

    /// Removes the current element and moves to the one that followed it. Returns `None`,
    /// and does nothing, at the end position.
    pub fn remove_current(&mut self) -> Option<T> {
        let next = self.tree.successor_or_end(self.position);
        let value = self.tree.remove(self.position)?;
        self.position = next;
        Some(value)
    }

    /// Returns a read-only view of this cursor, borrowed for as long as the view lives.
    #[must_use]
    pub fn as_cursor(&self) -> Cursor<'_, T, C> {
        Cursor::new(&*self.tree, self.position)
    }

    /// Converts this cursor into a read-only cursor at the same position.
    #[must_use]
    pub fn into_cursor(self) -> Cursor<'a, T, C> {
        Cursor::new(self.tree, self.position)
    }
}

impl<T: fmt::Debug, C> fmt::Debug for CursorMut<'_, T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CursorMut").field(&self.get()).finish()
    }
}

impl<T, C> SBTree<T, C> {
    fn successor_or_end(&self, position: Position) -> Position {
        Position(position.0.and_then(|h| self.raw.successor(h)))
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn cursor_wraps_through_the_end_position() {
        let tree = SBTree::from([1, 2]);
        let mut cursor = tree.cursor(tree.end());
        cursor.move_next();
        assert_eq!(cursor.get(), Some(&1));
        cursor.move_prev();
        assert!(cursor.position().is_end());
        cursor.move_prev();
        assert_eq!(cursor.get(), Some(&2));
        assert_eq!(cursor.index(), 1);
    }

    #[test]
    fn cursor_mut_edits_in_place() {
        let mut tree = SBTree::from([10, 20, 30]);
        let mut cursor = tree.cursor_mut(tree.find(&20));
        if let Some(value) = cursor.get_mut() {
            *value += 1;
        }
        let view = cursor.as_cursor();
        assert_eq!(view.get(), Some(&21));
        assert_eq!(cursor.remove_current(), Some(21));
        assert_eq!(cursor.get(), Some(&30));
        cursor.move_next();
        assert_eq!(cursor.remove_current(), None);

        let cursor = cursor.into_cursor();
        assert_eq!(cursor.index(), 2);
        assert!(tree.iter().eq(&[10, 30]));
    }

    #[test]
    fn removing_the_last_element_leaves_the_cursor_at_end() {
        let mut tree = SBTree::from([1]);
        let mut cursor = tree.cursor_mut(tree.begin());
        assert_eq!(cursor.remove_current(), Some(1));
        assert!(cursor.position().is_end());
        drop(cursor);
        assert!(tree.is_empty());
        tree.raw.validate_invariants();
    }
}
