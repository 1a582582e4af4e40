use core::cmp::Ordering;

/// A strict weak ordering over `T`, expressed as a three-way comparison.
///
/// `a` is ordered before `b` exactly when `compare(a, b)` returns [`Ordering::Less`]; two
/// elements are equivalent when neither is ordered before the other. Any
/// `Fn(&T, &T) -> Ordering` closure is a comparator.
///
/// # Examples
///
/// ```
/// use sb_tree::SBTree;
///
/// let mut tree = SBTree::with_compare(|a: &i32, b: &i32| b.cmp(a));
/// tree.extend_unique([1, 3, 2]);
/// assert!(tree.iter().eq(&[3, 2, 1]));
/// ```
pub trait Compare<T: ?Sized> {
    /// Compares `a` with `b`.
    fn compare(&self, a: &T, b: &T) -> Ordering;
}

/// The comparator that orders elements by their [`Ord`] implementation.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct Natural;

impl<T: Ord + ?Sized> Compare<T> for Natural {
    #[inline]
    fn compare(&self, a: &T, b: &T) -> Ordering {
        a.cmp(b)
    }
}

impl<T: ?Sized, F> Compare<T> for F
where
    F: Fn(&T, &T) -> Ordering,
{
    #[inline]
    fn compare(&self, a: &T, b: &T) -> Ordering {
        self(a, b)
    }
}
