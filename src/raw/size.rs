use super::handle::Handle;

/// Population of a subtree, stored in the same width as a [`Handle`].
///
/// A tree can never hold more nodes than there are handles, so every subtree
/// size fits.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(transparent)]
pub(crate) struct Size(Handle);

impl Size {
    pub(crate) const MAX: usize = Handle::MAX;
    #[cfg(test)]
    pub(crate) const ZERO: Self = Self::from_usize(0);
    pub(crate) const ONE: Self = Self::from_usize(1);

    #[inline]
    pub(crate) const fn from_usize(size: usize) -> Self {
        assert!(size <= Self::MAX, "`Size::from_usize()` - `size` > `Size::MAX`!");
        Self(Handle::from_index(size))
    }

    #[inline]
    pub(crate) const fn to_usize(self) -> usize {
        self.0.to_index()
    }

    #[inline]
    pub(crate) const fn increment(self) -> Self {
        Self::from_usize(self.to_usize() + 1)
    }

    #[inline]
    pub(crate) const fn decrement(self) -> Self {
        assert!(self.to_usize() > 0, "`Size::decrement()` - size is already zero!");
        Self::from_usize(self.to_usize() - 1)
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use static_assertions::assert_eq_size;

    assert_eq_size!(Size, Option<Size>);
    assert_eq_size!(Size, Handle);

    #[test]
    #[should_panic(expected = "`Size::from_usize()` - `size` > `Size::MAX`!")]
    fn invalid_size() {
        let _ = Size::from_usize(Size::MAX + 1);
    }

    #[test]
    #[should_panic(expected = "`Size::decrement()` - size is already zero!")]
    fn decrement_below_zero() {
        let _ = Size::ZERO.decrement();
    }

    #[test]
    fn increment_and_decrement() {
        assert_eq!(Size::ZERO.increment(), Size::ONE);
        assert_eq!(Size::ONE.decrement(), Size::ZERO);
        assert_eq!(Size::from_usize(41).increment().to_usize(), 42);
    }

    proptest! {
        #[test]
        fn size_round_trip(index in 0..=Size::MAX) {
            let size = Size::from_usize(index);
            assert_eq!(size.to_usize(), index);
        }
    }
}
