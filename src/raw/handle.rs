use core::num::NonZero;

// Tests run on a narrow handle so capacity limits are reachable.
#[cfg(test)]
type Slot = u16;
#[cfg(not(test))]
type Slot = u32;

/// Index of a node slot in the arena, stored off by one so that `Option<Handle>` (every
/// parent and child link) costs no more than the handle itself.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
#[repr(transparent)]
pub(crate) struct Handle(NonZero<Slot>);

impl Handle {
    /// The highest slot index a handle can name. `Slot::MAX` itself is unusable because of the
    /// off-by-one encoding.
    pub(crate) const MAX: usize = (Slot::MAX - 1) as usize;

    #[inline]
    pub(crate) const fn from_index(index: usize) -> Self {
        assert!(index <= Self::MAX, "`Handle::from_index()` - `index` > `Handle::MAX`!");
        // `index + 1` is nonzero and fits.
        #[allow(clippy::cast_possible_truncation)]
        let encoded = (index + 1) as Slot;
        match NonZero::new(encoded) {
            Some(encoded) => Self(encoded),
            None => unreachable!(),
        }
    }

    #[inline]
    pub(crate) const fn to_index(self) -> usize {
        self.0.get() as usize - 1
    }
}
