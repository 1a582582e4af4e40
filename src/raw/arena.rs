use alloc::vec::Vec;

use super::handle::Handle;
use crate::Error;

/// Node storage for a tree: acquires a slot for one node, places the payload, and later
/// destroys it and releases the slot for reuse.
pub(crate) struct Arena<T> {
    slots: Vec<Option<T>>,
    free: Vec<Handle>,
}

impl<T> Arena<T> {
    pub(crate) const fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
        }
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity.min(Handle::MAX)),
            free: Vec::new(),
        }
    }

    pub(crate) fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    /// The largest number of live elements the arena can address.
    pub(crate) const fn max_size() -> usize {
        Handle::MAX
    }

    pub(crate) const fn len(&self) -> usize {
        self.slots.len().saturating_sub(self.free.len())
    }

    pub(crate) const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub(crate) fn try_alloc(&mut self, element: T) -> Result<Handle, Error> {
        if let Some(h) = self.free.pop() {
            // Reuse a free slot/handle.
            self.slots[h.to_index()] = Some(element);
            return Ok(h);
        }

        // Strict less-than keeps the element count within `Size::MAX`.
        if self.slots.len() >= Handle::MAX {
            log::warn!("node arena is at maximum capacity ({})", Handle::MAX);
            return Err(Error::CapacityOverflow);
        }
        if self.slots.try_reserve(1).is_err() {
            log::warn!("node arena could not grow beyond {} slots", self.slots.len());
            return Err(Error::AllocFailed);
        }

        self.slots.push(Some(element));
        Ok(Handle::from_index(self.slots.len() - 1))
    }

    pub(crate) fn alloc(&mut self, element: T) -> Handle {
        match self.try_alloc(element) {
            Ok(handle) => handle,
            Err(err) => panic!("`Arena::alloc()` - {err}!"),
        }
    }

    #[inline]
    pub(crate) fn get(&self, handle: Handle) -> &T {
        self.slots[handle.to_index()].as_ref().expect("`Arena::get()` - `handle` is invalid!")
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, handle: Handle) -> &mut T {
        self.slots[handle.to_index()].as_mut().expect("`Arena::get_mut()` - `handle` is invalid!")
    }

    pub(crate) fn take(&mut self, handle: Handle) -> T {
        let element = self.slots[handle.to_index()].take().expect("`Arena::take()` - `handle` is invalid!");
        self.free.push(handle);
        element
    }

    /// Drops the element without recycling its slot. Only for teardown, and must be followed
    /// by [`Arena::clear`], since `len` counts the vacated slot until then.
    pub(crate) fn discard(&mut self, handle: Handle) {
        let element = self.slots[handle.to_index()].take();
        assert!(element.is_some(), "`Arena::discard()` - `handle` is invalid!");
    }

    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
    }
}
