//! Storage shared between the command context and the realtime loop.

use core::cell::RefCell;

use critical_section::Mutex;

use super::NvStorage;

/// A storage device guarded by a critical section.
///
/// Settings saves and steps saves both rewrite the version record, so each
/// save runs as one [`transaction`](Self::transaction): no other context can
/// touch the device between its version write and its payload write.
///
/// # Example
///
/// ```rust,ignore
/// static STORAGE: SharedStorage<MemoryStorage<4096>> = SharedStorage::new(MemoryStorage::new());
///
/// // realtime loop
/// STORAGE.transaction(|s| steps.save(s))?;
/// ```
pub struct SharedStorage<S> {
    inner: Mutex<RefCell<S>>,
}

impl<S: NvStorage> SharedStorage<S> {
    /// Wrap a device.
    pub const fn new(storage: S) -> Self {
        Self {
            inner: Mutex::new(RefCell::new(storage)),
        }
    }

    /// Run `f` with exclusive access to the device.
    ///
    /// # Panics
    ///
    /// Panics if called re-entrantly from inside another transaction on the
    /// same storage.
    pub fn transaction<R>(&self, f: impl FnOnce(&mut S) -> R) -> R {
        critical_section::with(|cs| {
            let mut storage = self.inner.borrow_ref_mut(cs);
            f(&mut storage)
        })
    }

    /// Take the device back.
    pub fn into_inner(self) -> S {
        self.inner.into_inner().into_inner()
    }
}
