use core::ops::{Deref, DerefMut};

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::mutex::MutexGuard;

use crate::arbiter::HolderStats;

/// RAII token for exclusive bus access.
///
/// Dereferences to the bus resource. Dropping the guard releases the bus
/// and records the release transition, so a grant can never outlive one
/// poll+read cycle by accident.
pub struct BusGuard<'a, M: RawMutex, B> {
    inner: MutexGuard<'a, M, B>,
    stats: &'a HolderStats,
}

impl<'a, M: RawMutex, B> BusGuard<'a, M, B> {
    pub(crate) fn new(
        inner: MutexGuard<'a, M, B>,
        stats: &'a HolderStats,
    ) -> Self {
        Self { inner, stats }
    }

    /// Returns a reference to the underlying bus.
    #[inline]
    pub fn bus(&self) -> &B {
        &self.inner
    }
}

impl<M: RawMutex, B> Deref for BusGuard<'_, M, B> {
    type Target = B;

    #[inline]
    fn deref(&self) -> &B {
        &self.inner
    }
}

impl<M: RawMutex, B> DerefMut for BusGuard<'_, M, B> {
    #[inline]
    fn deref_mut(&mut self) -> &mut B {
        &mut self.inner
    }
}

impl<M: RawMutex, B> Drop for BusGuard<'_, M, B> {
    fn drop(&mut self) {
        // The flag clears before the inner mutex unlocks, so a waiter that
        // resumes immediately still observes the bus as free.
        self.stats.note_release();
    }
}
