use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::mutex::Mutex;
use portable_atomic::{AtomicBool, AtomicU32, Ordering};

use crate::error::BusError;
use crate::guard::BusGuard;

/// Holder-transition bookkeeping shared with the guards.
pub(crate) struct HolderStats {
    held: AtomicBool,
    grants: AtomicU32,
    releases: AtomicU32,
}

impl HolderStats {
    const fn new() -> Self {
        Self {
            held: AtomicBool::new(false),
            grants: AtomicU32::new(0),
            releases: AtomicU32::new(0),
        }
    }

    pub(crate) fn note_grant(&self) {
        let was_held = self.held.swap(true, Ordering::AcqRel);
        debug_assert!(!was_held, "overlapping bus holders");
        self.grants.fetch_add(1, Ordering::AcqRel);
    }

    pub(crate) fn note_release(&self) {
        let was_held = self.held.swap(false, Ordering::AcqRel);
        debug_assert!(was_held, "release without grant");
        self.releases.fetch_add(1, Ordering::AcqRel);
    }
}

/// Mutual-exclusion arbiter over one exclusive bus resource.
///
/// Owns the bus peripheral `B` outright; the only way to touch it is
/// through a [`BusGuard`] obtained from [`grant`](Self::grant) or
/// [`try_grant`](Self::try_grant). At most one guard is alive at a time.
///
/// There is deliberately no timeout on `grant`: a holder that never
/// releases is a design bug, not a runtime condition to recover from.
pub struct BusArbiter<M: RawMutex, B> {
    bus: Mutex<M, B>,
    stats: HolderStats,
}

impl<M: RawMutex, B> BusArbiter<M, B> {
    /// Create a new arbiter owning the given bus resource.
    pub const fn new(bus: B) -> Self {
        Self { bus: Mutex::new(bus), stats: HolderStats::new() }
    }

    /// Acquire exclusive access to the bus, suspending until it is free.
    ///
    /// Waiters are served in the order they arrived; progress is guaranteed
    /// as long as every holder eventually drops its guard, which the RAII
    /// guard makes unconditional.
    pub async fn grant(&self) -> BusGuard<'_, M, B> {
        let inner = self.bus.lock().await;
        self.stats.note_grant();
        BusGuard::new(inner, &self.stats)
    }

    /// Acquire the bus only if it is free right now.
    pub fn try_grant(&self) -> Result<BusGuard<'_, M, B>, BusError> {
        let inner = self.bus.try_lock().map_err(|_| BusError::Contended)?;
        self.stats.note_grant();
        Ok(BusGuard::new(inner, &self.stats))
    }

    /// Returns `true` while a guard is alive.
    pub fn is_held(&self) -> bool {
        self.stats.held.load(Ordering::Acquire)
    }

    /// Total number of grants handed out so far.
    pub fn grant_count(&self) -> u32 {
        self.stats.grants.load(Ordering::Acquire)
    }

    /// Total number of releases observed so far.
    pub fn release_count(&self) -> u32 {
        self.stats.releases.load(Ordering::Acquire)
    }
}
