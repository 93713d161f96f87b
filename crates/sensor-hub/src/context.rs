//! Per-instance state binding one sensor to one acquisition loop.

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::mutex::Mutex;

use crate::error::ConfigError;
use crate::sensor::{alloc_sensor_id, SensorId, Trigger};
use crate::{EnvelopeSender, MAX_READINGS};

/// Immutable identity of a registered sensor instance.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SensorInfo {
    /// Short display name, copied into every envelope.
    pub name: &'static str,
    /// Unique id, assigned once at registration.
    pub id: SensorId,
}

/// Mutable per-instance state for one acquisition loop.
///
/// Created once at startup per sensor instance and handed to exactly one
/// [`acquisition_loop`](crate::tasks::acquisition_loop) call, which is its
/// single writer. The sensor itself sits behind a mutex because the
/// control task also reaches it to switch channels; the scratch buffer is
/// private to this context and never shared.
pub struct SensorContext<'a, M: RawMutex, S> {
    pub(crate) info: SensorInfo,
    pub(crate) sensor: &'a Mutex<M, S>,
    pub(crate) trigger: Trigger<'a>,
    pub(crate) scratch: [f32; MAX_READINGS],
    pub(crate) last_count: usize,
    pub(crate) overruns: u32,
    pub(crate) sink: EnvelopeSender<'a>,
}

impl<'a, M: RawMutex, S> SensorContext<'a, M, S> {
    /// Register a sensor instance: validate the trigger, allocate an id,
    /// and bind the destination queue.
    pub fn new(
        name: &'static str,
        sensor: &'a Mutex<M, S>,
        trigger: Trigger<'a>,
        sink: EnvelopeSender<'a>,
    ) -> Result<Self, ConfigError> {
        trigger.validate()?;
        let id = alloc_sensor_id()?;
        Ok(Self {
            info: SensorInfo { name, id },
            sensor,
            trigger,
            scratch: [0.0; MAX_READINGS],
            last_count: 0,
            overruns: 0,
            sink,
        })
    }

    pub fn info(&self) -> SensorInfo {
        self.info
    }

    /// Readings carried by the most recent successful cycle.
    pub fn last_count(&self) -> usize {
        self.last_count
    }

    /// Number of truncated over-capacity reads observed.
    pub fn overruns(&self) -> u32 {
        self.overruns
    }
}
