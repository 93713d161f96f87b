//! Sensor capability interface and acquisition triggers.

use embassy_time::{Duration, Timer};
use portable_atomic::{AtomicU8, Ordering};

use crate::error::ConfigError;
use crate::DataReadySignal;

/// Message discriminant identifying one sensor instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SensorId(pub u8);

/// Reserved discriminant for the display task's periodic refresh message.
pub const REFRESH_ID: SensorId = SensorId(0);

static NEXT_SENSOR_ID: AtomicU8 = AtomicU8::new(1);

/// Allocate the next sensor id.
///
/// Ids start at 1 (0 is [`REFRESH_ID`]), increase monotonically, and are
/// never reused while the process lives.
pub fn alloc_sensor_id() -> Result<SensorId, ConfigError> {
    NEXT_SENSOR_ID
        .fetch_update(Ordering::AcqRel, Ordering::Acquire, |id| {
            (id != u8::MAX).then(|| id + 1)
        })
        .map(SensorId)
        .map_err(|_| ConfigError::SensorIdsExhausted)
}

/// Measurement-channel selection, the only sensor state the control task
/// touches. Split from [`Sensor`] so the control task does not need to
/// know anything about the bus.
pub trait ChannelSelect {
    /// Select the next measurement channel, wrapping at the end.
    fn next_channel(&mut self);
    /// Select the previous measurement channel, wrapping at the start.
    fn prev_channel(&mut self);
}

/// Data-acquisition capability of one sensor over the shared bus `B`.
///
/// `poll` and `read` are only ever called while the caller holds the bus
/// grant, so implementations may issue transactions freely.
pub trait Sensor<B>: ChannelSelect {
    /// Returns `true` when a new sample is ready.
    fn poll(&mut self, bus: &mut B) -> bool;

    /// Copy the latest readings into `out`, returning the count written.
    ///
    /// Reporting more than `out.len()` readings is a contract violation
    /// and terminates the acquisition loop with
    /// [`AcquireError::ReadOverrun`](crate::error::AcquireError).
    fn read(&mut self, bus: &mut B, out: &mut [f32]) -> usize;
}

/// How an acquisition loop re-arms between cycles.
///
/// The two modes are mutually exclusive by construction, and the loop body
/// is identical either way: it calls [`wait`](Self::wait) and the behavior
/// varies through this value, not through a branch in the task code.
#[derive(Clone, Copy)]
pub enum Trigger<'a> {
    /// Suspend until the driver signals new data.
    Event(&'a DataReadySignal),
    /// Suspend for a fixed interval, then poll.
    Periodic(Duration),
}

impl Trigger<'_> {
    /// The single wait primitive both acquisition modes funnel through.
    pub async fn wait(&self) {
        match self {
            Trigger::Event(signal) => signal.wait().await,
            Trigger::Periodic(period) => Timer::after(*period).await,
        }
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        match self {
            Trigger::Periodic(period) if period.as_ticks() == 0 => {
                Err(ConfigError::ZeroPeriod)
            }
            _ => Ok(()),
        }
    }
}
