#![no_std]
//! Cooperative sensor acquisition and display pipeline.
//!
//! Several logically independent sensors share one exclusive peripheral
//! bus. Each sensor instance is driven by the same acquisition procedure,
//! parameterized entirely through a per-instance [`context::SensorContext`]:
//! the task waits for its trigger (a driver-signaled event or a polling
//! timeout), takes the bus through a [`bus_arbiter::BusArbiter`] grant,
//! polls and reads the sensor, and forwards the readings as an owned
//! [`envelope::Envelope`] to the display task's queue. A control task
//! mutates a sensor's active measurement channel in response to two
//! external stimulus signals, and the display task folds envelopes into a
//! presentation model that is re-rendered on a periodic refresh message.

mod util;

pub mod context;
pub mod display;
pub mod envelope;
pub mod error;
pub mod sensor;
pub mod sensors;
pub mod tasks;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::{Channel, Receiver, Sender};
use embassy_sync::signal::Signal;
use static_cell::StaticCell;

/// Maximum number of readings a single `read()` may produce.
pub const MAX_READINGS: usize = 8;
/// Fixed width of the sensor name copied into each envelope.
pub const NAME_CAP: usize = 8;
/// Depth of the display task's inbound envelope queue.
pub const QUEUE_DEPTH: usize = 10;
/// Maximum number of sensors the presentation model can track.
pub const MAX_SENSORS: usize = 8;

pub type HubMutexType = CriticalSectionRawMutex;

/// Signaled by a sensor driver when new data is available.
pub type DataReadySignal = Signal<HubMutexType, ()>;
/// External stimulus for the control task (one per direction).
pub type ControlSignal = Signal<HubMutexType, ()>;

pub type EnvelopeChannel =
    Channel<HubMutexType, envelope::Envelope, QUEUE_DEPTH>;
pub type EnvelopeSender<'a> =
    Sender<'a, HubMutexType, envelope::Envelope, QUEUE_DEPTH>;
pub type EnvelopeReceiver<'a> =
    Receiver<'a, HubMutexType, envelope::Envelope, QUEUE_DEPTH>;

static ENVELOPE_CHANNEL: StaticCell<EnvelopeChannel> = StaticCell::new();

/// One-time wiring helper for images that keep the display queue in a
/// static. Tests construct their own [`EnvelopeChannel`] locally instead.
pub fn init_envelope_channel(
) -> (EnvelopeSender<'static>, EnvelopeReceiver<'static>) {
    let channel = ENVELOPE_CHANNEL.init(Channel::new());
    (channel.sender(), channel.receiver())
}

pub mod prelude {
    pub use super::context::{SensorContext, SensorInfo};
    pub use super::display::DisplayModel;
    pub use super::envelope::Envelope;
    pub use super::error::{AcquireError, ConfigError};
    pub use super::sensor::{
        ChannelSelect, Sensor, SensorId, Trigger, REFRESH_ID,
    };
    pub use super::sensors::{SimGyro, SimThermo};
    pub use super::tasks::{
        acquisition_loop, control_loop, display_loop, refresh_loop,
        ChannelControls,
    };
    pub use super::{
        debug, error, info, init_envelope_channel, warn, ControlSignal,
        DataReadySignal, EnvelopeChannel, EnvelopeReceiver, EnvelopeSender,
        HubMutexType, MAX_READINGS, MAX_SENSORS, NAME_CAP, QUEUE_DEPTH,
    };

    pub use bus_arbiter::{BusArbiter, BusError, BusGuard};
    pub use embassy_sync::blocking_mutex::raw::{
        CriticalSectionRawMutex, NoopRawMutex,
    };
    pub use embassy_sync::mutex::Mutex;
    pub use embassy_time::{Duration, Timer};
}
