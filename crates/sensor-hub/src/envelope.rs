//! The fixed-schema message carried from producers to the display task.

use heapless::{String, Vec};

use crate::context::SensorInfo;
use crate::sensor::{SensorId, REFRESH_ID};
use crate::{MAX_READINGS, NAME_CAP};

/// One message to the display task.
///
/// Fully owned value type: readings are copied out of the producer's
/// scratch buffer at build time and the envelope is moved into the queue,
/// so no reference into producer state ever crosses the task boundary.
/// The payload count is bounded by the `Vec` capacity.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Envelope {
    /// Source sensor id, or [`REFRESH_ID`] for the refresh message.
    pub signal: SensorId,
    /// Fixed-width copy of the sensor name.
    pub name: String<NAME_CAP>,
    /// Numeric readings produced by the sensor's `read()`.
    pub values: Vec<f32, MAX_READINGS>,
}

impl Envelope {
    /// The periodic refresh message the display task posts to itself.
    pub fn refresh() -> Self {
        Self { signal: REFRESH_ID, name: String::new(), values: Vec::new() }
    }

    /// Build a sensor-data envelope, copying name and readings.
    ///
    /// The name is truncated to [`NAME_CAP`] and the readings to
    /// [`MAX_READINGS`]; overlong reads are flagged by the caller before
    /// it gets here.
    pub fn from_readings(info: SensorInfo, readings: &[f32]) -> Self {
        let mut name = String::new();
        for ch in info.name.chars() {
            if name.push(ch).is_err() {
                break;
            }
        }

        let take = readings.len().min(MAX_READINGS);
        let mut values = Vec::new();
        let _ = values.extend_from_slice(&readings[..take]);

        Self { signal: info.id, name, values }
    }

    pub fn is_refresh(&self) -> bool {
        self.signal == REFRESH_ID
    }

    /// Number of readings carried.
    pub fn count(&self) -> usize {
        self.values.len()
    }
}
