//! Presentation model fed by the display task.

use core::fmt::Write;

use heapless::{String, Vec};

use crate::envelope::Envelope;
use crate::sensor::SensorId;
use crate::{warn, MAX_READINGS, MAX_SENSORS, NAME_CAP};

/// Capacity of one rendered frame.
pub const RENDER_CAP: usize = 256;

/// Last-known state of one sensor.
#[derive(Debug, Clone, PartialEq)]
pub struct Readout {
    name: String<NAME_CAP>,
    values: Vec<f32, MAX_READINGS>,
}

impl Readout {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn values(&self) -> &[f32] {
        &self.values
    }
}

/// Fixed-capacity slot table keyed by sensor id, written only by the
/// display task.
///
/// Slots are kept in arrival order, so rendering is deterministic for a
/// given update history: a refresh with no intervening sensor message
/// reproduces the previous frame exactly.
#[derive(Debug, Default)]
pub struct DisplayModel {
    slots: Vec<(SensorId, Readout), MAX_SENSORS>,
}

impl DisplayModel {
    pub const fn new() -> Self {
        Self { slots: Vec::new() }
    }

    /// Fold a sensor-data envelope into the model.
    pub fn update(&mut self, envelope: Envelope) {
        debug_assert!(!envelope.is_refresh());
        let Envelope { signal, name, values } = envelope;

        if let Some((_, readout)) =
            self.slots.iter_mut().find(|(id, _)| *id == signal)
        {
            readout.name = name;
            readout.values = values;
        } else if self
            .slots
            .push((signal, Readout { name, values }))
            .is_err()
        {
            warn!("display: no slot left for sensor {}", signal.0);
        }
    }

    /// Render the accumulated values into one frame.
    pub fn render(&self) -> String<RENDER_CAP> {
        let mut frame = String::new();
        for (id, readout) in self.slots.iter() {
            let _ = write!(frame, "{}#{}:", readout.name, id.0);
            for value in readout.values() {
                let _ = write!(frame, " {:.1}", value);
            }
            let _ = frame.push_str(" | ");
        }
        frame
    }

    pub fn sensor_count(&self) -> usize {
        self.slots.len()
    }

    pub fn readout(&self, id: SensorId) -> Option<&Readout> {
        self.slots
            .iter()
            .find(|(slot_id, _)| *slot_id == id)
            .map(|(_, readout)| readout)
    }
}
