//! Simulated sensor drivers.
//!
//! Stand-ins for real bus-attached devices, with the same split as the
//! hardware drivers they model: a driver/ISR-side `service()` that makes
//! new data available, and the task-side [`Sensor`](crate::sensor::Sensor)
//! capability the acquisition loop consumes.

mod gyro;
mod thermo;

pub use gyro::SimGyro;
pub use thermo::{SimThermo, THERMO_CHANNELS};
