#![no_std]
//! Exclusive-access arbiter for a single shared peripheral bus.
//!
//! Several cooperative tasks talk to devices hanging off one physical bus.
//! The arbiter serializes their transactions: `grant()` suspends the caller
//! until the bus is free and hands back an RAII guard that releases the bus
//! on drop. Grant/release transitions are recorded so tests can assert that
//! holders never overlap and that every grant is paired with a release.

mod arbiter;
mod error;
mod guard;

pub use arbiter::BusArbiter;
pub use error::BusError;
pub use guard::BusGuard;
