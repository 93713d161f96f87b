use crate::sensor::{ChannelSelect, Sensor};

/// Polled three-axis rate sensor.
///
/// Has no data-ready line; the acquisition loop discovers new samples by
/// polling on a fixed period. Single measurement range, so channel
/// selection is a no-op.
#[derive(Debug, Default)]
pub struct SimGyro {
    rates: [f32; 3],
    fresh: bool,
}

impl SimGyro {
    pub fn new() -> Self {
        Self::default()
    }

    /// Driver-side service hook: latch a new x/y/z sample.
    pub fn service(&mut self, x: f32, y: f32, z: f32) {
        self.rates = [x, y, z];
        self.fresh = true;
    }
}

impl ChannelSelect for SimGyro {
    fn next_channel(&mut self) {}

    fn prev_channel(&mut self) {}
}

impl<B> Sensor<B> for SimGyro {
    fn poll(&mut self, _bus: &mut B) -> bool {
        self.fresh
    }

    fn read(&mut self, _bus: &mut B, out: &mut [f32]) -> usize {
        self.fresh = false;
        let count = self.rates.len().min(out.len());
        out[..count].copy_from_slice(&self.rates[..count]);
        count
    }
}
