use crate::sensor::{ChannelSelect, Sensor};
use crate::DataReadySignal;

/// Number of measurement channels on the simulated thermometer.
pub const THERMO_CHANNELS: usize = 4;

/// Event-driven multi-channel temperature sensor.
///
/// The driver side calls [`service`](Self::service) when a conversion
/// completes; that stores the reading for the active channel and signals
/// data-ready, waking the acquisition loop's event trigger. The control
/// task moves the active channel through [`ChannelSelect`].
pub struct SimThermo<'a> {
    channels: [f32; THERMO_CHANNELS],
    current: usize,
    pending: bool,
    data_ready: &'a DataReadySignal,
}

impl<'a> SimThermo<'a> {
    pub fn new(data_ready: &'a DataReadySignal) -> Self {
        Self {
            channels: [0.0; THERMO_CHANNELS],
            current: 0,
            pending: false,
            data_ready,
        }
    }

    /// Driver-side service hook: record a completed conversion on the
    /// active channel and signal data-ready.
    pub fn service(&mut self, reading: f32) {
        self.channels[self.current] = reading;
        self.pending = true;
        self.data_ready.signal(());
    }

    pub fn current_channel(&self) -> usize {
        self.current
    }
}

impl ChannelSelect for SimThermo<'_> {
    fn next_channel(&mut self) {
        self.current = (self.current + 1) % THERMO_CHANNELS;
    }

    fn prev_channel(&mut self) {
        self.current = (self.current + THERMO_CHANNELS - 1) % THERMO_CHANNELS;
    }
}

impl<B> Sensor<B> for SimThermo<'_> {
    fn poll(&mut self, _bus: &mut B) -> bool {
        self.pending
    }

    fn read(&mut self, _bus: &mut B, out: &mut [f32]) -> usize {
        self.pending = false;
        if out.is_empty() {
            return 0;
        }
        out[0] = self.channels[self.current];
        1
    }
}
