use crate::MAX_READINGS;

/// Configuration errors, rejected when a sensor is registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// A periodic trigger with a zero period would never reschedule.
    ZeroPeriod,
    /// The monotonically increasing id space is exhausted. Ids are never
    /// reused, so this is permanent for the process lifetime.
    SensorIdsExhausted,
}

/// Fatal errors raised by a running acquisition loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AcquireError {
    /// `read()` reported more readings than the scratch buffer holds.
    /// The payload was truncated to [`MAX_READINGS`] before this was
    /// raised; the mismatch between descriptor and buffer size is a
    /// configuration bug, so the loop stops rather than truncating
    /// forever.
    ReadOverrun { reported: usize, capacity: usize },
}

impl AcquireError {
    pub(crate) fn overrun(reported: usize) -> Self {
        Self::ReadOverrun { reported, capacity: MAX_READINGS }
    }
}
