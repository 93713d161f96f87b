//! Logging shim.
//!
//! Routes to `defmt` on targets built with the `defmt` feature, to the
//! `log` crate when built with `log`, and compiles to nothing when neither
//! is enabled. Format strings must stick to the subset both backends
//! understand (`{}` / `{:?}`).

#[macro_export]
macro_rules! debug {
    ($($arg:expr),* $(,)?) => {{
        #[cfg(feature = "defmt")]
        ::defmt::debug!($($arg),*);
        #[cfg(all(feature = "log", not(feature = "defmt")))]
        ::log::debug!($($arg),*);
        #[cfg(not(any(feature = "defmt", feature = "log")))]
        { let _ = ($(&$arg),*); }
    }};
}

#[macro_export]
macro_rules! info {
    ($($arg:expr),* $(,)?) => {{
        #[cfg(feature = "defmt")]
        ::defmt::info!($($arg),*);
        #[cfg(all(feature = "log", not(feature = "defmt")))]
        ::log::info!($($arg),*);
        #[cfg(not(any(feature = "defmt", feature = "log")))]
        { let _ = ($(&$arg),*); }
    }};
}

#[macro_export]
macro_rules! warn {
    ($($arg:expr),* $(,)?) => {{
        #[cfg(feature = "defmt")]
        ::defmt::warn!($($arg),*);
        #[cfg(all(feature = "log", not(feature = "defmt")))]
        ::log::warn!($($arg),*);
        #[cfg(not(any(feature = "defmt", feature = "log")))]
        { let _ = ($(&$arg),*); }
    }};
}

#[macro_export]
macro_rules! error {
    ($($arg:expr),* $(,)?) => {{
        #[cfg(feature = "defmt")]
        ::defmt::error!($($arg),*);
        #[cfg(all(feature = "log", not(feature = "defmt")))]
        ::log::error!($($arg),*);
        #[cfg(not(any(feature = "defmt", feature = "log")))]
        { let _ = ($(&$arg),*); }
    }};
}
