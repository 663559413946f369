//! Logging macros that compile to nothing without the `tracing` feature.

macro_rules! debug {
    ($($arg:tt)+) => {
        #[cfg(feature = "tracing")]
        {
            ::tracing::debug!($($arg)+);
        }
    };
}

macro_rules! info {
    ($($arg:tt)+) => {
        #[cfg(feature = "tracing")]
        {
            ::tracing::info!($($arg)+);
        }
    };
}

macro_rules! log_warn {
    ($($arg:tt)+) => {
        #[cfg(feature = "tracing")]
        {
            ::tracing::warn!($($arg)+);
        }
    };
}

pub(crate) use {debug, info, log_warn as warn};
