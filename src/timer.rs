//! Scoped phase timing on top of `tracing`.
//!
//! Without the `tracing` feature a timer is a zero-sized no-op.

#[cfg(feature = "tracing")]
use std::time::{Duration, Instant};

#[cfg(feature = "tracing")]
use tracing::span::EnteredSpan;

/// Enters a `debug` span for its lifetime and reports the elapsed wall time
/// when dropped.
#[cfg(feature = "tracing")]
pub(crate) struct ScopedTimer {
    label: &'static str,
    start: Instant,
    _span: EnteredSpan,
}

#[cfg(feature = "tracing")]
impl ScopedTimer {
    pub(crate) fn new(label: &'static str) -> Self {
        let span = tracing::debug_span!("phase", name = label).entered();
        Self {
            label,
            start: Instant::now(),
            _span: span,
        }
    }

    pub(crate) fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

#[cfg(feature = "tracing")]
impl Drop for ScopedTimer {
    fn drop(&mut self) {
        let elapsed = self.elapsed();
        tracing::debug!(
            phase = self.label,
            elapsed_us = u64::try_from(elapsed.as_micros()).unwrap_or(u64::MAX),
            "phase finished"
        );
    }
}

#[cfg(not(feature = "tracing"))]
pub(crate) struct ScopedTimer;

#[cfg(not(feature = "tracing"))]
impl ScopedTimer {
    #[inline(always)]
    pub(crate) fn new(_label: &'static str) -> Self {
        Self
    }
}


#[cfg(all(test, feature = "tracing"))]
mod tests {
    use super::*;

    #[test]
    fn timer_measures_its_scope() {
        let timer = ScopedTimer::new("sleep");
        std::thread::sleep(Duration::from_millis(2));
        assert!(timer.elapsed() >= Duration::from_millis(2));
    }
}
