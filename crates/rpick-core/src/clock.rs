#![forbid(unsafe_code)]

//! Frame delta source for hosts that drive presentation ticks.
//!
//! Springs and eased transitions integrate whatever `dt` they are given, so
//! a stalled frame (window drag, breakpoint, tab switch) would otherwise
//! teleport every animation to its end. [`FrameClock`] caps the delta it
//! hands out.

use std::time::Duration;

use web_time::Instant;

/// Largest delta handed out per frame (~30fps).
pub const MAX_FRAME_DELTA: Duration = Duration::from_millis(33);

/// Produces capped per-frame deltas from a monotonic clock.
#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Option<Instant>,
    max_delta: Duration,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock {
    /// A clock capped at [`MAX_FRAME_DELTA`].
    #[must_use]
    pub fn new() -> Self {
        Self {
            last: None,
            max_delta: MAX_FRAME_DELTA,
        }
    }

    /// Override the per-frame cap (builder pattern).
    #[must_use]
    pub fn with_max_delta(mut self, max_delta: Duration) -> Self {
        self.max_delta = max_delta;
        self
    }

    /// Delta since the previous call; zero on the first call.
    pub fn tick(&mut self) -> Duration {
        self.tick_at(Instant::now())
    }

    /// Delta since the previous call, using an explicit timestamp.
    pub fn tick_at(&mut self, now: Instant) -> Duration {
        let dt = self
            .last
            .map_or(Duration::ZERO, |last| now.saturating_duration_since(last));
        self.last = Some(now);
        if dt > self.max_delta {
            #[cfg(feature = "tracing")]
            tracing::trace!(
                dt_ms = dt.as_millis() as u64,
                cap_ms = self.max_delta.as_millis() as u64,
                "frame delta capped"
            );
            return self.max_delta;
        }
        dt
    }

    /// Forget the previous timestamp (e.g. after the picker was hidden).
    pub fn reset(&mut self) {
        self.last = None;
    }
}
