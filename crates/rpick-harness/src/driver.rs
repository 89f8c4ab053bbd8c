#![forbid(unsafe_code)]

//! Fixed-step frame driver.
//!
//! Real hosts tick from a display link through
//! [`FrameClock`](rpick_core::clock::FrameClock); tests want exact,
//! repeatable frame times instead.

use std::time::Duration;

use rpick_widgets::{PickerSession, ReactionPicker};

/// Anything advanced once per frame.
pub trait Drive {
    /// Returns `true` while still animating.
    fn drive(&mut self, dt: Duration) -> bool;
}

impl Drive for ReactionPicker {
    fn drive(&mut self, dt: Duration) -> bool {
        self.tick(dt)
    }
}

impl Drive for PickerSession {
    fn drive(&mut self, dt: Duration) -> bool {
        self.tick(dt)
    }
}

/// Steps a [`Drive`] target at a constant frame interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameDriver {
    step: Duration,
}

impl Default for FrameDriver {
    /// 60 Hz rounded to whole milliseconds.
    fn default() -> Self {
        Self::new(Duration::from_millis(16))
    }
}

impl FrameDriver {
    pub fn new(step: Duration) -> Self {
        Self {
            step: step.max(Duration::from_micros(100)),
        }
    }

    pub fn step(&self) -> Duration {
        self.step
    }

    /// Run frames until at least `total` has elapsed. Returns the frame count.
    pub fn run(&self, target: &mut impl Drive, total: Duration) -> usize {
        let mut elapsed = Duration::ZERO;
        let mut frames = 0;
        while elapsed < total {
            target.drive(self.step);
            elapsed += self.step;
            frames += 1;
        }
        frames
    }

    /// Run until the target reports idle or `limit` elapses.
    ///
    /// Returns the time taken, or `None` if still animating at the limit.
    pub fn settle(&self, target: &mut impl Drive, limit: Duration) -> Option<Duration> {
        let mut elapsed = Duration::ZERO;
        while elapsed < limit {
            elapsed += self.step;
            if !target.drive(self.step) {
                return Some(elapsed);
            }
        }
        None
    }
}
