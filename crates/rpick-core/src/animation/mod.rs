#![forbid(unsafe_code)]

//! Animation primitives.
//!
//! Everything here is a pure, tick-driven state machine: nothing reads a
//! clock. Hosts feed frame deltas through [`Animation::tick`] and read the
//! current value back.
//!
//! - [`Curve`]: the timing curves the picker uses (cubic-bezier control
//!   points matching the host platform's named curves).
//! - [`Fade`]: eased 0→1 progress over a fixed duration.
//! - [`Delayed`]: holds any animation at its start value for a delay.
//! - [`spring::Spring`]: damped harmonic oscillator.
//! - [`keyframes::Keyframes`]: piecewise-linear sampling through points.
//! - [`path`]: the quadratic fit used for the selection flight.
//!
//! # Invariants
//!
//! 1. `Fade::value()` is always in [0.0, 1.0].
//! 2. Once `is_complete()` returns true, further ticks do not change
//!    `value()` until `reset()`.
//! 3. Zero durations complete on the first tick (or immediately).

use std::time::Duration;

pub mod keyframes;
pub mod path;
pub mod spring;

pub use keyframes::Keyframes;
pub use path::{FlightPath, QuadraticCurve};
pub use spring::Spring;

/// A tick-driven animation producing a scalar value.
pub trait Animation {
    /// Advance the animation by `dt`.
    fn tick(&mut self, dt: Duration);

    /// Whether the animation has reached its end state.
    fn is_complete(&self) -> bool;

    /// Current value. Timed animations report eased progress in [0, 1];
    /// springs may overshoot.
    fn value(&self) -> f64;

    /// Return to the initial state.
    fn reset(&mut self);
}

// ---------------------------------------------------------------------------
// Curves
// ---------------------------------------------------------------------------

/// Named timing curves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Curve {
    /// Constant speed.
    Linear,
    /// Accelerating: cubic-bezier(0.42, 0, 1, 1).
    EaseIn,
    /// Decelerating: cubic-bezier(0, 0, 0.58, 1).
    EaseOut,
    /// S-curve: cubic-bezier(0.42, 0, 0.58, 1).
    #[default]
    EaseInOut,
}

impl Curve {
    /// Map linear time `t` in [0, 1] to eased progress.
    pub fn apply(self, t: f64) -> f64 {
        match self {
            Self::Linear => t.clamp(0.0, 1.0),
            Self::EaseIn => cubic_bezier(0.42, 0.0, 1.0, 1.0, t),
            Self::EaseOut => cubic_bezier(0.0, 0.0, 0.58, 1.0, t),
            Self::EaseInOut => cubic_bezier(0.42, 0.0, 0.58, 1.0, t),
        }
    }
}

/// Solve a unit cubic bezier for `y` at horizontal position `fraction`.
fn cubic_bezier(x1: f64, y1: f64, x2: f64, y2: f64, fraction: f64) -> f64 {
    if fraction <= 0.0 {
        return 0.0;
    }
    if fraction >= 1.0 {
        return 1.0;
    }

    let cx = 3.0 * x1;
    let bx = 3.0 * (x2 - x1) - cx;
    let ax = 1.0 - cx - bx;

    let cy = 3.0 * y1;
    let by = 3.0 * (y2 - y1) - cy;
    let ay = 1.0 - cy - by;

    let sample = |a: f64, b: f64, c: f64, t: f64| ((a * t + b) * t + c) * t;
    let derivative = |a: f64, b: f64, c: f64, t: f64| (3.0 * a * t + 2.0 * b) * t + c;

    // Newton-Raphson first; bisection when the slope flattens out.
    let mut t = fraction;
    let mut solved = false;
    for _ in 0..8 {
        let x = sample(ax, bx, cx, t) - fraction;
        if x.abs() < 1e-7 {
            solved = true;
            break;
        }
        let dx = derivative(ax, bx, cx, t);
        if dx.abs() < 1e-7 {
            break;
        }
        t = (t - x / dx).clamp(0.0, 1.0);
    }

    if !solved {
        let (mut lo, mut hi) = (0.0, 1.0);
        t = fraction;
        for _ in 0..24 {
            let delta = sample(ax, bx, cx, t) - fraction;
            if delta.abs() < 1e-7 {
                break;
            }
            if delta > 0.0 {
                hi = t;
            } else {
                lo = t;
            }
            t = 0.5 * (lo + hi);
        }
    }

    sample(ay, by, cy, t)
}

// ---------------------------------------------------------------------------
// Fade
// ---------------------------------------------------------------------------

/// Eased progress from 0.0 to 1.0 over a fixed duration.
#[derive(Debug, Clone, PartialEq)]
pub struct Fade {
    duration: Duration,
    elapsed: Duration,
    curve: Curve,
}

impl Fade {
    /// Create a linear fade of the given duration.
    #[must_use]
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            elapsed: Duration::ZERO,
            curve: Curve::Linear,
        }
    }

    /// Set the timing curve (builder pattern).
    #[must_use]
    pub fn curve(mut self, curve: Curve) -> Self {
        self.curve = curve;
        self
    }

    /// Total duration.
    #[inline]
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Time elapsed so far (never exceeds the duration).
    #[inline]
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Linear (un-eased) progress in [0, 1].
    pub fn linear_progress(&self) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        (self.elapsed.as_secs_f64() / self.duration.as_secs_f64()).clamp(0.0, 1.0)
    }
}

impl Animation for Fade {
    fn tick(&mut self, dt: Duration) {
        self.elapsed = (self.elapsed + dt).min(self.duration);
    }

    fn is_complete(&self) -> bool {
        self.elapsed >= self.duration
    }

    fn value(&self) -> f64 {
        self.curve.apply(self.linear_progress())
    }

    fn reset(&mut self) {
        self.elapsed = Duration::ZERO;
    }
}

// ---------------------------------------------------------------------------
// Delay
// ---------------------------------------------------------------------------

/// Holds an inner animation at its initial value until `delay` has passed.
#[derive(Debug, Clone)]
pub struct Delayed<A> {
    delay: Duration,
    waited: Duration,
    inner: A,
}

/// Wrap `animation` so it starts after `delay`.
#[must_use]
pub fn delay<A: Animation>(delay: Duration, animation: A) -> Delayed<A> {
    Delayed {
        delay,
        waited: Duration::ZERO,
        inner: animation,
    }
}

impl<A> Delayed<A> {
    /// The wrapped animation.
    pub fn inner(&self) -> &A {
        &self.inner
    }

    /// Whether the delay has fully elapsed.
    pub fn has_started(&self) -> bool {
        self.waited >= self.delay
    }
}

impl<A: Animation> Animation for Delayed<A> {
    fn tick(&mut self, dt: Duration) {
        let remaining = self.delay.saturating_sub(self.waited);
        if dt <= remaining {
            self.waited += dt;
            return;
        }
        self.waited = self.delay;
        self.inner.tick(dt - remaining);
    }

    fn is_complete(&self) -> bool {
        self.has_started() && self.inner.is_complete()
    }

    fn value(&self) -> f64 {
        self.inner.value()
    }

    fn reset(&mut self) {
        self.waited = Duration::ZERO;
        self.inner.reset();
    }
}
