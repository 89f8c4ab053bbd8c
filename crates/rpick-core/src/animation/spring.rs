#![forbid(unsafe_code)]

//! Damped harmonic oscillator (spring) animation.
//!
//! Based on the classical damped spring equation:
//!
//!   m·a = -stiffness × (position - target) - damping × velocity
//!
//! # Parameters
//!
//! - **mass** (m): Inertia. The picker's pops use the host platform's
//!   convention of mass 5 and stiffness 900 with a caller-chosen damping.
//! - **stiffness** (k): Restoring force strength.
//! - **damping** (c): Velocity drag. Underdamped when c < 2√(k·m).
//! - **settle_after**: Optional hard cutoff. Once this much time has been
//!   simulated the spring snaps to its target, so a spring "with duration"
//!   always finishes on schedule.
//!
//! # Invariants
//!
//! 1. `position()` is the raw (unclamped) position; pops may overshoot 1.0.
//! 2. A spring at rest will not resume unless `set_target()` or `reset()`
//!    is called.
//! 3. `reset()` returns position to the initial value and zeroes velocity.
//! 4. Stiffness and mass are always positive (clamped on construction).
//!
//! # Failure Modes
//!
//! - Very large dt: subdivided into 4ms steps for stability.
//! - Zero damping without `settle_after`: oscillates forever and
//!   `is_complete()` never returns true.

use std::time::Duration;

use super::Animation;

/// Maximum dt per integration step (4ms).
const MAX_STEP_SECS: f64 = 0.004;

/// Position delta below which the spring is "at rest".
const DEFAULT_REST_THRESHOLD: f64 = 0.001;

/// Velocity below which (combined with position) the spring is at rest.
const DEFAULT_VELOCITY_THRESHOLD: f64 = 0.01;

/// Minimum stiffness / mass to prevent degenerate springs.
const MIN_POSITIVE: f64 = 0.1;

/// Mass used by [`Spring::pop`].
pub const POP_MASS: f64 = 5.0;

/// Stiffness used by [`Spring::pop`].
pub const POP_STIFFNESS: f64 = 900.0;

/// A damped harmonic oscillator producing physically-based motion.
///
/// ```
/// use std::time::Duration;
/// use rpick_core::animation::{Animation, Spring};
///
/// let mut spring = Spring::new(0.0, 1.0).with_stiffness(170.0).with_damping(26.0);
/// for _ in 0..120 {
///     spring.tick(Duration::from_millis(16));
/// }
/// assert!((spring.position() - 1.0).abs() < 0.01);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Spring {
    position: f64,
    velocity: f64,
    target: f64,
    initial: f64,
    mass: f64,
    stiffness: f64,
    damping: f64,
    rest_threshold: f64,
    velocity_threshold: f64,
    settle_after: Option<Duration>,
    elapsed: Duration,
    at_rest: bool,
}

impl Spring {
    /// Create a spring starting at `initial` and targeting `target`.
    ///
    /// Default parameters: mass = 1, stiffness = 170, damping = 26.
    #[must_use]
    pub fn new(initial: f64, target: f64) -> Self {
        Self {
            position: initial,
            velocity: 0.0,
            target,
            initial,
            mass: 1.0,
            stiffness: 170.0,
            damping: 26.0,
            rest_threshold: DEFAULT_REST_THRESHOLD,
            velocity_threshold: DEFAULT_VELOCITY_THRESHOLD,
            settle_after: None,
            elapsed: Duration::ZERO,
            at_rest: false,
        }
    }

    /// Create a spring animating from 0.0 to 1.0 (normalized).
    #[must_use]
    pub fn normalized() -> Self {
        Self::new(0.0, 1.0)
    }

    /// Normalized pop spring: mass 5, stiffness 900, the given damping, and
    /// a hard settle at `duration`.
    #[must_use]
    pub fn pop(duration: Duration, damping: f64) -> Self {
        Self::normalized()
            .with_mass(POP_MASS)
            .with_stiffness(POP_STIFFNESS)
            .with_damping(damping)
            .with_settle_after(duration)
    }

    /// Set mass (builder pattern). Clamped to minimum 0.1.
    #[must_use]
    pub fn with_mass(mut self, m: f64) -> Self {
        self.mass = m.max(MIN_POSITIVE);
        self
    }

    /// Set stiffness (builder pattern). Clamped to minimum 0.1.
    #[must_use]
    pub fn with_stiffness(mut self, k: f64) -> Self {
        self.stiffness = k.max(MIN_POSITIVE);
        self
    }

    /// Set damping (builder pattern). Clamped to minimum 0.0.
    #[must_use]
    pub fn with_damping(mut self, c: f64) -> Self {
        self.damping = c.max(0.0);
        self
    }

    /// Snap to the target once `duration` of simulated time has passed.
    #[must_use]
    pub fn with_settle_after(mut self, duration: Duration) -> Self {
        self.settle_after = Some(duration);
        self
    }

    /// Current position (unclamped).
    #[inline]
    #[must_use]
    pub fn position(&self) -> f64 {
        self.position
    }

    /// Current velocity.
    #[inline]
    #[must_use]
    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    /// Current target.
    #[inline]
    #[must_use]
    pub fn target(&self) -> f64 {
        self.target
    }

    /// Damping parameter.
    #[inline]
    #[must_use]
    pub fn damping(&self) -> f64 {
        self.damping
    }

    /// Change the target. Wakes the spring if it was at rest.
    pub fn set_target(&mut self, target: f64) {
        if (self.target - target).abs() > self.rest_threshold {
            self.target = target;
            self.at_rest = false;
        }
    }

    /// Whether the spring has settled at the target.
    #[inline]
    #[must_use]
    pub fn is_at_rest(&self) -> bool {
        self.at_rest
    }

    /// Critical damping coefficient for the current stiffness and mass.
    #[must_use]
    pub fn critical_damping(&self) -> f64 {
        2.0 * (self.stiffness * self.mass).sqrt()
    }

    /// Single semi-implicit Euler step of `dt` seconds.
    fn step(&mut self, dt: f64) {
        let displacement = self.position - self.target;
        let force = -self.stiffness * displacement - self.damping * self.velocity;
        self.velocity += force / self.mass * dt;
        self.position += self.velocity * dt;
    }

    fn settle(&mut self) {
        self.position = self.target;
        self.velocity = 0.0;
        self.at_rest = true;
    }

    /// Advance the spring by `dt`, subdividing for stability.
    pub fn advance(&mut self, dt: Duration) {
        if self.at_rest || dt.is_zero() {
            return;
        }

        let mut remaining = dt.as_secs_f64();
        while remaining > 0.0 {
            let step_dt = remaining.min(MAX_STEP_SECS);
            self.step(step_dt);
            remaining -= step_dt;
        }
        self.elapsed += dt;

        if self.settle_after.is_some_and(|limit| self.elapsed >= limit) {
            self.settle();
            return;
        }

        let pos_delta = (self.position - self.target).abs();
        if pos_delta < self.rest_threshold && self.velocity.abs() < self.velocity_threshold {
            self.settle();
        }
    }
}

impl Animation for Spring {
    fn tick(&mut self, dt: Duration) {
        self.advance(dt);
    }

    fn is_complete(&self) -> bool {
        self.at_rest
    }

    /// Raw position; pops overshoot past 1.0 before settling.
    fn value(&self) -> f64 {
        self.position
    }

    fn reset(&mut self) {
        self.position = self.initial;
        self.velocity = 0.0;
        self.elapsed = Duration::ZERO;
        self.at_rest = false;
    }
}
