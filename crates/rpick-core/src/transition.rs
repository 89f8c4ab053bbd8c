#![forbid(unsafe_code)]

//! Transition descriptors and the committed/presented property model.
//!
//! Every visual property the picker drives is an [`AnimatedValue`] holding
//! two values:
//!
//! - **committed**: the logical value, written synchronously by layout code
//!   and authoritative the instant a layout call returns.
//! - **presented**: what a renderer should draw on the current frame. Only
//!   [`AnimatedValue::tick`] moves it toward the committed value.
//!
//! Layout code never awaits presentation. A new `update` issued while an
//! earlier transition is still in flight begins from the presented value
//! ([`BeginFrom::Current`]) so overlapping transitions compose instead of
//! jumping.
//!
//! # Invariants
//!
//! 1. `Transition::Immediate` sets committed and presented together.
//! 2. When no transition is in flight, `presented == committed`.
//! 3. `animate_from` never changes the committed value.
//! 4. Re-committing the current committed value is a no-op: an in-flight
//!    transition (an entrance spring, say) keeps running.

use std::time::Duration;

use crate::animation::{Animation, Curve, Delayed, Fade, Spring, delay};
use crate::geometry::{Point, Rect, Size};

// ---------------------------------------------------------------------------
// Transition descriptor
// ---------------------------------------------------------------------------

/// How a committed value change is presented.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Transition {
    /// Snap: presented value equals the new committed value at once.
    #[default]
    Immediate,
    /// Timed, eased interpolation, optionally delayed.
    Animated {
        duration: Duration,
        curve: Curve,
        delay: Duration,
    },
    /// Normalized pop spring that settles at `duration`.
    Spring { duration: Duration, damping: f64 },
}

impl Transition {
    /// A timed transition with no delay.
    #[must_use]
    pub const fn animated(duration: Duration, curve: Curve) -> Self {
        Self::Animated {
            duration,
            curve,
            delay: Duration::ZERO,
        }
    }

    /// A spring transition.
    #[must_use]
    pub const fn spring(duration: Duration, damping: f64) -> Self {
        Self::Spring { duration, damping }
    }

    /// Add a start delay. No effect on `Immediate` or `Spring`.
    #[must_use]
    pub fn with_delay(self, start_after: Duration) -> Self {
        match self {
            Self::Animated {
                duration, curve, ..
            } => Self::Animated {
                duration,
                curve,
                delay: start_after,
            },
            other => other,
        }
    }

    /// Whether this transition animates at all.
    #[inline]
    pub fn is_animated(&self) -> bool {
        !matches!(self, Self::Immediate)
    }

    fn motion(&self) -> Option<Motion> {
        match *self {
            Self::Immediate => None,
            Self::Animated {
                duration,
                curve,
                delay: start_after,
            } => Some(Motion::Timed(delay(start_after, Fade::new(duration).curve(curve)))),
            Self::Spring { duration, damping } => {
                Some(Motion::Spring(Spring::pop(duration, damping)))
            }
        }
    }
}

/// Where a new animation starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BeginFrom {
    /// From the value currently on screen (in-flight presented value).
    #[default]
    Current,
    /// From the previously committed value, discarding in-flight progress.
    Committed,
}

#[derive(Debug, Clone)]
enum Motion {
    Timed(Delayed<Fade>),
    Spring(Spring),
}

impl Motion {
    fn tick(&mut self, dt: Duration) {
        match self {
            Self::Timed(a) => a.tick(dt),
            Self::Spring(a) => a.tick(dt),
        }
    }

    fn is_complete(&self) -> bool {
        match self {
            Self::Timed(a) => a.is_complete(),
            Self::Spring(a) => a.is_complete(),
        }
    }

    fn value(&self) -> f64 {
        match self {
            Self::Timed(a) => a.value(),
            Self::Spring(a) => a.value(),
        }
    }
}

// ---------------------------------------------------------------------------
// Interpolation
// ---------------------------------------------------------------------------

/// Linear interpolation between two values. `t` may leave [0, 1] for springs.
pub trait Interpolate: Copy + PartialEq {
    fn interpolate(&self, to: &Self, t: f64) -> Self;
}

impl Interpolate for f64 {
    #[inline]
    fn interpolate(&self, to: &Self, t: f64) -> Self {
        self + (to - self) * t
    }
}

impl Interpolate for Point {
    #[inline]
    fn interpolate(&self, to: &Self, t: f64) -> Self {
        Point::new(self.x.interpolate(&to.x, t), self.y.interpolate(&to.y, t))
    }
}

impl Interpolate for Size {
    #[inline]
    fn interpolate(&self, to: &Self, t: f64) -> Self {
        Size::new(
            self.width.interpolate(&to.width, t),
            self.height.interpolate(&to.height, t),
        )
    }
}

impl Interpolate for Rect {
    #[inline]
    fn interpolate(&self, to: &Self, t: f64) -> Self {
        Rect::from_origin_size(
            self.origin.interpolate(&to.origin, t),
            self.size.interpolate(&to.size, t),
        )
    }
}

// ---------------------------------------------------------------------------
// AnimatedValue
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
struct InFlight<T> {
    from: T,
    motion: Motion,
}

/// A property with separate committed and presented values.
#[derive(Debug, Clone)]
pub struct AnimatedValue<T> {
    committed: T,
    presented: T,
    in_flight: Option<InFlight<T>>,
}

impl<T: Interpolate> AnimatedValue<T> {
    /// A settled value.
    pub fn new(value: T) -> Self {
        Self {
            committed: value,
            presented: value,
            in_flight: None,
        }
    }

    /// The logical value.
    #[inline]
    pub fn committed(&self) -> T {
        self.committed
    }

    /// The value to draw this frame.
    #[inline]
    pub fn presented(&self) -> T {
        self.presented
    }

    /// Whether a transition is in flight.
    #[inline]
    pub fn is_animating(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Commit `target`, presenting the change through `transition`.
    ///
    /// Does nothing when `target` already is the committed value.
    pub fn update(&mut self, target: T, transition: &Transition, begin: BeginFrom) {
        if target == self.committed {
            return;
        }
        let previous = self.committed;
        self.committed = target;
        match transition.motion() {
            None => {
                self.presented = target;
                self.in_flight = None;
            }
            Some(motion) => {
                let from = match begin {
                    BeginFrom::Current => self.presented,
                    BeginFrom::Committed => previous,
                };
                self.presented = from;
                self.in_flight = Some(InFlight { from, motion });
            }
        }
    }

    /// Play `from` → committed without changing the committed value.
    pub fn animate_from(&mut self, from: T, transition: &Transition) {
        if let Some(motion) = transition.motion() {
            self.presented = from;
            self.in_flight = Some(InFlight { from, motion });
        }
    }

    /// Advance presentation. Returns `true` while still animating.
    pub fn tick(&mut self, dt: Duration) -> bool {
        let Some(flight) = self.in_flight.as_mut() else {
            return false;
        };
        flight.motion.tick(dt);
        if flight.motion.is_complete() {
            self.presented = self.committed;
            self.in_flight = None;
            return false;
        }
        self.presented = flight.from.interpolate(&self.committed, flight.motion.value());
        true
    }
}

impl<T: Interpolate + Default> Default for AnimatedValue<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

// ---------------------------------------------------------------------------
// Layer
// ---------------------------------------------------------------------------

/// Visual handle for one drawable element.
///
/// Geometry is stored as a centre position plus bounds size so that scale
/// animations pivot around the centre.
#[derive(Debug, Clone)]
pub struct Layer {
    position: AnimatedValue<Point>,
    size: AnimatedValue<Size>,
    scale: AnimatedValue<f64>,
    alpha: AnimatedValue<f64>,
    hidden: bool,
}

impl Default for Layer {
    fn default() -> Self {
        Self::new()
    }
}

impl Layer {
    /// An empty, fully opaque, unscaled layer at the origin.
    pub fn new() -> Self {
        Self {
            position: AnimatedValue::new(Point::ZERO),
            size: AnimatedValue::new(Size::ZERO),
            scale: AnimatedValue::new(1.0),
            alpha: AnimatedValue::new(1.0),
            hidden: false,
        }
    }

    /// A layer placed at `frame`.
    #[must_use]
    pub fn with_frame(mut self, frame: Rect) -> Self {
        self.set_frame(frame, &Transition::Immediate);
        self
    }

    /// Committed frame (unscaled bounds around the committed centre).
    pub fn frame(&self) -> Rect {
        Rect::from_center(self.position.committed(), self.size.committed())
    }

    /// Presented frame, including presented scale.
    pub fn presented_frame(&self) -> Rect {
        Rect::from_center(
            self.position.presented(),
            self.size.presented().scaled(self.scale.presented()),
        )
    }

    pub fn set_frame(&mut self, frame: Rect, transition: &Transition) {
        self.position
            .update(frame.center(), transition, BeginFrom::Current);
        self.size.update(frame.size, transition, BeginFrom::Current);
    }

    pub fn set_position(&mut self, center: Point, transition: &Transition) {
        self.position.update(center, transition, BeginFrom::Current);
    }

    pub fn set_scale(&mut self, scale: f64, transition: &Transition) {
        self.scale.update(scale, transition, BeginFrom::Current);
    }

    pub fn set_alpha(&mut self, alpha: f64, transition: &Transition) {
        self.alpha
            .update(alpha.clamp(0.0, 1.0), transition, BeginFrom::Current);
    }

    pub fn set_hidden(&mut self, hidden: bool) {
        self.hidden = hidden;
    }

    #[inline]
    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    pub fn position(&self) -> &AnimatedValue<Point> {
        &self.position
    }

    pub fn position_mut(&mut self) -> &mut AnimatedValue<Point> {
        &mut self.position
    }

    pub fn size(&self) -> &AnimatedValue<Size> {
        &self.size
    }

    pub fn scale(&self) -> &AnimatedValue<f64> {
        &self.scale
    }

    pub fn scale_mut(&mut self) -> &mut AnimatedValue<f64> {
        &mut self.scale
    }

    pub fn alpha(&self) -> &AnimatedValue<f64> {
        &self.alpha
    }

    pub fn alpha_mut(&mut self) -> &mut AnimatedValue<f64> {
        &mut self.alpha
    }

    /// Whether any property is mid-transition.
    pub fn is_animating(&self) -> bool {
        self.position.is_animating()
            || self.size.is_animating()
            || self.scale.is_animating()
            || self.alpha.is_animating()
    }

    /// Advance every property. Returns `true` while any is still animating.
    pub fn tick(&mut self, dt: Duration) -> bool {
        // Non-short-circuiting: every property must advance.
        let moving = [
            self.position.tick(dt),
            self.size.tick(dt),
            self.scale.tick(dt),
            self.alpha.tick(dt),
        ];
        moving.contains(&true)
    }
}
