#![forbid(unsafe_code)]

//! Flight paths for the selection hand-off.
//!
//! The selected reaction travels from its bubble to the host's target along
//! a parabola fitted through three points: the source, a raised midpoint,
//! and the target. [`QuadraticCurve::through`] solves the closed-form
//! coefficients; [`FlightPath`] falls back to a straight line when two of
//! the points share an x-coordinate and the parabola is undefined.

use crate::geometry::Point;

/// Distances below this are treated as equal x-coordinates.
const DEGENERATE_EPSILON: f64 = 1e-9;

/// `y = a·x² + b·x + c`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadraticCurve {
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

impl QuadraticCurve {
    /// Fit the unique parabola through three points.
    ///
    /// Returns `None` when any two points share an x-coordinate.
    pub fn through(p1: Point, p2: Point, p3: Point) -> Option<Self> {
        let (x1, y1, x2, y2, x3, y3) = (p1.x, p1.y, p2.x, p2.y, p3.x, p3.y);
        let denom = (x1 - x2) * (x1 - x3) * (x2 - x3);
        if denom.abs() < DEGENERATE_EPSILON || !denom.is_finite() {
            return None;
        }

        let a = (x3 * (y2 - y1) + x2 * (y1 - y3) + x1 * (y3 - y2)) / denom;
        let b = (x1 * x1 * (y2 - y3) + x3 * x3 * (y1 - y2) + x2 * x2 * (y3 - y1)) / denom;
        let c = (x2 * x2 * (x3 * y1 - x1 * y3)
            + x2 * (x1 * x1 * y3 - x3 * x3 * y1)
            + x1 * x3 * (x3 - x1) * y2)
            / denom;
        Some(Self { a, b, c })
    }

    /// Evaluate at `x`.
    #[inline]
    pub fn y_at(&self, x: f64) -> f64 {
        self.a * x * x + self.b * x + self.c
    }
}

/// Path from a source point to a target point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FlightPath {
    /// Parabolic arc; x moves linearly from source to target.
    Arc {
        source: Point,
        target: Point,
        curve: QuadraticCurve,
    },
    /// Straight-line interpolation.
    Straight { source: Point, target: Point },
}

impl FlightPath {
    /// Arc from `source` to `target` through a midpoint raised `lift` units
    /// above the source (y grows downward).
    pub fn arc(source: Point, target: Point, lift: f64) -> Self {
        let mid = Point::new((source.x + target.x) / 2.0, source.y - lift);
        match QuadraticCurve::through(source, mid, target) {
            Some(curve) => Self::Arc {
                source,
                target,
                curve,
            },
            None => Self::Straight { source, target },
        }
    }

    pub fn source(&self) -> Point {
        match *self {
            Self::Arc { source, .. } | Self::Straight { source, .. } => source,
        }
    }

    pub fn target(&self) -> Point {
        match *self {
            Self::Arc { target, .. } | Self::Straight { target, .. } => target,
        }
    }

    /// Point at parametric progress `k` in [0, 1].
    pub fn point_at(&self, k: f64) -> Point {
        let k = k.clamp(0.0, 1.0);
        match *self {
            Self::Arc {
                source,
                target,
                curve,
            } => {
                let x = source.x * (1.0 - k) + target.x * k;
                Point::new(x, curve.y_at(x))
            }
            Self::Straight { source, target } => source + (target - source) * k,
        }
    }

    /// `count` evenly spaced samples from source to target inclusive.
    pub fn keyframes(&self, count: usize) -> Vec<Point> {
        match count {
            0 => Vec::new(),
            1 => vec![self.target()],
            n => (0..n)
                .map(|i| self.point_at(i as f64 / (n - 1) as f64))
                .collect(),
        }
    }
}
