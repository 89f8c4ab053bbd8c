#![forbid(unsafe_code)]

//! Piecewise-linear keyframe track.

use std::time::Duration;

use super::{Animation, Fade};
use crate::geometry::Point;

/// Samples a polyline of evenly timed keyframes over a fixed duration.
#[derive(Debug, Clone, PartialEq)]
pub struct Keyframes {
    points: Vec<Point>,
    timing: Fade,
}

impl Keyframes {
    /// Create a track through `points` lasting `duration`.
    #[must_use]
    pub fn new(points: Vec<Point>, duration: Duration) -> Self {
        Self {
            points,
            timing: Fade::new(duration),
        }
    }

    /// The keyframe values.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Position at the current time. An empty track samples the origin.
    pub fn sample(&self) -> Point {
        self.sample_at(self.timing.value())
    }

    /// Position at linear progress `t` in [0, 1].
    pub fn sample_at(&self, t: f64) -> Point {
        match self.points.as_slice() {
            [] => Point::ZERO,
            [only] => *only,
            points => {
                let segments = (points.len() - 1) as f64;
                let scaled = t.clamp(0.0, 1.0) * segments;
                let index = (scaled.floor() as usize).min(points.len() - 2);
                let local = scaled - index as f64;
                let (a, b) = (points[index], points[index + 1]);
                a + (b - a) * local
            }
        }
    }
}

impl Animation for Keyframes {
    fn tick(&mut self, dt: Duration) {
        self.timing.tick(dt);
    }

    fn is_complete(&self) -> bool {
        self.timing.is_complete()
    }

    fn value(&self) -> f64 {
        self.timing.value()
    }

    fn reset(&mut self) {
        self.timing.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn samples_between_keyframes() {
        let track = Keyframes::new(
            vec![Point::new(0.0, 0.0), Point::new(10.0, 0.0), Point::new(10.0, 10.0)],
            Duration::from_millis(100),
        );
        assert_eq!(track.sample_at(0.25), Point::new(5.0, 0.0));
        assert_eq!(track.sample_at(0.75), Point::new(10.0, 5.0));
        assert_eq!(track.sample_at(1.0), Point::new(10.0, 10.0));
    }

    #[test]
    fn ticks_to_last_keyframe() {
        let mut track = Keyframes::new(
            vec![Point::new(0.0, 0.0), Point::new(4.0, 8.0)],
            Duration::from_millis(300),
        );
        track.tick(Duration::from_millis(150));
        assert_eq!(track.sample(), Point::new(2.0, 4.0));
        track.tick(Duration::from_millis(200));
        assert!(track.is_complete());
        assert_eq!(track.sample(), Point::new(4.0, 8.0));
    }

    #[test]
    fn degenerate_tracks() {
        let empty = Keyframes::new(Vec::new(), Duration::from_millis(10));
        assert_eq!(empty.sample(), Point::ZERO);
        let single = Keyframes::new(vec![Point::new(3.0, 3.0)], Duration::from_millis(10));
        assert_eq!(single.sample_at(0.5), Point::new(3.0, 3.0));
    }
}
