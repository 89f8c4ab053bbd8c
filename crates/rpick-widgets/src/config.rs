#![forbid(unsafe_code)]

//! Picker tuning constants.
//!
//! Every number the layout and choreography use lives here so hosts can
//! restyle the picker without touching the state machine. Defaults reproduce
//! the stock look.

use std::time::Duration;

use rpick_core::animation::Curve;
use rpick_core::transition::Transition;

/// Configuration validation failure.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("{field} must be positive, got {value}")]
    NonPositive { field: &'static str, value: f64 },
    #[error("minimized size bounds are inverted: {min} > {max}")]
    InvertedBounds { min: f64, max: f64 },
    #[error("flight path needs at least 2 keyframes, got {0}")]
    TooFewKeyframes(usize),
}

/// Layout and animation tuning for [`ReactionPicker`](crate::ReactionPicker).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PickerConfig {
    /// Diameter of the magnified bubble.
    pub maximized_size: f64,
    /// Lower clamp for the computed minimized bubble size.
    pub minimized_size_min: f64,
    /// Upper clamp for the computed minimized bubble size.
    pub minimized_size_max: f64,
    /// Gap between bubbles as a fraction of the minimized size.
    pub spacing_ratio: f64,
    /// Container height as a multiple of the minimized size.
    pub background_ratio: f64,
    /// Shadow blur as a fraction of the minimized size.
    pub shadow_blur_ratio: f64,
    /// Gap between the container's bottom edge and the press point.
    pub vertical_gap: f64,
    /// Extra width given to the magnified slot (split evenly per side).
    pub maximized_extra_width: f64,
    /// Diameter unit of the tracking bubbles.
    pub tracking_circle_size: f64,
    /// Offset of the secondary tracking bubble from the main one.
    pub tracking_bubble_offset: f64,
    /// Height the floating label rises above the bubble's top edge.
    pub label_lift: f64,
    /// Horizontal padding added to the measured label text.
    pub label_padding: f64,
    /// Height of the label capsule.
    pub label_height: f64,
    /// Screen pixel density; icons render larger on 3× screens.
    pub display_scale: f64,
    /// Duration of the magnify/shrink transition while dragging.
    pub highlight_duration: Duration,
    /// Curve of the magnify/shrink transition.
    pub highlight_curve: Curve,
    /// Tracking bubble pop duration on entrance.
    pub bubble_pop_duration: Duration,
    /// Delay before the secondary tracking bubble pops.
    pub bubble_pop_stagger: Duration,
    /// Base duration of entrance springs.
    pub entrance_duration: Duration,
    /// Extra spring duration for the view farthest from the anchor side.
    pub entrance_stagger: Duration,
    /// Damping of entrance springs.
    pub entrance_damping: f64,
    /// Inset of the entrance slide origin from the container's centre line.
    pub entrance_slide_inset: f64,
    /// Vertical slide distance for reaction views on entrance.
    pub entrance_view_drop: f64,
    /// Fade/shrink duration of the container on exit.
    pub exit_duration: Duration,
    /// Duration of the selection flight.
    pub flight_duration: Duration,
    /// Fade-out duration of the flying snapshot.
    pub flight_snapshot_fade: Duration,
    /// Fade-in duration of the target ghost.
    pub flight_ghost_fade: Duration,
    /// Height of the flight arc's midpoint above the source.
    pub flight_lift: f64,
    /// Number of keyframes sampled along the arc.
    pub flight_keyframes: usize,
    /// Damping of the target's arrival pop.
    pub arrival_damping: f64,
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            maximized_size: 60.0,
            minimized_size_min: 16.0,
            minimized_size_max: 30.0,
            spacing_ratio: 0.2,
            background_ratio: 1.4,
            shadow_blur_ratio: 0.26,
            vertical_gap: 16.0,
            maximized_extra_width: 18.0,
            tracking_circle_size: 8.0,
            tracking_bubble_offset: 10.0,
            label_lift: 24.0,
            label_padding: 12.0,
            label_height: 20.0,
            display_scale: 2.0,
            highlight_duration: Duration::from_millis(180),
            highlight_curve: Curve::EaseInOut,
            bubble_pop_duration: Duration::from_millis(110),
            bubble_pop_stagger: Duration::from_millis(50),
            entrance_duration: Duration::from_millis(500),
            entrance_stagger: Duration::from_millis(280),
            entrance_damping: 100.0,
            entrance_slide_inset: 42.0,
            entrance_view_drop: 30.0,
            exit_duration: Duration::from_millis(200),
            flight_duration: Duration::from_millis(300),
            flight_snapshot_fade: Duration::from_millis(250),
            flight_ghost_fade: Duration::from_millis(200),
            flight_lift: 30.0,
            flight_keyframes: 10,
            arrival_damping: 90.0,
        }
    }
}

impl PickerConfig {
    /// Create a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the magnified bubble diameter.
    #[must_use]
    pub fn maximized_size(mut self, size: f64) -> Self {
        self.maximized_size = size;
        self
    }

    /// Set the clamp range for the minimized bubble diameter.
    #[must_use]
    pub fn minimized_size_range(mut self, min: f64, max: f64) -> Self {
        self.minimized_size_min = min;
        self.minimized_size_max = max;
        self
    }

    /// Set the screen pixel density.
    #[must_use]
    pub fn display_scale(mut self, scale: f64) -> Self {
        self.display_scale = scale;
        self
    }

    /// Set the highlight transition.
    #[must_use]
    pub fn highlight(mut self, duration: Duration, curve: Curve) -> Self {
        self.highlight_duration = duration;
        self.highlight_curve = curve;
        self
    }

    /// Set the flight arc height.
    #[must_use]
    pub fn flight_lift(mut self, lift: f64) -> Self {
        self.flight_lift = lift;
        self
    }

    /// Check that sizes are positive and ranges are ordered.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("maximized_size", self.maximized_size),
            ("minimized_size_min", self.minimized_size_min),
            ("minimized_size_max", self.minimized_size_max),
            ("background_ratio", self.background_ratio),
            ("tracking_circle_size", self.tracking_circle_size),
            ("display_scale", self.display_scale),
        ];
        for (field, value) in positive {
            // NaN fails this comparison too.
            if !(value > 0.0) {
                return Err(ConfigError::NonPositive { field, value });
            }
        }
        if self.minimized_size_min > self.minimized_size_max {
            return Err(ConfigError::InvertedBounds {
                min: self.minimized_size_min,
                max: self.minimized_size_max,
            });
        }
        if self.flight_keyframes < 2 {
            return Err(ConfigError::TooFewKeyframes(self.flight_keyframes));
        }
        Ok(())
    }

    /// Transition used for drag-driven relayouts.
    pub fn highlight_transition(&self) -> Transition {
        Transition::animated(self.highlight_duration, self.highlight_curve)
    }

    /// Fade/shrink transition used for everything on exit.
    pub fn exit_transition(&self) -> Transition {
        Transition::animated(self.exit_duration, Curve::EaseInOut)
    }

    /// Width the maximized slot reserves for its icon (size plus breathing room).
    pub fn maximized_slot_width(&self) -> f64 {
        self.maximized_size + self.maximized_extra_width
    }
}
