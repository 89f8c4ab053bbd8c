#![forbid(unsafe_code)]

//! Art-direction table for reaction icons.
//!
//! Some animations are drawn smaller or off-centre within their canvas. The
//! table maps a reaction value to a scale factor for the icon's intrinsic
//! size and an offset expressed as a fraction of the scaled width. Values
//! not in the table use [`IntrinsicTuning::NEUTRAL`].

use ahash::AHashMap;
use rpick_core::geometry::{Point, Size};

/// Per-reaction visual tuning.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IntrinsicTuning {
    /// Multiplier applied to the base intrinsic size.
    pub scale: f64,
    /// Horizontal offset as a fraction of the scaled width.
    pub offset_x: f64,
    /// Vertical offset as a fraction of the scaled width.
    pub offset_y: f64,
}

impl IntrinsicTuning {
    /// No offset, 1.0× scale.
    pub const NEUTRAL: Self = Self::new(1.0, 0.0, 0.0);

    pub const fn new(scale: f64, offset_x: f64, offset_y: f64) -> Self {
        Self {
            scale,
            offset_x,
            offset_y,
        }
    }

    /// Scaled intrinsic size and absolute offset for a base size.
    pub fn resolve(&self, base: Size) -> (Size, Point) {
        let size = base.scaled(self.scale);
        let offset = Point::new(self.offset_x * size.width, self.offset_y * size.width);
        (size, offset)
    }
}

impl Default for IntrinsicTuning {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

/// Lookup table `value → tuning` with a neutral default.
#[derive(Debug, Clone, Default)]
pub struct TuningTable {
    entries: AHashMap<String, IntrinsicTuning>,
}

impl TuningTable {
    /// An empty table; every lookup is neutral.
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in table for the stock reaction set.
    pub fn builtin() -> Self {
        Self::new()
            .with("😒", IntrinsicTuning::new(1.7, 0.0, 0.0))
            .with("😳", IntrinsicTuning::new(1.15, 0.0, -0.05))
            .with("😂", IntrinsicTuning::new(1.2, 0.0, 0.0))
            .with("👍", IntrinsicTuning::new(1.256, 0.0, 0.05))
    }

    /// Add or replace an entry (builder pattern).
    #[must_use]
    pub fn with(mut self, value: &str, tuning: IntrinsicTuning) -> Self {
        self.insert(value, tuning);
        self
    }

    pub fn insert(&mut self, value: &str, tuning: IntrinsicTuning) {
        self.entries.insert(value.to_owned(), tuning);
    }

    /// Tuning for `value`; neutral when unknown or `None`.
    pub fn lookup(&self, value: Option<&str>) -> IntrinsicTuning {
        value
            .and_then(|v| self.entries.get(v).copied())
            .unwrap_or(IntrinsicTuning::NEUTRAL)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
