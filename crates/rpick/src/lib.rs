#![forbid(unsafe_code)]

//! Reaction picker public facade.
//!
//! Re-exports the types a host needs from the internal crates and offers a
//! builder that validates configuration before a picker is created.
//!
//! ```ignore
//! use rpick::prelude::*;
//!
//! let picker = PickerBuilder::new(items)
//!     .config(PickerConfig::default().display_scale(3.0))
//!     .build(services)?;
//! let mut session = PickerSession::new(picker);
//! session.begin(390.0, Point::new(320.0, 640.0));
//! ```

mod error;

pub use error::{Error, Result};

// --- Core re-exports -------------------------------------------------------

pub use rpick_core::animation::{Curve, FlightPath};
pub use rpick_core::clock::FrameClock;
pub use rpick_core::color::Rgba;
pub use rpick_core::geometry::{Point, Rect, Size};
pub use rpick_core::transition::{AnimatedValue, BeginFrom, Layer, Transition};

// --- Widget re-exports -----------------------------------------------------

pub use rpick_widgets::services::{
    AnimatedIcon, BubbleArt, BubbleArtRequest, BubbleImageGenerator, BubbleStyle, DefaultTheme,
    FlightTarget, Haptics, IconProvider, IconRequest, ImageHandle, Theme,
};
pub use rpick_widgets::{
    AnimationSource, BubbleLayers, ConfigError, Flight, IntrinsicTuning, PickerConfig,
    PickerServices, PickerSession, ReactionItem, ReactionItemView, ReactionPicker, SessionPhase,
    TrackingBubble, TuningTable,
};

// --- Builder ---------------------------------------------------------------

/// Validating constructor for [`ReactionPicker`].
#[derive(Debug, Clone)]
pub struct PickerBuilder {
    items: Vec<ReactionItem>,
    config: PickerConfig,
    tuning: TuningTable,
}

impl PickerBuilder {
    /// Start a picker over `items` with default tuning.
    #[must_use]
    pub fn new(items: Vec<ReactionItem>) -> Self {
        Self {
            items,
            config: PickerConfig::default(),
            tuning: TuningTable::builtin(),
        }
    }

    #[must_use]
    pub fn config(mut self, config: PickerConfig) -> Self {
        self.config = config;
        self
    }

    /// Replace the art-direction table.
    #[must_use]
    pub fn tuning(mut self, tuning: TuningTable) -> Self {
        self.tuning = tuning;
        self
    }

    /// Validate the configuration and create the picker.
    pub fn build(self, services: PickerServices) -> Result<ReactionPicker> {
        let picker = ReactionPicker::with_config(self.items, services, self.config)?;
        Ok(picker.with_tuning(self.tuning))
    }

    /// Build the picker and wrap it in a gesture session.
    pub fn session(self, services: PickerServices) -> Result<PickerSession> {
        self.build(services).map(PickerSession::new)
    }
}

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        Error, FlightTarget, Haptics, PickerBuilder, PickerConfig, PickerServices, PickerSession,
        Point, ReactionItem, ReactionPicker, Rect, Result, Transition,
    };

    pub use crate::{core, widgets};
}

pub use rpick_core as core;
pub use rpick_widgets as widgets;
