#![forbid(unsafe_code)]

//! The reaction picker widget.
//!
//! A horizontal row of reaction bubbles shown above a long-pressed message.
//! The host's gesture recognizer feeds drag offsets to
//! [`ReactionPicker::update_layout`]; the picker magnifies the bubble under
//! the anchor, and on release the host asks for
//! [`ReactionPicker::selected_reaction`] and plays
//! [`ReactionPicker::animate_out`] toward a target.
//!
//! Rendering, icon decoding, haptics, and theming belong to the host and are
//! reached through the traits in [`services`].

pub mod config;
pub mod item;
pub mod item_view;
pub mod picker;
pub mod services;
pub mod session;
pub mod tuning;

pub use config::{ConfigError, PickerConfig};
pub use item::{AnimationSource, ReactionItem};
pub use item_view::ReactionItemView;
pub use picker::{BubbleLayers, Flight, ReactionPicker, TrackingBubble};
pub use services::PickerServices;
pub use session::{PickerSession, SessionPhase};
pub use tuning::{IntrinsicTuning, TuningTable};
