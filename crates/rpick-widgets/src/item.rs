#![forbid(unsafe_code)]

//! Reaction items supplied by the host.

use std::fmt;

/// Opaque handle the host's icon provider resolves to an animation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnimationSource(pub String);

impl AnimationSource {
    pub fn new(source: impl Into<String>) -> Self {
        Self(source.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// One selectable entry in the picker.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ReactionItem {
    /// An animated reaction.
    Reaction {
        /// Reaction identifier, typically the emoji itself.
        value: String,
        /// Text shown in the floating label while magnified.
        label: String,
        /// Animation asset for the icon.
        animation: AnimationSource,
    },
    /// The fixed "reply" entry; static icon, fixed label.
    Reply,
}

/// Label text used for [`ReactionItem::Reply`].
pub const REPLY_LABEL: &str = "Reply";

impl ReactionItem {
    /// Convenience constructor for an animated reaction.
    pub fn reaction(
        value: impl Into<String>,
        label: impl Into<String>,
        animation: impl Into<String>,
    ) -> Self {
        Self::Reaction {
            value: value.into(),
            label: label.into(),
            animation: AnimationSource::new(animation),
        }
    }

    /// Identifier used for art-direction lookups; `None` for the reply entry.
    pub fn value(&self) -> Option<&str> {
        match self {
            Self::Reaction { value, .. } => Some(value),
            Self::Reply => None,
        }
    }

    /// Label text.
    pub fn label(&self) -> &str {
        match self {
            Self::Reaction { label, .. } => label,
            Self::Reply => REPLY_LABEL,
        }
    }

    /// Animation asset, if any.
    pub fn animation(&self) -> Option<&AnimationSource> {
        match self {
            Self::Reaction { animation, .. } => Some(animation),
            Self::Reply => None,
        }
    }

    pub fn is_reply(&self) -> bool {
        matches!(self, Self::Reply)
    }
}

impl fmt::Display for ReactionItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Reaction { value, .. } => f.write_str(value),
            Self::Reply => f.write_str(REPLY_LABEL),
        }
    }
}
