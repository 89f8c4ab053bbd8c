#![forbid(unsafe_code)]

//! Host collaborators.
//!
//! The picker never draws, decodes, or vibrates anything itself. Each of
//! those concerns is a narrow trait the host implements:
//!
//! | Trait | Provides |
//! |-------|----------|
//! | [`Theme`] | bubble, shadow, and label colours; label text metrics |
//! | [`BubbleImageGenerator`] | stretchable circle and drop-shadow art |
//! | [`IconProvider`] | animated icon elements and the static reply icon |
//! | [`Haptics`] | discrete feedback pulses |
//! | [`FlightTarget`] | destination of the selection flight |
//!
//! All calls happen on the UI thread; none of the traits require `Send`.

use rpick_core::color::Rgba;
use rpick_core::geometry::{Rect, Size};
use rpick_core::transition::Transition;
use unicode_width::UnicodeWidthStr;

use crate::item::AnimationSource;

/// Opaque image produced by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ImageHandle(pub u64);

// ---------------------------------------------------------------------------
// Theme
// ---------------------------------------------------------------------------

/// Colours and label metrics.
pub trait Theme {
    /// Fill of the container and tracking bubbles.
    fn bubble_fill(&self) -> Rgba;
    /// Drop-shadow colour around bubbles.
    fn bubble_shadow(&self) -> Rgba;
    /// Label background (drawn at 0.8 alpha).
    fn label_background(&self) -> Rgba;
    /// Label text colour.
    fn label_text(&self) -> Rgba;
    /// Rendered size of `text` in the label font (13pt medium).
    fn measure_label(&self, text: &str) -> Size;
}

/// Light theme with monospace-cell label metrics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DefaultTheme {
    /// Advance per terminal-width column.
    pub glyph_advance: f64,
    /// Line height of the label font.
    pub line_height: f64,
}

impl Default for DefaultTheme {
    fn default() -> Self {
        Self {
            glyph_advance: 7.5,
            line_height: 16.0,
        }
    }
}

impl Theme for DefaultTheme {
    fn bubble_fill(&self) -> Rgba {
        Rgba::WHITE
    }

    fn bubble_shadow(&self) -> Rgba {
        Rgba::white(0.0, 0.2)
    }

    fn label_background(&self) -> Rgba {
        Rgba::white(0.0, 0.5)
    }

    fn label_text(&self) -> Rgba {
        Rgba::WHITE
    }

    fn measure_label(&self, text: &str) -> Size {
        // Emoji and CJK report width 2, which matches their rendered advance.
        let columns = UnicodeWidthStr::width(text) as f64;
        Size::new((columns * self.glyph_advance).ceil(), self.line_height)
    }
}

// ---------------------------------------------------------------------------
// Bubble art
// ---------------------------------------------------------------------------

/// Which bubble image to generate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BubbleStyle {
    /// Filled circle inset by the blur margin.
    Fill,
    /// Blurred drop shadow with the circle itself punched out.
    Shadow,
}

/// Parameters for one bubble image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BubbleArtRequest {
    pub style: BubbleStyle,
    pub color: Rgba,
    pub diameter: f64,
    pub blur: f64,
}

impl BubbleArtRequest {
    /// Image canvas: the circle plus a blur margin on every side.
    pub fn canvas_size(&self) -> Size {
        Size::square(self.diameter + self.blur * 2.0)
    }

    /// Stretch cap so the image can grow horizontally into a capsule.
    pub fn cap_inset(&self) -> f64 {
        (self.diameter / 2.0 + self.blur / 2.0).floor()
    }
}

/// Generated, stretchable bubble image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BubbleArt {
    pub image: ImageHandle,
    pub size: Size,
    pub cap_inset: f64,
}

impl BubbleArt {
    fn generate(images: &dyn BubbleImageGenerator, request: BubbleArtRequest) -> Self {
        Self {
            image: images.bubble(&request),
            size: request.canvas_size(),
            cap_inset: request.cap_inset(),
        }
    }

    /// Fill + shadow pair for one bubble of `diameter`.
    pub fn pair(
        images: &dyn BubbleImageGenerator,
        theme: &dyn Theme,
        diameter: f64,
        blur: f64,
    ) -> (Self, Self) {
        let fill = Self::generate(
            images,
            BubbleArtRequest {
                style: BubbleStyle::Fill,
                color: theme.bubble_fill(),
                diameter,
                blur,
            },
        );
        let shadow = Self::generate(
            images,
            BubbleArtRequest {
                style: BubbleStyle::Shadow,
                color: theme.bubble_shadow(),
                diameter,
                blur,
            },
        );
        (fill, shadow)
    }
}

/// Pure image generator; same request, same image.
pub trait BubbleImageGenerator {
    /// Circle or drop-shadow art for `request`.
    fn bubble(&self, request: &BubbleArtRequest) -> ImageHandle;
    /// Stretchable filled circle (label background).
    fn filled_circle(&self, diameter: f64, color: Rgba) -> ImageHandle;
}

// ---------------------------------------------------------------------------
// Icons
// ---------------------------------------------------------------------------

/// Parameters for creating an animated icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IconRequest<'a> {
    pub source: &'a AnimationSource,
    /// Render width in pixels.
    pub width: u32,
    /// Render height in pixels.
    pub height: u32,
    /// Decode and show the first frame before playback starts.
    pub load_first_frame: bool,
    /// When stopped, finish the current loop instead of freezing.
    pub play_to_completion_on_stop: bool,
}

/// A controllable animated icon owned by a reaction view.
pub trait AnimatedIcon {
    fn set_size(&mut self, size: Size);
    fn set_playing(&mut self, playing: bool);
}

/// Produces icon elements.
pub trait IconProvider {
    fn animated_icon(&self, request: &IconRequest<'_>) -> Box<dyn AnimatedIcon>;
    /// Static art for the reply entry.
    fn reply_icon(&self) -> ImageHandle;
}

// ---------------------------------------------------------------------------
// Haptics
// ---------------------------------------------------------------------------

/// Fire-and-forget haptic pulses.
pub trait Haptics {
    /// Warm up the actuator ahead of an imminent tap.
    fn prepare(&mut self);
    fn tap(&mut self);
}

// ---------------------------------------------------------------------------
// Flight target
// ---------------------------------------------------------------------------

/// Where the selected reaction flies to on release.
pub trait FlightTarget {
    /// Frame in the picker's coordinate space.
    fn frame(&self) -> Rect;
    /// Art shown by the target; the picker fades a ghost of it in.
    fn image(&self) -> Option<ImageHandle>;
    fn set_hidden(&mut self, hidden: bool);
    /// Play a scale pop from `from_scale` to 1.0.
    fn pop_in(&mut self, from_scale: f64, transition: Transition);
}

// ---------------------------------------------------------------------------
// Bundle
// ---------------------------------------------------------------------------

/// Every collaborator the picker needs.
pub struct PickerServices {
    pub theme: Box<dyn Theme>,
    pub images: Box<dyn BubbleImageGenerator>,
    pub icons: Box<dyn IconProvider>,
    pub haptics: Box<dyn Haptics>,
}

impl std::fmt::Debug for PickerServices {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PickerServices").finish_non_exhaustive()
    }
}
