#![forbid(unsafe_code)]

//! Straight-alpha RGBA colour.

/// An RGBA colour with straight (non-premultiplied) alpha, components in 0..=1.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0, 1.0);
    pub const TRANSPARENT: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    /// Create a colour from components.
    #[inline]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Grey of the given white level and alpha.
    #[inline]
    pub const fn white(level: f32, alpha: f32) -> Self {
        Self::new(level, level, level, alpha)
    }

    /// Opaque colour from 8-bit channels.
    #[inline]
    pub fn rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::new(f32::from(r) / 255.0, f32::from(g) / 255.0, f32::from(b) / 255.0, 1.0)
    }

    /// Same colour with a replaced alpha component.
    #[inline]
    #[must_use]
    pub fn with_alpha(self, alpha: f32) -> Self {
        Self {
            a: alpha.clamp(0.0, 1.0),
            ..self
        }
    }
}
