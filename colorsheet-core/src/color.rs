//! Canonical RGBA color value.
//!
//! ## Usage
//!
//! Store and pass the authoritative picker color; every other representation
//! (slider components, hex text, contrast decision) is derived from it.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An sRGB color with an alpha component.
///
/// Channels are `f32` and always lie in `[0.0, 1.0]`; every constructor
/// clamps its inputs, so a `Color` can never hold an out-of-range channel.
/// NaN inputs are treated as `0.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Color {
    r: f32,
    g: f32,
    b: f32,
    a: f32,
}

const fn clamp_channel(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else if value < 0.0 {
        0.0
    } else if value > 1.0 {
        1.0
    } else {
        value
    }
}

impl Color {
    /// Fully transparent black.
    pub const TRANSPARENT: Color = Color::new(0.0, 0.0, 0.0, 0.0);
    /// Opaque black.
    pub const BLACK: Color = Color::new(0.0, 0.0, 0.0, 1.0);
    /// Opaque white.
    pub const WHITE: Color = Color::new(1.0, 1.0, 1.0, 1.0);
    /// Opaque red.
    pub const RED: Color = Color::new(1.0, 0.0, 0.0, 1.0);
    /// Opaque green.
    pub const GREEN: Color = Color::new(0.0, 1.0, 0.0, 1.0);
    /// Opaque blue.
    pub const BLUE: Color = Color::new(0.0, 0.0, 1.0, 1.0);

    /// Creates a color from four `f32` channels, clamping each to `[0, 1]`.
    #[inline]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self {
            r: clamp_channel(r),
            g: clamp_channel(g),
            b: clamp_channel(b),
            a: clamp_channel(a),
        }
    }

    /// Creates an opaque color from three `f32` channels.
    #[inline]
    pub const fn from_rgb(r: f32, g: f32, b: f32) -> Self {
        Self::new(r, g, b, 1.0)
    }

    /// Creates a color from four `u8` channels.
    #[inline]
    pub fn from_rgba_u8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
            a: a as f32 / 255.0,
        }
    }

    /// Creates an opaque color from three `u8` channels.
    #[inline]
    pub fn from_rgb_u8(r: u8, g: u8, b: u8) -> Self {
        Self::from_rgba_u8(r, g, b, 255)
    }

    /// The red channel in `[0, 1]`.
    #[inline]
    pub const fn r(self) -> f32 {
        self.r
    }

    /// The green channel in `[0, 1]`.
    #[inline]
    pub const fn g(self) -> f32 {
        self.g
    }

    /// The blue channel in `[0, 1]`.
    #[inline]
    pub const fn b(self) -> f32 {
        self.b
    }

    /// The alpha channel in `[0, 1]`.
    #[inline]
    pub const fn a(self) -> f32 {
        self.a
    }

    /// Returns this color with a different alpha channel (clamped).
    #[inline]
    pub const fn with_alpha(self, a: f32) -> Self {
        Self {
            a: clamp_channel(a),
            ..self
        }
    }

    /// Converts the color to a `[r, g, b, a]` array.
    #[inline]
    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Converts the color to four `u8` channels, rounding each.
    #[inline]
    pub fn to_rgba_u8(self) -> [u8; 4] {
        [
            (self.r * 255.0).round() as u8,
            (self.g * 255.0).round() as u8,
            (self.b * 255.0).round() as u8,
            (self.a * 255.0).round() as u8,
        ]
    }

    /// Whether the color is fully opaque at 8-bit precision.
    #[inline]
    pub fn is_opaque(self) -> bool {
        (self.a * 255.0).round() as u8 == 255
    }

    /// Perceptual luminance of the color, ignoring alpha.
    ///
    /// Uses the ITU-R BT.601 weights `0.299 R + 0.587 G + 0.114 B`, which is
    /// what the contrast decision in [`crate::codec`] is calibrated against.
    #[inline]
    pub fn luminance(self) -> f32 {
        0.299 * self.r + 0.587 * self.g + 0.114 * self.b
    }
}

/// The default color is opaque white, the usual starting swatch of a picker.
impl Default for Color {
    #[inline]
    fn default() -> Self {
        Self::WHITE
    }
}

impl From<[f32; 4]> for Color {
    #[inline]
    fn from([r, g, b, a]: [f32; 4]) -> Self {
        Self::new(r, g, b, a)
    }
}

impl From<Color> for [f32; 4] {
    #[inline]
    fn from(color: Color) -> Self {
        color.to_array()
    }
}

impl From<[f32; 3]> for Color {
    #[inline]
    fn from([r, g, b]: [f32; 3]) -> Self {
        Self::from_rgb(r, g, b)
    }
}

impl From<[u8; 4]> for Color {
    #[inline]
    fn from([r, g, b, a]: [u8; 4]) -> Self {
        Self::from_rgba_u8(r, g, b, a)
    }
}

impl From<[u8; 3]> for Color {
    #[inline]
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self::from_rgb_u8(r, g, b)
    }
}
