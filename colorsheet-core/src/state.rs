//! The single source of truth for a picker session.

use crate::{codec, color::Color, space::ColorSpace};

/// Authoritative picker state: the canonical color, the space whose sliders
/// are currently shown, and the remembered hue.
///
/// Owned exclusively by a [`crate::controller::ColorPickerController`];
/// the mutators are crate-private so UI code can only go through the
/// controller's operations.
///
/// `hue` is kept separately because an achromatic canonical color carries no
/// hue of its own; remembering the last chromatic hue keeps the HSB hue
/// slider stable across zero-saturation excursions.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorState {
    color: Color,
    active_space: ColorSpace,
    hue: f32,
}

impl ColorState {
    /// Creates state from an initial color and active space.
    pub fn new(color: Color, active_space: ColorSpace) -> Self {
        Self {
            color,
            active_space,
            hue: codec::hue_of(color, 0.0),
        }
    }

    /// The canonical color.
    pub fn color(&self) -> Color {
        self.color
    }

    /// The space whose sliders are currently shown.
    pub fn active_space(&self) -> ColorSpace {
        self.active_space
    }

    /// The remembered hue in degrees, `[0, 360)`.
    pub fn hue(&self) -> f32 {
        self.hue
    }

    /// Replaces the canonical color, refreshing the remembered hue when the
    /// new color is chromatic.
    pub(crate) fn set_color(&mut self, color: Color) {
        self.hue = codec::hue_of(color, self.hue);
        self.color = color;
    }

    /// Switches the active space.
    pub(crate) fn set_active_space(&mut self, space: ColorSpace) {
        self.active_space = space;
    }

    /// Overwrites the remembered hue, wrapped into `[0, 360)`.
    pub(crate) fn set_hue(&mut self, hue: f32) {
        self.hue = hue.rem_euclid(360.0);
    }
}
