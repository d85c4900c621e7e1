//! Color space catalog.
//!
//! ## Usage
//!
//! Enumerate the spaces a picker can expose and describe each space's
//! components: presentation order, display range, unit, and rounding
//! precision. The first component of a space is the primary one shown in
//! the large overlay label.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The set of color spaces the picker supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ColorSpace {
    /// Red, green, and blue channels, displayed as 0–255.
    #[default]
    Rgb,
    /// Hue (degrees), saturation, and brightness (percent).
    Hsb,
    /// Cyan, magenta, yellow, and black, displayed as percentages.
    Cmyk,
}

/// Identifies a single slider component within a color space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ComponentKey {
    /// Red channel of [`ColorSpace::Rgb`].
    Red,
    /// Green channel of [`ColorSpace::Rgb`].
    Green,
    /// Blue channel of [`ColorSpace::Rgb`].
    Blue,
    /// Hue angle of [`ColorSpace::Hsb`].
    Hue,
    /// Saturation of [`ColorSpace::Hsb`].
    Saturation,
    /// Brightness of [`ColorSpace::Hsb`].
    Brightness,
    /// Cyan channel of [`ColorSpace::Cmyk`].
    Cyan,
    /// Magenta channel of [`ColorSpace::Cmyk`].
    Magenta,
    /// Yellow channel of [`ColorSpace::Cmyk`].
    Yellow,
    /// Black (key) channel of [`ColorSpace::Cmyk`].
    Black,
}

/// Describes one component of a color space for display purposes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComponentSpec {
    /// The component this spec describes.
    pub key: ComponentKey,
    /// Smallest value shown to the user.
    pub display_min: f32,
    /// Largest value shown to the user.
    pub display_max: f32,
    /// Unit suffix appended when formatting the value (may be empty).
    pub unit: &'static str,
    /// Whether the component is a percentage of its range.
    pub is_percentage: bool,
    /// Number of decimal places shown to the user.
    pub precision: u32,
}

impl ComponentSpec {
    const fn channel(key: ComponentKey) -> Self {
        Self {
            key,
            display_min: 0.0,
            display_max: 255.0,
            unit: "",
            is_percentage: false,
            precision: 0,
        }
    }

    const fn percentage(key: ComponentKey) -> Self {
        Self {
            key,
            display_min: 0.0,
            display_max: 100.0,
            unit: "%",
            is_percentage: true,
            precision: 0,
        }
    }

    const fn degrees(key: ComponentKey) -> Self {
        Self {
            key,
            display_min: 0.0,
            display_max: 360.0,
            unit: "°",
            is_percentage: false,
            precision: 0,
        }
    }

    /// Clamps a raw display value to this component's declared range.
    #[inline]
    pub fn clamp(&self, value: f32) -> f32 {
        if value.is_nan() {
            return self.display_min;
        }
        value.clamp(self.display_min, self.display_max)
    }

    /// Clamps and rounds a display value to this component's precision.
    ///
    /// Rounding is half-away-from-zero (`f32::round` semantics).
    #[inline]
    pub fn round(&self, value: f32) -> f32 {
        let scale = 10f32.powi(self.precision as i32);
        self.clamp((self.clamp(value) * scale).round() / scale)
    }

    /// Formats a display value with this component's precision and unit.
    pub fn format(&self, value: f32) -> String {
        format!(
            "{value:.prec$}{unit}",
            prec = self.precision as usize,
            unit = self.unit
        )
    }
}

static RGB_COMPONENTS: [ComponentSpec; 3] = [
    ComponentSpec::channel(ComponentKey::Red),
    ComponentSpec::channel(ComponentKey::Green),
    ComponentSpec::channel(ComponentKey::Blue),
];

static HSB_COMPONENTS: [ComponentSpec; 3] = [
    ComponentSpec::degrees(ComponentKey::Hue),
    ComponentSpec::percentage(ComponentKey::Saturation),
    ComponentSpec::percentage(ComponentKey::Brightness),
];

static CMYK_COMPONENTS: [ComponentSpec; 4] = [
    ComponentSpec::percentage(ComponentKey::Cyan),
    ComponentSpec::percentage(ComponentKey::Magenta),
    ComponentSpec::percentage(ComponentKey::Yellow),
    ComponentSpec::percentage(ComponentKey::Black),
];

impl ColorSpace {
    /// Every supported space, in selector presentation order.
    pub const ALL: [ColorSpace; 3] = [ColorSpace::Rgb, ColorSpace::Hsb, ColorSpace::Cmyk];

    /// The components of this space, in presentation order.
    pub fn components(self) -> &'static [ComponentSpec] {
        match self {
            ColorSpace::Rgb => &RGB_COMPONENTS,
            ColorSpace::Hsb => &HSB_COMPONENTS,
            ColorSpace::Cmyk => &CMYK_COMPONENTS,
        }
    }

    /// The primary component, shown in the large overlay label.
    pub fn primary(self) -> &'static ComponentSpec {
        &self.components()[0]
    }

    /// Looks up the spec for a component of this space.
    pub fn component(self, key: ComponentKey) -> Option<&'static ComponentSpec> {
        self.components().iter().find(|spec| spec.key == key)
    }

    /// Short selector label for this space.
    pub const fn label(self) -> &'static str {
        match self {
            ColorSpace::Rgb => "RGB",
            ColorSpace::Hsb => "HSB",
            ColorSpace::Cmyk => "CMYK",
        }
    }
}

impl fmt::Display for ColorSpace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl ComponentKey {
    /// Human-readable slider label for this component.
    pub const fn label(self) -> &'static str {
        match self {
            ComponentKey::Red => "Red",
            ComponentKey::Green => "Green",
            ComponentKey::Blue => "Blue",
            ComponentKey::Hue => "Hue",
            ComponentKey::Saturation => "Saturation",
            ComponentKey::Brightness => "Brightness",
            ComponentKey::Cyan => "Cyan",
            ComponentKey::Magenta => "Magenta",
            ComponentKey::Yellow => "Yellow",
            ComponentKey::Black => "Black",
        }
    }
}

impl fmt::Display for ComponentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
