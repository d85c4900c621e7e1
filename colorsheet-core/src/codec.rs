//! Pure conversions between the canonical color and its derived
//! representations.
//!
//! ## Usage
//!
//! Convert the canonical [`Color`] to and from per-space display components,
//! format it as hex, and pick a readable overlay text color. Every function
//! here is stateless and total over its declared domain; display values are
//! clamped to their declared ranges and rounded half-away-from-zero to the
//! component's precision.

use smallvec::SmallVec;

use crate::{
    color::Color,
    space::{ColorSpace, ComponentKey},
};

/// Display components of one space, in presentation order.
pub type ComponentValues = SmallVec<[(ComponentKey, f32); 4]>;

/// Backgrounds with less alpha than this cannot signal readability, so the
/// contrast decision falls back to a theme-provided color.
pub const MIN_READABLE_ALPHA: f32 = 0.4;

/// Luminance above which dark overlay text is used.
pub const LUMINANCE_THRESHOLD: f32 = 0.5;

/// Overlay text colors used by [`contrasting_text_color`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContrastColors {
    /// Returned when the background is too transparent to judge.
    pub fallback: Color,
    /// Returned on bright backgrounds.
    pub dark: Color,
    /// Returned on dark backgrounds.
    pub light: Color,
}

impl Default for ContrastColors {
    fn default() -> Self {
        Self {
            fallback: NEAR_BLACK,
            dark: NEAR_BLACK,
            light: NEAR_WHITE,
        }
    }
}

const NEAR_BLACK: Color = Color::from_rgb(0.11, 0.11, 0.118);
const NEAR_WHITE: Color = Color::from_rgb(0.949, 0.949, 0.969);

/// Converts a canonical color to display-scaled, display-rounded components.
///
/// `remembered_hue` (degrees) is substituted when the color is achromatic,
/// so an HSB hue slider does not snap to zero while saturation is zero.
pub fn components_from_color(
    space: ColorSpace,
    color: Color,
    remembered_hue: f32,
) -> ComponentValues {
    let raw: SmallVec<[f32; 4]> = match space {
        ColorSpace::Rgb => {
            SmallVec::from_slice(&[color.r() * 255.0, color.g() * 255.0, color.b() * 255.0])
        }
        ColorSpace::Hsb => {
            let (h, s, b) = rgb_to_hsb(color, remembered_hue);
            SmallVec::from_slice(&[h, s * 100.0, b * 100.0])
        }
        ColorSpace::Cmyk => {
            let (c, m, y, k) = rgb_to_cmyk(color);
            SmallVec::from_slice(&[c * 100.0, m * 100.0, y * 100.0, k * 100.0])
        }
    };

    space
        .components()
        .iter()
        .zip(raw)
        .map(|(spec, value)| (spec.key, spec.round(value)))
        .collect()
}

/// Converts display components of one space back to a canonical color.
///
/// Missing components read as their display minimum; present components are
/// clamped to their declared ranges before conversion. `alpha` passes
/// through unchanged since no shipped space exposes an alpha slider.
pub fn color_from_components(
    space: ColorSpace,
    values: &[(ComponentKey, f32)],
    alpha: f32,
) -> Color {
    let mut scaled: SmallVec<[f32; 4]> = SmallVec::new();
    for spec in space.components() {
        let raw = values
            .iter()
            .find(|(key, _)| *key == spec.key)
            .map(|(_, value)| *value)
            .unwrap_or(spec.display_min);
        scaled.push(spec.clamp(raw));
    }

    match space {
        ColorSpace::Rgb => Color::new(
            scaled[0] / 255.0,
            scaled[1] / 255.0,
            scaled[2] / 255.0,
            alpha,
        ),
        ColorSpace::Hsb => hsb_to_rgb(scaled[0], scaled[1] / 100.0, scaled[2] / 100.0, alpha),
        ColorSpace::Cmyk => cmyk_to_rgb(
            scaled[0] / 100.0,
            scaled[1] / 100.0,
            scaled[2] / 100.0,
            scaled[3] / 100.0,
            alpha,
        ),
    }
}

/// Extracts the hue of a color in degrees, or `fallback` when achromatic.
pub fn hue_of(color: Color, fallback: f32) -> f32 {
    let (hue, _, _) = rgb_to_hsb(color, fallback);
    hue
}

/// Formats a color as uppercase hex without a leading `#`.
///
/// Opaque colors produce six digits; anything else produces eight.
pub fn to_hex(color: Color) -> String {
    let [r, g, b, a] = color.to_rgba_u8();
    if a == 255 {
        format!("{r:02X}{g:02X}{b:02X}")
    } else {
        format!("{r:02X}{g:02X}{b:02X}{a:02X}")
    }
}

/// Picks an overlay text color readable against `background`.
///
/// Backgrounds with alpha below [`MIN_READABLE_ALPHA`] get
/// `colors.fallback`. Otherwise the BT.601 luminance decides: above
/// [`LUMINANCE_THRESHOLD`] the dark text color is used, below it the light
/// one.
pub fn contrasting_text_color(background: Color, colors: &ContrastColors) -> Color {
    if background.a() < MIN_READABLE_ALPHA {
        return colors.fallback;
    }
    if background.luminance() > LUMINANCE_THRESHOLD {
        colors.dark
    } else {
        colors.light
    }
}

/// HSB to RGB via the standard hue-sector formula.
///
/// `hue` in degrees, `saturation` and `brightness` in `[0, 1]`.
fn hsb_to_rgb(hue: f32, saturation: f32, brightness: f32, alpha: f32) -> Color {
    let h = hue.rem_euclid(360.0) / 60.0;
    let chroma = brightness * saturation;
    let x = chroma * (1.0 - ((h % 2.0) - 1.0).abs());
    let m = brightness - chroma;

    let (r, g, b) = match h as u32 {
        0 => (chroma, x, 0.0),
        1 => (x, chroma, 0.0),
        2 => (0.0, chroma, x),
        3 => (0.0, x, chroma),
        4 => (x, 0.0, chroma),
        _ => (chroma, 0.0, x),
    };

    Color::new(r + m, g + m, b + m, alpha)
}

/// RGB to HSB. Returns hue in degrees (substituting `remembered_hue` when
/// the color is achromatic) and saturation/brightness in `[0, 1]`.
fn rgb_to_hsb(color: Color, remembered_hue: f32) -> (f32, f32, f32) {
    let (r, g, b) = (color.r(), color.g(), color.b());
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    let brightness = max;
    let saturation = if max <= f32::EPSILON { 0.0 } else { delta / max };

    let hue = if delta <= f32::EPSILON {
        remembered_hue.rem_euclid(360.0)
    } else if max == r {
        60.0 * ((g - b) / delta).rem_euclid(6.0)
    } else if max == g {
        60.0 * ((b - r) / delta + 2.0)
    } else {
        60.0 * ((r - g) / delta + 4.0)
    };

    (hue, saturation, brightness)
}

fn cmyk_to_rgb(cyan: f32, magenta: f32, yellow: f32, black: f32, alpha: f32) -> Color {
    Color::new(
        (1.0 - cyan) * (1.0 - black),
        (1.0 - magenta) * (1.0 - black),
        (1.0 - yellow) * (1.0 - black),
        alpha,
    )
}

fn rgb_to_cmyk(color: Color) -> (f32, f32, f32, f32) {
    let (r, g, b) = (color.r(), color.g(), color.b());
    let black = 1.0 - r.max(g).max(b);
    if black >= 1.0 - f32::EPSILON {
        return (0.0, 0.0, 0.0, 1.0);
    }
    let white = 1.0 - black;
    (
        (1.0 - r - black) / white,
        (1.0 - g - black) / white,
        (1.0 - b - black) / white,
        black,
    )
}
