//! Hex input validation.
//!
//! ## Usage
//!
//! Run [`sanitize_for_typing`] on every keystroke so the field never rejects
//! an intermediate state, and [`parse_commit`] when editing ends to turn the
//! final string into a [`Color`] or a recoverable error.

use thiserror::Error;

use crate::color::Color;

/// Longest accepted hex value: `RRGGBBAA`.
pub const MAX_HEX_DIGITS: usize = 8;

/// Why a committed hex string was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum HexParseError {
    /// Fewer than three hex digits.
    #[error("hex value is too short (need at least 3 digits)")]
    TooShort,
    /// More than eight hex digits.
    #[error("hex value is too long (at most 8 digits)")]
    TooLong,
    /// A digit count that is not 3, 6, or 8.
    #[error("hex value must have 3, 6, or 8 digits")]
    InvalidLength,
}

/// Uppercases `input` and drops everything that is not a hex digit.
fn hex_digits(input: &str) -> String {
    input
        .chars()
        .filter(char::is_ascii_hexdigit)
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

/// Best-effort cleanup of an in-progress hex string.
///
/// Strips `#` and any other non-hex character, uppercases, and truncates to
/// [`MAX_HEX_DIGITS`]. Never fails, so a text field can call it on every
/// keystroke.
pub fn sanitize_for_typing(input: &str) -> String {
    let mut digits = hex_digits(input);
    digits.truncate(MAX_HEX_DIGITS);
    digits
}

/// Strictly parses a committed hex string into a [`Color`].
///
/// Accepts 3 digits (shorthand, each digit doubled), 6 (`RRGGBB`), or 8
/// (`RRGGBBAA`) after sanitizing; any other digit count is an error.
pub fn parse_commit(input: &str) -> Result<Color, HexParseError> {
    let digits = hex_digits(input);
    let bytes = digits.as_bytes();
    match bytes.len() {
        0..3 => Err(HexParseError::TooShort),
        3 => {
            let r = nibble(bytes[0]);
            let g = nibble(bytes[1]);
            let b = nibble(bytes[2]);
            Ok(Color::from_rgb_u8(r << 4 | r, g << 4 | g, b << 4 | b))
        }
        6 => Ok(Color::from_rgb_u8(
            pair(bytes[0], bytes[1]),
            pair(bytes[2], bytes[3]),
            pair(bytes[4], bytes[5]),
        )),
        8 => Ok(Color::from_rgba_u8(
            pair(bytes[0], bytes[1]),
            pair(bytes[2], bytes[3]),
            pair(bytes[4], bytes[5]),
            pair(bytes[6], bytes[7]),
        )),
        4..=7 => Err(HexParseError::InvalidLength),
        _ => Err(HexParseError::TooLong),
    }
}

/// Value of one uppercase hex digit. Callers guarantee the byte is a hex
/// digit; anything else reads as zero.
fn nibble(byte: u8) -> u8 {
    match byte {
        b'0'..=b'9' => byte - b'0',
        b'A'..=b'F' => byte - b'A' + 10,
        _ => 0,
    }
}

fn pair(high: u8, low: u8) -> u8 {
    nibble(high) << 4 | nibble(low)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec;

    #[test]
    fn test_sanitize_strips_and_uppercases() {
        assert_eq!(sanitize_for_typing("#ff00aa"), "FF00AA");
        assert_eq!(sanitize_for_typing("12 g 3-4!"), "1234");
        assert_eq!(sanitize_for_typing(""), "");
        assert_eq!(sanitize_for_typing("deadbeefcafe"), "DEADBEEF");
    }

    #[test]
    fn test_commit_six_digits() {
        let color = parse_commit("FF8000").expect("valid hex");
        assert_eq!(color.to_rgba_u8(), [255, 128, 0, 255]);
        // Case and a leading # are tolerated.
        assert_eq!(parse_commit("#ff8000"), parse_commit("FF8000"));
    }

    #[test]
    fn test_commit_shorthand_doubles_digits() {
        let color = parse_commit("0F0").expect("valid hex");
        assert_eq!(color.to_rgba_u8(), [0, 255, 0, 255]);
        assert_eq!(codec::to_hex(color), "00FF00");

        let color = parse_commit("ABC").expect("valid hex");
        assert_eq!(color.to_rgba_u8(), [0xAA, 0xBB, 0xCC, 255]);
    }

    #[test]
    fn test_commit_eight_digits_carries_alpha() {
        let color = parse_commit("11223344").expect("valid hex");
        assert_eq!(color.to_rgba_u8(), [0x11, 0x22, 0x33, 0x44]);
    }

    #[test]
    fn test_commit_rejects_bad_lengths() {
        assert_eq!(parse_commit(""), Err(HexParseError::TooShort));
        assert_eq!(parse_commit("12"), Err(HexParseError::TooShort));
        assert_eq!(parse_commit("1234"), Err(HexParseError::InvalidLength));
        assert_eq!(parse_commit("1234567"), Err(HexParseError::InvalidLength));
        assert_eq!(parse_commit("123456789"), Err(HexParseError::TooLong));
    }

    #[test]
    fn test_commit_ignores_stripped_garbage() {
        // Non-hex characters vanish before the length check.
        assert_eq!(parse_commit("1g2"), Err(HexParseError::TooShort));
    }

    #[test]
    fn test_hex_round_trip() {
        for hex in ["000000", "FFFFFF", "FF0000", "12AB34", "0C0D0E"] {
            let color = parse_commit(hex).expect("valid hex");
            assert_eq!(codec::to_hex(color), hex);
        }
    }
}
