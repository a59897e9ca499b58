//! RGB colors with channels on the 0-255 scale.
//!
//! Channels are floats and are never clamped here; shading can push them below zero
//! or above 255 and it is up to whoever presents the image to saturate them.

use crate::geometry::FloatType;

pub type Color = rgb::RGB<FloatType>;

pub const BLACK: Color = Color {
    r: 0.0,
    g: 0.0,
    b: 0.0,
};

pub const WHITE: Color = Color {
    r: 255.0,
    g: 255.0,
    b: 255.0,
};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ParseColorError {
    #[error("color {0:?} does not start with '#'")]
    MissingHash(String),
    #[error("color {0:?} must have 3 or 6 hex digits")]
    InvalidLength(String),
    #[error("color {0:?} contains a non-hex digit")]
    InvalidDigit(String),
}

/// Scales all channels by `1 - amount`.
pub fn darken(color: Color, amount: FloatType) -> Color {
    let keep = 1.0 - amount;
    Color::new(color.r * keep, color.g * keep, color.b * keep)
}

/// Formats a color as `#rrggbb`.
/// Channels are floored and saturated to a byte first.
pub fn color_to_hex(color: Color) -> String {
    let byte = |channel: FloatType| channel.floor().clamp(0.0, 255.0) as u8;
    format!(
        "#{:02x}{:02x}{:02x}",
        byte(color.r),
        byte(color.g),
        byte(color.b)
    )
}

/// Parses `#rrggbb` or the `#rgb` shorthand, where every digit is doubled (`#f58` is `#ff5588`).
pub fn parse_hex_color(s: &str) -> Result<Color, ParseColorError> {
    let digits = s
        .strip_prefix('#')
        .ok_or_else(|| ParseColorError::MissingHash(s.to_owned()))?;
    if digits.len() != 3 && digits.len() != 6 {
        return Err(ParseColorError::InvalidLength(s.to_owned()));
    }
    if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(ParseColorError::InvalidDigit(s.to_owned()));
    }

    // All digits are ASCII now, so byte slicing can't split a character.
    let channel = |range: std::ops::Range<usize>| -> FloatType {
        let value = u8::from_str_radix(&digits[range.clone()], 16).unwrap_or_else(|_| {
            unreachable!("digits were checked to be hexadecimal")
        });
        if range.len() == 1 {
            FloatType::from(value * 17)
        } else {
            FloatType::from(value)
        }
    };

    Ok(if digits.len() == 3 {
        Color::new(channel(0..1), channel(1..2), channel(2..3))
    } else {
        Color::new(channel(0..2), channel(2..4), channel(4..6))
    })
}

/// Lenient version of [`parse_hex_color`], anything malformed decodes to black.
pub fn hex_to_color(s: &str) -> Color {
    parse_hex_color(s).unwrap_or(BLACK)
}

#[cfg(test)]
mod test {
    use super::*;

    use assert2::{assert, let_assert};
    use test_case::test_case;
    use test_strategy::proptest;

    #[test_case("#000000", BLACK ; "black")]
    #[test_case("#ffffff", WHITE ; "white")]
    #[test_case("#FF8000", Color::new(255.0, 128.0, 0.0) ; "uppercase")]
    #[test_case("#f58", Color::new(255.0, 85.0, 136.0) ; "shorthand")]
    #[test_case("#fff", WHITE ; "shorthand white")]
    fn parses_valid_colors(s: &str, expected: Color) {
        assert!(hex_to_color(s) == expected);
    }

    #[test_case("" ; "empty")]
    #[test_case("#" ; "hash only")]
    #[test_case("ffffff" ; "no hash")]
    #[test_case("fff0" ; "four chars without hash")]
    #[test_case("#ffff" ; "four digits")]
    #[test_case("#fffffff" ; "seven digits")]
    #[test_case("#ggg" ; "not hex")]
    #[test_case("#+ffff" ; "sign")]
    #[test_case("#éé" ; "multibyte")]
    fn malformed_colors_are_black(s: &str) {
        assert!(hex_to_color(s) == BLACK);
    }

    #[test]
    fn strict_parse_reports_the_problem() {
        let_assert!(Err(ParseColorError::MissingHash(_)) = parse_hex_color("fff"));
        let_assert!(Err(ParseColorError::InvalidLength(_)) = parse_hex_color("#ff"));
        let_assert!(Err(ParseColorError::InvalidDigit(_)) = parse_hex_color("#12345z"));
    }

    #[test]
    fn hex_floors_fractional_channels() {
        assert!(color_to_hex(Color::new(0.0, 200.099, 255.0)) == "#00c8ff");
    }

    #[test]
    fn hex_saturates_out_of_range_channels() {
        assert!(color_to_hex(Color::new(-20.0, 300.0, 15.9)) == "#00ff0f");
    }

    #[proptest]
    fn hex_round_trip(r: u8, g: u8, b: u8) {
        let color = Color::new(r.into(), g.into(), b.into());
        assert!(hex_to_color(&color_to_hex(color)) == color);
    }

    #[test]
    fn darken_scales_channels() {
        let darker = darken(Color::new(200.0, 100.0, 50.0), 0.25);
        assert!(darker == Color::new(150.0, 75.0, 37.5));
    }
}
