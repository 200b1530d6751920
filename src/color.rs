//! # Colors and Palettes
//!
//! RGB helpers shared by the drawing primitives and templates, plus the
//! built-in theme presets a card palette can be resolved from.

use crate::error::PlacardError;

/// A single RGB color.
pub type Rgb = [u8; 3];

/// The three colors driving a template: `[primary, secondary, tertiary]`.
pub type Palette = [Rgb; 3];

/// Neutral palette used when extraction fails or nothing else is selected.
pub const DEFAULT_PALETTE: Palette = [[26, 35, 126], [74, 0, 224], [138, 43, 226]];

/// Built-in theme presets, in display order.
pub const THEME_PRESETS: &[(&str, Palette)] = &[
    ("Blue Ocean", [[0, 119, 190], [0, 180, 216], [144, 224, 239]]),
    ("Cyber Night", [[25, 0, 51], [102, 0, 153], [153, 51, 255]]),
    ("Pastel Style", [[255, 179, 186], [255, 223, 186], [186, 255, 201]]),
    ("Sunset", [[255, 94, 77], [255, 154, 0], [237, 117, 57]]),
    ("Forest", [[34, 139, 34], [107, 142, 35], [124, 252, 0]]),
];

/// Look up a theme preset by name (case-insensitive).
pub fn theme_by_name(name: &str) -> Option<Palette> {
    THEME_PRESETS
        .iter()
        .find(|(preset, _)| preset.eq_ignore_ascii_case(name))
        .map(|(_, palette)| *palette)
}

/// Parse a 6-hex-digit color string, with or without a leading `#`.
pub fn parse_hex(input: &str) -> Result<Rgb, PlacardError> {
    let hex = input.strip_prefix('#').unwrap_or(input);
    if hex.len() != 6 {
        return Err(PlacardError::Validation(format!(
            "Invalid color '{}': expected 6 hex digits",
            input
        )));
    }
    let channel = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&hex[range], 16).map_err(|_| {
            PlacardError::Validation(format!("Invalid color '{}': non-hex digit", input))
        })
    };
    Ok([channel(0..2)?, channel(2..4)?, channel(4..6)?])
}

/// Subtract `amount` from every channel, saturating at 0.
#[inline]
pub fn darken(color: Rgb, amount: u8) -> Rgb {
    [
        color[0].saturating_sub(amount),
        color[1].saturating_sub(amount),
        color[2].saturating_sub(amount),
    ]
}

/// Add `amount` to every channel, saturating at 255.
#[inline]
pub fn lighten(color: Rgb, amount: u8) -> Rgb {
    [
        color[0].saturating_add(amount),
        color[1].saturating_add(amount),
        color[2].saturating_add(amount),
    ]
}

/// Summed absolute per-channel distance between two colors.
#[inline]
pub fn channel_distance(a: Rgb, b: Rgb) -> u32 {
    a.iter()
        .zip(b.iter())
        .map(|(&x, &y)| (i32::from(x) - i32::from(y)).unsigned_abs())
        .sum()
}

/// Sum of the three channels; a cheap brightness proxy.
#[inline]
pub fn channel_sum(color: Rgb) -> u32 {
    u32::from(color[0]) + u32::from(color[1]) + u32::from(color[2])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex() {
        assert_eq!(parse_hex("#FFFFFF").unwrap(), [255, 255, 255]);
        assert_eq!(parse_hex("1a2b3c").unwrap(), [0x1a, 0x2b, 0x3c]);
        assert_eq!(parse_hex("#000000").unwrap(), [0, 0, 0]);
    }

    #[test]
    fn test_parse_hex_rejects_malformed() {
        assert!(parse_hex("#FFF").is_err());
        assert!(parse_hex("not-hex").is_err());
        assert!(parse_hex("#GG0011").is_err());
        assert!(parse_hex("").is_err());
    }

    #[test]
    fn test_darken_floors_at_zero() {
        assert_eq!(darken([30, 10, 0], 40), [0, 0, 0]);
        assert_eq!(darken([100, 100, 100], 40), [60, 60, 60]);
    }

    #[test]
    fn test_lighten_caps_at_255() {
        assert_eq!(lighten([250, 200, 0], 35), [255, 235, 35]);
    }

    #[test]
    fn test_channel_distance() {
        assert_eq!(channel_distance([0, 0, 0], [255, 255, 255]), 765);
        assert_eq!(channel_distance([10, 20, 30], [10, 20, 30]), 0);
        assert_eq!(channel_distance([10, 20, 30], [20, 10, 30]), 20);
    }

    #[test]
    fn test_theme_by_name() {
        assert!(theme_by_name("Sunset").is_some());
        assert!(theme_by_name("sunset").is_some());
        assert!(theme_by_name("Nope").is_none());
    }
}
