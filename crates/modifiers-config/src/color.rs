/*
 * color.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Hex color + opacity to CSS rgba() conversion.
 */

use once_cell::sync::Lazy;
use regex::Regex;

/// Six hex digits, case-insensitive, nothing else.
static HEX_COLOR: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(?i)[0-9A-F]{6}$").unwrap());

/// Convert a hex color and an opacity into an `rgba(r,g,b,a)` string.
///
/// The hex value may carry surrounding whitespace and a leading `#`, and
/// may use the 3-digit shorthand. Invalid colors yield an empty string so
/// that extraction can store a placeholder and carry on. The opacity is
/// read as a float; anything unparseable or non-finite becomes `0`.
///
/// # Example
///
/// ```
/// use modifiers_config::hex_to_rgba;
///
/// assert_eq!(hex_to_rgba("#f00", "0.5"), "rgba(255,0,0,0.5)");
/// assert_eq!(hex_to_rgba("nope", "1"), "");
/// ```
pub fn hex_to_rgba(hex: &str, opacity: &str) -> String {
    let digits = hex.trim();
    let digits = digits.strip_prefix('#').unwrap_or(digits);

    let expanded: String = if digits.chars().count() == 3 {
        digits.chars().flat_map(|c| [c, c]).collect()
    } else {
        digits.to_string()
    };

    if !HEX_COLOR.is_match(&expanded) {
        return String::new();
    }

    let mut rgb = [0u8; 3];
    if hex::decode_to_slice(&expanded, &mut rgb).is_err() {
        return String::new();
    }

    // NaN, inf and overflowing exponents parse as floats but are not CSS
    let alpha = opacity
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|a| a.is_finite())
        .unwrap_or(0.0);
    format!("rgba({},{},{},{})", rgb[0], rgb[1], rgb[2], alpha)
}
