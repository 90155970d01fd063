//! Clipboard text formats and typed-text parsing.
//!
//! The output strings are pasted straight into stylesheets, so their exact
//! shape matters: comma + space separators, percent signs on S and L only,
//! uppercase hex.
//!
//! | Function      | Output                 |
//! |---------------|------------------------|
//! | [`rgb_text`]  | `255, 122, 89`         |
//! | [`hsl_text`]  | `12, 100%, 67%`        |
//! | [`hsl_css`]   | `hsl(12,100%,67%)`     |
//! | [`css_token`] | `--primary: #FF7A59;`  |

use std::num::{IntErrorKind, ParseIntError};

use crate::color::{Hsl, Rgb};
use crate::error::ColorError;

const RGB_PATTERN: &str = "R, G, B with integers 0-255";
const HSL_PATTERN: &str = "H, S%, L% with H 0-360 and S/L 0-100";

/// `R, G, B`
#[must_use]
pub fn rgb_text(rgb: Rgb) -> String {
    format!("{}, {}, {}", rgb.r, rgb.g, rgb.b)
}

/// `H, S%, L%` with each component rounded to an integer.
#[must_use]
pub fn hsl_text(hsl: Hsl) -> String {
    let Hsl { h, s, l } = hsl.rounded();
    format!("{h}, {s}%, {l}%")
}

/// CSS functional notation without spaces, as the HSL picker copies it.
#[must_use]
pub fn hsl_css(hsl: Hsl) -> String {
    let Hsl { h, s, l } = hsl.rounded();
    format!("hsl({h},{s}%,{l}%)")
}

/// A custom-property declaration: `--name: #HEX;`.
#[must_use]
pub fn css_token(name: &str, color: Rgb) -> String {
    format!("--{name}: {};", color.to_hex())
}

/// Parse typed `R, G, B` text (an `rgb(...)` wrapper is tolerated).
///
/// # Errors
///
/// [`ColorError::InvalidFormat`] if the text is not three comma-separated
/// integers; [`ColorError::OutOfRange`] if any channel exceeds 0–255.
pub fn parse_rgb_text(text: &str) -> Result<Rgb, ColorError> {
    let invalid = || ColorError::invalid("rgb", RGB_PATTERN, text);
    let [r, g, b] = split_three(unwrap_function(text, "rgb")).ok_or_else(invalid)?;

    let channel = |part: &str| -> Result<u8, ColorError> {
        let value: i64 = part.parse().map_err(|err: ParseIntError| match err.kind() {
            IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => ColorError::OutOfRange {
                field: "rgb",
                value: part.parse().unwrap_or(f64::NAN),
                min: 0.0,
                max: 255.0,
            },
            _ => invalid(),
        })?;
        ColorError::check_range("rgb", value as f64, 0.0, 255.0)?;
        // Safe: range-checked above.
        Ok(value as u8)
    };

    Ok(Rgb::new(channel(r)?, channel(g)?, channel(b)?))
}

/// Parse typed `H, S%, L%` text (an `hsl(...)` wrapper is tolerated, percent
/// signs are optional).
///
/// # Errors
///
/// [`ColorError::InvalidFormat`] for malformed text;
/// [`ColorError::OutOfRange`] for a hue outside 0–360 or S/L outside 0–100.
pub fn parse_hsl_text(text: &str) -> Result<Hsl, ColorError> {
    let invalid = || ColorError::invalid("hsl", HSL_PATTERN, text);
    let [h, s, l] = split_three(unwrap_function(text, "hsl")).ok_or_else(invalid)?;

    // Digits that overflow f64 parse to an infinity, which the range check
    // below rejects as out of range. Spelled-out `inf` or `nan` is malformed.
    let number = |part: &str, percent: bool| -> Result<f64, ColorError> {
        let part = if percent { part.strip_suffix('%').unwrap_or(part).trim_end() } else { part };
        let value: f64 = part.parse().map_err(|_| invalid())?;
        let overflowed = value.is_infinite() && part.bytes().any(|b| b.is_ascii_digit());
        if value.is_finite() || overflowed { Ok(value) } else { Err(invalid()) }
    };

    let h = ColorError::check_range("hue", number(h, false)?, 0.0, 360.0)?;
    let s = ColorError::check_range("saturation", number(s, true)?, 0.0, 100.0)?;
    let l = ColorError::check_range("lightness", number(l, true)?, 0.0, 100.0)?;

    Ok(Hsl::new(h.rem_euclid(360.0), s, l))
}

/// Parse any of the accepted color text forms: hex, `R, G, B`, or `H, S%, L%`.
///
/// Text containing a `%` or starting with `hsl` is read as HSL, text with
/// commas as RGB, anything else as hex.
///
/// # Errors
///
/// Propagates the error of whichever parser the text was routed to.
pub fn parse_color_text(text: &str) -> Result<Rgb, ColorError> {
    let trimmed = text.trim();
    let lower = trimmed.to_ascii_lowercase();
    if lower.starts_with("hsl") || trimmed.contains('%') {
        parse_hsl_text(trimmed).map(Hsl::to_rgb)
    } else if trimmed.contains(',') {
        parse_rgb_text(trimmed)
    } else {
        trimmed.parse()
    }
}

/// Strip a case-insensitive `name(...)` wrapper if present.
fn unwrap_function<'a>(text: &'a str, name: &str) -> &'a str {
    let text = text.trim();
    let Some(prefix) = text.get(..name.len()) else {
        return text;
    };
    if !prefix.eq_ignore_ascii_case(name) {
        return text;
    }
    text[name.len()..]
        .trim_start()
        .strip_prefix('(')
        .and_then(|inner| inner.strip_suffix(')'))
        .unwrap_or(text)
}

fn split_three(text: &str) -> Option<[&str; 3]> {
    let mut parts = text.split(',').map(str::trim);
    let first = parts.next()?;
    let second = parts.next()?;
    let third = parts.next()?;
    if parts.next().is_some() || [first, second, third].iter().any(|p| p.is_empty()) {
        return None;
    }
    Some([first, second, third])
}
