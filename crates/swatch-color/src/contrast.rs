//! WCAG 2.x relative luminance and contrast ratio.
//!
//! The coefficients and the 0.03928 linearization threshold are the ones the
//! WCAG 2.x text defines. They are a compatibility contract: published
//! contrast checkers produce the same numbers, so none of this is tunable.
//!
//! | Level        | Normal text | Large text |
//! |--------------|-------------|------------|
//! | AA           | >= 4.5      | >= 3.0     |
//! | AAA          | >= 7.0      | >= 4.5     |

use serde::Serialize;

use crate::color::{HEX_PATTERN, Rgb};
use crate::error::ColorError;

const AA_NORMAL: f64 = 4.5;
const AA_LARGE: f64 = 3.0;
const AAA_NORMAL: f64 = 7.0;
const AAA_LARGE: f64 = 4.5;

/// Linearize one 8-bit sRGB channel per the WCAG 2.x definition.
#[must_use]
pub fn srgb_to_linear(channel: u8) -> f64 {
    let c = f64::from(channel) / 255.0;
    if c <= 0.039_28 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Compute the relative luminance of a color per WCAG 2.x.
///
///   L = 0.2126 * `R_lin` + 0.7152 * `G_lin` + 0.0722 * `B_lin`
///
/// Returns a value in [0.0, 1.0] where 0 is black and 1 is white.
#[must_use]
pub fn relative_luminance(color: Rgb) -> f64 {
    let r = srgb_to_linear(color.r);
    let g = srgb_to_linear(color.g);
    let b = srgb_to_linear(color.b);
    0.2126f64.mul_add(r, 0.7152f64.mul_add(g, 0.0722 * b))
}

/// Compute the WCAG contrast ratio between two colors.
///
/// Returns a value in [1.0, 21.0]:
///   (`L_lighter` + 0.05) / (`L_darker` + 0.05)
///
/// The result does not depend on argument order.
#[must_use]
pub fn contrast_ratio(a: Rgb, b: Rgb) -> f64 {
    let la = relative_luminance(a);
    let lb = relative_luminance(b);
    let (lighter, darker) = if la >= lb { (la, lb) } else { (lb, la) };
    (lighter + 0.05) / (darker + 0.05)
}

/// Contrast ratio between two hex strings.
///
/// # Errors
///
/// Returns [`ColorError::InvalidFormat`] if either color is not valid hex.
/// The first invalid argument is the one reported.
pub fn contrast_ratio_hex(a: &str, b: &str) -> Result<f64, ColorError> {
    let parse = |s: &str| Rgb::from_hex(s).ok_or_else(|| ColorError::invalid("hex", HEX_PATTERN, s));
    let a = parse(a)?;
    let b = parse(b)?;
    Ok(contrast_ratio(a, b))
}

/// Pass/fail results against the four WCAG thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[allow(clippy::struct_excessive_bools)]
pub struct WcagLevels {
    pub aa_normal: bool,
    pub aa_large: bool,
    pub aaa_normal: bool,
    pub aaa_large: bool,
}

/// Evaluate a contrast ratio against the WCAG thresholds (all `>=`).
#[must_use]
pub fn wcag_levels(ratio: f64) -> WcagLevels {
    WcagLevels {
        aa_normal: ratio >= AA_NORMAL,
        aa_large: ratio >= AA_LARGE,
        aaa_normal: ratio >= AAA_NORMAL,
        aaa_large: ratio >= AAA_LARGE,
    }
}

/// Black or white, whichever reads better on `background`.
///
/// Ties go to black.
#[must_use]
pub fn readable_on(background: Rgb) -> Rgb {
    if contrast_ratio(Rgb::BLACK, background) >= contrast_ratio(Rgb::WHITE, background) {
        Rgb::BLACK
    } else {
        Rgb::WHITE
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
