//! Color temperature → sRGB via the Tanner Helland blackbody fit.
//!
//! The fit works on `t = K / 100` and treats each channel separately:
//!
//! ```text
//!            t <= 66                         t > 66
//! red   255                              329.698727446 · (t-60)^-0.1332047592
//! green 99.4708025861·ln t − 161.1195…   288.1221695283 · (t-60)^-0.0755148492
//! blue  0 (t <= 19), else                255
//!       138.5177312231·ln(t−10) − 305.0447927307
//! ```
//!
//! The coefficients reproduce the published reference approximation and
//! must not be altered.

use swatch_color::{ColorError, Rgb};

/// Lowest temperature the fit accepts; lower inputs clamp here.
pub const MIN_KELVIN: f64 = 1000.0;

/// Highest temperature the fit accepts; higher inputs clamp here.
pub const MAX_KELVIN: f64 = 40000.0;

/// Upper end of the range users can type into the picker.
pub const PICKER_MAX_KELVIN: f64 = 10000.0;

/// Typed temperatures snap to multiples of this.
pub const PICKER_STEP: f64 = 100.0;

const PREVIEW_POINTS: usize = 6;
const PREVIEW_SPAN: f64 = 1200.0;

/// A named lighting condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KelvinPreset {
    pub label: &'static str,
    pub kelvin: u32,
}

/// Common lighting conditions, warmest first.
pub const KELVIN_PRESETS: [KelvinPreset; 5] = [
    KelvinPreset { label: "Candlelight", kelvin: 1900 },
    KelvinPreset { label: "Warm (Incandescent)", kelvin: 2700 },
    KelvinPreset { label: "Soft White", kelvin: 3000 },
    KelvinPreset { label: "Daylight", kelvin: 5500 },
    KelvinPreset { label: "Noon Sun", kelvin: 6500 },
];

/// Unrounded channels (0–255) for a temperature. Non-finite input is
/// treated as the minimum temperature.
#[must_use]
pub fn kelvin_channels(kelvin: f64) -> (f64, f64, f64) {
    let k = if kelvin.is_finite() { kelvin.round() } else { MIN_KELVIN };
    let t = k.clamp(MIN_KELVIN, MAX_KELVIN) / 100.0;

    let red = if t <= 66.0 {
        255.0
    } else {
        329.698_727_446 * (t - 60.0).powf(-0.133_204_759_2)
    };

    let green = if t <= 66.0 {
        99.470_802_586_1f64.mul_add(t.ln(), -161.119_568_166_1)
    } else {
        288.122_169_528_3 * (t - 60.0).powf(-0.075_514_849_2)
    };

    let blue = if t >= 66.0 {
        255.0
    } else if t <= 19.0 {
        0.0
    } else {
        138.517_731_223_1f64.mul_add((t - 10.0).ln(), -305.044_792_730_7)
    };

    (
        red.clamp(0.0, 255.0),
        green.clamp(0.0, 255.0),
        blue.clamp(0.0, 255.0),
    )
}

/// Approximate sRGB color of a blackbody radiator at `kelvin`
/// (clamped to 1000–40000 K).
#[must_use]
pub fn kelvin_to_rgb(kelvin: f64) -> Rgb {
    let (r, g, b) = kelvin_channels(kelvin);
    Rgb::from_f64(r, g, b)
}

/// [`kelvin_to_rgb`] as uppercase hex.
#[must_use]
pub fn kelvin_to_hex(kelvin: f64) -> String {
    kelvin_to_rgb(kelvin).to_hex()
}

/// Six evenly spaced stops across a 1200 K window centred on `kelvin`,
/// bounded to the picker range. The centre itself is clamped into that
/// range first, and non-finite input centres on the minimum.
#[must_use]
pub fn kelvin_preview(kelvin: f64) -> Vec<(u32, Rgb)> {
    let kelvin = if kelvin.is_finite() { kelvin } else { MIN_KELVIN };
    let kelvin = kelvin.clamp(MIN_KELVIN, PICKER_MAX_KELVIN);
    let start = (kelvin - PREVIEW_SPAN / 2.0).max(MIN_KELVIN);
    let end = (kelvin + PREVIEW_SPAN / 2.0).min(PICKER_MAX_KELVIN);
    let last = (PREVIEW_POINTS - 1) as f64;

    (0..PREVIEW_POINTS)
        .map(|i| {
            let k = (end - start).mul_add(i as f64 / last, start).round();
            (k as u32, kelvin_to_rgb(k))
        })
        .collect()
}

/// Interpret a typed temperature.
///
/// Empty text keeps `current`. Anything else must be a number within the
/// picker range and is snapped to the nearest 100 K.
///
/// # Errors
///
/// [`ColorError::InvalidFormat`] for non-numeric text,
/// [`ColorError::OutOfRange`] outside 1000–10000 K.
pub fn parse_kelvin_input(text: &str, current: u32) -> Result<u32, ColorError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(current);
    }

    let value: f64 = trimmed
        .parse()
        .ok()
        .filter(|v: &f64| v.is_finite())
        .ok_or_else(|| ColorError::InvalidFormat {
            field: "kelvin",
            expected: "a numeric Kelvin value",
            input: trimmed.to_owned(),
        })?;

    ColorError::check_range("kelvin", value, MIN_KELVIN, PICKER_MAX_KELVIN)?;

    let snapped = ((value / PICKER_STEP).round() * PICKER_STEP).clamp(MIN_KELVIN, PICKER_MAX_KELVIN);
    Ok(snapped as u32)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
