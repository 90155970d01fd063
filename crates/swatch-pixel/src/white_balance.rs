// SPDX-License-Identifier: MIT
//
// White balance — per-channel gains derived from a color temperature.
//
// The gains are the ratio of the blackbody color at the chosen temperature
// to the blackbody color at 6500 K, so 6500 K with zero tint is the identity.
// Tint nudges green only: positive tint reduces green (toward magenta),
// negative tint boosts it.
//
// Auto mode inverts this loosely with a gray-world guess: the average of a
// subsample of the image should be neutral, and its red/blue balance and
// green excess suggest a temperature and tint. It is a starting point for
// the user's sliders, not a calibrated measurement.

use tracing::debug;

use crate::buffer::{CHANNELS, PixelBuffer, PixelSource, for_each_pixel, to_channel};
use crate::error::PixelError;

/// Reference temperature that maps to unit gains.
pub const NEUTRAL_KELVIN: f64 = 6500.0;

/// Tint is clamped to ±this.
pub const MAX_TINT: f64 = 100.0;

/// Green gain changes by `tint / TINT_DIVISOR`.
const TINT_DIVISOR: f64 = 300.0;

/// Auto-estimation reads at most about this many pixels.
const SAMPLE_BUDGET: usize = 50_000;

const MIN_SUGGESTED_KELVIN: f64 = 2000.0;
const MAX_SUGGESTED_KELVIN: f64 = 10_000.0;

/// Multipliers for the R, G and B channels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gains {
    pub r_gain: f64,
    pub g_gain: f64,
    pub b_gain: f64,
}

impl Gains {
    pub const IDENTITY: Self = Self {
        r_gain: 1.0,
        g_gain: 1.0,
        b_gain: 1.0,
    };
}

/// A suggested temperature (K) and tint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TempTint {
    pub temp: u32,
    pub tint: i32,
}

impl TempTint {
    pub const NEUTRAL: Self = Self { temp: 6500, tint: 0 };
}

impl Default for TempTint {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

/// Blackbody color at `kelvin`, each channel in 0–1.
///
/// Same fit as the palette's Kelvin swatches but unrounded, since gains are
/// ratios of these values. Temperatures are clamped to 1000–40000 K and
/// non-finite input is treated as neutral.
#[must_use]
pub fn kelvin_to_rgb_normalized(kelvin: f64) -> [f64; 3] {
    let k = if kelvin.is_finite() { kelvin } else { NEUTRAL_KELVIN };
    let t = k.clamp(1000.0, 40_000.0) / 100.0;

    let (red, green, blue) = if t <= 66.0 {
        let green = 99.470_802_586_1f64.mul_add(t.ln(), -161.119_568_166_1);
        let blue = if t <= 19.0 {
            0.0
        } else {
            138.517_731_223_1f64.mul_add((t - 10.0).ln(), -305.044_792_730_7)
        };
        (255.0, green, blue)
    } else {
        let red = 329.698_727_446 * (t - 60.0).powf(-0.133_204_759_2);
        let green = 288.122_169_528_3 * (t - 60.0).powf(-0.075_514_849_2);
        (red, green, 255.0)
    };

    [red, green, blue].map(|c: f64| c.clamp(0.0, 255.0) / 255.0)
}

/// Channel gains that shift an image shot under neutral light to look as if
/// lit at `temp_k`, with a green↔magenta `tint` in ±100.
#[must_use]
pub fn compute_white_balance_gains(temp_k: f64, tint: f64) -> Gains {
    let neutral = kelvin_to_rgb_normalized(NEUTRAL_KELVIN);
    let current = kelvin_to_rgb_normalized(temp_k);
    let tint = if tint.is_finite() { tint.clamp(-MAX_TINT, MAX_TINT) } else { 0.0 };

    Gains {
        r_gain: current[0] / neutral[0],
        g_gain: current[1] / neutral[1] * (1.0 - tint / TINT_DIVISOR),
        b_gain: current[2] / neutral[2],
    }
}

/// Multiply each color channel by its gain, in place.
///
/// `blend` (clamped to 0–1) mixes the result with the original: 1 is the
/// full effect, 0 leaves the pixels as they were. Alpha is untouched.
pub fn apply_gains(buffer: &mut PixelBuffer, gains: Gains, blend: f64) {
    let blend = if blend.is_nan() { 1.0 } else { blend.clamp(0.0, 1.0) };
    debug!(
        width = buffer.width(),
        height = buffer.height(),
        r = gains.r_gain,
        g = gains.g_gain,
        b = gains.b_gain,
        blend,
        "applying white balance"
    );

    let channel = move |old: u8, gain: f64| {
        let old = f64::from(old);
        let new = (old * gain).clamp(0.0, 255.0);
        if blend < 1.0 {
            to_channel(new.mul_add(blend, old * (1.0 - blend)))
        } else {
            to_channel(new)
        }
    };

    for_each_pixel(buffer.data_mut(), |px| {
        px[0] = channel(px[0], gains.r_gain);
        px[1] = channel(px[1], gains.g_gain);
        px[2] = channel(px[2], gains.b_gain);
    });
}

/// Gray-world guess at the temperature and tint that would neutralise
/// `buffer`.
///
/// Returns [`TempTint::NEUTRAL`] for an empty image, a single repeated
/// color, or averages with no green or blue to form ratios from.
#[must_use]
pub fn estimate_temp_and_tint(buffer: &PixelBuffer) -> TempTint {
    let pixels = buffer.pixel_count();
    if pixels == 0 {
        return TempTint::NEUTRAL;
    }

    let stride = (pixels / SAMPLE_BUDGET).max(1);
    let data = buffer.data();
    let first = &data[..3];

    let mut sums = [0u64; 3];
    let mut count = 0u64;
    let mut uniform = true;

    for px in data.chunks_exact(CHANNELS).step_by(stride) {
        sums[0] += u64::from(px[0]);
        sums[1] += u64::from(px[1]);
        sums[2] += u64::from(px[2]);
        count += 1;
        uniform &= &px[..3] == first;
    }

    let [avg_r, avg_g, avg_b] = sums.map(|s| s as f64 / count as f64);
    debug!(samples = count, stride, avg_r, avg_g, avg_b, uniform, "gray-world averages");

    if uniform || avg_g <= 0.0 || avg_b <= 0.0 {
        return TempTint::NEUTRAL;
    }

    let red_ratio = avg_r / avg_g;
    let blue_ratio = avg_b / avg_g;
    let temp = round_half_up(NEUTRAL_KELVIN * (red_ratio / blue_ratio + 1.0) / 2.0)
        .clamp(MIN_SUGGESTED_KELVIN, MAX_SUGGESTED_KELVIN);
    let tint = round_half_up((avg_g - (avg_r + avg_b) / 2.0) / 2.0).clamp(-MAX_TINT, MAX_TINT);

    TempTint {
        temp: temp as u32,
        tint: tint as i32,
    }
}

/// Read `source` and estimate its white balance.
///
/// # Errors
///
/// Whatever `source.read_pixels()` reports, including
/// [`PixelError::SurfaceAccessDenied`].
pub fn estimate_from_source(source: &impl PixelSource) -> Result<TempTint, PixelError> {
    let buffer = source.read_pixels()?;
    Ok(estimate_temp_and_tint(&buffer))
}

#[inline]
fn round_half_up(v: f64) -> f64 {
    (v + 0.5).floor()
}

// ─── Tests ───────────────────────────────────────────────────────────────────
