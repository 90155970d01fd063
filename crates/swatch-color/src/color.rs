// SPDX-License-Identifier: MIT
//
// Color representations and the conversions between them.
//
//   Hex ("#RRGGBB", "#RGB") ──► Rgb (three u8 channels) ◄──► Hsl (degrees, percent)
//
// Rgb is the hub. Hex is only ever a text encoding of an Rgb, and Hsl is
// derived from Rgb with the usual min/max/delta construction. Channel values
// coming from floating-point math are rounded to the nearest integer (halves
// up) and then clamped into 0..=255, never wrapped.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ColorError;

/// Pattern description used in hex parse errors.
pub const HEX_PATTERN: &str = "#RGB or #RRGGBB";

// ─── Rgb ─────────────────────────────────────────────────────────────────────

/// An 8-bit sRGB color.
///
/// # Examples
///
/// ```
/// use swatch_color::Rgb;
///
/// let coral = Rgb::from_hex("#ff7a59").unwrap();
/// assert_eq!(coral, Rgb::new(255, 122, 89));
/// assert_eq!(coral.to_hex(), "#FF7A59");
/// ```
///
/// Serializes as its canonical hex string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Pure black.
    pub const BLACK: Self = Self::new(0, 0, 0);

    /// Pure white.
    pub const WHITE: Self = Self::new(255, 255, 255);

    #[inline]
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Build a color from floating-point channels (nominally 0–255).
    ///
    /// Each channel is rounded to the nearest integer and clamped. NaN maps
    /// to 0 so no arithmetic accident can produce a garbage channel.
    #[must_use]
    pub fn from_f64(r: f64, g: f64, b: f64) -> Self {
        Self::new(to_channel(r), to_channel(g), to_channel(b))
    }

    /// Parse `#RGB` / `#RRGGBB` (leading `#` optional, case-insensitive).
    #[must_use]
    pub fn from_hex(s: &str) -> Option<Self> {
        parse_hex(s)
    }

    /// Canonical uppercase `#RRGGBB`.
    #[must_use]
    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// HSL with every component rounded to an integer (display form).
    #[must_use]
    pub fn to_hsl(self) -> Hsl {
        rgb_to_hsl(self.r, self.g, self.b)
    }

    /// HSL without rounding. Converting this back with [`Hsl::to_rgb`]
    /// reproduces the original channels exactly.
    #[must_use]
    pub fn to_hsl_precise(self) -> Hsl {
        let (h, s, l) = hsl_components(self.r, self.g, self.b);
        Hsl::new(h, s, l)
    }

    /// Per-channel linear interpolation toward `other`.
    ///
    /// `t` = 0.0 returns `self`, `t` = 1.0 returns `other`.
    #[must_use]
    pub fn mix(self, other: Self, t: f64) -> Self {
        let t = t.clamp(0.0, 1.0);
        let lerp = |a: u8, b: u8| {
            let a = f64::from(a);
            (f64::from(b) - a).mul_add(t, a)
        };
        Self::from_f64(lerp(self.r, other.r), lerp(self.g, other.g), lerp(self.b, other.b))
    }

    /// Whether all three channels are equal.
    #[inline]
    #[must_use]
    pub const fn is_gray(self) -> bool {
        self.r == self.g && self.g == self.b
    }

    /// Channels as an array, in R, G, B order.
    #[inline]
    #[must_use]
    pub const fn channels(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Rgb {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_hex(s).ok_or_else(|| ColorError::invalid("hex", HEX_PATTERN, s))
    }
}

impl From<Rgb> for String {
    fn from(rgb: Rgb) -> Self {
        rgb.to_hex()
    }
}

impl TryFrom<String> for Rgb {
    type Error = ColorError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<(u8, u8, u8)> for Rgb {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self::new(r, g, b)
    }
}

// ─── Hsl ─────────────────────────────────────────────────────────────────────

/// A color in Hue-Saturation-Lightness form.
///
/// - `h`: degrees in [0, 360); 360 normalizes to 0
/// - `s`: saturation percentage, 0–100
/// - `l`: lightness percentage, 0–100
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Hsl {
    pub h: f64,
    pub s: f64,
    pub l: f64,
}

impl Hsl {
    #[inline]
    #[must_use]
    pub const fn new(h: f64, s: f64, l: f64) -> Self {
        Self { h, s, l }
    }

    #[must_use]
    pub fn to_rgb(self) -> Rgb {
        hsl_to_rgb(self.h, self.s, self.l)
    }

    #[must_use]
    pub fn to_hex(self) -> String {
        self.to_rgb().to_hex()
    }

    /// Round every component to an integer, keeping hue inside [0, 360).
    #[must_use]
    pub fn rounded(self) -> Self {
        Self {
            h: round_half_up(self.h).rem_euclid(360.0),
            s: round_half_up(self.s),
            l: round_half_up(self.l),
        }
    }
}

impl fmt::Display for Hsl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::format::hsl_text(*self))
    }
}

// ─── Free-function API ───────────────────────────────────────────────────────

/// Parse a hex color. Returns `None` for anything but exactly 3 or 6 hex
/// digits after an optional leading `#`.
#[must_use]
pub fn hex_to_rgb(hex: &str) -> Option<Rgb> {
    parse_hex(hex)
}

/// Format floating-point channels as uppercase `#RRGGBB`.
///
/// Channels are rounded, then clamped to 0–255 before encoding.
#[must_use]
pub fn rgb_to_hex(r: f64, g: f64, b: f64) -> String {
    Rgb::from_f64(r, g, b).to_hex()
}

/// Convert 8-bit RGB to HSL, rounding all three outputs to integers.
///
/// Grays (`r == g == b`) report hue 0 and saturation 0.
#[must_use]
pub fn rgb_to_hsl(r: u8, g: u8, b: u8) -> Hsl {
    let (h, s, l) = hsl_components(r, g, b);
    Hsl::new(h, s, l).rounded()
}

/// Convert HSL to 8-bit RGB.
///
/// Hue wraps modulo 360 (negative hues included); saturation and lightness
/// are clamped to 0–100. Zero saturation yields the exact gray
/// `round(l · 255)` on every channel.
#[must_use]
pub fn hsl_to_rgb(h: f64, s: f64, l: f64) -> Rgb {
    let h = finite_or_zero(h).rem_euclid(360.0);
    let s = (finite_or_zero(s) / 100.0).clamp(0.0, 1.0);
    let l = (finite_or_zero(l) / 100.0).clamp(0.0, 1.0);

    if s <= 0.0 {
        let gray = to_channel(l * 255.0);
        return Rgb::new(gray, gray, gray);
    }

    let q = if l < 0.5 { l * (1.0 + s) } else { l.mul_add(-s, l + s) };
    let p = 2.0f64.mul_add(l, -q);
    let hk = h / 360.0;

    Rgb::from_f64(
        hue_to_rgb(p, q, hk + 1.0 / 3.0) * 255.0,
        hue_to_rgb(p, q, hk) * 255.0,
        hue_to_rgb(p, q, hk - 1.0 / 3.0) * 255.0,
    )
}

/// Hex → rounded HSL. `None` when the hex text is invalid.
#[must_use]
pub fn hex_to_hsl(hex: &str) -> Option<Hsl> {
    parse_hex(hex).map(Rgb::to_hsl)
}

/// HSL → uppercase hex.
#[must_use]
pub fn hsl_to_hex(h: f64, s: f64, l: f64) -> String {
    hsl_to_rgb(h, s, l).to_hex()
}

// ─── Internals ───────────────────────────────────────────────────────────────

/// Unrounded (h°, s%, l%) from 8-bit channels.
fn hsl_components(r: u8, g: u8, b: u8) -> (f64, f64, f64) {
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = (f64::from(max) + f64::from(min)) / 510.0;

    if max == min {
        return (0.0, 0.0, l * 100.0);
    }

    let delta = f64::from(max - min);
    let s = (delta / 255.0) / (1.0 - 2.0f64.mul_add(l, -1.0).abs());
    let (rf, gf, bf) = (f64::from(r), f64::from(g), f64::from(b));

    let sector = if max == r {
        ((gf - bf) / delta) % 6.0
    } else if max == g {
        (bf - rf) / delta + 2.0
    } else {
        (rf - gf) / delta + 4.0
    };

    let h = sector * 60.0;
    let h = if h < 0.0 { h + 360.0 } else { h };
    (h, s * 100.0, l * 100.0)
}

/// Piecewise hue interpolation with breakpoints at 1/6, 1/2 and 2/3.
fn hue_to_rgb(p: f64, q: f64, t: f64) -> f64 {
    let t = if t < 0.0 {
        t + 1.0
    } else if t > 1.0 {
        t - 1.0
    } else {
        t
    };

    if t < 1.0 / 6.0 {
        ((q - p) * 6.0).mul_add(t, p)
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        ((q - p) * (2.0 / 3.0 - t)).mul_add(6.0, p)
    } else {
        p
    }
}

fn parse_hex(s: &str) -> Option<Rgb> {
    let s = s.trim();
    let s = s.strip_prefix('#').unwrap_or(s);
    let bytes = s.as_bytes();

    match bytes.len() {
        // #RGB
        3 => {
            let r = parse_hex_digit(bytes[0])?;
            let g = parse_hex_digit(bytes[1])?;
            let b = parse_hex_digit(bytes[2])?;
            Some(Rgb::new(r << 4 | r, g << 4 | g, b << 4 | b))
        }
        // #RRGGBB
        6 => {
            let r = parse_hex_byte(&bytes[0..2])?;
            let g = parse_hex_byte(&bytes[2..4])?;
            let b = parse_hex_byte(&bytes[4..6])?;
            Some(Rgb::new(r, g, b))
        }
        _ => None,
    }
}

#[inline]
const fn parse_hex_digit(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

#[inline]
fn parse_hex_byte(bytes: &[u8]) -> Option<u8> {
    let hi = parse_hex_digit(bytes[0])?;
    let lo = parse_hex_digit(bytes[1])?;
    Some(hi << 4 | lo)
}

/// Nearest integer with halves rounded up (toward +∞).
#[inline]
pub(crate) fn round_half_up(v: f64) -> f64 {
    (v + 0.5).floor()
}

#[inline]
fn finite_or_zero(v: f64) -> f64 {
    if v.is_finite() { v } else { 0.0 }
}

/// Round then clamp to a u8 channel.
#[inline]
fn to_channel(v: f64) -> u8 {
    if v.is_nan() {
        return 0;
    }
    // Safe: clamp guarantees 0.0 <= value <= 255.0 before truncation.
    round_half_up(v).clamp(0.0, 255.0) as u8
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn assert_rgb_close(actual: Rgb, expected: Rgb, tolerance: u8) {
        for (a, e) in actual.channels().into_iter().zip(expected.channels()) {
            assert!(
                a.abs_diff(e) <= tolerance,
                "{actual:?} differs from {expected:?} by more than {tolerance}"
            );
        }
    }

    // ── Hex parsing ─────────────────────────────────────────────────

    #[test]
    fn hex_parsing_rrggbb() {
        assert_eq!(hex_to_rgb("#ff7a59"), Some(Rgb::new(255, 122, 89)));
        assert_eq!(hex_to_rgb("#FF7A59"), Some(Rgb::new(255, 122, 89)));
    }

    #[test]
    fn hex_parsing_short() {
        assert_eq!(hex_to_rgb("#f0a"), Some(Rgb::new(255, 0, 170)));
    }

    #[test]
    fn hex_parsing_no_hash() {
        assert_eq!(hex_to_rgb("00ff00"), Some(Rgb::new(0, 255, 0)));
        assert_eq!(hex_to_rgb("abc"), Some(Rgb::new(0xaa, 0xbb, 0xcc)));
    }

    #[test]
    fn hex_parsing_invalid() {
        assert_eq!(hex_to_rgb("#12"), None);
        assert_eq!(hex_to_rgb("notacolor"), None);
        assert_eq!(hex_to_rgb("#GGGGGG"), None);
        assert_eq!(hex_to_rgb(""), None);
        assert_eq!(hex_to_rgb("#"), None);
        assert_eq!(hex_to_rgb("#ff00ff80"), None);
        assert_eq!(hex_to_rgb("##fff"), None);
        assert_eq!(hex_to_rgb("#ééé"), None);
    }

    #[test]
    fn from_str_reports_invalid_format() {
        let err = "#12".parse::<Rgb>().unwrap_err();
        assert!(matches!(err, ColorError::InvalidFormat { field: "hex", .. }));
        assert_eq!("#abc".parse::<Rgb>(), Ok(Rgb::new(0xaa, 0xbb, 0xcc)));
    }

    #[test]
    fn hex_roundtrip_is_exact() {
        for r in (0..=255u8).step_by(3) {
            for g in (0..=255u8).step_by(5) {
                for b in (0..=255u8).step_by(7) {
                    let rgb = Rgb::new(r, g, b);
                    assert_eq!(hex_to_rgb(&rgb.to_hex()), Some(rgb));
                }
            }
        }
        for v in 0..=255u8 {
            let gray = Rgb::new(v, v, v);
            assert_eq!(hex_to_rgb(&gray.to_hex()), Some(gray));
        }
    }

    // ── rgb_to_hex ──────────────────────────────────────────────────

    #[test]
    fn rgb_to_hex_uppercase() {
        assert_eq!(rgb_to_hex(171.0, 205.0, 239.0), "#ABCDEF");
    }

    #[test]
    fn rgb_to_hex_rounds_then_clamps() {
        assert_eq!(rgb_to_hex(254.6, -3.0, 300.0), "#FF00FF");
        assert_eq!(rgb_to_hex(0.5, 1.49, 15.5), "#010110");
    }

    #[test]
    fn nan_channel_becomes_zero() {
        assert_eq!(Rgb::from_f64(f64::NAN, 12.0, f64::INFINITY), Rgb::new(0, 12, 255));
    }

    // ── RGB → HSL ───────────────────────────────────────────────────

    #[test]
    fn grayscale_has_zero_hue_and_saturation() {
        for v in 0..=255u8 {
            let hsl = rgb_to_hsl(v, v, v);
            let expected_l = round_half_up(f64::from(v) / 255.0 * 100.0);
            assert_eq!(hsl, Hsl::new(0.0, 0.0, expected_l), "gray {v}");
        }
    }

    #[test]
    fn primaries_have_expected_hues() {
        assert_eq!(rgb_to_hsl(255, 0, 0), Hsl::new(0.0, 100.0, 50.0));
        assert_eq!(rgb_to_hsl(0, 255, 0), Hsl::new(120.0, 100.0, 50.0));
        assert_eq!(rgb_to_hsl(0, 0, 255), Hsl::new(240.0, 100.0, 50.0));
        assert_eq!(rgb_to_hsl(255, 0, 255), Hsl::new(300.0, 100.0, 50.0));
    }

    #[test]
    fn hue_never_reaches_360() {
        // (g - b) / delta = -1/120, so the raw hue is -0.5 degrees.
        let hsl = rgb_to_hsl(250, 10, 12);
        assert!(hsl.h >= 0.0 && hsl.h < 360.0, "hue out of range: {}", hsl.h);
    }

    // ── HSL → RGB ───────────────────────────────────────────────────

    #[test]
    fn zero_saturation_is_exact_gray() {
        assert_eq!(hsl_to_rgb(200.0, 0.0, 50.0), Rgb::new(128, 128, 128));
        assert_eq!(hsl_to_rgb(0.0, 0.0, 100.0), Rgb::WHITE);
        assert_eq!(hsl_to_rgb(0.0, 0.0, 0.0), Rgb::BLACK);
    }

    #[test]
    fn hue_wraps_including_negative() {
        assert_eq!(hsl_to_rgb(360.0, 100.0, 50.0), hsl_to_rgb(0.0, 100.0, 50.0));
        assert_eq!(hsl_to_rgb(-120.0, 100.0, 50.0), hsl_to_rgb(240.0, 100.0, 50.0));
        assert_eq!(hsl_to_rgb(480.0, 100.0, 50.0), Rgb::new(0, 255, 0));
    }

    #[test]
    fn saturation_and_lightness_clamp() {
        assert_eq!(hsl_to_rgb(0.0, 150.0, 50.0), Rgb::new(255, 0, 0));
        assert_eq!(hsl_to_rgb(0.0, 100.0, 130.0), Rgb::WHITE);
        assert_eq!(hsl_to_rgb(0.0, -20.0, 50.0), Rgb::new(128, 128, 128));
    }

    #[test]
    fn non_finite_input_never_produces_garbage() {
        assert_eq!(hsl_to_rgb(f64::NAN, f64::NAN, f64::NAN), Rgb::BLACK);
    }

    #[test]
    fn precise_hsl_roundtrip_within_one() {
        for r in (0..=255u8).step_by(3) {
            for g in (0..=255u8).step_by(5) {
                for b in (0..=255u8).step_by(7) {
                    let rgb = Rgb::new(r, g, b);
                    assert_rgb_close(rgb.to_hsl_precise().to_rgb(), rgb, 1);
                }
            }
        }
    }

    #[test]
    fn rounded_hsl_roundtrip_stays_near() {
        // Integer percentages quantize lightness to 2.55-unit steps.
        for r in (0..=255u8).step_by(17) {
            for g in (0..=255u8).step_by(17) {
                for b in (0..=255u8).step_by(17) {
                    let rgb = Rgb::new(r, g, b);
                    assert_rgb_close(rgb.to_hsl().to_rgb(), rgb, 6);
                }
            }
        }
    }

    // ── Compositions ────────────────────────────────────────────────

    #[test]
    fn hex_to_hsl_propagates_invalid() {
        assert_eq!(hex_to_hsl("#GGG"), None);
        assert_eq!(hex_to_hsl("#000"), Some(Hsl::new(0.0, 0.0, 0.0)));
    }

    #[test]
    fn coral_end_to_end() {
        let rgb = hex_to_rgb("#FF7A59").unwrap();
        assert_eq!(rgb, Rgb::new(255, 122, 89));
        assert_eq!(rgb.to_hsl(), Hsl::new(12.0, 100.0, 67.0));
        assert_eq!(rgb.to_hsl_precise().to_hex(), "#FF7A59");
        assert_eq!(rgb_to_hex(255.0, 122.0, 89.0), "#FF7A59");
    }

    #[test]
    fn hsl_to_hex_formats_uppercase() {
        assert_eq!(hsl_to_hex(210.0, 100.0, 50.0), "#0080FF");
    }

    // ── Mixing ──────────────────────────────────────────────────────

    #[test]
    fn mix_endpoints_and_midpoint() {
        let red = Rgb::new(255, 0, 0);
        assert_eq!(red.mix(Rgb::WHITE, 0.0), red);
        assert_eq!(red.mix(Rgb::WHITE, 1.0), Rgb::WHITE);
        assert_eq!(red.mix(Rgb::WHITE, 0.5), Rgb::new(255, 128, 128));
    }

    #[test]
    fn display_is_hex() {
        assert_eq!(Rgb::new(1, 2, 3).to_string(), "#010203");
        assert_eq!(Hsl::new(13.0, 100.0, 67.0).to_string(), "13, 100%, 67%");
    }
}
