//! Theme palettes — role-labelled light and dark color ramps.
//!
//! One hue and saturation feed both palettes; only the lightness ramp
//! differs:
//!
//! - light: starts at `100 - brightness` and climbs evenly to 100
//! - dark: starts at `brightness` and falls evenly to 0
//!
//! Every entry carries the black-or-white text color that reads best on it.

use serde::{Deserialize, Serialize};
use swatch_color::{Rgb, css_token, hsl_to_rgb, readable_on};

/// Semantic position of a color within a palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Primary,
    Accent,
    Surface,
    Extra1,
    Extra2,
}

impl Role {
    /// Roles in palette order.
    pub const ALL: [Self; 5] = [Self::Primary, Self::Accent, Self::Surface, Self::Extra1, Self::Extra2];

    /// Token-friendly label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Accent => "accent",
            Self::Surface => "surface",
            Self::Extra1 => "extra1",
            Self::Extra2 => "extra2",
        }
    }
}

/// One swatch of a palette.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaletteEntry {
    pub label: String,
    pub color: Rgb,
    /// Black or white, whichever contrasts more with `color`.
    pub on_color: Rgb,
}

impl PaletteEntry {
    /// Build an entry, deriving the on-color from `color`.
    #[must_use]
    pub fn new(label: impl Into<String>, color: Rgb) -> Self {
        Self {
            label: label.into(),
            color,
            on_color: readable_on(color),
        }
    }

    /// `--label: #HEX;` followed by `--onlabel: #HEX;`.
    #[must_use]
    pub fn css_tokens(&self) -> [String; 2] {
        [
            css_token(&self.label, self.color),
            css_token(&format!("on{}", self.label), self.on_color),
        ]
    }
}

/// Inputs to [`generate_theme`]. Out-of-range values are clamped.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeParams {
    /// 10–90.
    pub brightness: f64,
    /// Degrees, wraps at 360.
    pub hue: f64,
    /// 0–100.
    pub saturation: f64,
    /// 3, 4 or 5 entries per palette.
    pub count: usize,
}

impl Default for ThemeParams {
    fn default() -> Self {
        Self {
            brightness: 50.0,
            hue: 210.0,
            saturation: 60.0,
            count: 5,
        }
    }
}

impl ThemeParams {
    /// Copy with every field forced into its domain.
    #[must_use]
    pub fn clamped(self) -> Self {
        let or = |v: f64, fallback: f64| if v.is_finite() { v } else { fallback };
        let defaults = Self::default();
        Self {
            brightness: or(self.brightness, defaults.brightness).clamp(10.0, 90.0),
            hue: or(self.hue, defaults.hue).rem_euclid(360.0),
            saturation: or(self.saturation, defaults.saturation).clamp(0.0, 100.0),
            count: self.count.clamp(3, Role::ALL.len()),
        }
    }
}

/// The light and dark palettes generated from one set of parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemePalette {
    pub light_palette: Vec<PaletteEntry>,
    pub dark_palette: Vec<PaletteEntry>,
}

/// Every entry of a palette as CSS custom-property declarations, each color
/// followed by its on-color.
#[must_use]
pub fn palette_tokens(palette: &[PaletteEntry]) -> Vec<String> {
    palette.iter().flat_map(PaletteEntry::css_tokens).collect()
}

/// Generate light and dark palettes from brightness, hue and saturation.
#[must_use]
pub fn generate_theme(params: ThemeParams) -> ThemePalette {
    let p = params.clamped();
    let light_start = 100.0 - p.brightness;

    let light = lightness_steps(light_start, 100.0, p.count);
    let dark = lightness_steps(p.brightness, 0.0, p.count);

    ThemePalette {
        light_palette: make_palette(&light, p.hue, p.saturation),
        dark_palette: make_palette(&dark, p.hue, p.saturation),
    }
}

/// `count` evenly spaced lightness values from `from` to `to` inclusive.
fn lightness_steps(from: f64, to: f64, count: usize) -> Vec<f64> {
    let span = (count - 1) as f64;
    (0..count)
        .map(|i| (to - from).mul_add(i as f64 / span, from).clamp(0.0, 100.0))
        .collect()
}

fn make_palette(lightness: &[f64], hue: f64, saturation: f64) -> Vec<PaletteEntry> {
    lightness
        .iter()
        .zip(Role::ALL)
        .map(|(&l, role)| PaletteEntry::new(role.label(), hsl_to_rgb(hue, saturation, l)))
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
