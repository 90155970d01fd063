// SPDX-License-Identifier: MIT
//
// swatch.toml — persistent defaults for the CLI.
//
// Every field is optional; anything missing takes the same default the
// corresponding command-line flag would. Out-of-range values are clamped
// the way a slider would clamp them, never rejected.
//
//   log_level = "info"
//
//   [palette]
//   start_whiteness = 0.84
//   tint_count = 8
//
//   [theme]
//   brightness = 50
//   hue = 210
//   saturation = 60
//   count = 5
//
//   [white_balance]
//   blend = 1.0
//
//   [favorites]
//   path = "swatch-favorites.json"

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use swatch_palette::ThemeParams;
use swatch_palette::tint::{DEFAULT_START_WHITENESS, MAX_COUNT, MIN_COUNT};
use tracing::debug;

/// Default config file, looked up in the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "swatch.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// `tracing` filter used when neither `--verbose` nor `RUST_LOG` is set.
    pub log_level: String,
    pub palette: PaletteConfig,
    pub theme: ThemeParams,
    pub white_balance: WhiteBalanceConfig,
    pub favorites: FavoritesConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "info".to_owned(),
            palette: PaletteConfig::default(),
            theme: ThemeParams::default(),
            white_balance: WhiteBalanceConfig::default(),
            favorites: FavoritesConfig::default(),
        }
    }
}

/// Tinted-white generator defaults.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaletteConfig {
    pub start_whiteness: f64,
    pub tint_count: usize,
}

impl Default for PaletteConfig {
    fn default() -> Self {
        Self {
            start_whiteness: DEFAULT_START_WHITENESS,
            tint_count: 8,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WhiteBalanceConfig {
    /// 0 keeps the original image, 1 applies the full correction.
    pub blend: f64,
}

impl Default for WhiteBalanceConfig {
    fn default() -> Self {
        Self { blend: 1.0 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FavoritesConfig {
    pub path: PathBuf,
}

impl Default for FavoritesConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("swatch-favorites.json"),
        }
    }
}

impl Config {
    /// Read `path`. A missing file yields the defaults; a file that exists
    /// but does not parse is an error.
    pub fn load(path: &Path) -> Result<Self> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(err) => {
                return Err(err).with_context(|| format!("failed to read config {}", path.display()));
            }
        };
        Self::parse(&text).with_context(|| format!("invalid config {}", path.display()))
    }

    /// Parse TOML text and clamp every value into its domain.
    pub fn parse(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        let clamped = config.clamped();
        debug!(?clamped, "config loaded");
        Ok(clamped)
    }

    #[must_use]
    pub fn clamped(self) -> Self {
        let defaults = Self::default();
        let start = self.palette.start_whiteness;
        let blend = self.white_balance.blend;
        Self {
            log_level: self.log_level,
            palette: PaletteConfig {
                start_whiteness: if start.is_finite() {
                    start.clamp(0.0, 1.0)
                } else {
                    defaults.palette.start_whiteness
                },
                tint_count: self.palette.tint_count.clamp(MIN_COUNT, MAX_COUNT),
            },
            theme: self.theme.clamped(),
            white_balance: WhiteBalanceConfig {
                blend: if blend.is_finite() {
                    blend.clamp(0.0, 1.0)
                } else {
                    defaults.white_balance.blend
                },
            },
            favorites: self.favorites,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
