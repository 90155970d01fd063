//! # swatch-palette — parametric palette synthesis
//!
//! Derives sequences of related colors from a base color and a handful of
//! numeric parameters. Every generator is a pure function; the only state in
//! the crate is the saved-favorites list, which persists through whatever
//! [`KeyValueStore`](favorites::KeyValueStore) the caller injects.
//!
//! # Generators
//!
//! ```text
//! tint + count + start whiteness ──► tint.rs:   off-whites blending toward #FFFFFF
//! brightness + hue + sat + count ──► theme.rs:  light/dark role palettes with on-colors
//! temperature (K)                ──► kelvin.rs: blackbody approximation, preview stops
//! seed                           ──► tint.rs:   random pastel tint
//! ```

// Single-char math variables are standard in color science.
#![allow(clippy::many_single_char_names)]
// Loop indices and step counts become f64 interpolation parameters.
#![allow(clippy::cast_precision_loss)]
// Kelvin values are rounded and clamped before narrowing.
#![allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]

pub mod favorites;
pub mod kelvin;
pub mod theme;
pub mod tint;

pub use favorites::{Favorites, JsonFileStore, KeyValueStore, MemoryStore, StoreError};
pub use kelvin::{kelvin_preview, kelvin_to_hex, kelvin_to_rgb, parse_kelvin_input};
pub use theme::{PaletteEntry, Role, ThemePalette, ThemeParams, generate_theme, palette_tokens};
pub use tint::{Xorshift32, random_pastel_tint, tinted_whites};
