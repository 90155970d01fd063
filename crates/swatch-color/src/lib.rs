// SPDX-License-Identifier: MIT
//
// swatch-color — color-space conversion and perceptual metrics.
//
// The leaf crate of the workspace. Everything here is a pure function over
// small value types: 8-bit sRGB triples, HSL in degrees/percent, and `#RRGGBB`
// hex strings. Nothing allocates beyond the occasional formatted string and
// nothing holds state between calls.
//
//   hex text ──► Rgb ◄──► Hsl
//                 │
//                 ▼
//        relative luminance ──► contrast ratio ──► WCAG levels
//
// Malformed text never turns into a color. Parsing returns `None` (for the
// hex sentinel API) or a `ColorError` naming the field and the pattern the
// user was expected to type.

// Single-letter channel names (r, g, b, h, s, l) are the convention in color math.
#![allow(clippy::many_single_char_names)]
// Channel math moves between u8, u16 and f64 constantly.
#![allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]

pub mod color;
pub mod contrast;
pub mod error;
pub mod format;

pub use color::{Hsl, Rgb, hex_to_hsl, hex_to_rgb, hsl_to_hex, hsl_to_rgb, rgb_to_hex, rgb_to_hsl};
pub use contrast::{WcagLevels, contrast_ratio, contrast_ratio_hex, readable_on, relative_luminance, wcag_levels};
pub use error::ColorError;
pub use format::{css_token, hsl_css, hsl_text, parse_color_text, parse_hsl_text, parse_rgb_text, rgb_text};
