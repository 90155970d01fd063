// SPDX-License-Identifier: MIT
//
// swatch-pixel — per-pixel color transforms over raw RGBA buffers.
//
// A `PixelBuffer` is a flat, row-major `Vec<u8>` of interleaved R, G, B, A
// bytes. Every transform here touches only the color bytes; alpha is never
// read or written. Results are rounded to the nearest integer and clamped to
// 0..=255 before they are stored, so bright saturated input never wraps.
//
//   PixelSource ──read_pixels──► PixelBuffer ──┬─► matrix.rs         (color-vision simulation)
//                                              └─► white_balance.rs  (temperature/tint gains)
//
// With the `parallel` feature the pixel pass is split across rayon's pool
// in fixed-size byte chunks. The numbers are identical either way; only the
// scheduling changes.

// Single-letter channel names (r, g, b) are the convention in color math.
#![allow(clippy::many_single_char_names)]
// Pixel math rounds and clamps before narrowing to u8.
#![allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]

pub mod buffer;
pub mod error;
pub mod matrix;
pub mod white_balance;

pub use buffer::{PixelBuffer, PixelSource};
pub use error::PixelError;
pub use matrix::{CvdMode, TransformMatrix, apply_matrix, apply_matrix_raw, matrix_applied, simulate};
pub use white_balance::{
    Gains, TempTint, apply_gains, compute_white_balance_gains, estimate_from_source, estimate_temp_and_tint,
    kelvin_to_rgb_normalized,
};
