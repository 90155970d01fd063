// SPDX-License-Identifier: MIT
//
// Color-vision deficiency simulation via 3×3 channel matrices.
//
// Each output channel is a weighted sum of the input R, G, B:
//
//   R' = m0·R + m1·G + m2·B
//   G' = m3·R + m4·G + m5·B
//   B' = m6·R + m7·G + m8·B
//
// Rows of every named matrix sum to 1 (up to rounding of the published
// coefficients), so neutral grays map to themselves.

use std::fmt;

use tracing::debug;

use crate::buffer::{PixelBuffer, check_len, for_each_pixel, to_channel};
use crate::error::PixelError;

/// Row-major 3×3 channel transform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformMatrix(pub [f64; 9]);

impl TransformMatrix {
    pub const IDENTITY: Self = Self([1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0]);

    /// Transform one pixel's color channels, rounding and clamping each.
    #[inline]
    #[must_use]
    pub fn apply(&self, r: u8, g: u8, b: u8) -> [u8; 3] {
        let m = &self.0;
        let (r, g, b) = (f64::from(r), f64::from(g), f64::from(b));
        [
            to_channel(m[2].mul_add(b, m[0].mul_add(r, m[1] * g))),
            to_channel(m[5].mul_add(b, m[3].mul_add(r, m[4] * g))),
            to_channel(m[8].mul_add(b, m[6].mul_add(r, m[7] * g))),
        ]
    }

    /// Sum of each row's coefficients.
    #[must_use]
    pub fn row_sums(&self) -> [f64; 3] {
        let m = &self.0;
        [m[0] + m[1] + m[2], m[3] + m[4] + m[5], m[6] + m[7] + m[8]]
    }
}

// ─── Named deficiencies ──────────────────────────────────────────────────────

/// A simulated color-vision deficiency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CvdMode {
    Protanopia,
    Protanomaly,
    Deuteranopia,
    Deuteranomaly,
    Tritanopia,
    Tritanomaly,
    Achromatopsia,
    Achromatomaly,
}

impl CvdMode {
    pub const ALL: [Self; 8] = [
        Self::Protanopia,
        Self::Protanomaly,
        Self::Deuteranopia,
        Self::Deuteranomaly,
        Self::Tritanopia,
        Self::Tritanomaly,
        Self::Achromatopsia,
        Self::Achromatomaly,
    ];

    /// Lowercase mode name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Protanopia => "protanopia",
            Self::Protanomaly => "protanomaly",
            Self::Deuteranopia => "deuteranopia",
            Self::Deuteranomaly => "deuteranomaly",
            Self::Tritanopia => "tritanopia",
            Self::Tritanomaly => "tritanomaly",
            Self::Achromatopsia => "achromatopsia",
            Self::Achromatomaly => "achromatomaly",
        }
    }

    /// Parse a mode name, ignoring ASCII case and surrounding whitespace.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL.into_iter().find(|m| m.name().eq_ignore_ascii_case(name))
    }

    #[must_use]
    pub const fn matrix(self) -> TransformMatrix {
        TransformMatrix(match self {
            Self::Protanopia => [0.56667, 0.43333, 0.0, 0.55833, 0.44167, 0.0, 0.0, 0.24167, 0.75833],
            Self::Protanomaly => [0.81667, 0.18333, 0.0, 0.33333, 0.66667, 0.0, 0.0, 0.125, 0.875],
            Self::Deuteranopia => [0.625, 0.375, 0.0, 0.7, 0.3, 0.0, 0.0, 0.3, 0.7],
            Self::Deuteranomaly => [0.8, 0.2, 0.0, 0.25833, 0.74167, 0.0, 0.0, 0.14167, 0.85833],
            Self::Tritanopia => [0.95, 0.05, 0.0, 0.0, 0.43333, 0.56667, 0.0, 0.475, 0.525],
            Self::Tritanomaly => [0.96667, 0.03333, 0.0, 0.0, 0.73333, 0.26667, 0.0, 0.18333, 0.81667],
            Self::Achromatopsia => [0.299, 0.587, 0.114, 0.299, 0.587, 0.114, 0.299, 0.587, 0.114],
            Self::Achromatomaly => [0.618, 0.320, 0.062, 0.163, 0.775, 0.062, 0.163, 0.320, 0.516],
        })
    }
}

impl fmt::Display for CvdMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ─── Application ─────────────────────────────────────────────────────────────

/// Transform every pixel of `buffer` in place. Alpha is untouched.
pub fn apply_matrix(buffer: &mut PixelBuffer, matrix: &TransformMatrix) {
    debug!(width = buffer.width(), height = buffer.height(), "applying color matrix");
    transform(buffer.data_mut(), matrix);
}

/// [`apply_matrix`] over a raw RGBA slice.
///
/// # Errors
///
/// [`PixelError::BufferSize`] if `data` is not `width × height × 4` bytes;
/// the data is left unmodified.
pub fn apply_matrix_raw(
    data: &mut [u8],
    width: u32,
    height: u32,
    matrix: &TransformMatrix,
) -> Result<(), PixelError> {
    check_len(data.len(), width, height)?;
    transform(data, matrix);
    Ok(())
}

/// Pure variant: a transformed copy of `buffer`.
#[must_use]
pub fn matrix_applied(buffer: &PixelBuffer, matrix: &TransformMatrix) -> PixelBuffer {
    let mut out = buffer.clone();
    apply_matrix(&mut out, matrix);
    out
}

/// Simulate the named deficiency on `buffer`.
///
/// An unknown mode name leaves the buffer unchanged and returns `None`.
pub fn simulate(buffer: &mut PixelBuffer, mode: &str) -> Option<CvdMode> {
    let Some(mode) = CvdMode::from_name(mode) else {
        debug!(mode, "unknown simulation mode, buffer left as is");
        return None;
    };
    debug!(%mode, pixels = buffer.pixel_count(), "simulating color vision");
    transform(buffer.data_mut(), &mode.matrix());
    Some(mode)
}

fn transform(data: &mut [u8], matrix: &TransformMatrix) {
    for_each_pixel(data, |px| {
        let [r, g, b] = matrix.apply(px[0], px[1], px[2]);
        px[0] = r;
        px[1] = g;
        px[2] = b;
    });
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn single(rgba: [u8; 4]) -> PixelBuffer {
        PixelBuffer::filled(1, 1, rgba)
    }

    #[test]
    fn achromatopsia_keeps_gray() {
        let mut buf = single([128, 128, 128, 255]);
        assert_eq!(simulate(&mut buf, "achromatopsia"), Some(CvdMode::Achromatopsia));
        assert_eq!(buf.pixel(0, 0), Some([128, 128, 128, 255]));
    }

    #[test]
    fn achromatopsia_uses_luma_weights() {
        let mut buf = single([255, 0, 0, 255]);
        simulate(&mut buf, "achromatopsia");
        // 0.299 * 255 = 76.245
        assert_eq!(buf.pixel(0, 0), Some([76, 76, 76, 255]));
    }

    #[test]
    fn every_mode_preserves_neutrals() {
        for mode in CvdMode::ALL {
            for level in [0u8, 64, 128, 200, 255] {
                let [r, g, b] = mode.matrix().apply(level, level, level);
                for c in [r, g, b] {
                    assert!(c.abs_diff(level) <= 1, "{mode} moved gray {level} to {c}");
                }
            }
        }
    }

    #[test]
    fn rows_sum_to_one() {
        for mode in CvdMode::ALL {
            for sum in mode.matrix().row_sums() {
                assert!((sum - 1.0).abs() <= 1e-3 + 1e-9, "{mode}: row sum {sum}");
            }
        }
    }

    #[test]
    fn alpha_is_untouched() {
        let mut buf = single([10, 200, 30, 77]);
        simulate(&mut buf, "deuteranopia");
        assert_eq!(buf.pixel(0, 0).map(|p| p[3]), Some(77));
    }

    #[test]
    fn deuteranopia_mixes_red_and_green() {
        let mut buf = single([200, 0, 0, 255]);
        simulate(&mut buf, "Deuteranopia");
        // R' = 0.625·200, G' = 0.7·200, B' = 0
        assert_eq!(buf.pixel(0, 0), Some([125, 140, 0, 255]));
    }

    #[test]
    fn unknown_mode_is_a_no_op() {
        let mut buf = single([1, 2, 3, 4]);
        assert_eq!(simulate(&mut buf, "normal"), None);
        assert_eq!(buf.pixel(0, 0), Some([1, 2, 3, 4]));
    }

    #[test]
    fn output_is_clamped() {
        let boost = TransformMatrix([2.0, 0.0, 0.0, 0.0, 1.0, 0.0, -1.0, 0.0, 0.0]);
        assert_eq!(boost.apply(200, 10, 10), [255, 10, 0]);
    }

    #[test]
    fn raw_rejects_wrong_length() {
        let mut data = vec![9u8; 7];
        let err = apply_matrix_raw(&mut data, 2, 1, &CvdMode::Tritanopia.matrix()).unwrap_err();
        assert!(matches!(err, PixelError::BufferSize { expected: 8, actual: 7 }));
        assert_eq!(data, vec![9u8; 7]);
    }

    #[test]
    fn pure_variant_leaves_input() {
        let buf = single([255, 0, 0, 255]);
        let out = matrix_applied(&buf, &CvdMode::Achromatopsia.matrix());
        assert_eq!(buf.pixel(0, 0), Some([255, 0, 0, 255]));
        assert_eq!(out.pixel(0, 0), Some([76, 76, 76, 255]));
    }

    #[test]
    fn identity_is_identity() {
        let data: Vec<u8> = (0..=255).collect();
        let mut buf = PixelBuffer::new(64, 1, data.clone()).unwrap();
        apply_matrix(&mut buf, &TransformMatrix::IDENTITY);
        assert_eq!(buf.into_raw(), data);
    }

    #[test]
    fn slab_pass_matches_per_pixel_reference() {
        // 300×300 pixels is larger than one parallel slab, so with the
        // `parallel` feature this runs split across threads.
        let (w, h) = (300u32, 300u32);
        let data: Vec<u8> = (0..w * h * 4)
            .map(|i| (i.wrapping_mul(2_654_435_761) >> 13) as u8)
            .collect();
        let source = PixelBuffer::new(w, h, data).unwrap();

        for mode in CvdMode::ALL {
            let matrix = mode.matrix();
            let mut expected = source.data().to_vec();
            for px in expected.chunks_exact_mut(4) {
                let [r, g, b] = matrix.apply(px[0], px[1], px[2]);
                px[..3].copy_from_slice(&[r, g, b]);
            }

            let mut actual = source.clone();
            simulate(&mut actual, mode.name());
            assert!(actual.data() == expected.as_slice(), "{mode} differs from the sequential pass");
        }
    }

    #[test]
    fn from_name_round_trips() {
        for mode in CvdMode::ALL {
            assert_eq!(CvdMode::from_name(mode.name()), Some(mode));
        }
        assert_eq!(CvdMode::from_name(" PROTANOMALY "), Some(CvdMode::Protanomaly));
    }
}
