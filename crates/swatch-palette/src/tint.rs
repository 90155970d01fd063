//! Tinted whites — subtle off-white surfaces derived from a tint.
//!
//! Each swatch is the tint mixed toward pure white by a factor `t`. The
//! first swatch sits at `start_whiteness` (0.84 means 84% white, 16% tint)
//! and the steps walk evenly up to `t = 1.0`, pure white. Near the white end
//! neighbouring steps can round to the same 8-bit color; repeats are dropped,
//! so the result may be shorter than requested.

use std::collections::HashSet;

use swatch_color::{Hsl, Rgb};

/// Default whiteness of the darkest swatch.
pub const DEFAULT_START_WHITENESS: f64 = 0.84;

/// Smallest number of swatches a request is clamped to.
pub const MIN_COUNT: usize = 2;

/// Largest number of swatches a request is clamped to.
pub const MAX_COUNT: usize = 50;

/// Mix factor toward white for swatch `index` of `count`.
///
/// A single-swatch sequence is pure white.
#[must_use]
pub fn whiteness_at(index: usize, count: usize, start_whiteness: f64) -> f64 {
    if count <= 1 {
        return 1.0;
    }
    let start = if start_whiteness.is_nan() {
        DEFAULT_START_WHITENESS
    } else {
        start_whiteness.clamp(0.0, 1.0)
    };
    (1.0 - start).mul_add(index as f64 / (count - 1) as f64, start)
}

/// Generate `count` tinted whites (count clamped to 2–50), darkest first.
///
/// Duplicates produced by rounding are removed, keeping first occurrences.
///
/// # Examples
///
/// ```
/// use swatch_color::Rgb;
/// use swatch_palette::tinted_whites;
///
/// let whites = tinted_whites(Rgb::new(255, 0, 0), 5, 0.84);
/// assert_eq!(whites.first(), Some(&Rgb::new(255, 214, 214)));
/// assert_eq!(whites.last(), Some(&Rgb::WHITE));
/// ```
#[must_use]
pub fn tinted_whites(tint: Rgb, count: usize, start_whiteness: f64) -> Vec<Rgb> {
    let n = count.clamp(MIN_COUNT, MAX_COUNT);
    let mut seen = HashSet::with_capacity(n);

    (0..n)
        .map(|i| tint.mix(Rgb::WHITE, whiteness_at(i, n, start_whiteness)))
        .filter(|color| seen.insert(*color))
        .collect()
}

// ---------------------------------------------------------------------------
// Xorshift32 — a minimal deterministic PRNG
// ---------------------------------------------------------------------------

/// Minimal deterministic PRNG for tint suggestions. Seeded by the caller so
/// results are reproducible.
#[derive(Debug, Clone)]
pub struct Xorshift32 {
    state: u32,
}

impl Xorshift32 {
    #[must_use]
    pub fn new(seed: u32) -> Self {
        Self { state: seed.max(1) }
    }

    pub const fn next_u32(&mut self) -> u32 {
        self.state ^= self.state << 13;
        self.state ^= self.state >> 17;
        self.state ^= self.state << 5;
        self.state
    }

    /// Uniform f64 in [0, 1).
    pub fn next_f64(&mut self) -> f64 {
        f64::from(self.next_u32()) / (f64::from(u32::MAX) + 1.0)
    }

    /// Uniform f64 in [lo, hi).
    pub fn range_f64(&mut self, lo: f64, hi: f64) -> f64 {
        (hi - lo).mul_add(self.next_f64(), lo)
    }
}

/// A gentle random tint: any hue, 5–20% saturation, 92–98% lightness.
pub fn random_pastel_tint(rng: &mut Xorshift32) -> Rgb {
    let h = (rng.next_f64() * 360.0).floor();
    let s = rng.range_f64(5.0, 20.0);
    let l = rng.range_f64(92.0, 98.0);
    Hsl::new(h, s, l).to_rgb()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use swatch_color::relative_luminance;

    const RED: Rgb = Rgb::new(255, 0, 0);

    #[test]
    fn red_five_steps() {
        let whites = tinted_whites(RED, 5, DEFAULT_START_WHITENESS);
        let hex: Vec<String> = whites.iter().map(|c| c.to_hex()).collect();
        assert_eq!(hex, ["#FFD6D6", "#FFE0E0", "#FFEBEB", "#FFF5F5", "#FFFFFF"]);
    }

    #[test]
    fn lightness_strictly_increases() {
        let whites = tinted_whites(RED, 5, DEFAULT_START_WHITENESS);
        for pair in whites.windows(2) {
            assert!(
                relative_luminance(pair[1]) > relative_luminance(pair[0]),
                "{} is not lighter than {}",
                pair[1],
                pair[0]
            );
        }
    }

    #[test]
    fn count_is_clamped() {
        assert_eq!(tinted_whites(RED, 0, 0.0).len(), MIN_COUNT);
        assert_eq!(tinted_whites(RED, 1, 0.0).len(), MIN_COUNT);
        // From pure tint all the way to white, 50 steps of 255 never collide.
        assert_eq!(tinted_whites(RED, 500, 0.0).len(), MAX_COUNT);
    }

    #[test]
    fn duplicates_are_removed() {
        // 50 steps across 0.84..1.0 cover only ~41 distinct 8-bit values.
        let whites = tinted_whites(RED, 50, DEFAULT_START_WHITENESS);
        assert!(whites.len() < 50, "expected dedup, got {}", whites.len());
        let unique: HashSet<_> = whites.iter().collect();
        assert_eq!(unique.len(), whites.len());
        assert_eq!(whites.last(), Some(&Rgb::WHITE));
    }

    #[test]
    fn whiteness_endpoints() {
        assert!((whiteness_at(0, 5, 0.84) - 0.84).abs() < 1e-12);
        assert!((whiteness_at(4, 5, 0.84) - 1.0).abs() < 1e-12);
        assert!((whiteness_at(0, 1, 0.84) - 1.0).abs() < 1e-12);
        assert!((whiteness_at(0, 3, f64::NAN) - DEFAULT_START_WHITENESS).abs() < 1e-12);
    }

    #[test]
    fn white_tint_collapses_to_one() {
        assert_eq!(tinted_whites(Rgb::WHITE, 10, 0.5), vec![Rgb::WHITE]);
    }

    // ── Xorshift32 / pastel ─────────────────────────────────────────

    #[test]
    fn rng_is_deterministic() {
        let mut a = Xorshift32::new(42);
        let mut b = Xorshift32::new(42);
        for _ in 0..10 {
            assert_eq!(a.next_u32(), b.next_u32());
        }
    }

    #[test]
    fn zero_seed_still_advances() {
        let mut rng = Xorshift32::new(0);
        assert_ne!(rng.next_u32(), 0);
    }

    #[test]
    fn pastel_tints_are_near_white() {
        let mut rng = Xorshift32::new(7);
        for _ in 0..200 {
            let tint = random_pastel_tint(&mut rng);
            let hsl = tint.to_hsl_precise();
            assert!(hsl.l >= 91.0, "{tint} too dark: {hsl:?}");
            assert!(tint.channels().iter().all(|&c| c >= 220), "{tint} not pastel");
        }
    }
}
