//! Heuristic seizure-risk score for a flashing effect.
//!
//! Five factors are each mapped to a 0–1 risk and combined with fixed
//! weights into a 0–100 score:
//!
//! | Factor    | Risk                                            | Weight |
//! |-----------|-------------------------------------------------|--------|
//! | frequency | 1 at 16 Hz falling to 0 at ±40 Hz; 0 outside 3–60 Hz | 0.40 |
//! | duty      | on-time percent / 100                           | 0.15   |
//! | area      | screen percent / 100 × 1.5                      | 0.15   |
//! | color     | 1.0 for saturated red, else 0.25                | 0.15   |
//! | duration  | 0 up to 1 s, then rising to 1 at 10 s           | 0.15   |
//!
//! Scores of 61 and above are `High`, 31 and above `Medium`.

use std::fmt;

use serde::{Deserialize, Serialize};
use swatch_color::hex_to_rgb;

const PEAK_HZ: f64 = 16.0;
const FALLOFF_HZ: f64 = 40.0;
const MIN_RISKY_HZ: f64 = 3.0;
const MAX_RISKY_HZ: f64 = 60.0;

const WEIGHT_FREQUENCY: f64 = 0.40;
const WEIGHT_DUTY: f64 = 0.15;
const WEIGHT_AREA: f64 = 0.15;
const WEIGHT_COLOR: f64 = 0.15;
const WEIGHT_DURATION: f64 = 0.15;

const HIGH_THRESHOLD: u8 = 61;
const MEDIUM_THRESHOLD: u8 = 31;

/// Flash rate that broadcast and WCAG guidance treat as the safe ceiling.
pub const SAFE_FLASH_HZ: f64 = 3.0;

/// Parameters of a flashing effect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlashInput {
    /// Flashes per second.
    pub frequency: f64,
    /// Percentage of each cycle spent in the bright phase.
    pub duty: f64,
    /// Percentage of the screen covered.
    pub area: f64,
    /// Seconds of exposure.
    pub duration: f64,
    /// Flash color as hex.
    pub color: String,
}

impl Default for FlashInput {
    fn default() -> Self {
        Self {
            frequency: 12.0,
            duty: 50.0,
            area: 30.0,
            duration: 3.0,
            color: "#ff0000".to_owned(),
        }
    }
}

/// Coarse bucket for a risk score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    #[must_use]
    pub const fn from_score(score: u8) -> Self {
        if score >= HIGH_THRESHOLD {
            Self::High
        } else if score >= MEDIUM_THRESHOLD {
            Self::Medium
        } else {
            Self::Low
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        })
    }
}

/// Per-factor risks, each 0–1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskBreakdown {
    pub freq_risk: f64,
    pub duty_risk: f64,
    pub area_risk: f64,
    pub color_risk: f64,
    pub duration_risk: f64,
}

impl RiskBreakdown {
    /// Weighted sum on a 0–100 scale, before rounding.
    #[must_use]
    pub fn weighted_score(&self) -> f64 {
        [
            (self.freq_risk, WEIGHT_FREQUENCY),
            (self.duty_risk, WEIGHT_DUTY),
            (self.area_risk, WEIGHT_AREA),
            (self.color_risk, WEIGHT_COLOR),
            (self.duration_risk, WEIGHT_DURATION),
        ]
        .iter()
        .map(|(risk, weight)| risk * weight * 100.0)
        .sum()
    }
}

/// Result of [`analyze_seizure_risk`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAnalysis {
    /// 0–100.
    pub score: u8,
    pub level: RiskLevel,
    /// Factors that contributed notably, or a single catch-all line.
    pub reasons: Vec<String>,
    /// Suggested changes to reduce risk.
    pub mitigation: Vec<String>,
    pub breakdown: RiskBreakdown,
}

/// Whether `hex` is a strongly red color: red at least 25 % above both
/// other channels and reasonably bright. Only `#RRGGBB` and `#RGB` are
/// considered; anything else is not red.
#[must_use]
pub fn is_reddish(hex: &str) -> bool {
    if !hex.starts_with('#') {
        return false;
    }
    hex_to_rgb(hex).is_some_and(|c| {
        let r = f64::from(c.r);
        r > f64::from(c.g.max(c.b)) * 1.25 && c.r > 120
    })
}

/// Seconds per flash cycle, `None` when the frequency means "not flashing".
#[must_use]
pub fn flash_period(frequency_hz: f64) -> Option<f64> {
    (frequency_hz > 0.0 && frequency_hz.is_finite()).then(|| 1.0 / frequency_hz)
}

/// Score a flashing effect and explain the result.
#[must_use]
pub fn analyze_seizure_risk(input: &FlashInput) -> RiskAnalysis {
    let breakdown = breakdown(input);

    // Safe: clamped to 0..=100 and rounded before narrowing.
    let score = breakdown.weighted_score().clamp(0.0, 100.0).round() as u8;

    RiskAnalysis {
        score,
        level: RiskLevel::from_score(score),
        reasons: reasons(input, &breakdown),
        mitigation: mitigation(input),
        breakdown,
    }
}

fn breakdown(input: &FlashInput) -> RiskBreakdown {
    let f = input.frequency;
    let freq_risk = if (MIN_RISKY_HZ..=MAX_RISKY_HZ).contains(&f) {
        (1.0 - (f - PEAK_HZ).abs() / FALLOFF_HZ).max(0.0)
    } else {
        0.0
    };

    let duration_risk = if input.duration.is_nan() || input.duration <= 1.0 {
        0.0
    } else {
        ((input.duration - 1.0) / 9.0).min(1.0)
    };

    RiskBreakdown {
        freq_risk,
        duty_risk: unit(input.duty / 100.0),
        area_risk: unit(input.area / 100.0 * 1.5),
        color_risk: if is_reddish(&input.color) { 1.0 } else { 0.25 },
        duration_risk,
    }
}

fn reasons(input: &FlashInput, b: &RiskBreakdown) -> Vec<String> {
    let mut out = Vec::new();
    if b.freq_risk > 0.35 {
        out.push(format!("Frequency {} Hz is within a risky band.", input.frequency));
    }
    if b.duty_risk > 0.6 {
        out.push(format!("High duty cycle ({}%) — long bright phase.", input.duty));
    }
    if b.area_risk > 0.5 {
        out.push(format!("Large visual area affected ({}%).", input.area));
    }
    if b.color_risk > 0.9 {
        out.push("Saturated red color selected (known higher sensitivity).".to_owned());
    }
    if b.duration_risk > 0.4 {
        out.push(format!("Long exposure ({}s) increases cumulative risk.", input.duration));
    }
    if out.is_empty() {
        out.push("No strong individual factors, but combine cautiously.".to_owned());
    }
    out
}

fn mitigation(input: &FlashInput) -> Vec<String> {
    let mut out = Vec::with_capacity(4);
    if input.frequency > SAFE_FLASH_HZ {
        out.push("Limit flash rate to ≤ 3 Hz if possible (WCAG/broadcast guidance).".to_owned());
    }
    out.extend(
        [
            "Reduce brightness/contrast, reduce area, shorten duration.",
            "Avoid saturated red flashes; prefer smooth fades or slow transitions.",
            "Provide clear warnings & allow viewers to skip or turn off effect.",
        ]
        .map(str::to_owned),
    );
    out
}

/// Clamp to 0–1, mapping NaN to 0.
fn unit(v: f64) -> f64 {
    if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
