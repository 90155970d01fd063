//! # swatch-light — light-level arithmetic and flash-safety heuristics
//!
//! Three small, independent tools:
//!
//! - [`lux`]: converting between luminous flux, illuminance and area.
//! - [`flash`]: a weighted, explainable score for how likely a flashing
//!   effect is to trigger photosensitive seizures.
//! - [`morse`]: text as an on/off schedule for a signalling light.
//!
//! None is a substitute for a measured photometric or clinical
//! assessment; each exists to give designers a quick first read.

// Scores are clamped to 0..=100 and rounded before narrowing to u8.
#![allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]

pub mod flash;
pub mod lux;
pub mod morse;

pub use flash::{FlashInput, RiskAnalysis, RiskBreakdown, RiskLevel, analyze_seizure_risk, flash_period, is_reddish};
pub use morse::{Segment, build_timeline, encoded_preview, morse_code, total_units, unit_ms_from_wpm};
