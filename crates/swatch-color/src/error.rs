// SPDX-License-Identifier: MIT
//
// Error taxonomy for user-typed color text.
//
// Continuous inputs (sliders, Kelvin values, HSL channels) are clamped and
// never produce these. Discrete text fields are rejected instead, so a typo
// cannot silently become a different color.

use thiserror::Error;

/// A failure to interpret user-supplied color text.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ColorError {
    /// The text does not match the pattern the field accepts.
    #[error("invalid {field}: {input:?} (expected {expected})")]
    InvalidFormat {
        /// Which field was being parsed (`"hex"`, `"rgb"`, `"hsl"`, `"kelvin"`).
        field: &'static str,
        /// Human-readable description of the accepted pattern.
        expected: &'static str,
        /// The rejected input, trimmed.
        input: String,
    },

    /// The text parsed, but a component lies outside its domain.
    #[error("{field} value {value} is out of range ({min}–{max})")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
}

impl ColorError {
    pub(crate) fn invalid(field: &'static str, expected: &'static str, input: &str) -> Self {
        Self::InvalidFormat {
            field,
            expected,
            input: input.trim().to_owned(),
        }
    }

    /// Check `value` against `[min, max]`, producing [`ColorError::OutOfRange`].
    ///
    /// # Errors
    ///
    /// Returns `OutOfRange` when `value` falls outside the inclusive range.
    pub fn check_range(field: &'static str, value: f64, min: f64, max: f64) -> Result<f64, Self> {
        if (min..=max).contains(&value) {
            Ok(value)
        } else {
            Err(Self::OutOfRange { field, value, min, max })
        }
    }

    /// The field name this error refers to.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::InvalidFormat { field, .. } | Self::OutOfRange { field, .. } => field,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_format_message_names_field_and_pattern() {
        let err = ColorError::invalid("hex", "#RGB or #RRGGBB", "  #12 ");
        assert_eq!(err.to_string(), "invalid hex: \"#12\" (expected #RGB or #RRGGBB)");
        assert_eq!(err.field(), "hex");
    }

    #[test]
    fn check_range_accepts_bounds() {
        assert_eq!(ColorError::check_range("s", 0.0, 0.0, 100.0), Ok(0.0));
        assert_eq!(ColorError::check_range("s", 100.0, 0.0, 100.0), Ok(100.0));
    }

    #[test]
    fn check_range_rejects_outside() {
        let err = ColorError::check_range("kelvin", 900.0, 1000.0, 10000.0).unwrap_err();
        assert!(matches!(err, ColorError::OutOfRange { field: "kelvin", .. }));
        assert_eq!(err.to_string(), "kelvin value 900 is out of range (1000–10000)");
    }
}
