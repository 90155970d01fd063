//! Lux, lumens and area: `lux = lumens / m²`.
//!
//! Divisions guard against a zero or negative divisor by returning 0 rather
//! than infinity, matching what a calculator field should display.

/// Illuminance (lx) of `lumens` spread evenly over `area` square metres.
#[must_use]
pub fn lux(lumens: f64, area: f64) -> f64 {
    if area <= 0.0 {
        return 0.0;
    }
    lumens / area
}

/// Luminous flux (lm) needed for `lux` over `area` square metres.
#[must_use]
pub fn lumens(lux: f64, area: f64) -> f64 {
    lux * area
}

/// Area (m²) that `lumens` lights to `lux`.
#[must_use]
pub fn area(lumens: f64, lux: f64) -> f64 {
    if lux <= 0.0 {
        return 0.0;
    }
    lumens / lux
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn office_desk() {
        // 500 lx over a 4 m² desk area.
        assert!(approx_eq(lux(2000.0, 4.0), 500.0));
        assert!(approx_eq(lumens(500.0, 4.0), 2000.0));
        assert!(approx_eq(area(2000.0, 500.0), 4.0));
    }

    #[test]
    fn degenerate_divisors_give_zero() {
        assert!(approx_eq(lux(800.0, 0.0), 0.0));
        assert!(approx_eq(lux(800.0, -2.0), 0.0));
        assert!(approx_eq(area(800.0, 0.0), 0.0));
    }

    #[test]
    fn conversions_are_consistent() {
        for (lm, m2) in [(450.0, 1.5), (1600.0, 12.0), (3.0, 0.25)] {
            let lx = lux(lm, m2);
            assert!(approx_eq(lumens(lx, m2), lm));
            assert!(approx_eq(area(lm, lx), m2));
        }
    }
}
