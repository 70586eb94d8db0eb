//! Clamping and output rounding helpers.

/// Clamp `value` into `[min, max]`. NaN collapses to `min`.
pub fn clamp(value: f64, min: f64, max: f64) -> f64 {
    if value.is_nan() {
        return min;
    }
    value.clamp(min, max)
}

/// Clamp `value` into `[0, 1]`.
pub fn clamp_unit(value: f64) -> f64 {
    clamp(value, 0.0, 1.0)
}

/// Round to `places` decimal digits for reporting.
///
/// Goes through the decimal formatter so the result is the nearest decimal
/// to the exact binary value. Plain `(x * 10^n).round()` can land one digit
/// off because the multiplication itself rounds.
pub fn round_to(value: f64, places: usize) -> f64 {
    if !value.is_finite() {
        return value;
    }
    format!("{value:.places$}").parse().unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_handles_nan() {
        assert_eq!(clamp_unit(f64::NAN), 0.0);
        assert_eq!(clamp(f64::NAN, 0.0, 100.0), 0.0);
    }

    #[test]
    fn clamp_bounds() {
        assert_eq!(clamp_unit(-0.5), 0.0);
        assert_eq!(clamp_unit(1.7), 1.0);
        assert_eq!(clamp_unit(0.42), 0.42);
        assert_eq!(clamp(250.0, 0.0, 100.0), 100.0);
    }

    #[test]
    fn round_to_places() {
        assert_eq!(round_to(0.488_888_888, 3), 0.489);
        assert_eq!(round_to(63.885, 1), 63.9);
        assert_eq!(round_to(1.0, 3), 1.0);
        assert_eq!(round_to(91.45, 2), 91.45);
    }

    #[test]
    fn round_to_passes_through_non_finite() {
        assert!(round_to(f64::INFINITY, 3).is_infinite());
    }
}
