//! Numeric conversion helpers centralizing safe numeric casts.

use num_traits::cast::cast;

/// Convert a count to f64 while allowing precision loss in a single location.
#[must_use]
pub fn usize_to_f64(value: usize) -> f64 {
    cast::<usize, f64>(value).unwrap_or(f64::MAX)
}

/// Arithmetic mean of a slice, returning 0.0 when it is empty.
///
/// Values are summed front to back so the result does not depend on how the
/// caller produced them.
#[must_use]
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let total: f64 = values.iter().sum();
    total / usize_to_f64(values.len())
}

/// Returns true when `value` is finite and within `[lower, upper]`.
#[must_use]
pub fn within(value: f64, lower: f64, upper: f64) -> bool {
    value.is_finite() && value >= lower && value <= upper
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_counts() {
        assert!((usize_to_f64(42) - 42.0).abs() < f64::EPSILON);
        assert!(usize_to_f64(0).abs() < f64::EPSILON);
    }

    #[test]
    fn mean_handles_empty_and_values() {
        assert!(mean(&[]).abs() < f64::EPSILON);
        assert!((mean(&[1.0, 2.0, 3.0]) - 2.0).abs() < 1e-12);
    }

    #[test]
    fn within_rejects_nan() {
        assert!(within(0.5, 0.0, 1.0));
        assert!(within(1.0, 0.0, 1.0));
        assert!(!within(f64::NAN, 0.0, 1.0));
        assert!(!within(1.5, 0.0, 1.0));
    }
}
