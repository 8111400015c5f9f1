//! Numeric conversion helpers centralizing money casts.

use num_traits::cast::cast;

/// Convert whole dollars to f64 while allowing precision loss in a single location.
#[must_use]
pub fn u64_to_f64(value: u64) -> f64 {
    cast::<u64, f64>(value).unwrap_or(0.0)
}

/// Convert a count to f64, e.g. for rates over many iterations.
#[must_use]
pub fn usize_to_f64(value: usize) -> f64 {
    cast::<usize, f64>(value).unwrap_or(0.0)
}

/// Round a f64 and clamp it to the u64 range, returning 0 for NaN or negative values.
#[must_use]
pub fn round_f64_to_u64(value: f64) -> u64 {
    if value.is_nan() || value <= 0.0 {
        return 0;
    }
    let max = cast::<u64, f64>(u64::MAX).unwrap_or(f64::MAX);
    cast::<f64, u64>(value.min(max).round()).unwrap_or(u64::MAX)
}

/// `base × 2^exponent`, saturating at `u64::MAX`.
#[must_use]
pub fn saturating_double(base: u64, exponent: u32) -> u64 {
    if base == 0 {
        return 0;
    }
    1_u64
        .checked_shl(exponent)
        .and_then(|factor| base.checked_mul(factor))
        .unwrap_or(u64::MAX)
}

/// Clamp a signed percentage into `lo..=hi` and narrow it to a `u8`.
#[must_use]
pub fn clamp_percent(value: i64, lo: u8, hi: u8) -> u8 {
    let clamped = value.clamp(i64::from(lo), i64::from(hi));
    u8::try_from(clamped).unwrap_or(hi)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounding_handles_edges() {
        assert_eq!(round_f64_to_u64(1.6), 2);
        assert_eq!(round_f64_to_u64(f64::NAN), 0);
        assert_eq!(round_f64_to_u64(-3.0), 0);
        assert_eq!(round_f64_to_u64(f64::INFINITY), u64::MAX);
    }

    #[test]
    fn counts_convert_exactly() {
        assert!((usize_to_f64(0) - 0.0).abs() < f64::EPSILON);
        assert!((usize_to_f64(4_000) - 4_000.0).abs() < f64::EPSILON);
    }

    #[test]
    fn doubling_saturates() {
        assert_eq!(saturating_double(100, 0), 100);
        assert_eq!(saturating_double(100, 3), 800);
        assert_eq!(saturating_double(0, 70), 0);
        assert_eq!(saturating_double(3, 63), u64::MAX);
        assert_eq!(saturating_double(1, 64), u64::MAX);
    }

    #[test]
    fn percent_clamps() {
        assert_eq!(clamp_percent(-20, 5, 95), 5);
        assert_eq!(clamp_percent(140, 5, 95), 95);
        assert_eq!(clamp_percent(42, 5, 95), 42);
    }
}
