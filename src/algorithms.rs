use crate::errors::ConversionError;
use std::f64::consts::PI;

/// Generates `n` values between `lo` and `hi` (inclusive) with cosine spacing, so that the
/// points cluster near both ends of the interval. The i-th value is
/// `lo + (hi - lo) * (1 - cos(pi * i / (n - 1))) / 2`.
///
/// The first and last values are exactly `lo` and `hi`.
pub fn cosspace(lo: f64, hi: f64, n: usize) -> Result<Vec<f64>, ConversionError> {
    if n < 2 {
        return Err(ConversionError::invalid(format!(
            "cosine spacing needs at least 2 points, got {n}"
        )));
    }
    if !(lo.is_finite() && hi.is_finite()) {
        return Err(ConversionError::invalid(format!(
            "cosine spacing bounds must be finite, got ({lo}, {hi})"
        )));
    }

    let last = n - 1;
    let mut values: Vec<f64> = (0..n)
        .map(|i| lo + (hi - lo) * (1.0 - (PI * i as f64 / last as f64).cos()) / 2.0)
        .collect();
    values[0] = lo;
    values[last] = hi;

    Ok(values)
}

/// Rounds a value to `precision` decimal places, ties away from zero. Values which already
/// carry no digits beyond `precision` decimals are returned unchanged.
pub fn round_to(value: f64, precision: u32) -> f64 {
    let scale = 10f64.powi(i32::try_from(precision).unwrap_or(i32::MAX));
    let scaled = value * scale;
    if !scale.is_finite() || !scaled.is_finite() {
        return value;
    }
    scaled.round() / scale
}
