//! Numerically stable summation primitives.
//!
//! Bucket means in the re-estimator and the forecast error metrics sum long
//! runs of values with mixed magnitudes, so plain left-to-right addition
//! loses low-order digits. These helpers use Neumaier's compensated sum.

/// Compensated (Neumaier) sum of `values`.
///
/// Returns 0.0 for empty input. NaN and infinities propagate as in plain
/// summation.
pub fn stable_sum<I>(values: I) -> f64
where
    I: IntoIterator<Item = f64>,
{
    let mut sum = 0.0f64;
    let mut compensation = 0.0f64;
    for v in values {
        let t = sum + v;
        if sum.abs() >= v.abs() {
            compensation += (sum - t) + v;
        } else {
            compensation += (v - t) + sum;
        }
        sum = t;
    }
    // A non-finite partial sum leaves the compensation as NaN.
    if sum.is_finite() {
        sum + compensation
    } else {
        sum
    }
}

/// Arithmetic mean with compensated summation.
///
/// Returns `None` for empty input. Finite inputs always give a finite mean,
/// even when their total exceeds `f64::MAX`.
pub fn stable_mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let n = values.len() as f64;
    let sum = stable_sum(values.iter().copied());
    if sum.is_finite() {
        return Some(sum / n);
    }
    // The total overflowed (or an input is non-finite). Scaling each term
    // first bounds every partial sum by the largest magnitude.
    Some(stable_sum(values.iter().map(|v| v / n)))
}
