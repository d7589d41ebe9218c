//! Forecast error metrics.
//!
//! All metrics pair `predictions[i]` with `observations[i]` and return `None`
//! when the inputs are empty or differ in length; callers that need to report
//! a length mismatch check it before calling.

use serde::{Deserialize, Serialize};

use super::stable::stable_sum;

fn paired<'a>(
    predictions: &'a [f64],
    observations: &'a [f64],
) -> Option<impl Iterator<Item = (f64, f64)> + 'a> {
    if predictions.is_empty() || predictions.len() != observations.len() {
        return None;
    }
    Some(
        predictions
            .iter()
            .copied()
            .zip(observations.iter().copied()),
    )
}

/// Mean absolute error.
pub fn mae(predictions: &[f64], observations: &[f64]) -> Option<f64> {
    let n = predictions.len() as f64;
    let pairs = paired(predictions, observations)?;
    Some(stable_sum(pairs.map(|(p, o)| (p - o).abs())) / n)
}

/// Mean absolute percentage error, in percent.
///
/// An observation equal to zero contributes nothing to the sum but still
/// counts towards `N`.
pub fn mape(predictions: &[f64], observations: &[f64]) -> Option<f64> {
    let n = predictions.len() as f64;
    let pairs = paired(predictions, observations)?;
    let sum = stable_sum(pairs.map(|(p, o)| if o != 0.0 { ((o - p) / o).abs() } else { 0.0 }));
    Some(100.0 / n * sum)
}

/// Root-mean-square error.
pub fn rmse(predictions: &[f64], observations: &[f64]) -> Option<f64> {
    let n = predictions.len() as f64;
    let pairs = paired(predictions, observations)?;
    Some((stable_sum(pairs.map(|(p, o)| (p - o) * (p - o))) / n).sqrt())
}

/// The three metrics for one prediction/observation pair of sequences.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ErrorMetrics {
    pub count: usize,
    pub mae: f64,
    pub mape: f64,
    pub rmse: f64,
}

impl ErrorMetrics {
    /// Compute all metrics, or `None` for empty or mismatched inputs.
    pub fn compute(predictions: &[f64], observations: &[f64]) -> Option<Self> {
        Some(ErrorMetrics {
            count: predictions.len(),
            mae: mae(predictions, observations)?,
            mape: mape(predictions, observations)?,
            rmse: rmse(predictions, observations)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() <= tol
    }

    #[test]
    fn empty_inputs_yield_none() {
        assert_eq!(mae(&[], &[]), None);
        assert_eq!(mape(&[], &[]), None);
        assert_eq!(rmse(&[], &[]), None);
        assert_eq!(ErrorMetrics::compute(&[], &[]), None);
    }

    #[test]
    fn mismatched_lengths_yield_none() {
        assert_eq!(mae(&[1.0, 2.0], &[1.0]), None);
    }

    #[test]
    fn mae_known_value() {
        let out = mae(&[1.0, 2.0, 3.0], &[2.0, 2.0, 1.0]).unwrap();
        assert!(approx_eq(out, 1.0, 1e-12));
    }

    #[test]
    fn mape_skips_zero_observations() {
        // |(2-1)/2| = 0.5, zero observation contributes 0, N = 2.
        let out = mape(&[1.0, 5.0], &[2.0, 0.0]).unwrap();
        assert!(approx_eq(out, 25.0, 1e-12));
    }

    #[test]
    fn rmse_known_value() {
        let out = rmse(&[0.0, 0.0], &[3.0, 4.0]).unwrap();
        assert!(approx_eq(out, 12.5f64.sqrt(), 1e-12));
    }

    #[test]
    fn perfect_forecast_is_zero() {
        let xs = [0.5, -1.5, 2.0];
        let m = ErrorMetrics::compute(&xs, &xs).unwrap();
        assert_eq!(m.count, 3);
        assert_eq!(m.mae, 0.0);
        assert_eq!(m.mape, 0.0);
        assert_eq!(m.rmse, 0.0);
    }
}
