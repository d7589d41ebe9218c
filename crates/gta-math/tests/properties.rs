//! Property-based tests for gta-math numerical functions.
//!
//! Uses proptest to verify metric and summation properties across many random inputs.

use gta_math::{mae, mape, rmse, stable_mean, stable_sum, ErrorMetrics};
use proptest::prelude::*;

/// Tolerance for floating point comparisons.
const TOL: f64 = 1e-9;

fn approx_eq(a: f64, b: f64, tol: f64) -> bool {
    (a - b).abs() <= tol.max(tol * a.abs().max(b.abs()))
}

fn paired_vecs() -> impl Strategy<Value = (Vec<f64>, Vec<f64>)> {
    (1usize..64).prop_flat_map(|n| {
        (
            prop::collection::vec(-1e3..1e3f64, n),
            prop::collection::vec(-1e3..1e3f64, n),
        )
    })
}

// ============================================================================
// summation properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// Summation order does not change the compensated result beyond rounding.
    #[test]
    fn stable_sum_order_independent(values in prop::collection::vec(-1e6..1e6f64, 0..128)) {
        let forward = stable_sum(values.iter().copied());
        let backward = stable_sum(values.iter().rev().copied());
        prop_assert!(approx_eq(forward, backward, TOL), "{} != {}", forward, backward);
    }

    /// The mean lies between the minimum and the maximum.
    #[test]
    fn stable_mean_bounded(values in prop::collection::vec(-1e6..1e6f64, 1..128)) {
        let mean = stable_mean(&values).unwrap();
        let lo = values.iter().cloned().fold(f64::INFINITY, f64::min);
        let hi = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        prop_assert!(mean >= lo - TOL && mean <= hi + TOL, "mean {} outside [{}, {}]", mean, lo, hi);
    }
}

// ============================================================================
// error metric properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// All metrics are non-negative.
    #[test]
    fn metrics_non_negative((p, o) in paired_vecs()) {
        let m = ErrorMetrics::compute(&p, &o).unwrap();
        prop_assert!(m.mae >= 0.0);
        prop_assert!(m.mape >= 0.0);
        prop_assert!(m.rmse >= 0.0);
        prop_assert_eq!(m.count, p.len());
    }

    /// RMSE never falls below MAE.
    #[test]
    fn rmse_dominates_mae((p, o) in paired_vecs()) {
        let a = mae(&p, &o).unwrap();
        let r = rmse(&p, &o).unwrap();
        prop_assert!(r + TOL >= a, "rmse {} < mae {}", r, a);
    }

    /// MAE and RMSE are symmetric in their arguments.
    #[test]
    fn mae_rmse_symmetric((p, o) in paired_vecs()) {
        prop_assert!(approx_eq(mae(&p, &o).unwrap(), mae(&o, &p).unwrap(), TOL));
        prop_assert!(approx_eq(rmse(&p, &o).unwrap(), rmse(&o, &p).unwrap(), TOL));
    }

    /// A perfect forecast scores zero everywhere.
    #[test]
    fn perfect_forecast_scores_zero(o in prop::collection::vec(-1e3..1e3f64, 1..64)) {
        prop_assert_eq!(mae(&o, &o), Some(0.0));
        prop_assert_eq!(mape(&o, &o), Some(0.0));
        prop_assert_eq!(rmse(&o, &o), Some(0.0));
    }
}
