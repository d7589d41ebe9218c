//! One-step-ahead forecasters.
//!
//! Every forecaster maps a sequence to predictions of the same shape so that
//! the automaton and the persistence baseline score against the same
//! observations.

pub mod persistence;

pub use persistence::Persistence;

use crate::automaton::Predictor;

/// A one-step-ahead forecasting technique.
pub trait Forecaster {
    /// Short stable name used in reports.
    fn name(&self) -> &'static str;

    /// Predict every value of `values` from what precedes it.
    fn forecast(&self, values: &[f64]) -> Vec<f64>;
}

impl Forecaster for Predictor<'_> {
    fn name(&self) -> &'static str {
        "automaton"
    }

    fn forecast(&self, values: &[f64]) -> Vec<f64> {
        self.predict(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::automaton::{Automaton, Guard, Transition};
    use gta_common::WindowOrigin;
    use std::num::NonZeroUsize;

    #[test]
    fn test_forecasters_share_output_shape() {
        let mut model = Automaton::new();
        let s0 = model.ensure_state(0);
        s0.predicted_value = 0.5;
        s0.transitions.push(Transition {
            source: 0,
            dest: 0,
            guard: Guard::FULL,
        });
        let window = NonZeroUsize::new(2).unwrap();
        let automaton = Predictor::new(&model, window, WindowOrigin::Restart);

        let values = [1.0, 2.0, 3.0, 4.0];
        let forecasters: Vec<&dyn Forecaster> = vec![&automaton, &Persistence];
        for f in forecasters {
            assert_eq!(f.forecast(&values).len(), values.len(), "{}", f.name());
        }
        assert_eq!(automaton.forecast(&values), vec![0.5; 4]);
    }
}
