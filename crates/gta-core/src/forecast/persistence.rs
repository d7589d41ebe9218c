//! Persistence baseline: tomorrow looks like today.

use super::Forecaster;

/// Predicts each value as the previous observation, with 0.0 for the first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Persistence;

impl Persistence {
    /// Lazily shift a stream by one, starting from 0.0.
    pub fn stream<I>(values: I) -> impl Iterator<Item = f64>
    where
        I: IntoIterator<Item = f64>,
    {
        values.into_iter().scan(0.0, |previous, v| {
            let out = *previous;
            *previous = v;
            Some(out)
        })
    }
}

impl Forecaster for Persistence {
    fn name(&self) -> &'static str {
        "persistence"
    }

    fn forecast(&self, values: &[f64]) -> Vec<f64> {
        Persistence::stream(values.iter().copied()).collect()
    }
}
