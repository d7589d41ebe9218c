//! Streaming one-step-ahead prediction.
//!
//! The first window emits one prediction per value: the current state's
//! output, then a step on that value. Every later window emits a single
//! prediction for its last value:
//!
//! - [`WindowOrigin::Restart`] replays the window's first `W-1` values from
//!   the start state and emits the output of the state reached.
//! - [`WindowOrigin::Carry`] keeps one traversal alive, emitting the current
//!   output and stepping once per new value.
//!
//! Either way a sequence of `N >= W` values yields exactly `N` predictions and
//! a shorter one yields none.

use std::collections::VecDeque;
use std::num::NonZeroUsize;

use gta_common::WindowOrigin;

use super::model::{Automaton, StateId, START_STATE};
use super::window::warn_short_sequence;

/// A model bound to prediction settings.
#[derive(Debug, Clone, Copy)]
pub struct Predictor<'m> {
    model: &'m Automaton,
    window: NonZeroUsize,
    origin: WindowOrigin,
}

impl<'m> Predictor<'m> {
    pub fn new(model: &'m Automaton, window: NonZeroUsize, origin: WindowOrigin) -> Self {
        Predictor {
            model,
            window,
            origin,
        }
    }

    /// Lazily predict over any stream of values.
    pub fn stream<I>(&self, values: I) -> Predictions<'m, I::IntoIter>
    where
        I: IntoIterator<Item = f64>,
    {
        Predictions {
            model: self.model,
            window: self.window,
            origin: self.origin,
            input: values.into_iter(),
            buffer: VecDeque::with_capacity(self.window.get()),
            pending: VecDeque::new(),
            primed: false,
            carried: START_STATE,
            seen: 0,
        }
    }

    /// Predict a whole slice.
    pub fn predict(&self, values: &[f64]) -> Vec<f64> {
        self.stream(values.iter().copied()).collect()
    }
}

/// Iterator of predictions, one per input value once the first window fills.
#[derive(Debug)]
pub struct Predictions<'m, I> {
    model: &'m Automaton,
    window: NonZeroUsize,
    origin: WindowOrigin,
    input: I,
    /// The last `W` values seen.
    buffer: VecDeque<f64>,
    /// Predictions queued by the first window.
    pending: VecDeque<f64>,
    primed: bool,
    carried: StateId,
    seen: usize,
}

impl<I: Iterator<Item = f64>> Predictions<'_, I> {
    fn emit_first_window(&mut self) {
        let mut state = START_STATE;
        for &v in &self.buffer {
            self.pending.push_back(self.model.output(state));
            state = self.model.step(state, v);
        }
        self.carried = state;
        self.primed = true;
    }

    fn predict_last(&mut self, value: f64) -> f64 {
        match self.origin {
            WindowOrigin::Restart => {
                let state = self
                    .buffer
                    .iter()
                    .take(self.window.get() - 1)
                    .fold(START_STATE, |s, &v| self.model.step(s, v));
                self.model.output(state)
            }
            WindowOrigin::Carry => {
                let out = self.model.output(self.carried);
                self.carried = self.model.step(self.carried, value);
                out
            }
        }
    }
}

impl<I: Iterator<Item = f64>> Iterator for Predictions<'_, I> {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        loop {
            if let Some(p) = self.pending.pop_front() {
                return Some(p);
            }

            let Some(value) = self.input.next() else {
                if !self.primed && self.seen > 0 {
                    warn_short_sequence(self.seen, self.window);
                    // Only warn once if polled again.
                    self.seen = 0;
                }
                return None;
            };
            self.seen += 1;

            if self.buffer.len() == self.window.get() {
                self.buffer.pop_front();
            }
            self.buffer.push_back(value);

            if self.primed {
                return Some(self.predict_last(value));
            }
            if self.buffer.len() == self.window.get() {
                self.emit_first_window();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::automaton::guard::Guard;
    use crate::automaton::model::Transition;

    fn w(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    /// Outputs 10 in state 0 and 20 in state 1; positive values go to 1,
    /// non-positive values go back to 0.
    fn toggle() -> Automaton {
        let mut m = Automaton::new();
        for id in [0, 1] {
            let s = m.ensure_state(id);
            s.predicted_value = 10.0 * (id as f64 + 1.0);
            s.transitions = vec![
                Transition {
                    source: id,
                    dest: 0,
                    guard: Guard::new(f64::NEG_INFINITY, 0.0).unwrap(),
                },
                Transition {
                    source: id,
                    dest: 1,
                    guard: Guard::new(0.0, f64::INFINITY).unwrap(),
                },
            ];
        }
        m
    }

    /// State 0 moves to 1 on anything and 1 moves to 2 on anything; 2 is a sink.
    fn chain() -> Automaton {
        let mut m = Automaton::new();
        for (id, next) in [(0, 1), (1, 2)] {
            let s = m.ensure_state(id);
            s.predicted_value = id as f64;
            s.transitions = vec![Transition {
                source: id,
                dest: next,
                guard: Guard::FULL,
            }];
        }
        m.ensure_state(2).predicted_value = 2.0;
        m
    }

    #[test]
    fn test_first_window_emits_each_value() {
        let m = toggle();
        let p = Predictor::new(&m, w(3), WindowOrigin::Restart);
        // 0 -> (1.0) -> 1 -> (-1.0) -> 0 -> (2.0) -> 1
        assert_eq!(p.predict(&[1.0, -1.0, 2.0]), vec![10.0, 20.0, 10.0]);
    }

    #[test]
    fn test_restart_replays_from_start() {
        let m = chain();
        let p = Predictor::new(&m, w(2), WindowOrigin::Restart);
        // Later windows walk one value from 0 and land in 1.
        assert_eq!(p.predict(&[5.0, 5.0, 5.0, 5.0]), vec![0.0, 1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_carry_keeps_traversal() {
        let m = chain();
        let p = Predictor::new(&m, w(2), WindowOrigin::Carry);
        // First window ends in 2, the sink, which then holds.
        assert_eq!(p.predict(&[5.0, 5.0, 5.0, 5.0]), vec![0.0, 1.0, 2.0, 2.0]);
    }

    #[test]
    fn test_origins_agree_on_memoryless_model() {
        let m = toggle();
        let xs = [0.5, -0.5, 1.5, 2.5, -3.0, 0.0, 4.0];
        let restart = Predictor::new(&m, w(2), WindowOrigin::Restart).predict(&xs);
        let carry = Predictor::new(&m, w(2), WindowOrigin::Carry).predict(&xs);
        assert_eq!(restart, carry);
    }

    #[test]
    fn test_length_preserved() {
        let m = toggle();
        for n in 3..20 {
            let xs: Vec<f64> = (0..n).map(|i| (i as f64).sin()).collect();
            let p = Predictor::new(&m, w(3), WindowOrigin::Restart);
            assert_eq!(p.predict(&xs).len(), n);
        }
    }

    #[test]
    fn test_short_sequence_yields_nothing() {
        let m = toggle();
        let p = Predictor::new(&m, w(4), WindowOrigin::Restart);
        assert!(p.predict(&[1.0, 2.0, 3.0]).is_empty());
        assert!(p.predict(&[]).is_empty());
    }

    #[test]
    fn test_empty_model_predicts_zero() {
        let m = Automaton::new();
        let p = Predictor::new(&m, w(1), WindowOrigin::Restart);
        assert_eq!(p.predict(&[1.0, 2.0]), vec![0.0, 0.0]);
    }

    #[test]
    fn test_stream_is_lazy() {
        let m = toggle();
        let p = Predictor::new(&m, w(2), WindowOrigin::Carry);
        let mut it = p.stream(std::iter::repeat(1.0));
        assert_eq!(it.next(), Some(10.0));
        assert_eq!(it.next(), Some(20.0));
        assert_eq!(it.nth(1000), Some(20.0));
    }
}
