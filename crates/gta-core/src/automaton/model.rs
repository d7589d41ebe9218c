//! The automaton model: states, guarded transitions and traversal.

use std::collections::HashMap;

use super::guard::Guard;

/// State identifier. Learner sink ids are negative and never stored.
pub type StateId = u32;

/// Prediction and re-estimation traversal always start here.
pub const START_STATE: StateId = 0;

/// A guarded edge between two states.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    pub source: StateId,
    pub dest: StateId,
    pub guard: Guard,
}

/// One automaton state.
#[derive(Debug, Clone, PartialEq)]
pub struct State {
    pub id: StateId,
    /// Output emitted while the automaton sits in this state.
    pub predicted_value: f64,
    /// Outgoing transitions, sorted by guard and partitioning the real line
    /// once normalized. Empty for a true sink.
    pub transitions: Vec<Transition>,
}

impl State {
    pub fn new(id: StateId, predicted_value: f64) -> Self {
        State {
            id,
            predicted_value,
            transitions: Vec::new(),
        }
    }

    /// Destination of the first transition whose guard matches `value`.
    pub fn next(&self, value: f64) -> Option<StateId> {
        self.transitions
            .iter()
            .find(|t| t.guard.matches(value))
            .map(|t| t.dest)
    }

    pub fn is_sink(&self) -> bool {
        self.transitions.is_empty()
    }

    /// True when the guards are sorted, contiguous and span `(-inf, +inf]`,
    /// so exactly one transition matches any non-NaN value.
    pub fn is_partition(&self) -> bool {
        let (Some(first), Some(last)) = (self.transitions.first(), self.transitions.last()) else {
            return false;
        };
        first.guard.is_low_unbounded()
            && last.guard.is_high_unbounded()
            && self
                .transitions
                .windows(2)
                .all(|pair| pair[0].guard.high() == pair[1].guard.low())
    }
}

/// Mapping from state id to state, iterated in insertion order.
#[derive(Debug, Clone, Default)]
pub struct Automaton {
    states: Vec<State>,
    index: HashMap<StateId, usize>,
}

impl Automaton {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn contains(&self, id: StateId) -> bool {
        self.index.contains_key(&id)
    }

    pub fn state(&self, id: StateId) -> Option<&State> {
        self.index.get(&id).map(|&i| &self.states[i])
    }

    pub fn state_mut(&mut self, id: StateId) -> Option<&mut State> {
        match self.index.get(&id) {
            Some(&i) => Some(&mut self.states[i]),
            None => None,
        }
    }

    /// States in insertion order.
    pub fn states(&self) -> impl Iterator<Item = &State> {
        self.states.iter()
    }

    pub fn state_ids(&self) -> impl Iterator<Item = StateId> + '_ {
        self.states.iter().map(|s| s.id)
    }

    /// Total number of transitions across all states.
    pub fn transition_count(&self) -> usize {
        self.states.iter().map(|s| s.transitions.len()).sum()
    }

    /// Get a state, inserting it with a 0.0 prediction if absent.
    pub fn ensure_state(&mut self, id: StateId) -> &mut State {
        let idx = match self.index.get(&id) {
            Some(&i) => i,
            None => {
                self.states.push(State::new(id, 0.0));
                let i = self.states.len() - 1;
                self.index.insert(id, i);
                i
            }
        };
        &mut self.states[idx]
    }

    /// Insert or replace a whole state, keeping its original position if it existed.
    pub fn insert_state(&mut self, state: State) {
        match self.index.get(&state.id) {
            Some(&i) => self.states[i] = state,
            None => {
                self.index.insert(state.id, self.states.len());
                self.states.push(state);
            }
        }
    }

    /// Predicted value of a state, `None` if the state is unknown.
    pub fn predicted_value(&self, id: StateId) -> Option<f64> {
        self.state(id).map(|s| s.predicted_value)
    }

    /// Predicted value with the neutral 0.0 default for unknown states.
    pub fn output(&self, id: StateId) -> f64 {
        self.predicted_value(id).unwrap_or(0.0)
    }

    /// Advance from `from` on `value`.
    ///
    /// Stays put when no guard matches: a sink, an unknown state, or a NaN value.
    pub fn step(&self, from: StateId, value: f64) -> StateId {
        self.state(from).and_then(|s| s.next(value)).unwrap_or(from)
    }

    /// Walk `values` from `from`, returning the state reached.
    pub fn walk(&self, from: StateId, values: &[f64]) -> StateId {
        values.iter().fold(from, |s, &v| self.step(s, v))
    }
}

/// Equality ignores insertion order: same ids, predictions and ordered transitions.
impl PartialEq for Automaton {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .states
                .iter()
                .all(|s| other.state(s.id).is_some_and(|o| o == s))
    }
}
