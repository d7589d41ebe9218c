//! Guard normalization.
//!
//! Learner output carries raw guards that may leave gaps or overlap after
//! floating-point rounding. Normalization turns each state's raw list into a
//! sorted partition of the real line:
//!
//! 1. stable sort by raw `low` (equal lows keep input order)
//! 2. each guard starts at the running maximum of the previous highs, the
//!    first at `-inf`
//! 3. a guard left empty by step 2 can never match and is dropped
//! 4. the last surviving guard is extended to `+inf`

use std::collections::HashMap;

use tracing::{debug, warn};

use super::guard::Guard;
use super::model::{Automaton, StateId, Transition};
use crate::logging::{event_names, Stage};

/// A transition as declared by the learner, before normalization.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawTransition {
    pub dest: StateId,
    pub low: f64,
    pub high: f64,
}

/// Result of normalizing one state's transitions.
#[derive(Debug, Clone, PartialEq)]
pub struct Normalized {
    pub transitions: Vec<Transition>,
    /// Raw transitions shadowed by earlier guards.
    pub dropped: usize,
}

/// Normalize one state's raw transitions into a partition.
pub fn normalize_transitions(source: StateId, mut raw: Vec<RawTransition>) -> Normalized {
    raw.sort_by(|a, b| a.low.total_cmp(&b.low));

    let mut cut = f64::NEG_INFINITY;
    let mut transitions: Vec<Transition> = Vec::with_capacity(raw.len());
    let mut dropped = 0;

    for r in raw {
        match Guard::new(cut, r.high) {
            Some(guard) => {
                transitions.push(Transition {
                    source,
                    dest: r.dest,
                    guard,
                });
                cut = r.high;
            }
            None => {
                dropped += 1;
                warn!(
                    event = event_names::GUARD_DROPPED,
                    stage = %Stage::Normalize,
                    state = source,
                    dest = r.dest,
                    raw_low = r.low,
                    raw_high = r.high,
                    cut,
                    "dropping transition shadowed by earlier guards"
                );
            }
        }
    }

    if let Some(last) = transitions.last_mut() {
        last.guard = last.guard.with_unbounded_high();
    }

    Normalized {
        transitions,
        dropped,
    }
}

/// Summary of a model normalization pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NormalizeReport {
    pub states: usize,
    pub transitions: usize,
    pub dropped: usize,
}

/// States and raw transitions collected while scanning learner output.
#[derive(Debug, Clone, Default)]
pub struct RawModel {
    order: Vec<StateId>,
    raw: HashMap<StateId, Vec<RawTransition>>,
}

impl RawModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a state; repeated declarations are no-ops.
    pub fn declare_state(&mut self, id: StateId) {
        if !self.raw.contains_key(&id) {
            self.raw.insert(id, Vec::new());
            self.order.push(id);
        }
    }

    /// Record a transition, declaring both endpoints.
    pub fn add_transition(&mut self, source: StateId, transition: RawTransition) {
        self.declare_state(source);
        self.declare_state(transition.dest);
        if let Some(list) = self.raw.get_mut(&source) {
            list.push(transition);
        }
    }

    pub fn state_count(&self) -> usize {
        self.order.len()
    }

    /// Normalize every state and build the automaton. Predicted values start at 0.0.
    pub fn normalize(mut self) -> (Automaton, NormalizeReport) {
        let mut model = Automaton::new();
        let mut report = NormalizeReport::default();

        for id in self.order {
            let raw = self.raw.remove(&id).unwrap_or_default();
            let normalized = normalize_transitions(id, raw);
            debug!(
                state = id,
                transitions = normalized.transitions.len(),
                dropped = normalized.dropped,
                "normalized state"
            );
            report.states += 1;
            report.transitions += normalized.transitions.len();
            report.dropped += normalized.dropped;
            model.ensure_state(id).transitions = normalized.transitions;
        }

        debug!(
            event = event_names::NORMALIZE_FINISHED,
            stage = %Stage::Normalize,
            states = report.states,
            transitions = report.transitions,
            dropped = report.dropped,
            "normalization finished"
        );
        (model, report)
    }
}
