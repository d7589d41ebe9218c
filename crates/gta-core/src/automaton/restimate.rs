//! Re-estimation of state predictions from a calibration sequence.
//!
//! Every window is replayed from the start state. Under
//! [`RestimateRule::NextValue`] the first `W-1` values drive the traversal and
//! the state reached absorbs the window's last value; under
//! [`RestimateRule::EnteringValue`] the last value also drives one transition
//! and the state it leads into absorbs it. Each state's prediction becomes the
//! mean of what it absorbed, or 0.0 if it absorbed nothing.

use std::collections::{BTreeMap, HashMap};
use std::num::NonZeroUsize;

use gta_common::RestimateRule;
use gta_math::stable_mean;
use serde::Serialize;
use tracing::{debug, info, warn};

use super::model::{Automaton, StateId, START_STATE};
use super::window::sliding_windows;
use crate::logging::{event_names, Stage};

/// What a re-estimation pass did.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RestimateSummary {
    pub rule: RestimateRule,
    pub window_size: usize,
    /// Windows replayed.
    pub windows: usize,
    /// Observations absorbed per state, for states that absorbed any.
    pub samples: BTreeMap<StateId, usize>,
    /// States that absorbed nothing and fell back to 0.0.
    pub unvisited: Vec<StateId>,
}

/// Overwrite every state's predicted value from `calibration`.
///
/// Deterministic: the same model and sequence always give the same values.
pub fn restimate(
    model: &mut Automaton,
    calibration: &[f64],
    window: NonZeroUsize,
    rule: RestimateRule,
) -> RestimateSummary {
    let mut buckets: HashMap<StateId, Vec<f64>> = HashMap::new();
    let mut windows = 0;

    for w in sliding_windows(calibration, window) {
        windows += 1;
        let Some((&last, prefix)) = w.split_last() else {
            continue;
        };
        let reached = model.walk(START_STATE, prefix);
        let absorber = match rule {
            RestimateRule::NextValue => reached,
            RestimateRule::EnteringValue => model.step(reached, last),
        };
        buckets.entry(absorber).or_default().push(last);
    }

    let ids: Vec<StateId> = model.state_ids().collect();
    let mut samples = BTreeMap::new();
    let mut unvisited = Vec::new();

    for id in ids {
        let bucket = buckets.get(&id).map(Vec::as_slice).unwrap_or(&[]);
        let value = stable_mean(bucket).unwrap_or(0.0);
        if bucket.is_empty() {
            unvisited.push(id);
        } else {
            samples.insert(id, bucket.len());
        }
        debug!(state = id, samples = bucket.len(), value, "re-estimated state");
        if let Some(state) = model.state_mut(id) {
            state.predicted_value = value;
        }
    }

    if !unvisited.is_empty() {
        warn!(
            event = event_names::STATES_UNVISITED,
            stage = %Stage::Restimate,
            count = unvisited.len(),
            states = ?unvisited,
            "states never visited during re-estimation keep 0.0"
        );
    }
    info!(
        event = event_names::RESTIMATE_FINISHED,
        stage = %Stage::Restimate,
        windows,
        rule = %rule,
        "re-estimation finished"
    );

    RestimateSummary {
        rule,
        window_size: window.get(),
        windows,
        samples,
        unvisited,
    }
}
