//! End-to-end operations behind the CLI commands.
//!
//! Each function takes the experiment configuration explicitly; nothing here
//! reads ambient state.

use std::num::NonZeroUsize;

use gta_common::{Error, LearnerFormat, Result};
use gta_config::ExperimentConfig;
use gta_math::ErrorMetrics;
use serde::Serialize;
use tracing::info;

use crate::automaton::{restimate, Automaton, Predictor, RestimateSummary};
use crate::codec::{DotCodec, LearnerParser, LearnerReport, ModelReader};
use crate::forecast::{Forecaster, Persistence};
use crate::logging::{event_names, Stage};

/// The configured window size as a non-zero count.
pub fn configured_window(config: &ExperimentConfig) -> Result<NonZeroUsize> {
    NonZeroUsize::new(config.window_size)
        .ok_or_else(|| Error::InvalidConfig("window_size must be greater than 0".to_string()))
}

/// Result of turning learner output into a graph.
#[derive(Debug, Clone)]
pub struct ImportOutcome {
    pub model: Automaton,
    pub learner: LearnerReport,
    pub restimate: Option<RestimateSummary>,
    /// Serialized graph file.
    pub graph: String,
}

/// Parse learner output, re-estimate against `calibration` if given, and
/// serialize the result.
pub fn import_model(
    learner_text: &str,
    format: LearnerFormat,
    calibration: Option<&[f64]>,
    config: &ExperimentConfig,
) -> Result<ImportOutcome> {
    let window = configured_window(config)?;
    let (mut model, learner) = LearnerParser::new(format, config).parse(learner_text)?;

    let summary = calibration.map(|values| restimate(&mut model, values, window, config.restimate_rule));

    let graph = DotCodec::new(config.sink_id).serialize(&model);
    Ok(ImportOutcome {
        model,
        learner,
        restimate: summary,
        graph,
    })
}

/// Run the automaton over `values`.
pub fn predict_values(model: &Automaton, values: &[f64], config: &ExperimentConfig) -> Result<Vec<f64>> {
    let window = configured_window(config)?;
    let predictions = Predictor::new(model, window, config.window_origin).forecast(values);
    info!(
        event = event_names::PREDICT_FINISHED,
        stage = %Stage::Predict,
        inputs = values.len(),
        predictions = predictions.len(),
        origin = %config.window_origin,
        "prediction finished"
    );
    Ok(predictions)
}

/// Persistence forecasts for `values`.
pub fn baseline_values(values: &[f64]) -> Vec<f64> {
    let predictions = Persistence.forecast(values);
    info!(
        event = event_names::BASELINE_FINISHED,
        stage = %Stage::Baseline,
        predictions = predictions.len(),
        "baseline finished"
    );
    predictions
}

/// Score report for one prediction file.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreReport {
    pub count: usize,
    /// `None` when both sequences are empty.
    pub metrics: Option<ErrorMetrics>,
}

/// Compare predictions with observations; lengths must agree.
pub fn score(predictions: &[f64], observations: &[f64]) -> Result<ScoreReport> {
    if predictions.len() != observations.len() {
        return Err(Error::LengthMismatch {
            predictions: predictions.len(),
            observations: observations.len(),
        });
    }
    let metrics = ErrorMetrics::compute(predictions, observations);
    info!(
        event = event_names::SCORE_FINISHED,
        stage = %Stage::Score,
        count = predictions.len(),
        "scoring finished"
    );
    Ok(ScoreReport {
        count: predictions.len(),
        metrics,
    })
}
