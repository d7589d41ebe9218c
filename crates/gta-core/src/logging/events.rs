//! Structured event definitions for logging.
//!
//! Library code emits plain `tracing` events carrying an `event` field from
//! [`event_names`] and a `stage` field from [`Stage`], so JSONL consumers can
//! filter on stable keys. [`LogEvent`] is the serialisable form used when a
//! command reports an event in its own payload.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Log levels for events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

/// Stages of the automaton pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// Startup and configuration.
    Init,
    /// Reading learner output or graph files.
    Parse,
    /// Turning raw guards into partitions.
    Normalize,
    /// Slicing sequences into windows.
    Window,
    /// Re-estimating state predictions.
    Restimate,
    /// Writing graph files.
    Serialize,
    /// Running the automaton over a sequence.
    Predict,
    /// Persistence forecasts.
    Baseline,
    /// Writing learner training files.
    Export,
    /// Error metrics.
    Score,
}

impl Stage {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Stage::Init => "init",
            Stage::Parse => "parse",
            Stage::Normalize => "normalize",
            Stage::Window => "window",
            Stage::Restimate => "restimate",
            Stage::Serialize => "serialize",
            Stage::Predict => "predict",
            Stage::Baseline => "baseline",
            Stage::Export => "export",
            Stage::Score => "score",
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Standard event names used in logging.
pub mod event_names {
    // Run lifecycle
    pub const RUN_STARTED: &str = "run.started";
    pub const RUN_FINISHED: &str = "run.finished";

    // Config
    pub const CONFIG_LOADED: &str = "config.loaded";
    pub const CONFIG_DEFAULT_USED: &str = "config.default_used";
    pub const CONFIG_ERROR: &str = "config.error";

    // Parse
    pub const LEARNER_PARSED: &str = "parse.learner_done";
    pub const GRAPH_PARSED: &str = "parse.graph_done";
    pub const LINE_IGNORED: &str = "parse.line_ignored";
    pub const SEQUENCE_LOADED: &str = "parse.sequence_loaded";
    pub const NON_PARTITION_STATES: &str = "parse.non_partition_states";

    // Normalize
    pub const GUARD_DROPPED: &str = "normalize.guard_dropped";
    pub const NORMALIZE_FINISHED: &str = "normalize.finished";

    // Window
    pub const SEQUENCE_TOO_SHORT: &str = "window.sequence_too_short";

    // Restimate
    pub const STATES_UNVISITED: &str = "restimate.states_unvisited";
    pub const RESTIMATE_FINISHED: &str = "restimate.finished";

    // Output stages
    pub const GRAPH_WRITTEN: &str = "serialize.graph_written";
    pub const PREDICT_FINISHED: &str = "predict.finished";
    pub const BASELINE_FINISHED: &str = "baseline.finished";
    pub const EXPORT_FINISHED: &str = "export.finished";
    pub const SCORE_FINISHED: &str = "score.finished";
}

/// A structured log event, serialisable as one JSON line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEvent {
    pub ts: DateTime<Utc>,
    pub level: Level,
    /// Event name (e.g. "restimate.finished").
    pub event: String,
    /// Unique ID for this invocation of `gta`.
    pub run_id: String,
    pub stage: Stage,
    pub message: String,
    /// Additional structured fields (stable keys).
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub fields: BTreeMap<String, serde_json::Value>,
}

impl LogEvent {
    pub fn new(
        level: Level,
        event: impl Into<String>,
        run_id: impl Into<String>,
        stage: Stage,
        message: impl Into<String>,
    ) -> Self {
        LogEvent {
            ts: Utc::now(),
            level,
            event: event.into(),
            run_id: run_id.into(),
            stage,
            message: message.into(),
            fields: BTreeMap::new(),
        }
    }

    /// Add a field to the event. Values that fail to serialise are skipped.
    pub fn with_field(mut self, key: impl Into<String>, value: impl Serialize) -> Self {
        if let Ok(v) = serde_json::to_value(value) {
            self.fields.insert(key.into(), v);
        }
        self
    }
}

/// Context for generating log events with a consistent run ID.
#[derive(Debug, Clone)]
pub struct LogContext {
    pub run_id: String,
}

impl LogContext {
    pub fn new(run_id: impl Into<String>) -> Self {
        LogContext {
            run_id: run_id.into(),
        }
    }

    pub fn event(
        &self,
        level: Level,
        event: impl Into<String>,
        stage: Stage,
        message: impl Into<String>,
    ) -> LogEvent {
        LogEvent::new(level, event, &self.run_id, stage, message)
    }

    pub fn warn(
        &self,
        event: impl Into<String>,
        stage: Stage,
        message: impl Into<String>,
    ) -> LogEvent {
        self.event(Level::Warn, event, stage, message)
    }
}
