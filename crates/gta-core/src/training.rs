//! Learner training files.
//!
//! Each file lists the exact sliding windows of a flat sequence:
//!
//! - symbol form: `"<windows> <alphabet size>"`, then per window
//!   `"<len>( <symbol> 0)*"`
//! - time form: `"<windows> 1"`, then per window `"<len>( 0 <encoded>)*"`
//!   where `encoded = trunc(value * 10^precision + offset)`
//! - plain form: one window per line, values separated by one space, no
//!   trailing newline

use std::num::NonZeroUsize;

use clap::ValueEnum;
use gta_common::{Error, Result};
use gta_config::ExperimentConfig;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::automaton::window::warn_short_sequence;
use crate::automaton::{sliding_windows, window_count};
use crate::logging::{event_names, Stage};
use crate::pipeline::configured_window;

/// Training file layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrainingFormat {
    /// Alphabet symbols for the symbol-guarded learner.
    Symbol,
    /// Encoded time delays for the time-guarded learner.
    Time,
    /// Raw values for the regressor learner.
    Plain,
}

impl std::fmt::Display for TrainingFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TrainingFormat::Symbol => write!(f, "symbol"),
            TrainingFormat::Time => write!(f, "time"),
            TrainingFormat::Plain => write!(f, "plain"),
        }
    }
}

/// A rendered training file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainingFile {
    pub format: TrainingFormat,
    pub windows: usize,
    pub text: String,
}

/// `trunc(value * 10^precision + offset)`, the inverse of the time-guard decoding.
///
/// Fails when the scaled value is non-finite or outside the `i64` range.
pub fn encode_time(value: f64, config: &ExperimentConfig) -> Result<i64> {
    // 2^63; `i64::MAX as f64` rounds up to this, so the upper bound is exclusive.
    const LIMIT: f64 = 9_223_372_036_854_775_808.0;
    let scaled = (value * config.encode_scale() + config.encoding_offset).trunc();
    if scaled.is_finite() && (-LIMIT..LIMIT).contains(&scaled) {
        Ok(scaled as i64)
    } else {
        Err(Error::Unencodable {
            value,
            precision: config.precision,
        })
    }
}

/// Render windows with a header, each token list prefixed by its length.
fn render_windows<T: AsRef<str>>(header: String, tokens: &[T], window: NonZeroUsize) -> String {
    let mut out = header;
    for w in tokens.windows(window.get()) {
        out.push('\n');
        out.push_str(&w.len().to_string());
        for token in w {
            out.push(' ');
            out.push_str(token.as_ref());
        }
    }
    out
}

pub fn export_symbol(values: &[f64], config: &ExperimentConfig) -> Result<String> {
    let window = configured_window(config)?;
    let tokens = values
        .iter()
        .map(|&v| {
            config
                .classify(v)
                .map(|symbol| format!("{symbol} 0"))
                .ok_or(Error::Unclassified { value: v })
        })
        .collect::<Result<Vec<_>>>()?;
    let header = format!(
        "{} {}",
        window_count(values.len(), window),
        config.alphabet.len()
    );
    Ok(render_windows(header, &tokens, window))
}

pub fn export_time(values: &[f64], config: &ExperimentConfig) -> Result<String> {
    let window = configured_window(config)?;
    let tokens = values
        .iter()
        .map(|&v| encode_time(v, config).map(|t| format!("0 {t}")))
        .collect::<Result<Vec<_>>>()?;
    let header = format!("{} 1", window_count(values.len(), window));
    Ok(render_windows(header, &tokens, window))
}

pub fn export_plain(values: &[f64], window: NonZeroUsize) -> String {
    sliding_windows(values, window)
        .map(|w| {
            w.iter()
                .map(|v| format!("{v:?}"))
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render a training file in `format`.
pub fn export(format: TrainingFormat, values: &[f64], config: &ExperimentConfig) -> Result<TrainingFile> {
    let window = configured_window(config)?;
    // The plain form warns through `sliding_windows`.
    if format != TrainingFormat::Plain && !values.is_empty() && values.len() < window.get() {
        warn_short_sequence(values.len(), window);
    }
    let text = match format {
        TrainingFormat::Symbol => export_symbol(values, config)?,
        TrainingFormat::Time => export_time(values, config)?,
        TrainingFormat::Plain => export_plain(values, window),
    };
    let windows = window_count(values.len(), window);
    info!(
        event = event_names::EXPORT_FINISHED,
        stage = %Stage::Export,
        format = %format,
        windows,
        "training file rendered"
    );
    Ok(TrainingFile {
        format,
        windows,
        text,
    })
}
