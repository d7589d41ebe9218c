//! Experiment configuration types.
//!
//! One `experiment.json` describes everything the automaton core needs to
//! interpret learner output and sequences: the sliding-window size, the
//! time-encoding precision and offset, the sink state id, the symbol
//! alphabet and the strategy selectors.

use gta_common::{RestimateRule, Tokenization, WindowOrigin};
use serde::{Deserialize, Serialize};

use crate::validate::ValidationError;

/// Default sliding-window size.
pub const DEFAULT_WINDOW_SIZE: usize = 16;

/// Default number of decimal digits kept by the time encoding.
pub const DEFAULT_PRECISION: u32 = 3;

/// Default offset added by the time encoding.
pub const DEFAULT_ENCODING_OFFSET: f64 = 1000.0;

/// Default id the learner uses for its reject state.
pub const DEFAULT_SINK_ID: i64 = -1;

/// Complete experiment configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperimentConfig {
    pub schema_version: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default = "default_window_size")]
    pub window_size: usize,

    #[serde(default = "default_precision")]
    pub precision: u32,

    #[serde(default = "default_encoding_offset")]
    pub encoding_offset: f64,

    #[serde(default = "default_sink_id")]
    pub sink_id: i64,

    /// Ordered symbol table; lookup and classification scan it front to back.
    #[serde(default = "default_alphabet")]
    pub alphabet: Vec<SymbolBounds>,

    #[serde(default)]
    pub restimate_rule: RestimateRule,

    #[serde(default)]
    pub window_origin: WindowOrigin,

    #[serde(default)]
    pub tokenization: Tokenization,
}

/// Half-open interval `(low, high]` attached to one alphabet symbol.
///
/// JSON cannot carry infinities, so an absent (or `null`) bound is unbounded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymbolBounds {
    pub symbol: String,

    #[serde(default)]
    pub low: Option<f64>,

    #[serde(default)]
    pub high: Option<f64>,
}

impl SymbolBounds {
    /// Create bounds for a symbol; `None` means unbounded on that side.
    pub fn new(symbol: impl Into<String>, low: Option<f64>, high: Option<f64>) -> Self {
        Self {
            symbol: symbol.into(),
            low,
            high,
        }
    }

    /// Lower bound, `-inf` when unbounded.
    pub fn low_bound(&self) -> f64 {
        self.low.unwrap_or(f64::NEG_INFINITY)
    }

    /// Upper bound, `+inf` when unbounded.
    pub fn high_bound(&self) -> f64 {
        self.high.unwrap_or(f64::INFINITY)
    }

    /// Left-open, right-closed membership.
    pub fn contains(&self, value: f64) -> bool {
        self.low_bound() < value && value <= self.high_bound()
    }
}

fn default_window_size() -> usize {
    DEFAULT_WINDOW_SIZE
}

fn default_precision() -> u32 {
    DEFAULT_PRECISION
}

fn default_encoding_offset() -> f64 {
    DEFAULT_ENCODING_OFFSET
}

fn default_sink_id() -> i64 {
    DEFAULT_SINK_ID
}

/// Two symbols split at zero: `(-inf, 0]` and `(0, +inf)`.
pub fn default_alphabet() -> Vec<SymbolBounds> {
    vec![
        SymbolBounds::new("0", None, Some(0.0)),
        SymbolBounds::new("1", Some(0.0), None),
    ]
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            schema_version: crate::CONFIG_SCHEMA_VERSION.to_string(),
            description: None,
            window_size: DEFAULT_WINDOW_SIZE,
            precision: DEFAULT_PRECISION,
            encoding_offset: DEFAULT_ENCODING_OFFSET,
            sink_id: DEFAULT_SINK_ID,
            alphabet: default_alphabet(),
            restimate_rule: RestimateRule::default(),
            window_origin: WindowOrigin::default(),
            tokenization: Tokenization::default(),
        }
    }
}

impl ExperimentConfig {
    /// Load an experiment config from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, ValidationError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ValidationError::IoError(format!("Failed to read {}: {}", path.display(), e))
        })?;

        Self::from_json(&content)
    }

    /// Parse an experiment config from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, ValidationError> {
        serde_json::from_str(json)
            .map_err(|e| ValidationError::ParseError(format!("Invalid JSON: {}", e)))
    }

    /// Serialize to pretty JSON.
    pub fn to_json_pretty(&self) -> Result<String, ValidationError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ValidationError::ParseError(format!("Serialization failed: {}", e)))
    }

    /// Multiplier applied to decoded time bounds: `10^-precision`.
    pub fn decode_scale(&self) -> f64 {
        10f64.powf(-(self.precision as f64))
    }

    /// Multiplier applied when encoding values as time bounds: `10^precision`.
    pub fn encode_scale(&self) -> f64 {
        10f64.powf(self.precision as f64)
    }

    /// Look up the bounds registered for a symbol.
    pub fn symbol_bounds(&self, symbol: &str) -> Option<&SymbolBounds> {
        self.alphabet.iter().find(|b| b.symbol == symbol)
    }

    /// First symbol whose interval contains `value`.
    pub fn classify(&self, value: f64) -> Option<&str> {
        self.alphabet
            .iter()
            .find(|b| b.contains(value))
            .map(|b| b.symbol.as_str())
    }
}
