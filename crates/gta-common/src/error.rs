//! Error types for the guarded-automaton toolkit.
//!
//! This module provides structured error handling with:
//! - Stable error codes for machine parsing
//! - Category classification for error grouping
//! - Remediation hints for humans
//!
//! # Human-Facing Output
//!
//! ```text
//! ✗ Malformed Model Line
//!   Reason: parse error at line 4 (`3 1 [12x, 40]->2`): lower bound is not an integer
//!   Fix: Check that the learner output matches the selected --kind (symbol or time).
//! ```
//!
//! # Machine-Facing Output
//!
//! Errors serialize to structured JSON through [`StructuredError`]:
//! ```json
//! {
//!   "code": 20,
//!   "category": "parse",
//!   "message": "parse error at line 4 (`3 1 [12x, 40]->2`): lower bound is not an integer",
//!   "context": { "line_no": 4 }
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for toolkit operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error categories for grouping related errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// Experiment configuration and alphabet table errors.
    Config,
    /// Learner output or graph file syntax errors.
    Parse,
    /// Numeric sequence content errors.
    Data,
    /// File I/O errors.
    Io,
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCategory::Config => write!(f, "config"),
            ErrorCategory::Parse => write!(f, "parse"),
            ErrorCategory::Data => write!(f, "data"),
            ErrorCategory::Io => write!(f, "io"),
        }
    }
}

/// Unified error type.
#[derive(Error, Debug)]
pub enum Error {
    // Configuration errors (10-19)
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("symbol '{symbol}' at line {line_no} has no entry in the alphabet table")]
    UnknownCategory { symbol: String, line_no: usize },

    #[error("value {value} is not covered by any alphabet symbol")]
    Unclassified { value: f64 },

    // Parse errors (20-29)
    #[error("parse error at line {line_no} (`{line}`): {reason}")]
    Parse {
        line_no: usize,
        line: String,
        reason: String,
    },

    // Data errors (30-39)
    #[error("invalid value at line {line_no}: '{value}'")]
    InvalidValue { line_no: usize, value: String },

    #[error("length mismatch: {predictions} predictions vs {observations} observations")]
    LengthMismatch {
        predictions: usize,
        observations: usize,
    },

    #[error("value {value} does not fit a 64-bit time token at precision {precision}")]
    Unencodable { value: f64, precision: u32 },

    // I/O errors (60-69)
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Build a parse error for a 1-based line number.
    pub fn parse(line_no: usize, line: &str, reason: impl Into<String>) -> Self {
        Error::Parse {
            line_no,
            line: line.trim_end().to_string(),
            reason: reason.into(),
        }
    }

    /// Wrap an I/O error with the path it occurred on.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }

    /// Returns the error code for this error type.
    ///
    /// Error codes are stable and grouped by category:
    /// - 10-19: Configuration errors
    /// - 20-29: Parse errors
    /// - 30-39: Data errors
    /// - 60-69: I/O errors
    pub fn code(&self) -> u32 {
        match self {
            Error::InvalidConfig(_) => 10,
            Error::UnknownCategory { .. } => 11,
            Error::Unclassified { .. } => 12,
            Error::Parse { .. } => 20,
            Error::InvalidValue { .. } => 30,
            Error::LengthMismatch { .. } => 31,
            Error::Unencodable { .. } => 32,
            Error::Io { .. } => 60,
        }
    }

    /// Returns the error category for grouping and filtering.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::InvalidConfig(_) | Error::UnknownCategory { .. } | Error::Unclassified { .. } => {
                ErrorCategory::Config
            }
            Error::Parse { .. } => ErrorCategory::Parse,
            Error::InvalidValue { .. } | Error::LengthMismatch { .. } | Error::Unencodable { .. } => {
                ErrorCategory::Data
            }
            Error::Io { .. } => ErrorCategory::Io,
        }
    }

    /// Returns a human-readable remediation hint.
    pub fn remediation(&self) -> &'static str {
        match self {
            Error::InvalidConfig(_) => {
                "Run 'gta config validate' to see which field is rejected."
            }
            Error::UnknownCategory { .. } => {
                "The learner was trained with a different alphabet. Use the matching --preset or config file."
            }
            Error::Unclassified { .. } => {
                "Extend the alphabet so its first and last symbols are unbounded."
            }
            Error::Parse { .. } => {
                "Check that the learner output matches the selected --kind (symbol or time)."
            }
            Error::InvalidValue { .. } => {
                "Flat sequence files hold one finite number per line with no header."
            }
            Error::LengthMismatch { .. } => {
                "Predictions and observations must come from the same test sequence."
            }
            Error::Unencodable { .. } => {
                "Lower the experiment precision or rescale the sequence before exporting."
            }
            Error::Io { .. } => "Check that the file exists and is readable.",
        }
    }

    /// Returns a short headline for human-readable output.
    pub fn headline(&self) -> &'static str {
        match self {
            Error::InvalidConfig(_) => "Invalid Configuration",
            Error::UnknownCategory { .. } => "Unknown Alphabet Symbol",
            Error::Unclassified { .. } => "Value Outside Alphabet",
            Error::Parse { .. } => "Malformed Model Line",
            Error::InvalidValue { .. } => "Invalid Sequence Value",
            Error::LengthMismatch { .. } => "Sequence Length Mismatch",
            Error::Unencodable { .. } => "Value Not Encodable",
            Error::Io { .. } => "I/O Error",
        }
    }
}

/// Structured error response for JSON output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructuredError {
    /// Stable error code.
    pub code: u32,

    /// Error category for grouping.
    pub category: ErrorCategory,

    /// Human-readable error message.
    pub message: String,

    /// Additional structured context (e.g., line number, path).
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub context: HashMap<String, serde_json::Value>,
}

impl From<&Error> for StructuredError {
    fn from(err: &Error) -> Self {
        let mut context = HashMap::new();

        match err {
            Error::Parse { line_no, .. }
            | Error::UnknownCategory { line_no, .. }
            | Error::InvalidValue { line_no, .. } => {
                context.insert("line_no".to_string(), serde_json::json!(line_no));
            }
            Error::Io { path, .. } => {
                context.insert(
                    "path".to_string(),
                    serde_json::json!(path.display().to_string()),
                );
            }
            Error::LengthMismatch {
                predictions,
                observations,
            } => {
                context.insert("predictions".to_string(), serde_json::json!(predictions));
                context.insert("observations".to_string(), serde_json::json!(observations));
            }
            Error::Unencodable { precision, .. } => {
                context.insert("precision".to_string(), serde_json::json!(precision));
            }
            _ => {}
        }

        StructuredError {
            code: err.code(),
            category: err.category(),
            message: err.to_string(),
            context,
        }
    }
}

impl StructuredError {
    /// Serialize to JSON string.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| {
            format!(r#"{{"code":{},"error":"serialization_failed"}}"#, self.code)
        })
    }
}

/// Format an error for human-readable stderr output.
///
/// Output format:
/// ```text
/// ✗ [Headline]
///   Reason: [Error message]
///   Fix: [Remediation hint]
/// ```
pub fn format_error_human(err: &Error, use_color: bool) -> String {
    let (red, cyan, reset) = if use_color {
        ("\x1b[31m", "\x1b[36m", "\x1b[0m")
    } else {
        ("", "", "")
    };

    format!(
        "{red}✗{reset} {headline}\n  Reason: {message}\n  {cyan}Fix:{reset} {remediation}",
        red = red,
        cyan = cyan,
        reset = reset,
        headline = err.headline(),
        message = err,
        remediation = err.remediation()
    )
}
