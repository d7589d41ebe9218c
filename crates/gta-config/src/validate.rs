//! Configuration validation errors and semantic validation.

use std::collections::HashSet;

use thiserror::Error;

use crate::experiment::{ExperimentConfig, SymbolBounds};

/// Validation result type.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Largest precision whose scale factor stays exactly representable.
pub const MAX_PRECISION: u32 = 15;

/// Configuration validation errors.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("I/O error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Semantic validation failed: {0}")]
    SemanticError(String),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },

    #[error("Version mismatch: expected {expected}, got {actual}")]
    VersionMismatch { expected: String, actual: String },
}

impl ValidationError {
    /// Error code for structured error reporting.
    pub fn code(&self) -> u32 {
        match self {
            ValidationError::IoError(_) => 60,
            ValidationError::ParseError(_) => 61,
            ValidationError::SemanticError(_) => 63,
            ValidationError::InvalidValue { .. } => 65,
            ValidationError::VersionMismatch { .. } => 66,
        }
    }
}

impl From<ValidationError> for gta_common::Error {
    fn from(err: ValidationError) -> Self {
        gta_common::Error::InvalidConfig(err.to_string())
    }
}

/// Validate an experiment configuration semantically.
pub fn validate_experiment(config: &ExperimentConfig) -> ValidationResult<()> {
    if config.schema_version != crate::CONFIG_SCHEMA_VERSION {
        return Err(ValidationError::VersionMismatch {
            expected: crate::CONFIG_SCHEMA_VERSION.to_string(),
            actual: config.schema_version.clone(),
        });
    }

    if config.window_size == 0 {
        return Err(ValidationError::InvalidValue {
            field: "window_size".to_string(),
            message: "Must be positive, got 0".to_string(),
        });
    }

    if config.precision > MAX_PRECISION {
        return Err(ValidationError::InvalidValue {
            field: "precision".to_string(),
            message: format!("Must be at most {}, got {}", MAX_PRECISION, config.precision),
        });
    }

    if !config.encoding_offset.is_finite() {
        return Err(ValidationError::InvalidValue {
            field: "encoding_offset".to_string(),
            message: format!("Must be finite, got {}", config.encoding_offset),
        });
    }

    // State ids are non-negative, so a negative sink can never shadow a real state.
    if config.sink_id >= 0 {
        return Err(ValidationError::InvalidValue {
            field: "sink_id".to_string(),
            message: format!("Must be negative, got {}", config.sink_id),
        });
    }

    validate_alphabet(&config.alphabet)
}

/// Validate the symbol table.
fn validate_alphabet(alphabet: &[SymbolBounds]) -> ValidationResult<()> {
    if alphabet.is_empty() {
        return Err(ValidationError::SemanticError(
            "alphabet must declare at least one symbol".to_string(),
        ));
    }

    let mut seen = HashSet::new();
    for (i, bounds) in alphabet.iter().enumerate() {
        let field = format!("alphabet[{}]", i);

        if bounds.symbol.trim().is_empty() || bounds.symbol.contains(char::is_whitespace) {
            return Err(ValidationError::InvalidValue {
                field: format!("{}.symbol", field),
                message: format!("Must be a single non-empty token, got {:?}", bounds.symbol),
            });
        }

        if !seen.insert(bounds.symbol.as_str()) {
            return Err(ValidationError::SemanticError(format!(
                "symbol '{}' is declared more than once",
                bounds.symbol
            )));
        }

        validate_bound(&field, "low", bounds.low)?;
        validate_bound(&field, "high", bounds.high)?;

        if bounds.low_bound() >= bounds.high_bound() {
            return Err(ValidationError::InvalidValue {
                field,
                message: format!(
                    "low must be below high, got ({}, {}]",
                    bounds.low_bound(),
                    bounds.high_bound()
                ),
            });
        }
    }

    Ok(())
}

fn validate_bound(field: &str, side: &str, bound: Option<f64>) -> ValidationResult<()> {
    match bound {
        Some(v) if !v.is_finite() => Err(ValidationError::InvalidValue {
            field: format!("{}.{}", field, side),
            message: format!("Must be finite or null, got {}", v),
        }),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_experiment(&ExperimentConfig::default()).is_ok());
    }

    #[test]
    fn test_zero_window_rejected() {
        let config = ExperimentConfig {
            window_size: 0,
            ..ExperimentConfig::default()
        };
        let err = validate_experiment(&config).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidValue { ref field, .. } if field == "window_size"));
        assert_eq!(err.code(), 65);
    }

    #[test]
    fn test_non_negative_sink_rejected() {
        let config = ExperimentConfig {
            sink_id: 0,
            ..ExperimentConfig::default()
        };
        assert!(validate_experiment(&config).is_err());
    }

    #[test]
    fn test_precision_limit() {
        let config = ExperimentConfig {
            precision: MAX_PRECISION + 1,
            ..ExperimentConfig::default()
        };
        assert!(validate_experiment(&config).is_err());
    }

    #[test]
    fn test_duplicate_symbol_rejected() {
        let config = ExperimentConfig {
            alphabet: vec![
                SymbolBounds::new("0", None, Some(0.0)),
                SymbolBounds::new("0", Some(0.0), None),
            ],
            ..ExperimentConfig::default()
        };
        let err = validate_experiment(&config).unwrap_err();
        assert!(matches!(err, ValidationError::SemanticError(_)));
    }

    #[test]
    fn test_inverted_bounds_rejected() {
        let config = ExperimentConfig {
            alphabet: vec![SymbolBounds::new("x", Some(2.0), Some(1.0))],
            ..ExperimentConfig::default()
        };
        assert!(validate_experiment(&config).is_err());
    }

    #[test]
    fn test_version_mismatch() {
        let config = ExperimentConfig {
            schema_version: "0.9.0".to_string(),
            ..ExperimentConfig::default()
        };
        let err = validate_experiment(&config).unwrap_err();
        assert!(matches!(err, ValidationError::VersionMismatch { .. }));
    }

    #[test]
    fn test_converts_to_common_error() {
        let err: gta_common::Error = ValidationError::SemanticError("x".into()).into();
        assert_eq!(err.code(), 10);
    }
}
