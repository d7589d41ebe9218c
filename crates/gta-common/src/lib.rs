//! Guarded-automaton toolkit common types and errors.
//!
//! This crate provides foundational types shared across the workspace:
//! - The unified error taxonomy with stable codes
//! - Strategy selectors persisted in config and exposed on the CLI
//! - Report output formats

pub mod error;
pub mod output;
pub mod strategy;

pub use error::{Error, ErrorCategory, Result, StructuredError};
pub use output::OutputFormat;
pub use strategy::{LearnerFormat, RestimateRule, Tokenization, WindowOrigin};

/// Schema version stamped on JSON reports.
pub const SCHEMA_VERSION: &str = "1.0.0";
