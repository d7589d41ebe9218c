//! Guarded-automaton experiment configuration loading and validation.
//!
//! This crate provides:
//! - Typed Rust structs for experiment.json
//! - Built-in presets for the experiment families
//! - Config resolution (CLI → env → XDG → /etc → defaults)
//! - Semantic validation
//! - Config snapshots for reproducibility

pub mod experiment;
pub mod preset;
pub mod resolve;
pub mod snapshot;
pub mod validate;

pub use experiment::{ExperimentConfig, SymbolBounds};
pub use preset::{get_preset, list_presets, PresetInfo, PresetName};
pub use resolve::{load_config, resolve_config, ConfigPaths, ConfigSource, LoadedConfig};
pub use snapshot::{ConfigSnapshot, ConfigSummary};
pub use validate::{validate_experiment, ValidationError, ValidationResult};

/// Schema version for configuration files.
pub const CONFIG_SCHEMA_VERSION: &str = "1.0.0";
