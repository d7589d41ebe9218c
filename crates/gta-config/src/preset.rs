//! Configuration presets for the experiment families.
//!
//! Provides pre-built configurations for:
//! - Sinus: quadrant-sampled sine waves, two symbols split at zero
//! - Distorted sinus: the same alphabet over noisy sine waves
//! - Wind: wind-speed traces, eight symbols
//! - Stratosphere: network capture inter-arrival traces, three symbols

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::experiment::{default_alphabet, ExperimentConfig, SymbolBounds};

/// Available configuration presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PresetName {
    /// Sine waves, window 16, precision 3
    Sinus,
    /// Distorted sine waves, window 16, precision 3
    DistortedSinus,
    /// Wind speed, window 8, precision 3, eight symbols
    Wind,
    /// Network traffic, window 40, precision 1, three symbols
    Stratosphere,
}

impl PresetName {
    /// All available preset names.
    pub const ALL: &'static [PresetName] = &[
        PresetName::Sinus,
        PresetName::DistortedSinus,
        PresetName::Wind,
        PresetName::Stratosphere,
    ];

    /// Get preset name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            PresetName::Sinus => "sinus",
            PresetName::DistortedSinus => "distorted-sinus",
            PresetName::Wind => "wind",
            PresetName::Stratosphere => "stratosphere",
        }
    }

    /// Parse preset name from string.
    pub fn parse(s: &str) -> Option<PresetName> {
        match s.to_lowercase().as_str() {
            "sinus" | "sine" => Some(PresetName::Sinus),
            "distorted-sinus" | "distorted_sinus" | "distorted" => {
                Some(PresetName::DistortedSinus)
            }
            "wind" => Some(PresetName::Wind),
            "stratosphere" | "network" => Some(PresetName::Stratosphere),
            _ => None,
        }
    }

    /// Get a description of the preset.
    pub fn description(&self) -> &'static str {
        match self {
            PresetName::Sinus => "Sine waves sampled one value per quadrant",
            PresetName::DistortedSinus => "Sine waves with injected distortion",
            PresetName::Wind => "Wind speed sensor traces",
            PresetName::Stratosphere => "Per-host network capture traces",
        }
    }
}

impl fmt::Display for PresetName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for PresetName {
    type Err = PresetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PresetName::parse(s).ok_or_else(|| PresetError::UnknownPreset(s.to_string()))
    }
}

/// Errors related to preset operations.
#[derive(Debug, Clone)]
pub enum PresetError {
    /// Unknown preset name.
    UnknownPreset(String),
}

impl fmt::Display for PresetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PresetError::UnknownPreset(name) => {
                write!(
                    f,
                    "Unknown preset '{}'. Available: {}",
                    name,
                    PresetName::ALL
                        .iter()
                        .map(|p| p.as_str())
                        .collect::<Vec<_>>()
                        .join(", ")
                )
            }
        }
    }
}

impl std::error::Error for PresetError {}

/// Get the configuration for a preset.
pub fn get_preset(name: PresetName) -> ExperimentConfig {
    match name {
        PresetName::Sinus => sinus_preset(),
        PresetName::DistortedSinus => distorted_sinus_preset(),
        PresetName::Wind => wind_preset(),
        PresetName::Stratosphere => stratosphere_preset(),
    }
}

fn sinus_preset() -> ExperimentConfig {
    ExperimentConfig {
        description: Some(PresetName::Sinus.description().to_string()),
        window_size: 16,
        precision: 3,
        alphabet: default_alphabet(),
        ..ExperimentConfig::default()
    }
}

fn distorted_sinus_preset() -> ExperimentConfig {
    ExperimentConfig {
        description: Some(PresetName::DistortedSinus.description().to_string()),
        ..sinus_preset()
    }
}

fn wind_preset() -> ExperimentConfig {
    ExperimentConfig {
        description: Some(PresetName::Wind.description().to_string()),
        window_size: 8,
        precision: 3,
        alphabet: alphabet_from_cuts(&[0.59, 1.16, 1.58, 1.96, 2.34, 2.76, 3.33]),
        ..ExperimentConfig::default()
    }
}

fn stratosphere_preset() -> ExperimentConfig {
    ExperimentConfig {
        description: Some(PresetName::Stratosphere.description().to_string()),
        window_size: 40,
        precision: 1,
        alphabet: alphabet_from_cuts(&[24.0, 350.0]),
        ..ExperimentConfig::default()
    }
}

/// Build a contiguous alphabet `"0".."n"` from ascending cut points.
fn alphabet_from_cuts(cuts: &[f64]) -> Vec<SymbolBounds> {
    let mut alphabet = Vec::with_capacity(cuts.len() + 1);
    let mut low = None;
    for (i, &cut) in cuts.iter().enumerate() {
        alphabet.push(SymbolBounds::new(i.to_string(), low, Some(cut)));
        low = Some(cut);
    }
    alphabet.push(SymbolBounds::new(cuts.len().to_string(), low, None));
    alphabet
}

/// Summary information about a preset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PresetInfo {
    pub name: String,
    pub description: String,
    pub window_size: usize,
    pub precision: u32,
    pub alphabet_size: usize,
}

impl PresetInfo {
    /// Create info from a preset.
    pub fn from_preset(name: PresetName) -> Self {
        let config = get_preset(name);
        Self {
            name: name.as_str().to_string(),
            description: name.description().to_string(),
            window_size: config.window_size,
            precision: config.precision,
            alphabet_size: config.alphabet.len(),
        }
    }
}

/// List all available presets with summary information.
pub fn list_presets() -> Vec<PresetInfo> {
    PresetName::ALL
        .iter()
        .map(|&name| PresetInfo::from_preset(name))
        .collect()
}
