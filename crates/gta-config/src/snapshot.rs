//! Configuration snapshots for reproducibility.
//!
//! A snapshot captures the exact configuration behind an imported model, so a
//! graph file can later be traced back to the window size, precision and
//! alphabet that produced it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::experiment::ExperimentConfig;
use crate::resolve::LoadedConfig;

/// A frozen snapshot of configuration state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigSnapshot {
    /// When this snapshot was taken.
    pub timestamp: DateTime<Utc>,

    /// Schema version of the configuration.
    pub schema_version: String,

    /// Where the configuration came from.
    pub source: String,

    /// Path the configuration was loaded from.
    #[serde(default)]
    pub path: Option<String>,

    /// SHA-256 of the config file content, or of the canonical JSON when no file was read.
    pub content_hash: String,

    /// Effective values after CLI overrides.
    pub summary: ConfigSummary,
}

/// Summary of the effective configuration values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigSummary {
    pub window_size: usize,
    pub precision: u32,
    pub encoding_offset: f64,
    pub sink_id: i64,
    pub alphabet_size: usize,
    pub restimate_rule: String,
    pub window_origin: String,
    pub tokenization: String,
}

impl ConfigSummary {
    /// Summarise an experiment configuration.
    pub fn from_config(config: &ExperimentConfig) -> Self {
        ConfigSummary {
            window_size: config.window_size,
            precision: config.precision,
            encoding_offset: config.encoding_offset,
            sink_id: config.sink_id,
            alphabet_size: config.alphabet.len(),
            restimate_rule: config.restimate_rule.to_string(),
            window_origin: config.window_origin.to_string(),
            tokenization: config.tokenization.to_string(),
        }
    }
}

impl ConfigSnapshot {
    /// Snapshot a loaded configuration.
    ///
    /// `effective` is the config after CLI overrides; the hash still covers
    /// the file content so two runs over the same file compare equal.
    pub fn new(loaded: &LoadedConfig, effective: &ExperimentConfig) -> Self {
        let content_hash = match loaded.raw_json.as_deref() {
            Some(raw) => hash_content(raw),
            None => hash_content(&canonical_json(&loaded.config)),
        };

        ConfigSnapshot {
            timestamp: Utc::now(),
            schema_version: crate::CONFIG_SCHEMA_VERSION.to_string(),
            source: loaded.paths.source.to_string(),
            path: loaded
                .paths
                .experiment
                .as_ref()
                .map(|p| p.display().to_string()),
            content_hash,
            summary: ConfigSummary::from_config(effective),
        }
    }

    /// Serialize snapshot to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize snapshot from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Check if this snapshot describes the same configuration as another.
    pub fn matches(&self, other: &ConfigSnapshot) -> bool {
        self.content_hash == other.content_hash && self.summary == other.summary
    }

    /// Get a short identifier for this snapshot (first 12 chars of hash).
    pub fn short_id(&self) -> &str {
        &self.content_hash[..12.min(self.content_hash.len())]
    }
}

fn canonical_json(config: &ExperimentConfig) -> String {
    serde_json::to_string(config).unwrap_or_default()
}

/// Hash content with SHA-256 and return hex string.
fn hash_content(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preset::PresetName;
    use crate::resolve::load_config;

    #[test]
    fn test_preset_snapshot() {
        let loaded = load_config(None, Some(PresetName::Sinus)).unwrap();
        let snapshot = ConfigSnapshot::new(&loaded, &loaded.config);
        assert_eq!(snapshot.schema_version, crate::CONFIG_SCHEMA_VERSION);
        assert_eq!(snapshot.source, "preset");
        assert!(snapshot.path.is_none());
        assert_eq!(snapshot.summary.window_size, 16);
        assert_eq!(snapshot.summary.restimate_rule, "next_value");
    }

    #[test]
    fn test_snapshot_short_id() {
        let loaded = load_config(None, Some(PresetName::Wind)).unwrap();
        let snapshot = ConfigSnapshot::new(&loaded, &loaded.config);
        assert_eq!(snapshot.short_id().len(), 12);
    }

    #[test]
    fn test_snapshot_matches_same_config() {
        let loaded = load_config(None, Some(PresetName::Wind)).unwrap();
        let s1 = ConfigSnapshot::new(&loaded, &loaded.config);
        let s2 = ConfigSnapshot::new(&loaded, &loaded.config);
        assert!(s1.matches(&s2));
    }

    #[test]
    fn test_override_changes_summary_not_hash() {
        let loaded = load_config(None, Some(PresetName::Sinus)).unwrap();
        let base = ConfigSnapshot::new(&loaded, &loaded.config);
        let overridden = ExperimentConfig {
            window_size: 4,
            ..loaded.config.clone()
        };
        let other = ConfigSnapshot::new(&loaded, &overridden);
        assert_eq!(base.content_hash, other.content_hash);
        assert!(!base.matches(&other));
    }

    #[test]
    fn test_hash_content() {
        let hash1 = hash_content("test");
        let hash2 = hash_content("test");
        assert_eq!(hash1, hash2);
        assert_eq!(hash1.len(), 64);
    }

    #[test]
    fn test_snapshot_json_roundtrip() {
        let loaded = load_config(None, Some(PresetName::Stratosphere)).unwrap();
        let snapshot = ConfigSnapshot::new(&loaded, &loaded.config);
        let json = snapshot.to_json().unwrap();
        let restored = ConfigSnapshot::from_json(&json).unwrap();
        assert!(snapshot.matches(&restored));
    }
}
