//! Configuration resolution and path discovery.
//!
//! Resolution order: CLI argument → environment variables → XDG paths → system path → defaults.

use std::path::{Path, PathBuf};

use crate::experiment::ExperimentConfig;
use crate::preset::{get_preset, PresetName};
use crate::validate::{validate_experiment, ValidationResult};

/// Discovered configuration file path.
#[derive(Debug, Clone, Default)]
pub struct ConfigPaths {
    /// Path to experiment.json (or None if not found).
    pub experiment: Option<PathBuf>,

    /// Source of the experiment config (for diagnostics).
    pub source: ConfigSource,
}

/// Where a configuration came from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ConfigSource {
    /// Explicitly provided via CLI argument.
    CliArgument,

    /// Set via environment variable.
    Environment,

    /// Found in XDG config directory.
    XdgConfig,

    /// Found in /etc/gta/.
    SystemConfig,

    /// Selected with `--preset`.
    Preset,

    /// Using built-in defaults.
    #[default]
    BuiltinDefault,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigSource::CliArgument => write!(f, "CLI argument"),
            ConfigSource::Environment => write!(f, "environment variable"),
            ConfigSource::XdgConfig => write!(f, "XDG config"),
            ConfigSource::SystemConfig => write!(f, "system config"),
            ConfigSource::Preset => write!(f, "preset"),
            ConfigSource::BuiltinDefault => write!(f, "builtin default"),
        }
    }
}

/// Environment variable names.
pub const ENV_CONFIG_PATH: &str = "GTA_CONFIG";
pub const ENV_CONFIG_DIR: &str = "GTA_CONFIG_DIR";

/// Standard config file name.
pub const EXPERIMENT_FILENAME: &str = "experiment.json";

/// Application name for XDG directories.
const APP_NAME: &str = "gta";

/// Resolve the experiment config path using the standard resolution order.
///
/// 1. Explicit CLI path (returned even if missing, so loading reports it)
/// 2. `GTA_CONFIG` environment variable
/// 3. `GTA_CONFIG_DIR` environment variable + `experiment.json`
/// 4. XDG config directory (`~/.config/gta/`)
/// 5. System config (`/etc/gta/`)
/// 6. Built-in defaults (None)
pub fn resolve_config(cli_path: Option<&Path>) -> ConfigPaths {
    let env_path = std::env::var_os(ENV_CONFIG_PATH).map(PathBuf::from);
    let env_dir = std::env::var_os(ENV_CONFIG_DIR).map(PathBuf::from);
    resolve_with(cli_path, env_path, env_dir, xdg_config_dir(), system_config_dir())
}

fn resolve_with(
    cli_path: Option<&Path>,
    env_path: Option<PathBuf>,
    env_dir: Option<PathBuf>,
    xdg_dir: Option<PathBuf>,
    system_dir: PathBuf,
) -> ConfigPaths {
    if let Some(path) = cli_path {
        return found(path.to_path_buf(), ConfigSource::CliArgument);
    }

    if let Some(path) = env_path.filter(|p| p.exists()) {
        return found(path, ConfigSource::Environment);
    }

    if let Some(path) = env_dir
        .map(|d| d.join(EXPERIMENT_FILENAME))
        .filter(|p| p.exists())
    {
        return found(path, ConfigSource::Environment);
    }

    if let Some(path) = xdg_dir
        .map(|d| d.join(EXPERIMENT_FILENAME))
        .filter(|p| p.exists())
    {
        return found(path, ConfigSource::XdgConfig);
    }

    let system_path = system_dir.join(EXPERIMENT_FILENAME);
    if system_path.exists() {
        return found(system_path, ConfigSource::SystemConfig);
    }

    ConfigPaths::default()
}

fn found(path: PathBuf, source: ConfigSource) -> ConfigPaths {
    ConfigPaths {
        experiment: Some(path),
        source,
    }
}

/// Get the XDG config directory for gta.
pub fn xdg_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(APP_NAME))
}

/// Get the system config directory.
pub fn system_config_dir() -> PathBuf {
    PathBuf::from("/etc").join(APP_NAME)
}

/// A resolved, validated experiment configuration.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: ExperimentConfig,
    pub paths: ConfigPaths,
    /// Raw file content, kept for snapshot hashing.
    pub raw_json: Option<String>,
}

/// Load the effective configuration.
///
/// A preset wins over file discovery unless a CLI path was given explicitly,
/// in which case the file is authoritative.
pub fn load_config(
    cli_path: Option<&Path>,
    preset: Option<PresetName>,
) -> ValidationResult<LoadedConfig> {
    if let (None, Some(name)) = (cli_path, preset) {
        let config = get_preset(name);
        validate_experiment(&config)?;
        return Ok(LoadedConfig {
            config,
            paths: ConfigPaths {
                experiment: None,
                source: ConfigSource::Preset,
            },
            raw_json: None,
        });
    }

    let paths = resolve_config(cli_path);
    load_from_paths(paths)
}

/// Load and validate the config named by already-resolved paths.
pub fn load_from_paths(paths: ConfigPaths) -> ValidationResult<LoadedConfig> {
    let Some(path) = paths.experiment.clone() else {
        return Ok(LoadedConfig {
            config: ExperimentConfig::default(),
            paths,
            raw_json: None,
        });
    };

    let raw = std::fs::read_to_string(&path).map_err(|e| {
        crate::ValidationError::IoError(format!("Failed to read {}: {}", path.display(), e))
    })?;
    let config = ExperimentConfig::from_json(&raw)?;
    validate_experiment(&config)?;

    Ok(LoadedConfig {
        config,
        paths,
        raw_json: Some(raw),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_config_source_display() {
        assert_eq!(format!("{}", ConfigSource::CliArgument), "CLI argument");
        assert_eq!(
            format!("{}", ConfigSource::Environment),
            "environment variable"
        );
        assert_eq!(format!("{}", ConfigSource::XdgConfig), "XDG config");
        assert_eq!(format!("{}", ConfigSource::SystemConfig), "system config");
        assert_eq!(format!("{}", ConfigSource::Preset), "preset");
        assert_eq!(
            format!("{}", ConfigSource::BuiltinDefault),
            "builtin default"
        );
    }

    #[test]
    fn test_resolve_nothing_found() {
        let tmp = TempDir::new().unwrap();
        let paths = resolve_with(None, None, None, None, tmp.path().join("etc"));
        assert!(paths.experiment.is_none());
        assert_eq!(paths.source, ConfigSource::BuiltinDefault);
    }

    #[test]
    fn test_cli_path_wins_even_if_missing() {
        let tmp = TempDir::new().unwrap();
        let missing = tmp.path().join("nope.json");
        let paths = resolve_with(
            Some(missing.as_path()),
            None,
            None,
            None,
            tmp.path().to_path_buf(),
        );
        assert_eq!(paths.experiment.as_deref(), Some(missing.as_path()));
        assert_eq!(paths.source, ConfigSource::CliArgument);
    }

    #[test]
    fn test_env_dir_before_xdg() {
        let env_dir = TempDir::new().unwrap();
        let xdg_dir = TempDir::new().unwrap();
        fs::write(env_dir.path().join(EXPERIMENT_FILENAME), "{}").unwrap();
        fs::write(xdg_dir.path().join(EXPERIMENT_FILENAME), "{}").unwrap();

        let paths = resolve_with(
            None,
            None,
            Some(env_dir.path().to_path_buf()),
            Some(xdg_dir.path().to_path_buf()),
            PathBuf::from("/nonexistent"),
        );
        assert_eq!(paths.source, ConfigSource::Environment);
        assert!(paths.experiment.unwrap().starts_with(env_dir.path()));
    }

    #[test]
    fn test_missing_env_path_falls_through_to_xdg() {
        let xdg_dir = TempDir::new().unwrap();
        fs::write(xdg_dir.path().join(EXPERIMENT_FILENAME), "{}").unwrap();

        let paths = resolve_with(
            None,
            Some(PathBuf::from("/nonexistent/experiment.json")),
            None,
            Some(xdg_dir.path().to_path_buf()),
            PathBuf::from("/nonexistent"),
        );
        assert_eq!(paths.source, ConfigSource::XdgConfig);
    }

    #[test]
    fn test_system_config_dir() {
        assert_eq!(system_config_dir(), PathBuf::from("/etc/gta"));
    }

    #[test]
    fn test_preset_without_cli_path() {
        let loaded = load_config(None, Some(PresetName::Wind)).unwrap();
        assert_eq!(loaded.paths.source, ConfigSource::Preset);
        assert_eq!(loaded.config.window_size, 8);
        assert!(loaded.raw_json.is_none());
    }

    #[test]
    fn test_load_from_file_keeps_raw_json() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(EXPERIMENT_FILENAME);
        let raw = r#"{"schema_version": "1.0.0", "window_size": 4}"#;
        fs::write(&path, raw).unwrap();

        let loaded = load_config(Some(path.as_path()), Some(PresetName::Stratosphere)).unwrap();
        assert_eq!(loaded.config.window_size, 4);
        assert_eq!(loaded.raw_json.as_deref(), Some(raw));
        assert_eq!(loaded.paths.source, ConfigSource::CliArgument);
    }

    #[test]
    fn test_load_invalid_file_is_rejected() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(EXPERIMENT_FILENAME);
        fs::write(&path, r#"{"schema_version": "1.0.0", "window_size": 0}"#).unwrap();
        assert!(load_config(Some(path.as_path()), None).is_err());
    }

    #[test]
    fn test_load_missing_cli_file_is_io_error() {
        let tmp = TempDir::new().unwrap();
        let err = load_config(Some(tmp.path().join("absent.json").as_path()), None).unwrap_err();
        assert!(matches!(err, crate::ValidationError::IoError(_)));
    }
}
