//! Configuration loader for Sensei.
//!
//! Reads `config.toml` from the data directory (`~/.sensei/` by default)
//! and deserializes it into [`SenseiConfig`]. Falls back to defaults when
//! the file is missing or malformed.

use std::path::{Path, PathBuf};

use sensei_types::config::SenseiConfig;
use sensei_types::error::ConfigError;

/// Name of the configuration file inside the data directory.
pub const CONFIG_FILE: &str = "config.toml";

/// Resolve the data directory.
///
/// Priority: `$SENSEI_DATA_DIR`, then `~/.sensei`, then `./.sensei`.
pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("SENSEI_DATA_DIR") {
        return PathBuf::from(dir);
    }

    if let Some(home) = dirs::home_dir() {
        return home.join(".sensei");
    }

    PathBuf::from(".sensei")
}

/// Read and parse `path`.
///
/// Returns `Ok(None)` when the file does not exist.
pub async fn read_config(path: &Path) -> Result<Option<SenseiConfig>, ConfigError> {
    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(err) => {
            return Err(ConfigError::Read {
                path: path.display().to_string(),
                message: err.to_string(),
            });
        }
    };

    toml::from_str::<SenseiConfig>(&content)
        .map(Some)
        .map_err(|err| ConfigError::Parse {
            path: path.display().to_string(),
            message: err.to_string(),
        })
}

/// Settle on a configuration from the outcome of [`read_config`].
///
/// - Missing file: defaults, logged at debug.
/// - Unreadable or malformed file: defaults, logged as a warning.
pub fn config_or_default(
    path: &Path,
    outcome: Result<Option<SenseiConfig>, ConfigError>,
) -> SenseiConfig {
    match outcome {
        Ok(Some(config)) => {
            tracing::debug!("Loaded configuration from {}", path.display());
            config
        }
        Ok(None) => {
            tracing::debug!("No config.toml found at {}, using defaults", path.display());
            SenseiConfig::default()
        }
        Err(err) => {
            tracing::warn!("{err}, using defaults");
            SenseiConfig::default()
        }
    }
}

/// Where the log file goes: `file` as-is when absolute, else under `data_dir`.
pub fn resolve_log_path(data_dir: &Path, file: &str) -> PathBuf {
    let path = Path::new(file);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        data_dir.join(path)
    }
}
