//! Platform directories for configuration, state and logs.

use std::path::PathBuf;

use directories::ProjectDirs;

use crate::ConfigError;

fn project_dirs() -> Result<ProjectDirs, ConfigError> {
    ProjectDirs::from("", "", "vitrine").ok_or(ConfigError::NoHomeDir)
}

/// `config.toml` inside the platform config directory.
pub fn config_file() -> Result<PathBuf, ConfigError> {
    Ok(project_dirs()?.config_dir().join("config.toml"))
}

/// Persisted alert banner state.
pub fn alert_state_file() -> Result<PathBuf, ConfigError> {
    Ok(project_dirs()?.data_dir().join("alert.toml"))
}

/// Log file; stdout belongs to the terminal UI.
pub fn log_file() -> Result<PathBuf, ConfigError> {
    Ok(project_dirs()?.data_local_dir().join("vitrine.log"))
}
