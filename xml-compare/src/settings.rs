use std::fs;
use std::path::Path;

use thiserror::Error;
use xml_compare_core::DiffConfiguration;

/// Errors returned when loading a comparison settings file.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse settings file {path}: {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },
}

/// Load a [`DiffConfiguration`] from a TOML file.
///
/// Keys mirror the configuration fields; missing keys keep their defaults and
/// unknown keys are rejected.
pub fn load_configuration(path: &Path) -> Result<DiffConfiguration, SettingsError> {
    let raw = fs::read_to_string(path).map_err(|source| SettingsError::Io {
        path: path.display().to_string(),
        source,
    })?;

    parse_configuration(&raw, path.display().to_string())
}

pub fn parse_configuration(raw: &str, path: String) -> Result<DiffConfiguration, SettingsError> {
    toml::from_str(raw).map_err(|source| SettingsError::Parse { path, source })
}
