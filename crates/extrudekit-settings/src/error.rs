//! Error types for the settings crate.
//!
//! Covers loading and saving settings files, validation of resolved values,
//! and parsing of per-call override layers.

use std::io;
use thiserror::Error;

/// Errors that can occur during settings operations.
#[derive(Error, Debug)]
pub enum SettingsError {
    /// The settings file could not be loaded.
    #[error("Failed to load settings: {0}")]
    LoadError(String),

    /// The settings file could not be saved.
    #[error("Failed to save settings: {0}")]
    SaveError(String),

    /// A settings value is invalid.
    #[error("Invalid setting '{key}': {reason}")]
    InvalidSetting { key: String, reason: String },

    /// An override names a key that is not a recognised setting.
    #[error("Unknown setting key: {0}")]
    UnknownKey(String),

    /// An override entry could not be parsed.
    #[error("Malformed override '{0}' (expected key=value)")]
    MalformedOverride(String),

    /// The configuration directory could not be resolved.
    #[error("Config directory error: {0}")]
    ConfigDirectory(String),

    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// TOML deserialization error.
    #[error("TOML error: {0}")]
    TomlError(#[from] toml::de::Error),

    /// TOML serialization error.
    #[error("TOML write error: {0}")]
    TomlWriteError(#[from] toml::ser::Error),
}

impl SettingsError {
    pub(crate) fn invalid(key: &str, reason: impl Into<String>) -> Self {
        Self::InvalidSetting {
            key: key.to_string(),
            reason: reason.into(),
        }
    }
}

/// Result type alias for settings operations.
pub type SettingsResult<T> = Result<T, SettingsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_error_display() {
        let err = SettingsError::invalid("lineSpacing", "must be positive");
        assert_eq!(
            err.to_string(),
            "Invalid setting 'lineSpacing': must be positive"
        );

        let err = SettingsError::UnknownKey("nozzleTemp".to_string());
        assert_eq!(err.to_string(), "Unknown setting key: nozzleTemp");

        let err = SettingsError::MalformedOverride("printDir".to_string());
        assert_eq!(
            err.to_string(),
            "Malformed override 'printDir' (expected key=value)"
        );
    }

    #[test]
    fn test_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: SettingsError = io_err.into();
        assert!(matches!(err, SettingsError::IoError(_)));

        let json_err = serde_json::from_str::<u32>("nope").unwrap_err();
        let err: SettingsError = json_err.into();
        assert!(matches!(err, SettingsError::JsonError(_)));
    }
}
