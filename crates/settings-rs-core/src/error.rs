//! Error types for settings access, construction, and persistence.

use std::path::PathBuf;
use thiserror::Error;

/// Errors returned by settings operations.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// A load-style operation was pointed at a path that does not exist.
    #[error("settings file does not exist: {}", .0.display())]
    FileNotFound(PathBuf),
    /// A source resolved to something other than a map.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
    /// A mutation was attempted on an immutable store.
    #[error("cannot modify immutable configuration (key={key})")]
    Immutable { key: String },
    /// A registered validator rejected the proposed value.
    #[error("invalid value for key: {key}")]
    Validation { key: String },
    /// Encoding, decoding, or writing a settings file failed.
    #[error("serialization error: {0}")]
    Serialization(String),
    /// The requested format is not available in this build.
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),
    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for SettingsError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<json5::Error> for SettingsError {
    fn from(err: json5::Error) -> Self {
        let json5::Error::Message { msg, location } = err;
        Self::Serialization(match location {
            Some(at) => format!(
                "invalid settings literal at line {}, column {}: {msg}",
                at.line, at.column
            ),
            None => format!("invalid settings literal: {msg}"),
        })
    }
}

#[cfg(feature = "yaml")]
impl From<serde_yaml::Error> for SettingsError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
