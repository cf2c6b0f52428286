//! Error types for the confcell configuration store.

use std::path::PathBuf;
use thiserror::Error;

/// Store, builder and schema errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Duplicate config value registration: '{file_path}:{key}'")]
    DuplicateKey { file_path: String, key: String },

    #[error("No config value registered for key: '{file_path}:{key}'")]
    MissingKey { file_path: String, key: String },

    #[error("Config value '{key}' holds {actual}, not {expected}")]
    TypeMismatch {
        key: String,
        expected: &'static str,
        actual: &'static str,
    },

    #[error("Config file {path:?} is malformed: {reason}")]
    Malformed { path: PathBuf, reason: String },

    #[error("Error reading config file {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Error writing config file {path:?}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Config path {path:?} is a directory")]
    IsDirectory { path: PathBuf },

    #[error("Failed to encode config json: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("Invalid value for '{key}': expected {expected}")]
    InvalidValue { key: String, expected: &'static str },

    #[error("Schema error: {0}")]
    Schema(String),

    #[error("Could not determine platform config directory")]
    NoPlatformDirs,

    #[error("{0}")]
    Usage(String),
}

/// Errors raised while preparing the runtime (settings, logging)
#[derive(Debug, Error)]
pub enum SetupError {
    #[error("Settings error: {0}")]
    Settings(String),

    #[error("Logging error: {0}")]
    Logging(String),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl From<config::ConfigError> for SetupError {
    fn from(err: config::ConfigError) -> Self {
        SetupError::Settings(err.to_string())
    }
}
