use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while reading or managing credentials
#[derive(Debug, Error)]
pub enum CredentialError {
    /// Path does not point at an existing regular file
    #[error("Cannot open credential container, file doesn't exist: {}", path.display())]
    FileNotFound { path: PathBuf },

    /// File IO error
    #[error("Failed to read file '{}': {message}", path.display())]
    FileError { path: PathBuf, message: String },

    /// Backend does not support the requested operation
    #[error("{backend} container does not implement {operation}")]
    NotImplemented {
        backend: &'static str,
        operation: &'static str,
    },

    /// Configuration file could not be parsed
    #[error("Invalid configuration in '{}': {message}", path.display())]
    InvalidConfig { path: PathBuf, message: String },

    /// Required field empty at construction time
    #[error("Missing required field '{field}'")]
    MissingField { field: &'static str },

    /// Interactive input failed or was interrupted
    #[error("Prompt failed: {0}")]
    Prompt(String),
}

impl CredentialError {
    /// Create a not-implemented error
    pub fn not_implemented(backend: &'static str, operation: &'static str) -> Self {
        Self::NotImplemented { backend, operation }
    }

    /// Create a file read error
    pub fn file(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::FileError {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create an invalid configuration error
    pub fn invalid_config(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a prompt error
    pub fn prompt(message: impl Into<String>) -> Self {
        Self::Prompt(message.into())
    }

    /// Whether this error signals an unsupported capability
    pub fn is_not_implemented(&self) -> bool {
        matches!(self, Self::NotImplemented { .. })
    }
}
