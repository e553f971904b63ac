//! Flat file backend
//!
//! Reads a secret from the contents of a single file. Handy for local
//! development, bearer tokens and other short-lived secrets; prefer a real
//! secret store for anything long-lived.

use std::path::{Path, PathBuf};

use crate::container::CredentialContainer;
use crate::error::CredentialError;

/// Credential container backed by a file on disk
#[derive(Debug, Clone)]
pub struct FlatFileContainer {
    path: PathBuf,
}

impl FlatFileContainer {
    /// Bind a container to `path`, which must be an existing regular file
    pub fn new(path: impl Into<PathBuf>) -> Result<Self, CredentialError> {
        let path = path.into();

        if !path.is_file() {
            return Err(CredentialError::FileNotFound { path });
        }

        Ok(Self { path })
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the file, trimming surrounding whitespace when `strip` is set.
    /// The file is re-read on every call.
    pub fn read(&self, strip: bool) -> Result<String, CredentialError> {
        tracing::debug!(path = %self.path.display(), strip, "Reading flat file credential");

        let content = std::fs::read_to_string(&self.path)
            .map_err(|e| CredentialError::file(&self.path, e.to_string()))?;

        if strip {
            Ok(content.trim().to_string())
        } else {
            Ok(content)
        }
    }
}

impl CredentialContainer for FlatFileContainer {
    type Secret = String;

    fn backend_name(&self) -> &'static str {
        "flat-file"
    }

    fn get_cred(&self) -> Result<String, CredentialError> {
        self.read(true)
    }
}
