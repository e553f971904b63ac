//! Bitwarden API configuration
//!
//! Loaded from a JSON flat file, `~/.credentials/bw_api.json` by default:
//!
//! ```json
//! {
//!   "username": "nobody@example.com",
//!   "password": "r5CFRR+n9NQI8a525FY+0BPR0HGOjVJX0cR1KEMnIOo=",
//!   "client_id": "web",
//!   "client_secret": "...",
//!   "scope": "api",
//!   "grant_type": "password"
//! }
//! ```
//!
//! `password` holds the master password *hash*, not the plaintext. Leave it
//! out (or empty) to be prompted instead. The API key values can be found
//! under "View API Key" at <https://vault.bitwarden.com/#/settings/account>.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::backends::flat_file::FlatFileContainer;
use crate::error::CredentialError;

pub const DEFAULT_GRANT_TYPE: &str = "password";
pub const DEFAULT_SCOPE: &str = "api";
pub const DEFAULT_CLIENT_ID: &str = "web";

pub const DEFAULT_API_URL: &str = "https://api.bitwarden.com";
pub const DEFAULT_IDENTITY_URL: &str = "https://identity.bitwarden.com";

/// Bitwarden API settings as stored on disk
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BitwardenConfig {
    /// Account email address
    pub username: String,

    /// Hashed master password
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_secret: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grant_type: Option<String>,
}

impl BitwardenConfig {
    /// Get the default config file path, `~/.credentials/bw_api.json`.
    ///
    /// Older deployments used the absolute path `/.credentials/bw_api.json`;
    /// that location is now resolved under the home directory instead. Pass
    /// an explicit path to [`BitwardenContainer::from_flat_file`] to use the
    /// absolute one.
    ///
    /// [`BitwardenContainer::from_flat_file`]: crate::BitwardenContainer::from_flat_file
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".credentials")
            .join("bw_api.json")
    }

    /// Load configuration from a JSON flat file
    pub fn load(path: &Path) -> Result<Self, CredentialError> {
        let content = FlatFileContainer::new(path)?.read(true)?;
        Self::from_json(path, &content)
    }

    /// Parse configuration, attributing errors to `path`
    pub fn from_json(path: &Path, content: &str) -> Result<Self, CredentialError> {
        serde_json::from_str(content)
            .map_err(|e| CredentialError::invalid_config(path, e.to_string()))
    }

    /// Hashed password, if one is configured and non-empty
    pub fn hashed_password(&self) -> Option<&str> {
        non_empty(&self.password)
    }

    pub fn grant_type_or_default(&self) -> &str {
        non_empty(&self.grant_type).unwrap_or(DEFAULT_GRANT_TYPE)
    }

    pub fn scope_or_default(&self) -> &str {
        non_empty(&self.scope).unwrap_or(DEFAULT_SCOPE)
    }

    pub fn client_id_or_default(&self) -> &str {
        non_empty(&self.client_id).unwrap_or(DEFAULT_CLIENT_ID)
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// Bitwarden service endpoints
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiEndpoints {
    pub api_url: String,
    pub identity_url: String,
}

impl Default for ApiEndpoints {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            identity_url: DEFAULT_IDENTITY_URL.to_string(),
        }
    }
}

impl ApiEndpoints {
    /// Endpoints for a self-hosted server, where both live under one base URL
    pub fn self_hosted(base_url: &str) -> Self {
        let base = base_url.trim_end_matches('/');
        Self {
            api_url: format!("{base}/api"),
            identity_url: format!("{base}/identity"),
        }
    }

    /// OAuth token endpoint
    pub fn token_url(&self) -> String {
        format!("{}/connect/token", self.identity_url.trim_end_matches('/'))
    }
}
