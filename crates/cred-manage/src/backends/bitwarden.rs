//! Bitwarden backend
//!
//! Holds the parameters needed to authenticate against the Bitwarden API.
//! Vault access itself is not implemented yet, so `get_cred`, `set_cred` and
//! `delete_cred` all fail with [`CredentialError::NotImplemented`].
//!
//! The password sent to the identity endpoint is the master password hash
//! produced by [`crate::hash_password`], never the plaintext.

use std::fmt;
use std::path::Path;

use crate::config::{ApiEndpoints, BitwardenConfig};
use crate::container::CredentialContainer;
use crate::error::CredentialError;
use crate::prompt::PasswordHashResolver;

/// Credential container for a Bitwarden account
#[derive(Clone)]
pub struct BitwardenContainer {
    username: String,
    password: String,
    grant_type: String,
    scope: String,
    client_id: String,
    client_secret: Option<String>,
    endpoints: ApiEndpoints,
}

impl BitwardenContainer {
    /// Build a container from a config whose `password` is already hashed.
    ///
    /// Missing or empty `grant_type`, `scope` and `client_id` fall back to
    /// `password`, `api` and `web`.
    pub fn new(config: BitwardenConfig) -> Result<Self, CredentialError> {
        require_username(&config)?;

        let password = config
            .hashed_password()
            .ok_or(CredentialError::MissingField { field: "password" })?
            .to_string();

        Ok(Self::assemble(config, password))
    }

    /// Build a container from the JSON config at `path`.
    ///
    /// When the config has no usable `password`, `resolver` is asked for the
    /// hash of the configured `username` and whatever it returns is stored
    /// as-is. A configured password is also used verbatim. The username is
    /// checked before the resolver runs, so a broken config never prompts.
    pub fn from_flat_file<R>(path: &Path, resolver: &R) -> Result<Self, CredentialError>
    where
        R: PasswordHashResolver + ?Sized,
    {
        let config = BitwardenConfig::load(path)?;
        require_username(&config)?;

        let password = match config.hashed_password() {
            Some(hash) => hash.to_string(),
            None => {
                tracing::debug!(
                    username = %config.username,
                    "No password hash configured, resolving"
                );
                resolver.resolve_password_hash(&config.username)?
            }
        };

        Ok(Self::assemble(config, password))
    }

    fn assemble(config: BitwardenConfig, password: String) -> Self {
        let container = Self {
            grant_type: config.grant_type_or_default().to_string(),
            scope: config.scope_or_default().to_string(),
            client_id: config.client_id_or_default().to_string(),
            client_secret: config.client_secret.filter(|s| !s.is_empty()),
            username: config.username,
            password,
            endpoints: ApiEndpoints::default(),
        };

        tracing::info!(
            username = %container.username,
            client_id = %container.client_id,
            "Instantiated Bitwarden credential container"
        );

        container
    }

    /// Point the container at different service endpoints
    pub fn with_endpoints(mut self, endpoints: ApiEndpoints) -> Self {
        self.endpoints = endpoints;
        self
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    /// Hashed master password
    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn grant_type(&self) -> &str {
        &self.grant_type
    }

    pub fn scope(&self) -> &str {
        &self.scope
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    pub fn client_secret(&self) -> Option<&str> {
        self.client_secret.as_deref()
    }

    pub fn endpoints(&self) -> &ApiEndpoints {
        &self.endpoints
    }

    /// Describe the bearer token request for this account.
    ///
    /// The request is not sent; token exchange is not supported yet.
    pub fn token_request(&self) -> TokenRequest {
        let mut fields = vec![
            ("grant_type", self.grant_type.clone()),
            ("username", self.username.clone()),
            ("password", self.password.clone()),
            ("scope", self.scope.clone()),
            ("client_id", self.client_id.clone()),
        ];

        if let Some(secret) = &self.client_secret {
            fields.push(("client_secret", secret.clone()));
        }

        TokenRequest {
            url: self.endpoints.token_url(),
            fields,
        }
    }
}

impl fmt::Debug for BitwardenContainer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BitwardenContainer")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("grant_type", &self.grant_type)
            .field("scope", &self.scope)
            .field("client_id", &self.client_id)
            .field("client_secret", &self.client_secret.as_ref().map(|_| "<redacted>"))
            .field("endpoints", &self.endpoints)
            .finish()
    }
}

impl CredentialContainer for BitwardenContainer {
    /// Vault items are structured (username, password, notes, ...)
    type Secret = serde_json::Value;

    fn backend_name(&self) -> &'static str {
        "bitwarden"
    }
}

fn require_username(config: &BitwardenConfig) -> Result<(), CredentialError> {
    if config.username.is_empty() {
        return Err(CredentialError::MissingField { field: "username" });
    }
    Ok(())
}

/// Form-encoded `POST` to the identity token endpoint
#[derive(Clone, PartialEq, Eq)]
pub struct TokenRequest {
    pub url: String,
    pub fields: Vec<(&'static str, String)>,
}

impl fmt::Debug for TokenRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields: Vec<(&str, &str)> = self
            .fields
            .iter()
            .map(|(key, value)| match *key {
                "password" | "client_secret" => (*key, "<redacted>"),
                _ => (*key, value.as_str()),
            })
            .collect();

        f.debug_struct("TokenRequest")
            .field("url", &self.url)
            .field("fields", &fields)
            .finish()
    }
}

impl TokenRequest {
    pub const CONTENT_TYPE: &'static str = "application/x-www-form-urlencoded";

    /// Value of a form field
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Render the `application/x-www-form-urlencoded` body
    pub fn encode_form(&self) -> String {
        self.fields
            .iter()
            .map(|(key, value)| format!("{}={}", key, urlencoding::encode(value)))
            .collect::<Vec<_>>()
            .join("&")
    }
}
