//! Credential containers with pluggable backends
//!
//! Every backend implements [`CredentialContainer`], a `get_cred` /
//! `set_cred` / `delete_cred` contract whose operations fail with
//! [`CredentialError::NotImplemented`] unless the backend supports them:
//!
//! - **Flat file** ([`FlatFileContainer`]): the secret is the content of a file
//! - **Bitwarden** ([`BitwardenContainer`]): API parameters for a Bitwarden
//!   account, configured from a JSON flat file
//!
//! The crate also implements Bitwarden's master password hashing
//! ([`hash_password`]), which turns an email and plaintext password into the
//! value the identity endpoint expects.
//!
//! # Example
//!
//! ```rust,ignore
//! use cred_manage::{BitwardenConfig, BitwardenContainer, FlatFileContainer};
//! use cred_manage::{PromptResolver, TerminalPrompt};
//! use cred_manage::CredentialContainer;
//!
//! let token = FlatFileContainer::new("/run/secrets/token")?.get_cred()?;
//!
//! let resolver = PromptResolver::new(TerminalPrompt::new());
//! let bw = BitwardenContainer::from_flat_file(&BitwardenConfig::default_path(), &resolver)?;
//! ```
//!
//! # Features
//!
//! - `flat-file` (default): Flat file backend
//! - `bitwarden` (default): Bitwarden backend and its JSON configuration
//! - `terminal` (default): [`TerminalPrompt`] via `rustyline` and `rpassword`

mod backends;
#[cfg(feature = "bitwarden")]
mod config;
mod container;
mod error;
mod kdf;
mod prompt;

#[cfg(feature = "bitwarden")]
pub use backends::bitwarden::{BitwardenContainer, TokenRequest};
#[cfg(feature = "flat-file")]
pub use backends::flat_file::FlatFileContainer;
#[cfg(feature = "bitwarden")]
pub use config::{ApiEndpoints, BitwardenConfig};
pub use container::CredentialContainer;
pub use error::CredentialError;
pub use kdf::{hash_password, KEY_LEN, PBKDF2_ITERATIONS};
#[cfg(feature = "terminal")]
pub use prompt::TerminalPrompt;
pub use prompt::{prompt_for_credentials, CredentialPrompt, PasswordHashResolver, PromptResolver};
