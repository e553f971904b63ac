//! Interactive credential collection
//!
//! Containers never prompt on their own. They ask a [`PasswordHashResolver`]
//! for the master password hash, and the interactive implementation of that
//! strategy ([`PromptResolver`]) sits on top of a swappable
//! [`CredentialPrompt`].

use zeroize::Zeroizing;

use crate::error::CredentialError;
use crate::kdf::hash_password;

/// Source of interactively supplied email addresses and passwords
pub trait CredentialPrompt {
    /// Ask for the account email address
    fn read_email(&self) -> Result<String, CredentialError>;

    /// Ask for the plaintext master password of `email`, without echo
    fn read_password(&self, email: &str) -> Result<String, CredentialError>;
}

/// Resolve the master password hash for `email`, prompting for whichever of
/// `email` and `password` is missing or empty.
///
/// Always returns the hash, never the plaintext.
pub fn prompt_for_credentials<P>(
    prompt: &P,
    email: Option<&str>,
    password: Option<&str>,
) -> Result<String, CredentialError>
where
    P: CredentialPrompt + ?Sized,
{
    let email = match email.filter(|e| !e.is_empty()) {
        Some(email) => email.to_string(),
        None => prompt.read_email()?,
    };

    let password = match password.filter(|p| !p.is_empty()) {
        Some(password) => Zeroizing::new(password.to_string()),
        None => Zeroizing::new(prompt.read_password(&email)?),
    };

    Ok(hash_password(&email, &password))
}

/// Strategy that supplies an already-hashed master password for an account
pub trait PasswordHashResolver {
    fn resolve_password_hash(&self, email: &str) -> Result<String, CredentialError>;
}

impl<F> PasswordHashResolver for F
where
    F: Fn(&str) -> Result<String, CredentialError>,
{
    fn resolve_password_hash(&self, email: &str) -> Result<String, CredentialError> {
        self(email)
    }
}

/// Resolver that asks a [`CredentialPrompt`] for the password and hashes it
#[derive(Debug, Default)]
pub struct PromptResolver<P> {
    prompt: P,
}

impl<P: CredentialPrompt> PromptResolver<P> {
    pub fn new(prompt: P) -> Self {
        Self { prompt }
    }
}

impl<P: CredentialPrompt> PasswordHashResolver for PromptResolver<P> {
    fn resolve_password_hash(&self, email: &str) -> Result<String, CredentialError> {
        prompt_for_credentials(&self.prompt, Some(email), None)
    }
}

/// Prompts on the controlling terminal.
///
/// The email is read with a line editor; the password is read without echo.
#[cfg(feature = "terminal")]
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalPrompt;

#[cfg(feature = "terminal")]
impl TerminalPrompt {
    pub fn new() -> Self {
        Self
    }
}

#[cfg(feature = "terminal")]
impl CredentialPrompt for TerminalPrompt {
    fn read_email(&self) -> Result<String, CredentialError> {
        use rustyline::error::ReadlineError;
        use rustyline::history::DefaultHistory;
        use rustyline::{Config, Editor};

        let config = Config::builder().auto_add_history(false).build();
        let mut editor: Editor<(), DefaultHistory> =
            Editor::with_config(config).map_err(|e| CredentialError::prompt(e.to_string()))?;

        match editor.readline("Bitwarden account email address: ") {
            Ok(line) => Ok(line.trim().to_string()),
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
                Err(CredentialError::prompt("input cancelled"))
            }
            Err(e) => Err(CredentialError::prompt(e.to_string())),
        }
    }

    fn read_password(&self, email: &str) -> Result<String, CredentialError> {
        rpassword::prompt_password(format!("{email} account password: "))
            .map_err(|e| CredentialError::prompt(format!("failed to read password: {e}")))
    }
}
