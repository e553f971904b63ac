//! Credential container capability contract

use crate::error::CredentialError;

/// Uniform get/set/delete contract over a secret storage backend.
///
/// Every operation fails with [`CredentialError::NotImplemented`] unless the
/// backend overrides it, so a backend has to opt in to each capability it
/// supports.
pub trait CredentialContainer {
    /// Backend-defined representation of the stored secret
    type Secret;

    /// Short backend name used in errors and logs
    fn backend_name(&self) -> &'static str;

    /// Retrieve the secret
    fn get_cred(&self) -> Result<Self::Secret, CredentialError> {
        Err(CredentialError::not_implemented(
            self.backend_name(),
            "get_cred",
        ))
    }

    /// Store a new secret
    fn set_cred(&mut self, _secret: &Self::Secret) -> Result<(), CredentialError> {
        Err(CredentialError::not_implemented(
            self.backend_name(),
            "set_cred",
        ))
    }

    /// Remove the secret
    fn delete_cred(&mut self) -> Result<(), CredentialError> {
        Err(CredentialError::not_implemented(
            self.backend_name(),
            "delete_cred",
        ))
    }
}
