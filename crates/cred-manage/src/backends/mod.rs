//! Credential container implementations

#[cfg(feature = "bitwarden")]
pub mod bitwarden;

#[cfg(feature = "flat-file")]
pub mod flat_file;
