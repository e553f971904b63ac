//! Bitwarden master password hashing
//!
//! The identity endpoint never sees the plaintext master password. Clients
//! send a hash derived in two PBKDF2-HMAC-SHA256 stages:
//!
//! ```text
//! stretched = PBKDF2(password, salt = lowercase(email), 5000 iterations)
//! hash      = PBKDF2(stretched, salt = password, 1 iteration)
//! ```
//!
//! See <https://bitwarden.com/help/crypto.html>.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use sha2::Sha256;
use zeroize::Zeroizing;

/// Iteration count for the first stage
pub const PBKDF2_ITERATIONS: u32 = 5000;

/// Output length of both stages, in bytes
pub const KEY_LEN: usize = 32;

/// Derive the master password hash the identity endpoint expects as `password`.
///
/// Only the email is case-normalized. Empty inputs are hashed like any other.
pub fn hash_password(email: &str, password: &str) -> String {
    let email_lower = email.to_lowercase();

    let mut stretched = Zeroizing::new([0u8; KEY_LEN]);
    pbkdf2::pbkdf2_hmac::<Sha256>(
        password.as_bytes(),
        email_lower.as_bytes(),
        PBKDF2_ITERATIONS,
        &mut stretched[..],
    );

    let mut hash = Zeroizing::new([0u8; KEY_LEN]);
    pbkdf2::pbkdf2_hmac::<Sha256>(&stretched[..], password.as_bytes(), 1, &mut hash[..]);

    STANDARD.encode(&hash[..])
}
