//! Authentication service for HTTP Basic credentials.

use serde_json::Value;
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

use crate::error::AppError;

/// Checks HTTP Basic credentials against the configured account.
///
/// Only SHA-256 digests of the configured values are kept. Comparison runs
/// over the full digests so the time taken does not depend on how many
/// leading characters of the candidate match.
pub struct AuthService {
    username_hash: [u8; 32],
    password_hash: [u8; 32],
}

impl AuthService {
    /// Creates a new authentication service for a single account.
    pub fn new(username: &str, password: &str) -> Self {
        Self {
            username_hash: digest(username),
            password_hash: digest(password),
        }
    }

    /// Verifies a username/password pair.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Forbidden`] if the credentials do not match.
    pub fn authenticate(&self, username: &str, password: &str) -> Result<(), AppError> {
        let user_ok = digest(username).as_slice().ct_eq(self.username_hash.as_slice());
        let pass_ok = digest(password).as_slice().ct_eq(self.password_hash.as_slice());

        if bool::from(user_ok & pass_ok) {
            Ok(())
        } else {
            tracing::warn!("Rejected credentials for user {:?}", username);
            Err(AppError::forbidden("Forbidden", Value::Null))
        }
    }
}

/// Hashes a credential with SHA-256.
fn digest(value: &str) -> [u8; 32] {
    Sha256::digest(value.as_bytes()).into()
}
