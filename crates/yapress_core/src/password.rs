//! Argon2 password hashing.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::SaltString;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use log::error;

/// Stored for accounts that cannot log in with a password.
pub const UNUSABLE_PASSWORD: &str = "!";

/// Hashes a password into a PHC string with a fresh random salt.
pub fn hash_password(password: &str) -> Result<String, String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|err| err.to_string())
}

/// Verifies a password against a stored PHC string.
///
/// Unparsable hashes, including [`UNUSABLE_PASSWORD`], never verify.
pub fn verify_password(stored_hash: &str, password: &str) -> bool {
    if stored_hash == UNUSABLE_PASSWORD {
        return false;
    }
    let hash = match PasswordHash::new(stored_hash) {
        Ok(hash) => hash,
        Err(err) => {
            error!("event=password_verify module=users status=error error={err}");
            return false;
        }
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &hash)
        .is_ok()
}
