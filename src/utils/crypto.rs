//! Argon2id hashing for the `users.password` column.
//!
//! Stored values are PHC strings, so the salt and parameters travel with
//! the hash and older rows keep verifying if the defaults change.

use argon2::{
    password_hash::{self, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};
use rand::rngs::OsRng;

use crate::error::Result;

fn hasher() -> Argon2<'static> {
    Argon2::new(Algorithm::Argon2id, Version::V0x13, Params::default())
}

/// Hashes a plaintext password with a fresh random salt.
pub fn hash_user_password(plain: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    Ok(hasher().hash_password(plain.as_bytes(), &salt)?.to_string())
}

/// `Ok(false)` on a wrong password; `Err` only when `stored` is not a PHC hash.
pub fn password_matches(plain: &str, stored: &str) -> Result<bool> {
    let parsed = PasswordHash::new(stored)?;
    match hasher().verify_password(plain.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(password_hash::Error::Password) => Ok(false),
        Err(err) => Err(err.into()),
    }
}
