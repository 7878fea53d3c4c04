//! Argon2id password hashing, run off the async executor.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::SaltString;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};

use crate::errors::domain::{DomainError, InfraErrorKind};

pub async fn hash_password(password: &str) -> Result<String, DomainError> {
    let password = password.to_owned();

    tokio::task::spawn_blocking(move || {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| DomainError::infra(InfraErrorKind::PasswordHash, e.to_string()))
    })
    .await
    .map_err(|e| DomainError::infra(InfraErrorKind::PasswordHash, e.to_string()))?
}

/// Returns `Ok(false)` on mismatch; errors only when the stored hash is unusable.
pub async fn verify_password(password: &str, hash: &str) -> Result<bool, DomainError> {
    let password = password.to_owned();
    let hash = hash.to_owned();

    tokio::task::spawn_blocking(move || {
        let parsed = PasswordHash::new(&hash)
            .map_err(|e| DomainError::infra(InfraErrorKind::PasswordHash, e.to_string()))?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok())
    })
    .await
    .map_err(|e| DomainError::infra(InfraErrorKind::PasswordHash, e.to_string()))?
}
