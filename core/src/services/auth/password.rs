//! bcrypt hashing off the async executor

use crate::errors::{AuthError, DomainError, DomainResult};

pub(crate) async fn hash_password(password: String, cost: u32) -> DomainResult<String> {
    tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
        .await
        .map_err(|e| DomainError::internal(format!("hashing task failed: {}", e)))?
        .map_err(|e| {
            tracing::error!(error = %e, "bcrypt hashing failed");
            DomainError::Auth(AuthError::PasswordHashing)
        })
}

/// A malformed stored hash counts as a mismatch
pub(crate) async fn verify_password(password: String, hash: String) -> DomainResult<bool> {
    tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash).unwrap_or(false))
        .await
        .map_err(|e| DomainError::internal(format!("hashing task failed: {}", e)))
}
