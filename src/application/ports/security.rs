// src/application/ports/security.rs
use crate::application::{ApplicationResult, dto::Claims};
use crate::domain::user::UserId;
use async_trait::async_trait;

/// One-way password hashing.
#[async_trait]
pub trait PasswordHasher: Send + Sync {
    async fn hash(&self, password: &str) -> ApplicationResult<String>;

    /// `Ok(())` iff `password` hashes to `expected_hash`. A mismatch is
    /// reported as `AuthError::InvalidCredentials`.
    async fn verify(&self, password: &str, expected_hash: &str) -> ApplicationResult<()>;
}

/// Issues and verifies signed, time-bounded bearer tokens.
///
/// Every token carries the user id (as a decimal string) and an expiration
/// timestamp. Tokens are opaque to everything except the provider.
#[async_trait]
pub trait TokenProvider: Send + Sync {
    /// Access token with the configured access TTL.
    async fn generate(&self, user_id: UserId) -> ApplicationResult<String>;

    /// Access token whose claim set is extended with `extra`. Keys in `extra`
    /// replace the canonical ones when they collide.
    async fn generate_with_claims(
        &self,
        user_id: UserId,
        extra: Claims,
    ) -> ApplicationResult<String>;

    /// Refresh token with the configured refresh TTL.
    async fn generate_refresh(&self, user_id: UserId) -> ApplicationResult<String>;

    /// Check signature, algorithm and expiration and return the claims.
    async fn verify(&self, token: &str) -> ApplicationResult<Claims>;
}
