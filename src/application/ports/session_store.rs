// src/application/ports/session_store.rs
use crate::application::ApplicationResult;
use crate::domain::{
    session::{Session, TokenType},
    user::UserId,
};
use async_trait::async_trait;
use std::time::Duration;

/// Fallback TTL applied when a caller asks to store a session with a zero TTL.
pub const DEFAULT_SESSION_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Holds the single current token per `(user, token type)`.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Store `session`, replacing whatever was there. The entry disappears
    /// after `ttl`.
    async fn save(&self, session: &Session, ttl: Duration) -> ApplicationResult<()>;

    /// `Ok(None)` when nothing is stored or the entry has expired.
    async fn get(&self, user_id: UserId, token_type: TokenType)
    -> ApplicationResult<Option<Session>>;

    /// Remove the entry. Removing a missing entry succeeds.
    async fn delete(&self, user_id: UserId, token_type: TokenType) -> ApplicationResult<()>;
}

/// Cache key addressed by save/get/delete for one slot.
pub fn session_key(user_id: UserId, token_type: TokenType) -> String {
    format!("token:user:{}:{}", user_id, token_type.as_str())
}
