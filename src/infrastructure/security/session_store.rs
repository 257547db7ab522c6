// src/infrastructure/security/session_store.rs
use crate::application::{
    ApplicationResult,
    error::ApplicationError,
    ports::session_store::{DEFAULT_SESSION_TTL, SessionStore, session_key},
};
use crate::domain::{
    session::{Session, TokenType},
    user::UserId,
};
use async_trait::async_trait;
use std::{
    collections::HashMap,
    sync::{Mutex, MutexGuard},
    time::{Duration, Instant},
};

// key -> (token, expires at)
type Entries = HashMap<String, (String, Instant)>;

/// Process-local session cache. Used when no Redis URL is configured and in
/// tests. Expired entries are dropped lazily on read.
#[derive(Default)]
pub struct InMemorySessionStore {
    entries: Mutex<Entries>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> ApplicationResult<MutexGuard<'_, Entries>> {
        self.entries
            .lock()
            .map_err(|_| ApplicationError::infrastructure("session store lock poisoned"))
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn save(&self, session: &Session, ttl: Duration) -> ApplicationResult<()> {
        let ttl = if ttl.is_zero() { DEFAULT_SESSION_TTL } else { ttl };
        let key = session_key(session.user_id, session.token_type);
        let expires_at = Instant::now() + ttl;
        self.lock()?
            .insert(key, (session.token.clone(), expires_at));
        Ok(())
    }

    async fn get(
        &self,
        user_id: UserId,
        token_type: TokenType,
    ) -> ApplicationResult<Option<Session>> {
        let key = session_key(user_id, token_type);
        let mut entries = self.lock()?;
        let now = Instant::now();
        let live = entries
            .get(&key)
            .filter(|(_, expires_at)| *expires_at > now)
            .map(|(token, _)| token.clone());
        let Some(token) = live else {
            entries.remove(&key);
            return Ok(None);
        };
        Ok(Some(Session {
            user_id,
            token,
            token_type,
        }))
    }

    async fn delete(&self, user_id: UserId, token_type: TokenType) -> ApplicationResult<()> {
        self.lock()?.remove(&session_key(user_id, token_type));
        Ok(())
    }
}
