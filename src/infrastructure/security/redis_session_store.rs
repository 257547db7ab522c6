// src/infrastructure/security/redis_session_store.rs
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
use deadpool_redis::{Config as DeadpoolConfig, Connection, Pool, Runtime};
use redis::AsyncCommands;
use std::time::Duration;

/// Redis backed session cache. Each slot is a plain string key written with
/// `SET .. PX` so Redis expires it on its own.
#[derive(Clone)]
pub struct RedisSessionStore {
    pool: Pool,
}

impl RedisSessionStore {
    /// Create a store from a redis URL (e.g. redis://:password@host:6379/0).
    pub fn from_url(url: &str) -> Result<Self, ApplicationError> {
        let cfg = DeadpoolConfig::from_url(url);
        let pool = cfg
            .create_pool(Some(Runtime::Tokio1))
            .map_err(|err| ApplicationError::infrastructure_with("error to create redis pool", err))?;

        Ok(Self { pool })
    }

    async fn conn(&self) -> ApplicationResult<Connection> {
        self.pool
            .get()
            .await
            .map_err(|err| ApplicationError::infrastructure_with("redis connection unavailable", err))
    }
}

#[async_trait]
impl SessionStore for RedisSessionStore {
    async fn save(&self, session: &Session, ttl: Duration) -> ApplicationResult<()> {
        let ttl = if ttl.is_zero() { DEFAULT_SESSION_TTL } else { ttl };
        let ttl_ms = u64::try_from(ttl.as_millis()).unwrap_or(u64::MAX);
        let key = session_key(session.user_id, session.token_type);

        let mut conn = self.conn().await?;
        redis::cmd("SET")
            .arg(&key)
            .arg(&session.token)
            .arg("PX")
            .arg(ttl_ms)
            .query_async::<()>(&mut conn)
            .await
            .map_err(|err| ApplicationError::infrastructure_with("redis SET failed", err))
    }

    async fn get(
        &self,
        user_id: UserId,
        token_type: TokenType,
    ) -> ApplicationResult<Option<Session>> {
        let key = session_key(user_id, token_type);
        let mut conn = self.conn().await?;
        let token: Option<String> = conn
            .get(&key)
            .await
            .map_err(|err| ApplicationError::infrastructure_with("redis GET failed", err))?;

        Ok(token.map(|token| Session {
            user_id,
            token,
            token_type,
        }))
    }

    async fn delete(&self, user_id: UserId, token_type: TokenType) -> ApplicationResult<()> {
        let key = session_key(user_id, token_type);
        let mut conn = self.conn().await?;
        conn.del::<_, ()>(&key)
            .await
            .map_err(|err| ApplicationError::infrastructure_with("redis DEL failed", err))
    }
}
