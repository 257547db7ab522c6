// tests/support/mocks.rs
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use persona_auth::application::ApplicationResult;
use persona_auth::application::AuthError;
use persona_auth::application::error::ApplicationError;
use persona_auth::application::ports::security::PasswordHasher;
use persona_auth::application::ports::session_store::SessionStore;
use persona_auth::application::ports::time::Clock;
use persona_auth::domain::errors::{DomainError, DomainResult};
use persona_auth::domain::session::{Session, TokenType};
use persona_auth::domain::user::{NewUser, PasswordHash, User, UserId, UserRepository, Username};

/// User table kept in a map. Soft-deleted rows stay but are invisible to
/// lookups, like the Postgres repository.
pub struct InMemoryUserRepo {
    users: Mutex<HashMap<u64, User>>,
    next_id: AtomicU64,
    fail_lookups: AtomicBool,
}

impl InMemoryUserRepo {
    pub fn new() -> Self {
        Self {
            users: Mutex::new(HashMap::new()),
            next_id: AtomicU64::new(1),
            fail_lookups: AtomicBool::new(false),
        }
    }

    pub fn fail_lookups(&self, fail: bool) {
        self.fail_lookups.store(fail, Ordering::SeqCst);
    }

    pub fn raw(&self, id: UserId) -> Option<User> {
        self.users.lock().unwrap().get(&id.get()).cloned()
    }

    fn check_available(&self) -> DomainResult<()> {
        if self.fail_lookups.load(Ordering::SeqCst) {
            return Err(DomainError::Persistence("connection refused".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepo {
    async fn insert(&self, new_user: NewUser) -> DomainResult<User> {
        let mut users = self.users.lock().unwrap();
        if users
            .values()
            .any(|u| !u.is_deleted() && u.username == new_user.username)
        {
            return Err(DomainError::Conflict("username already exists".into()));
        }
        let id = UserId::new(self.next_id.fetch_add(1, Ordering::SeqCst)).unwrap();
        let user = User {
            id,
            username: new_user.username,
            name: new_user.name,
            email: new_user.email,
            password_hash: new_user.password_hash,
            role: new_user.role,
            created_at: new_user.created_at,
            updated_at: new_user.created_at,
            deleted_at: None,
        };
        users.insert(id.get(), user.clone());
        Ok(user)
    }

    async fn find_by_username(&self, username: &Username) -> DomainResult<Option<User>> {
        self.check_available()?;
        let users = self.users.lock().unwrap();
        Ok(users
            .values()
            .find(|u| !u.is_deleted() && &u.username == username)
            .cloned())
    }

    async fn find_by_id(&self, id: UserId) -> DomainResult<Option<User>> {
        self.check_available()?;
        let users = self.users.lock().unwrap();
        Ok(users.get(&id.get()).filter(|u| !u.is_deleted()).cloned())
    }

    async fn update_password(
        &self,
        id: UserId,
        password_hash: PasswordHash,
        updated_at: DateTime<Utc>,
    ) -> DomainResult<User> {
        let mut users = self.users.lock().unwrap();
        let user = users
            .get_mut(&id.get())
            .filter(|u| !u.is_deleted())
            .ok_or_else(|| DomainError::NotFound("user not found".into()))?;
        user.set_password(password_hash, updated_at);
        Ok(user.clone())
    }

    async fn soft_delete(&self, id: UserId, deleted_at: DateTime<Utc>) -> DomainResult<()> {
        let mut users = self.users.lock().unwrap();
        let user = users
            .get_mut(&id.get())
            .filter(|u| !u.is_deleted())
            .ok_or_else(|| DomainError::NotFound("user not found".into()))?;
        user.mark_deleted(deleted_at);
        Ok(())
    }
}

/// Cheap reversible "hash" so service tests do not pay for argon2.
pub struct PlainPasswordHasher;

pub const PLAIN_PREFIX: &str = "plain$";

#[async_trait]
impl PasswordHasher for PlainPasswordHasher {
    async fn hash(&self, password: &str) -> ApplicationResult<String> {
        Ok(format!("{PLAIN_PREFIX}{password}"))
    }

    async fn verify(&self, password: &str, expected_hash: &str) -> ApplicationResult<()> {
        match expected_hash.strip_prefix(PLAIN_PREFIX) {
            Some(stored) if stored == password => Ok(()),
            Some(_) => Err(AuthError::InvalidCredentials.into()),
            None => Err(ApplicationError::infrastructure("unknown hash format")),
        }
    }
}

/// Session store whose operations can be switched to fail, for exercising
/// the infrastructure error paths.
#[derive(Default)]
pub struct FlakySessionStore {
    inner: persona_auth::infrastructure::security::session_store::InMemorySessionStore,
    fail_save: AtomicBool,
    fail_get: AtomicBool,
    fail_delete: AtomicBool,
}

impl FlakySessionStore {
    pub fn fail_save(&self, fail: bool) {
        self.fail_save.store(fail, Ordering::SeqCst);
    }

    pub fn fail_get(&self, fail: bool) {
        self.fail_get.store(fail, Ordering::SeqCst);
    }

    pub fn fail_delete(&self, fail: bool) {
        self.fail_delete.store(fail, Ordering::SeqCst);
    }

    fn unavailable() -> ApplicationError {
        ApplicationError::infrastructure("cache unavailable")
    }
}

#[async_trait]
impl SessionStore for FlakySessionStore {
    async fn save(&self, session: &Session, ttl: Duration) -> ApplicationResult<()> {
        if self.fail_save.load(Ordering::SeqCst) {
            return Err(Self::unavailable());
        }
        self.inner.save(session, ttl).await
    }

    async fn get(
        &self,
        user_id: UserId,
        token_type: TokenType,
    ) -> ApplicationResult<Option<Session>> {
        if self.fail_get.load(Ordering::SeqCst) {
            return Err(Self::unavailable());
        }
        self.inner.get(user_id, token_type).await
    }

    async fn delete(&self, user_id: UserId, token_type: TokenType) -> ApplicationResult<()> {
        if self.fail_delete.load(Ordering::SeqCst) {
            return Err(Self::unavailable());
        }
        self.inner.delete(user_id, token_type).await
    }
}

pub struct SystemTestClock;

impl Clock for SystemTestClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock shifted from real time by a fixed number of seconds.
pub struct OffsetClock {
    pub offset: chrono::Duration,
}

impl Clock for OffsetClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now() + self.offset
    }
}
