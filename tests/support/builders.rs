// tests/support/builders.rs
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use persona_auth::application::ports::security::{PasswordHasher, TokenProvider};
use persona_auth::application::ports::session_store::SessionStore;
use persona_auth::application::ports::time::Clock;
use persona_auth::application::services::ApplicationServices;
use persona_auth::domain::user::{Email, NewUser, PasswordHash, User, UserRepository, Username};
use persona_auth::infrastructure::security::token::JwtTokenProvider;

use super::mocks::{FlakySessionStore, InMemoryUserRepo, PlainPasswordHasher, SystemTestClock};

pub const TEST_SECRET: &str = "test-secret-test-secret-test-secret!";
pub const ACCESS_TTL: Duration = Duration::from_secs(3600);
pub const REFRESH_TTL: Duration = Duration::from_secs(7200);

/// Services wired against in-memory doubles, with handles kept on the doubles
/// so tests can inspect or break them.
pub struct TestHarness {
    pub services: Arc<ApplicationServices>,
    pub users: Arc<InMemoryUserRepo>,
    pub sessions: Arc<FlakySessionStore>,
    pub tokens: Arc<JwtTokenProvider>,
}

pub fn token_provider() -> JwtTokenProvider {
    JwtTokenProvider::new(TEST_SECRET.as_bytes(), ACCESS_TTL, REFRESH_TTL)
}

pub fn build_harness() -> TestHarness {
    build_harness_with_clock(Arc::new(SystemTestClock))
}

pub fn build_harness_with_clock(clock: Arc<dyn Clock>) -> TestHarness {
    let users = Arc::new(InMemoryUserRepo::new());
    let sessions = Arc::new(FlakySessionStore::default());
    let tokens = Arc::new(token_provider());

    let user_repo: Arc<dyn UserRepository> = users.clone();
    let session_store: Arc<dyn SessionStore> = sessions.clone();
    let token_provider: Arc<dyn TokenProvider> = tokens.clone();
    let password_hasher: Arc<dyn PasswordHasher> = Arc::new(PlainPasswordHasher);

    let services = Arc::new(ApplicationServices::new(
        user_repo,
        password_hasher,
        token_provider,
        session_store,
        clock,
    ));

    TestHarness {
        services,
        users,
        sessions,
        tokens,
    }
}

/// Insert an active user whose password is `password`.
pub async fn seed_user(harness: &TestHarness, username: &str, password: &str) -> User {
    let new_user = NewUser::new(
        Username::new(username).unwrap(),
        format!("{username} display"),
        Email::new(format!("{username}@example.com")).unwrap(),
        PasswordHash::new(format!("{}{password}", super::mocks::PLAIN_PREFIX)).unwrap(),
        Utc::now(),
    );
    harness.users.insert(new_user).await.unwrap()
}
