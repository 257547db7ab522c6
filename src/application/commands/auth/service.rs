// src/application/commands/auth/service.rs
use crate::application::ports::{
    security::{PasswordHasher, TokenProvider},
    session_store::SessionStore,
    time::Clock,
};
use crate::domain::user::UserRepository;
use std::sync::Arc;

/// Login, logout, token validation and refresh rotation.
///
/// Holds no state of its own: every session lives in the `SessionStore`, and
/// a token is valid only while it is byte-equal to the value stored for its
/// user. Overwriting or deleting that value is how tokens are revoked.
pub struct AuthService {
    pub(super) user_repo: Arc<dyn UserRepository>,
    pub(super) password_hasher: Arc<dyn PasswordHasher>,
    pub(super) token_provider: Arc<dyn TokenProvider>,
    pub(super) session_store: Arc<dyn SessionStore>,
    pub(super) clock: Arc<dyn Clock>,
}

impl AuthService {
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        password_hasher: Arc<dyn PasswordHasher>,
        token_provider: Arc<dyn TokenProvider>,
        session_store: Arc<dyn SessionStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            user_repo,
            password_hasher,
            token_provider,
            session_store,
            clock,
        }
    }
}
