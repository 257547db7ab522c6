// src/application/commands/users/service.rs
use std::sync::Arc;

use crate::application::{
    commands::auth::AuthService,
    ports::{security::PasswordHasher, time::Clock},
};
use crate::domain::user::UserRepository;

/// User lifecycle operations. Anything that invalidates a user's credentials
/// goes through `AuthService` so the stored sessions follow.
pub struct UserCommandService {
    pub(super) user_repo: Arc<dyn UserRepository>,
    pub(super) password_hasher: Arc<dyn PasswordHasher>,
    pub(super) auth: Arc<AuthService>,
    pub(super) clock: Arc<dyn Clock>,
}

impl UserCommandService {
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        password_hasher: Arc<dyn PasswordHasher>,
        auth: Arc<AuthService>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            user_repo,
            password_hasher,
            auth,
            clock,
        }
    }
}
