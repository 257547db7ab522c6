// src/application/services/mod.rs
use std::sync::Arc;

use crate::{
    application::{
        commands::{auth::AuthService, users::UserCommandService},
        ports::{
            security::{PasswordHasher, TokenProvider},
            session_store::SessionStore,
            time::Clock,
        },
        queries::users::UserQueryService,
    },
    domain::user::UserRepository,
};

pub struct ApplicationServices {
    pub auth: Arc<AuthService>,
    pub user_commands: Arc<UserCommandService>,
    pub user_queries: Arc<UserQueryService>,
}

impl ApplicationServices {
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        password_hasher: Arc<dyn PasswordHasher>,
        token_provider: Arc<dyn TokenProvider>,
        session_store: Arc<dyn SessionStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let auth = Arc::new(AuthService::new(
            Arc::clone(&user_repo),
            Arc::clone(&password_hasher),
            Arc::clone(&token_provider),
            Arc::clone(&session_store),
            Arc::clone(&clock),
        ));

        let user_commands = Arc::new(UserCommandService::new(
            Arc::clone(&user_repo),
            Arc::clone(&password_hasher),
            Arc::clone(&auth),
            Arc::clone(&clock),
        ));

        let user_queries = Arc::new(UserQueryService::new(
            Arc::clone(&user_repo),
            Arc::clone(&clock),
        ));

        Self {
            auth,
            user_commands,
            user_queries,
        }
    }
}
