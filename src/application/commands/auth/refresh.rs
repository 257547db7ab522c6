// src/application/commands/auth/refresh.rs
use super::{
    AuthService,
    claims::{extract_user_id, sanitize_bearer},
};
use crate::application::{
    ApplicationResult, AuthError,
    dto::TokenPair,
    error::ApplicationError,
};
use crate::domain::{
    session::TokenType,
    user::{User, UserId},
};

pub struct RefreshTokenCommand {
    pub refresh_token: String,
}

impl AuthService {
    /// Trade the current refresh token for a new access/refresh pair.
    ///
    /// Only the refresh token currently stored for the user is accepted, so a
    /// token that was already rotated away (or logged out) cannot be replayed.
    #[tracing::instrument(name = "auth.refresh", skip_all, fields(user_id))]
    pub async fn refresh_token_renewal(
        &self,
        command: RefreshTokenCommand,
    ) -> ApplicationResult<TokenPair> {
        let user_id = match self.check_refresh_token(&command.refresh_token).await {
            Ok(user_id) => user_id,
            Err(err) => {
                tracing::warn!(error = %err, "invalid refresh token");
                return Err(AuthError::InvalidRefreshToken.into());
            }
        };
        tracing::Span::current().record("user_id", tracing::field::display(user_id));

        let user = self.load_refresh_subject(user_id).await?;
        let tokens = self.issue_session(&user).await.inspect_err(|err| {
            tracing::error!(error = %err, "error to create token");
        })?;

        tracing::info!("refresh token renewed successfully");
        Ok(tokens)
    }

    async fn check_refresh_token(&self, raw: &str) -> ApplicationResult<UserId> {
        let token = sanitize_bearer(raw);
        let claims = self.token_provider.verify(token).await?;
        let user_id = extract_user_id(&claims)?;

        let stored = self.session_store.get(user_id, TokenType::Refresh).await?;
        if !stored.is_some_and(|session| session.matches(token)) {
            return Err(AuthError::TokenMismatch.into());
        }

        Ok(user_id)
    }

    // The new access token carries the same claims as a login, so the user
    // record is re-read; a user deleted in the meantime cannot refresh.
    async fn load_refresh_subject(&self, user_id: UserId) -> ApplicationResult<User> {
        self.user_repo
            .find_by_id(user_id)
            .await
            .map_err(|err| ApplicationError::infrastructure_with("error to get user by id", err))?
            .ok_or_else(|| AuthError::InvalidRefreshToken.into())
    }
}
