// src/application/commands/auth/validate.rs
use super::{
    AuthService,
    claims::{extract_user_id, sanitize_bearer},
};
use crate::application::{
    ApplicationResult, AuthError,
    dto::AuthenticatedUser,
    error::ApplicationError,
};
use crate::domain::session::TokenType;

impl AuthService {
    /// Resolve a bearer token to the caller's identity.
    ///
    /// The token must verify *and* be the exact value currently stored for
    /// its user; anything else is rejected even if the signature is fine.
    #[tracing::instrument(name = "auth.validate", skip_all, fields(user_id))]
    pub async fn validate(&self, raw_token: &str) -> ApplicationResult<AuthenticatedUser> {
        let token = sanitize_bearer(raw_token);

        let claims = self.token_provider.verify(token).await.map_err(|err| {
            tracing::warn!(error = %err, "invalid token");
            AuthError::InvalidToken
        })?;

        let user_id = extract_user_id(&claims).inspect_err(|_| {
            tracing::warn!("invalid user id claim");
        })?;
        tracing::Span::current().record("user_id", tracing::field::display(user_id));

        let stored = self
            .session_store
            .get(user_id, TokenType::Access)
            .await
            .map_err(|err| {
                tracing::error!(error = %err, "error to retrieve session");
                ApplicationError::infrastructure_with("error to retrieve session", err)
            })?;

        if !stored.is_some_and(|session| session.matches(token)) {
            tracing::warn!("token mismatch");
            return Err(AuthError::TokenMismatch.into());
        }

        tracing::debug!("token validated");
        Ok(AuthenticatedUser { id: user_id, claims })
    }
}
