// src/application/commands/auth/login.rs
use super::AuthService;
use crate::application::{
    ApplicationResult, AuthError,
    dto::LoginResult,
};
use crate::domain::user::{User, Username};

pub struct LoginCommand {
    pub username: String,
    pub password: String,
}

impl AuthService {
    /// Check credentials and open a new session, superseding any previous one.
    #[tracing::instrument(name = "auth.login", skip_all, fields(username = %command.username))]
    pub async fn login(&self, command: LoginCommand) -> ApplicationResult<LoginResult> {
        let user = self
            .find_and_authenticate_user(&command.username, &command.password)
            .await?;

        let tokens = self.issue_session(&user).await?;

        tracing::info!(user_id = %user.id, "user logged in successfully");
        Ok(LoginResult {
            user: user.into(),
            tokens,
        })
    }

    // Every failure here collapses into one error so callers cannot probe
    // which usernames exist.
    async fn find_and_authenticate_user(
        &self,
        username: &str,
        password: &str,
    ) -> Result<User, AuthError> {
        let Ok(username) = Username::new(username) else {
            tracing::warn!("login rejected: malformed username");
            return Err(AuthError::InvalidCredentials);
        };

        let user = match self.user_repo.find_by_username(&username).await {
            Ok(Some(user)) => user,
            Ok(None) => {
                tracing::warn!("login rejected: user not found or invalid credentials");
                return Err(AuthError::InvalidCredentials);
            }
            Err(err) => {
                tracing::error!(error = %err, "error to get user by username");
                return Err(AuthError::InvalidCredentials);
            }
        };

        if let Err(err) = self
            .password_hasher
            .verify(password, user.password_hash.as_str())
            .await
        {
            tracing::warn!(user_id = %user.id, error = %err, "login rejected: password mismatch");
            return Err(AuthError::InvalidCredentials);
        }

        Ok(user)
    }
}
