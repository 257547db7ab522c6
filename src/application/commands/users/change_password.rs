// src/application/commands/users/change_password.rs
use super::{UserCommandService, password::validate_password};
use crate::{
    application::{
        AuthError,
        dto::{AuthenticatedUser, TokenPair},
        error::{ApplicationError, ApplicationResult},
    },
    domain::user::PasswordHash,
};

pub struct ChangePasswordCommand {
    pub current_password: String,
    pub new_password: String,
}

impl UserCommandService {
    /// Replace the actor's password and hand back a fresh session. Storing the
    /// new pair overwrites both slots, so every earlier token stops working.
    #[tracing::instrument(name = "users.change_password", skip_all, fields(user_id = %actor.id))]
    pub async fn change_password(
        &self,
        actor: &AuthenticatedUser,
        command: ChangePasswordCommand,
    ) -> ApplicationResult<TokenPair> {
        let user = self
            .user_repo
            .find_by_id(actor.id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("user not found"))?;

        self.password_hasher
            .verify(&command.current_password, user.password_hash.as_str())
            .await
            .map_err(|err| {
                if err.is_infrastructure() {
                    return err;
                }
                tracing::warn!(error = %err, "current password mismatch");
                AuthError::InvalidCredentials.into()
            })?;

        validate_password(&command.new_password)?;
        let hashed = self.password_hasher.hash(&command.new_password).await?;
        let password_hash = PasswordHash::new(hashed)?;

        let updated = self
            .user_repo
            .update_password(user.id, password_hash, self.clock.now())
            .await?;

        let tokens = self.auth.issue_session(&updated).await?;

        tracing::info!("password updated successfully");
        Ok(tokens)
    }
}
