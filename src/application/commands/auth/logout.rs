// src/application/commands/auth/logout.rs
use super::AuthService;
use crate::application::ApplicationResult;
use crate::domain::user::UserId;

impl AuthService {
    /// Drop the user's access and refresh sessions. Tokens already handed out
    /// stay cryptographically valid but no longer match the store.
    #[tracing::instrument(name = "auth.logout", skip_all, fields(user_id = %user_id))]
    pub async fn logout(&self, user_id: UserId) -> ApplicationResult<()> {
        if let Err(err) = self.revoke_all(user_id).await {
            tracing::error!(error = %err, "logout failed");
            return Err(err);
        }

        tracing::info!("user logged out successfully");
        Ok(())
    }
}
