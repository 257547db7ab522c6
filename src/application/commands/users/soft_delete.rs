// src/application/commands/users/soft_delete.rs
use super::UserCommandService;
use crate::application::{dto::AuthenticatedUser, error::ApplicationResult};

impl UserCommandService {
    /// Revoke the actor's sessions, then hide the account from lookups.
    #[tracing::instrument(name = "users.soft_delete", skip_all, fields(user_id = %actor.id))]
    pub async fn soft_delete(&self, actor: &AuthenticatedUser) -> ApplicationResult<()> {
        self.auth.revoke_all(actor.id).await?;
        self.user_repo.soft_delete(actor.id, self.clock.now()).await?;

        tracing::info!("user soft deleted successfully");
        Ok(())
    }
}
