// src/application/queries/users/profile.rs
use super::UserQueryService;
use crate::application::{
    commands::auth::claims,
    dto::{AuthenticatedUser, UserProfileDto},
    error::{ApplicationError, ApplicationResult},
};
use chrono::{DateTime, Utc};

impl UserQueryService {
    pub async fn get_profile(
        &self,
        actor: &AuthenticatedUser,
    ) -> ApplicationResult<UserProfileDto> {
        let user = self
            .user_repo
            .find_by_id(actor.id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("user not found"))?;

        let expires_at = claims::expires_at(&actor.claims)
            .and_then(|exp| DateTime::<Utc>::from_timestamp(exp, 0));
        let expires_in = expires_at
            .map(|at| at.signed_duration_since(self.clock.now()).num_seconds().max(0));

        Ok(UserProfileDto {
            user: user.into(),
            roles: actor.roles(),
            expires_at,
            expires_in,
        })
    }
}
