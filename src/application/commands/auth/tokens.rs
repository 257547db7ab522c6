// src/application/commands/auth/tokens.rs
use super::{AuthService, claims::ttl_until};
use crate::application::{
    ApplicationResult,
    dto::{Claims, TokenPair, claim_keys},
    error::ApplicationError,
};
use crate::domain::{
    session::{Session, TokenType},
    user::{User, UserId},
};
use serde_json::{Value, json};

const ERR_CREATE_TOKEN: &str = "error to create token";
const ERR_SAVE_SESSION: &str = "error to save session";

impl AuthService {
    /// Issue a fresh access/refresh pair for `user` and store both, replacing
    /// whatever sessions the user had.
    pub(crate) async fn issue_session(&self, user: &User) -> ApplicationResult<TokenPair> {
        let access_token = self
            .token_provider
            .generate_with_claims(user.id, session_claims(user))
            .await?;
        self.store_token(Session::access(user.id, access_token.clone()))
            .await?;

        let refresh_token = self.token_provider.generate_refresh(user.id).await?;
        self.store_token(Session::refresh(user.id, refresh_token.clone()))
            .await?;

        Ok(TokenPair {
            access_token,
            refresh_token,
        })
    }

    /// Persist `session` for as long as its token's own `exp` allows.
    async fn store_token(&self, session: Session) -> ApplicationResult<()> {
        let claims = self
            .token_provider
            .verify(&session.token)
            .await
            .map_err(|err| ApplicationError::infrastructure_with(ERR_CREATE_TOKEN, err))?;

        let Some(ttl) = ttl_until(&claims, self.clock.unix_now()) else {
            tracing::warn!(
                user_id = %session.user_id,
                token_type = %session.token_type,
                "token expires immediately, session not stored"
            );
            return Ok(());
        };

        self.session_store
            .save(&session, ttl)
            .await
            .map_err(|err| ApplicationError::infrastructure_with(ERR_SAVE_SESSION, err))
    }

    pub(crate) async fn revoke_all(&self, user_id: UserId) -> ApplicationResult<()> {
        for token_type in TokenType::ALL {
            self.session_store
                .delete(user_id, token_type)
                .await
                .map_err(|err| ApplicationError::infrastructure_with("error to delete session", err))?;
        }
        Ok(())
    }
}

fn session_claims(user: &User) -> Claims {
    let mut extra = Claims::new();
    extra.insert(claim_keys::ROLES.into(), json!([user.role.as_str()]));
    extra.insert(claim_keys::NAME.into(), Value::String(user.name.clone()));
    extra
}
