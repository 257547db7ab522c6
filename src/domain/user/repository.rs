// src/domain/user/repository.rs
use crate::domain::errors::DomainResult;
use crate::domain::user::{
    entity::{NewUser, User},
    value_objects::{PasswordHash, UserId, Username},
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// User persistence. Lookups never return soft-deleted users; "not found" is
/// `Ok(None)`, not an error.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn insert(&self, new_user: NewUser) -> DomainResult<User>;

    async fn find_by_username(&self, username: &Username) -> DomainResult<Option<User>>;

    async fn find_by_id(&self, id: UserId) -> DomainResult<Option<User>>;

    async fn update_password(
        &self,
        id: UserId,
        password_hash: PasswordHash,
        updated_at: DateTime<Utc>,
    ) -> DomainResult<User>;

    async fn soft_delete(&self, id: UserId, deleted_at: DateTime<Utc>) -> DomainResult<()>;
}
