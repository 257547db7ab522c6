// src/infrastructure/repositories/postgres_user.rs
use super::map_sqlx;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::user::{
    Email, NewUser, PasswordHash, Role, User, UserId, UserRepository, Username,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

const USER_COLUMNS: &str =
    "id, username, name, email, password_hash, role, created_at, updated_at, deleted_at";

#[derive(Clone)]
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct UserRow {
    id: i64,
    username: String,
    name: String,
    email: String,
    password_hash: String,
    role: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    deleted_at: Option<DateTime<Utc>>,
}

impl TryFrom<UserRow> for User {
    type Error = DomainError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        Ok(User {
            id: UserId::try_from(row.id)?,
            username: Username::new(row.username)?,
            name: row.name,
            email: Email::new(row.email)?,
            password_hash: PasswordHash::new(row.password_hash)?,
            role: row.role.parse::<Role>()?,
            created_at: row.created_at,
            updated_at: row.updated_at,
            deleted_at: row.deleted_at,
        })
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn insert(&self, new_user: NewUser) -> DomainResult<User> {
        let NewUser {
            username,
            name,
            email,
            password_hash,
            role,
            created_at,
        } = new_user;

        let sql = format!(
            "INSERT INTO users (username, name, email, password_hash, role, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $6)
             RETURNING {USER_COLUMNS}"
        );
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(username.as_str())
            .bind(name)
            .bind(email.as_str())
            .bind(password_hash.as_str())
            .bind(role.as_str())
            .bind(created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx)?;

        User::try_from(row)
    }

    async fn find_by_username(&self, username: &Username) -> DomainResult<Option<User>> {
        let sql = format!(
            "SELECT {USER_COLUMNS} FROM users WHERE username = $1 AND deleted_at IS NULL"
        );
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(username.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx)?;

        row.map(User::try_from).transpose()
    }

    async fn find_by_id(&self, id: UserId) -> DomainResult<Option<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1 AND deleted_at IS NULL");
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(i64::try_from(id)?)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx)?;

        row.map(User::try_from).transpose()
    }

    async fn update_password(
        &self,
        id: UserId,
        password_hash: PasswordHash,
        updated_at: DateTime<Utc>,
    ) -> DomainResult<User> {
        let sql = format!(
            "UPDATE users SET password_hash = $2, updated_at = $3
             WHERE id = $1 AND deleted_at IS NULL
             RETURNING {USER_COLUMNS}"
        );
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(i64::try_from(id)?)
            .bind(password_hash.as_str())
            .bind(updated_at)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx)?
            .ok_or_else(|| DomainError::NotFound("user not found".into()))?;

        User::try_from(row)
    }

    async fn soft_delete(&self, id: UserId, deleted_at: DateTime<Utc>) -> DomainResult<()> {
        let result = sqlx::query(
            "UPDATE users SET deleted_at = $2, updated_at = $2
             WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(i64::try_from(id)?)
        .bind(deleted_at)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound("user not found".into()));
        }
        Ok(())
    }
}
