// src/application/dto/users.rs
use crate::domain::user::{Role, User};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Public view of a user. Never carries the password hash.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserDto {
    pub id: u64,
    pub username: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id.get(),
            username: user.username.to_string(),
            name: user.name,
            email: user.email.to_string(),
            role: user.role,
            created_at: user.created_at,
        }
    }
}

/// The caller's own account plus what their current token says about them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfileDto {
    pub user: UserDto,
    pub roles: Vec<String>,
    pub expires_at: Option<DateTime<Utc>>,
    pub expires_in: Option<i64>,
}
