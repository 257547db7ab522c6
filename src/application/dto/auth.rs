// src/application/dto/auth.rs
use crate::domain::user::UserId;
use serde::{Deserialize, Serialize};

use super::users::UserDto;

/// Decoded token payload.
pub type Claims = serde_json::Map<String, serde_json::Value>;

/// Canonical claim keys written by the token provider.
pub mod claim_keys {
    pub const USER_ID: &str = "user_id";
    pub const SUBJECT: &str = "sub";
    pub const EXPIRES_AT: &str = "exp";
    pub const ISSUED_AT: &str = "iat";
    pub const TOKEN_ID: &str = "jti";
    pub const TOKEN_TYPE: &str = "token_type";
    pub const ROLES: &str = "roles";
    pub const NAME: &str = "name";
}

/// Identity of the caller, produced by a successful token validation and
/// passed explicitly to whatever needs it.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthenticatedUser {
    pub id: UserId,
    pub claims: Claims,
}

impl AuthenticatedUser {
    pub fn roles(&self) -> Vec<String> {
        self.claims
            .get(claim_keys::ROLES)
            .and_then(|value| value.as_array())
            .map(|roles| {
                roles
                    .iter()
                    .filter_map(|role| role.as_str().map(str::to_owned))
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResult {
    pub user: UserDto,
    #[serde(flatten)]
    pub tokens: TokenPair,
}
