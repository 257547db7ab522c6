// src/domain/session.rs
use crate::domain::user::UserId;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    Access,
    Refresh,
}

impl TokenType {
    pub const ALL: [TokenType; 2] = [TokenType::Access, TokenType::Refresh];

    pub fn as_str(&self) -> &'static str {
        match self {
            TokenType::Access => "access",
            TokenType::Refresh => "refresh",
        }
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The currently valid token of one type for one user. There is a single
/// slot per `(user_id, token_type)`; writing a new session replaces the old
/// one wholesale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user_id: UserId,
    pub token: String,
    pub token_type: TokenType,
}

impl Session {
    pub fn access(user_id: UserId, token: impl Into<String>) -> Self {
        Self {
            user_id,
            token: token.into(),
            token_type: TokenType::Access,
        }
    }

    pub fn refresh(user_id: UserId, token: impl Into<String>) -> Self {
        Self {
            user_id,
            token: token.into(),
            token_type: TokenType::Refresh,
        }
    }

    /// True when the stored token is non-empty and byte-equal to `presented`.
    pub fn matches(&self, presented: &str) -> bool {
        !self.token.is_empty() && self.token == presented
    }
}
