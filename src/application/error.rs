// src/application/error.rs
use crate::domain::errors::DomainError;
use thiserror::Error;

pub type ApplicationResult<T> = Result<T, ApplicationError>;

/// Authentication failures. Each kind is final for the call that produced it;
/// none of them is worth retrying.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum AuthError {
    /// Unknown username or wrong password. The two are never told apart.
    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("invalid token")]
    InvalidToken,

    #[error("invalid user id claim")]
    InvalidSubjectClaim,

    /// The token verified but is not the one currently stored for the user
    /// (revoked, superseded or logged out).
    #[error("token mismatch")]
    TokenMismatch,

    #[error("invalid refresh token")]
    InvalidRefreshToken,
}

#[derive(Debug, Error)]
pub enum ApplicationError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("resource not found: {0}")]
    NotFound(String),

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("infrastructure failure: {0}")]
    Infrastructure(String),
}

impl ApplicationError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn infrastructure(msg: impl Into<String>) -> Self {
        Self::Infrastructure(msg.into())
    }

    /// Wrap an underlying failure behind a stable prefix, keeping the cause
    /// text for logs.
    pub fn infrastructure_with(prefix: &str, cause: impl std::fmt::Display) -> Self {
        Self::Infrastructure(format!("{prefix}: {cause}"))
    }

    pub fn auth_kind(&self) -> Option<AuthError> {
        match self {
            Self::Auth(kind) => Some(*kind),
            _ => None,
        }
    }

    pub fn is_auth(&self) -> bool {
        self.auth_kind().is_some()
    }

    /// Store, lookup or library failure, as opposed to a rejected credential.
    pub fn is_infrastructure(&self) -> bool {
        matches!(
            self,
            Self::Infrastructure(_) | Self::Domain(DomainError::Persistence(_))
        )
    }
}
