// src/presentation/http/extractors.rs
use crate::{
    application::{dto::AuthenticatedUser, error::ApplicationError},
    presentation::http::state::HttpState,
};
use axum::{Extension, extract::FromRequestParts, http::request::Parts};
use headers::{Authorization, Cookie, HeaderMapExt, authorization::Bearer};

use super::error::HttpError;

/// Cookie consulted when no `Authorization: Bearer` header is present.
pub const AUTH_COOKIE: &str = "auth_token";

/// Caller identity established by `AuthService::validate`.
#[derive(Debug, Clone)]
pub struct Authenticated(pub AuthenticatedUser);

impl<S> FromRequestParts<S> for Authenticated
where
    S: Send + Sync,
{
    type Rejection = HttpError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Extension(app_state) = Extension::<HttpState>::from_request_parts(parts, state)
            .await
            .map_err(|_| {
                HttpError::from_error(ApplicationError::infrastructure(
                    "application state missing",
                ))
            })?;

        let token = bearer_token(parts).ok_or_else(HttpError::unauthorized)?;

        let user = app_state
            .services
            .auth
            .validate(&token)
            .await
            .map_err(HttpError::from_error)?;

        Ok(Self(user))
    }
}

fn bearer_token(parts: &Parts) -> Option<String> {
    if let Some(Authorization(bearer)) = parts.headers.typed_get::<Authorization<Bearer>>() {
        return Some(bearer.token().to_owned());
    }

    parts
        .headers
        .typed_get::<Cookie>()
        .and_then(|cookie| cookie.get(AUTH_COOKIE).map(str::to_owned))
        .filter(|token| !token.is_empty())
}
