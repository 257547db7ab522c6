// src/presentation/http/controllers/auth.rs
use crate::application::{
    commands::auth::{LoginCommand, RefreshTokenCommand},
    dto::{LoginResult, TokenPair, UserProfileDto},
};
use crate::presentation::http::error::{HttpResult, IntoHttpResult};
use crate::presentation::http::extractors::Authenticated;
use crate::presentation::http::state::HttpState;
use axum::{Extension, Json, http::StatusCode};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

pub async fn login(
    Extension(state): Extension<HttpState>,
    Json(payload): Json<LoginRequest>,
) -> HttpResult<Json<LoginResult>> {
    let command = LoginCommand {
        username: payload.username,
        password: payload.password,
    };

    state
        .services
        .auth
        .login(command)
        .await
        .into_http()
        .map(Json)
}

pub async fn logout(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
) -> HttpResult<StatusCode> {
    state
        .services
        .auth
        .logout(user.id)
        .await
        .into_http()?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn refresh(
    Extension(state): Extension<HttpState>,
    Json(payload): Json<RefreshRequest>,
) -> HttpResult<Json<TokenPair>> {
    let command = RefreshTokenCommand {
        refresh_token: payload.refresh_token,
    };

    state
        .services
        .auth
        .refresh_token_renewal(command)
        .await
        .into_http()
        .map(Json)
}

pub async fn profile(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
) -> HttpResult<Json<UserProfileDto>> {
    state
        .services
        .user_queries
        .get_profile(&user)
        .await
        .into_http()
        .map(Json)
}
