// src/presentation/http/controllers/users.rs
use crate::application::{
    commands::users::{ChangePasswordCommand, RegisterUserCommand},
    dto::{TokenPair, UserDto},
};
use crate::presentation::http::error::{HttpResult, IntoHttpResult};
use crate::presentation::http::extractors::Authenticated;
use crate::presentation::http::state::HttpState;
use axum::{Extension, Json, http::StatusCode};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

pub async fn register(
    Extension(state): Extension<HttpState>,
    Json(payload): Json<RegisterRequest>,
) -> HttpResult<(StatusCode, Json<UserDto>)> {
    let command = RegisterUserCommand {
        username: payload.username,
        name: payload.name,
        email: payload.email,
        password: payload.password,
    };

    let user = state
        .services
        .user_commands
        .register(command)
        .await
        .into_http()?;
    Ok((StatusCode::CREATED, Json(user)))
}

pub async fn change_password(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Json(payload): Json<ChangePasswordRequest>,
) -> HttpResult<Json<TokenPair>> {
    let command = ChangePasswordCommand {
        current_password: payload.current_password,
        new_password: payload.new_password,
    };

    state
        .services
        .user_commands
        .change_password(&user, command)
        .await
        .into_http()
        .map(Json)
}

pub async fn delete_me(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
) -> HttpResult<StatusCode> {
    state
        .services
        .user_commands
        .soft_delete(&user)
        .await
        .into_http()?;
    Ok(StatusCode::NO_CONTENT)
}
