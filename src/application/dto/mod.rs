// src/application/dto/mod.rs
pub mod auth;
pub mod users;

pub use auth::{AuthenticatedUser, Claims, LoginResult, TokenPair, claim_keys};
pub use users::{UserDto, UserProfileDto};
