// src/application/commands/auth/mod.rs
pub mod claims;
mod login;
mod logout;
mod refresh;
mod service;
mod tokens;
mod validate;

pub use login::LoginCommand;
pub use refresh::RefreshTokenCommand;
pub use service::AuthService;
