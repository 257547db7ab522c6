// src/application/commands/users/mod.rs
mod change_password;
mod password;
mod register;
mod service;
mod soft_delete;

pub use change_password::ChangePasswordCommand;
pub use register::RegisterUserCommand;
pub use service::UserCommandService;
