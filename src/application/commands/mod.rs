// src/application/commands/mod.rs
pub mod auth;
pub mod users;
