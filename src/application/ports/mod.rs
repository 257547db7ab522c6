// src/application/ports/mod.rs
pub mod security;
pub mod session_store;
pub mod time;

