//! Request-level guards and session helpers.
//!
//! - `auth` resolves the session user and checks permissions for controllers
//! - `maintenance` blocks API traffic while maintenance mode is on
//! - `session` wraps the raw tower-sessions `Session` with typed accessors

pub mod auth;
pub mod maintenance;
pub mod session;

#[cfg(test)]
mod test;
