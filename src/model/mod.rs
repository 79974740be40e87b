//! Wire-level data transfer objects shared by every endpoint.
//!
//! DTOs are the JSON shapes accepted and returned by the HTTP API. They carry
//! `utoipa::ToSchema` so the OpenAPI document is generated from the same types the
//! handlers use. Server-side domain models live in `crate::server::model` and convert
//! into these at the controller boundary.

pub mod admin;
pub mod api;
pub mod gallery;
pub mod health;
pub mod port_battle;
pub mod signup;
pub mod user;
