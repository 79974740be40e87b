//! HTTP handlers.
//!
//! Each handler authorizes the caller through `AuthGuard`, converts the request DTO into
//! service parameters, calls a service and maps the result back into a DTO. Every
//! handler carries a `utoipa::path` annotation that feeds the OpenAPI document; the
//! `*_TAG` constants group them in Swagger UI.

pub mod activity;
pub mod audit_log;
pub mod auth;
pub mod blacklist;
pub mod gallery;
pub mod gdpr;
pub mod health;
pub mod port_battle;
pub mod signup;
pub mod user;
