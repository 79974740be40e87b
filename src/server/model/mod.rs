//! Server-side domain models and operation parameters.
//!
//! Domain models are produced by the data layer from SeaORM entities and converted into
//! wire DTOs (`crate::model`) by controllers. Parameter types carry validated input from
//! controllers into services.

pub mod activity;
pub mod audit_log;
pub mod blacklist;
pub mod gallery;
pub mod gdpr;
pub mod maintenance;
pub mod port_battle;
pub mod signup;
pub mod user;
