//! Service layer for business logic and orchestration.
//!
//! This module contains the service layer of the application, which sits between the
//! controller (API) layer and the data (repository) layer. Services are responsible for:
//!
//! - **Business Logic**: Implementing core business rules and validation
//! - **Orchestration**: Coordinating multiple repository calls inside transactions
//! - **Domain Models**: Working with domain models rather than DTOs or entity models
//! - **Auditing**: Recording admin mutations alongside the change they describe
//!
//! `activity`, `admin_code` and `maintenance` hold in-memory state and are shared through
//! the application state; the others borrow the database connection per request.

pub mod activity;
pub mod admin_code;
pub mod audit;
pub mod auth;
pub mod blacklist;
pub mod gallery;
pub mod gdpr;
pub mod maintenance;
pub mod port_battle;
pub mod signup;
pub mod user;

#[cfg(test)]
mod test;
