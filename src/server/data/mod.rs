//! Database repository layer for all domain entities.
//!
//! This module contains repository structs that handle database operations (CRUD) for each
//! domain in the application. Repositories use SeaORM entity models internally and return
//! domain models to keep the data layer separate from business logic. Every repository is
//! generic over `ConnectionTrait`, so services can run several of them inside one
//! transaction.

pub mod audit_log;
pub mod blacklist;
pub mod fleet;
pub mod gallery;
pub mod gdpr;
pub mod port_battle;
pub mod signup;
pub mod user;

#[cfg(test)]
mod test;
