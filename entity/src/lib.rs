//! SeaORM entities for the UWS clan platform.
//!
//! One module per table. Status columns are stored as short upper-case strings
//! and exposed as active enums so invalid values never leave the database layer.

pub mod prelude;

pub mod audit_log;
pub mod blacklist_entry;
pub mod fleet_role;
pub mod fleet_setup;
pub mod gallery_comment;
pub mod gallery_favorite;
pub mod gallery_item;
pub mod gallery_vote;
pub mod gdpr_request;
pub mod port_battle;
pub mod signup;
pub mod user;
