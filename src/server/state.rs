//! Application state shared across all request handlers.
//!
//! The state is built once during startup and cloned into every handler through axum's
//! state extraction. Every field is cheap to clone: the database connection is a pool
//! and the in-memory services share their data through `Arc`.

use chrono::{DateTime, Utc};
use sea_orm::DatabaseConnection;

use crate::server::service::{
    activity::ActivityLogger, admin_code::AdminCodeService, maintenance::MaintenanceService,
};

#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub db: DatabaseConnection,

    /// One-time codes that promote the first administrator.
    pub admin_code_service: AdminCodeService,

    /// Bounded in-memory log of recent user actions.
    pub activity_logger: ActivityLogger,

    /// Maintenance flag checked by the maintenance gate.
    pub maintenance: MaintenanceService,

    /// When the process started, reported by the health endpoint.
    pub started_at: DateTime<Utc>,

    /// How long after its start a port battle is treated as over.
    pub port_battle_duration: chrono::Duration,

    /// Activity entries older than this are pruned.
    pub activity_retention: chrono::Duration,
}

impl AppState {
    pub fn new(
        db: DatabaseConnection,
        admin_code_service: AdminCodeService,
        activity_logger: ActivityLogger,
        maintenance: MaintenanceService,
        port_battle_duration: chrono::Duration,
        activity_retention: chrono::Duration,
    ) -> Self {
        Self {
            db,
            admin_code_service,
            activity_logger,
            maintenance,
            started_at: Utc::now(),
            port_battle_duration,
            activity_retention,
        }
    }
}
