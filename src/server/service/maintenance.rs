//! Maintenance mode flag.
//!
//! While enabled, the maintenance gate answers 503 to every API request from non-admin
//! users except health, maintenance and authentication endpoints. The flag lives in
//! memory and starts from the `MAINTENANCE_MODE` setting.

use chrono::Utc;
use sea_orm::DatabaseConnection;
use serde_json::json;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::server::{
    error::AppError,
    model::{
        audit_log::{AuditAction, CreateAuditLogParam},
        maintenance::MaintenanceState,
    },
    service::audit::AuditService,
};

/// Shared maintenance state. Cloning shares the same flag.
#[derive(Clone)]
pub struct MaintenanceService {
    state: Arc<RwLock<MaintenanceState>>,
}

impl MaintenanceService {
    pub fn new(enabled: bool) -> Self {
        Self {
            state: Arc::new(RwLock::new(MaintenanceState {
                enabled,
                message: None,
                updated_at: Utc::now(),
            })),
        }
    }

    pub async fn get(&self) -> MaintenanceState {
        self.state.read().await.clone()
    }

    pub async fn is_enabled(&self) -> bool {
        self.state.read().await.enabled
    }

    /// Replaces the state on behalf of an admin and records the change.
    ///
    /// The audit row is written while the state is still locked and before it changes, so
    /// a failed insert leaves maintenance mode untouched. Blank messages are stored as
    /// `None`.
    ///
    /// # Returns
    /// - `Ok(MaintenanceState)` - The new state
    /// - `Err(AppError::DbErr)` - The audit entry could not be written
    pub async fn update(
        &self,
        db: &DatabaseConnection,
        actor_id: i32,
        enabled: bool,
        message: Option<String>,
    ) -> Result<MaintenanceState, AppError> {
        let mut state = self.state.write().await;
        let next = next_state(enabled, message);

        AuditService::new(db)
            .record(CreateAuditLogParam::new(
                actor_id,
                AuditAction::MaintenanceUpdate,
                "global",
                json!({ "enabled": next.enabled, "message": next.message }),
            ))
            .await?;

        *state = next.clone();

        Ok(next)
    }

    /// Replaces the state without auditing.
    #[cfg(test)]
    pub async fn set(&self, enabled: bool, message: Option<String>) -> MaintenanceState {
        let mut state = self.state.write().await;
        *state = next_state(enabled, message);
        state.clone()
    }
}

fn next_state(enabled: bool, message: Option<String>) -> MaintenanceState {
    MaintenanceState {
        enabled,
        message: message
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty()),
        updated_at: Utc::now(),
    }
}
