//! Maintenance mode state.

use chrono::{DateTime, Utc};

use crate::model::health::MaintenanceDto;

/// Whether the platform is in maintenance mode and what users are told about it.
#[derive(Debug, Clone, PartialEq)]
pub struct MaintenanceState {
    pub enabled: bool,
    /// Message shown to users while maintenance is enabled.
    pub message: Option<String>,
    /// When the state last changed.
    pub updated_at: DateTime<Utc>,
}

impl MaintenanceState {
    pub fn into_dto(self) -> MaintenanceDto {
        MaintenanceDto {
            enabled: self.enabled,
            message: self.message,
            updated_at: self.updated_at,
        }
    }
}
