//! Audit log domain models and parameters.
//!
//! Every admin mutation leaves an audit entry naming the actor, the action, the target
//! and a JSON object with action specific details.

use chrono::{DateTime, Utc};

use crate::model::admin::{AuditLogDto, PaginatedAuditLogsDto};

/// Admin actions recorded in the audit log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditAction {
    MaintenanceUpdate,
    UserSetAdmin,
    GalleryApprove,
    GalleryReject,
    GalleryDelete,
    CommentDelete,
    PortBattleCreate,
    PortBattleUpdate,
    PortBattleDelete,
    FleetSetupCreate,
    FleetSetupDelete,
    FleetRoleCreate,
    FleetRoleDelete,
    SignupStatusUpdate,
    SignupRemove,
    BlacklistAdd,
    BlacklistRemove,
    GdprProcess,
    GdprReject,
}

impl AuditAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MaintenanceUpdate => "MAINTENANCE_UPDATE",
            Self::UserSetAdmin => "USER_SET_ADMIN",
            Self::GalleryApprove => "GALLERY_APPROVE",
            Self::GalleryReject => "GALLERY_REJECT",
            Self::GalleryDelete => "GALLERY_DELETE",
            Self::CommentDelete => "COMMENT_DELETE",
            Self::PortBattleCreate => "PORT_BATTLE_CREATE",
            Self::PortBattleUpdate => "PORT_BATTLE_UPDATE",
            Self::PortBattleDelete => "PORT_BATTLE_DELETE",
            Self::FleetSetupCreate => "FLEET_SETUP_CREATE",
            Self::FleetSetupDelete => "FLEET_SETUP_DELETE",
            Self::FleetRoleCreate => "FLEET_ROLE_CREATE",
            Self::FleetRoleDelete => "FLEET_ROLE_DELETE",
            Self::SignupStatusUpdate => "SIGNUP_STATUS_UPDATE",
            Self::SignupRemove => "SIGNUP_REMOVE",
            Self::BlacklistAdd => "BLACKLIST_ADD",
            Self::BlacklistRemove => "BLACKLIST_REMOVE",
            Self::GdprProcess => "GDPR_PROCESS",
            Self::GdprReject => "GDPR_REJECT",
        }
    }

    /// Kind of record the action targets.
    pub fn target_type(&self) -> &'static str {
        match self {
            Self::MaintenanceUpdate => "maintenance",
            Self::UserSetAdmin => "user",
            Self::GalleryApprove | Self::GalleryReject | Self::GalleryDelete => "gallery_item",
            Self::CommentDelete => "gallery_comment",
            Self::PortBattleCreate | Self::PortBattleUpdate | Self::PortBattleDelete => {
                "port_battle"
            }
            Self::FleetSetupCreate | Self::FleetSetupDelete => "fleet_setup",
            Self::FleetRoleCreate | Self::FleetRoleDelete => "fleet_role",
            Self::SignupStatusUpdate | Self::SignupRemove => "signup",
            Self::BlacklistAdd | Self::BlacklistRemove => "blacklist_entry",
            Self::GdprProcess | Self::GdprReject => "gdpr_request",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AuditLogEntry {
    pub id: i32,
    /// Admin who performed the action; `None` for system actions.
    pub actor_id: Option<i32>,
    pub action: String,
    pub target_type: String,
    pub target_id: Option<String>,
    pub details: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

impl AuditLogEntry {
    /// Converts an entity model, decoding the stored JSON details.
    ///
    /// Details that fail to decode are returned as a JSON string holding the raw text.
    pub fn from_entity(entity: entity::audit_log::Model) -> Self {
        let details = serde_json::from_str(&entity.details)
            .unwrap_or_else(|_| serde_json::Value::String(entity.details.clone()));

        Self {
            id: entity.id,
            actor_id: entity.actor_id,
            action: entity.action,
            target_type: entity.target_type,
            target_id: entity.target_id,
            details,
            created_at: entity.created_at,
        }
    }

    pub fn into_dto(self) -> AuditLogDto {
        AuditLogDto {
            id: self.id,
            actor_id: self.actor_id,
            action: self.action,
            target_type: self.target_type,
            target_id: self.target_id,
            details: self.details,
            created_at: self.created_at,
        }
    }
}

/// Parameters for writing an audit entry.
#[derive(Debug, Clone)]
pub struct CreateAuditLogParam {
    pub actor_id: Option<i32>,
    pub action: AuditAction,
    pub target_id: Option<String>,
    pub details: serde_json::Value,
}

impl CreateAuditLogParam {
    /// Audit entry for `actor_id` performing `action` on the record `target_id`.
    pub fn new(
        actor_id: i32,
        action: AuditAction,
        target_id: impl ToString,
        details: serde_json::Value,
    ) -> Self {
        Self {
            actor_id: Some(actor_id),
            action,
            target_id: Some(target_id.to_string()),
            details,
        }
    }
}

/// Filters for the audit log listing.
#[derive(Debug, Clone)]
pub struct AuditLogFilter {
    pub action: Option<String>,
    pub actor_id: Option<i32>,
    pub page: u64,
    pub per_page: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PaginatedAuditLogs {
    pub entries: Vec<AuditLogEntry>,
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
    pub total_pages: u64,
}

impl PaginatedAuditLogs {
    pub fn into_dto(self) -> PaginatedAuditLogsDto {
        PaginatedAuditLogsDto {
            entries: self
                .entries
                .into_iter()
                .map(AuditLogEntry::into_dto)
                .collect(),
            total: self.total,
            page: self.page,
            per_page: self.per_page,
            total_pages: self.total_pages,
        }
    }
}
