use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use tower_sessions::Session;

use crate::{
    model::{
        admin::PaginatedAuditLogsDto,
        api::{default_entries, ErrorDto},
    },
    server::{
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        model::audit_log::AuditLogFilter,
        service::audit::AuditService,
        state::AppState,
    },
};

pub static AUDIT_LOG_TAG: &str = "audit_log";

#[derive(Deserialize)]
pub struct AuditLogQuery {
    #[serde(default)]
    pub page: u64,
    #[serde(default = "default_entries")]
    pub entries: u64,
    pub action: Option<String>,
    pub actor_id: Option<i32>,
}

/// GET /api/admin/audit-logs - List audit entries, newest first
#[utoipa::path(
    get,
    path = "/api/admin/audit-logs",
    tag = AUDIT_LOG_TAG,
    params(
        ("page" = Option<u64>, Query, description = "Page number (default: 0)"),
        ("entries" = Option<u64>, Query, description = "Items per page (default: 10)"),
        ("action" = Option<String>, Query, description = "Only entries with this action, e.g. BLACKLIST_ADD"),
        ("actor_id" = Option<i32>, Query, description = "Only entries by this admin")
    ),
    responses(
        (status = 200, description = "Successfully retrieved audit entries", body = PaginatedAuditLogsDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User is not an admin", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_audit_logs(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<AuditLogQuery>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let logs = AuditService::new(&state.db)
        .get_paginated(AuditLogFilter {
            action: query
                .action
                .map(|a| a.trim().to_uppercase())
                .filter(|a| !a.is_empty()),
            actor_id: query.actor_id,
            page: query.page,
            per_page: query.entries,
        })
        .await?;

    Ok((StatusCode::OK, Json(logs.into_dto())))
}
