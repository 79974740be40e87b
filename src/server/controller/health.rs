use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use chrono::Utc;
use tower_sessions::Session;

use crate::{
    model::{
        api::ErrorDto,
        health::{HealthDto, MaintenanceDto, ProbeDto, UpdateMaintenanceDto},
    },
    server::{
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        state::AppState,
    },
};

pub static HEALTH_TAG: &str = "health";

/// GET /health - Service status summary
#[utoipa::path(
    get,
    path = "/health",
    tag = HEALTH_TAG,
    responses(
        (status = 200, description = "Service is running", body = HealthDto)
    ),
)]
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let uptime = Utc::now() - state.started_at;

    Json(HealthDto {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: uptime.num_seconds(),
        maintenance: state.maintenance.is_enabled().await,
    })
}

/// GET /ready - Readiness probe
///
/// Ready once the database answers a ping.
#[utoipa::path(
    get,
    path = "/ready",
    tag = HEALTH_TAG,
    responses(
        (status = 200, description = "Database reachable", body = ProbeDto),
        (status = 503, description = "Database unreachable", body = ErrorDto)
    ),
)]
pub async fn ready(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    state.db.ping().await.map_err(|e| {
        tracing::warn!("Readiness check failed: {}", e);
        AppError::ServiceUnavailable("Database is not reachable".to_string())
    })?;

    Ok(Json(ProbeDto {
        status: "ready".to_string(),
    }))
}

/// GET /live - Liveness probe
#[utoipa::path(
    get,
    path = "/live",
    tag = HEALTH_TAG,
    responses(
        (status = 200, description = "Process is alive", body = ProbeDto)
    ),
)]
pub async fn live() -> impl IntoResponse {
    Json(ProbeDto {
        status: "alive".to_string(),
    })
}

/// GET /api/v1/maintenance - Current maintenance state
#[utoipa::path(
    get,
    path = "/api/v1/maintenance",
    tag = HEALTH_TAG,
    responses(
        (status = 200, description = "Current maintenance state", body = MaintenanceDto)
    ),
)]
pub async fn get_maintenance(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.maintenance.get().await.into_dto())
}

/// PUT /api/v1/maintenance - Switch maintenance mode
///
/// # Authentication
/// Requires admin permission
#[utoipa::path(
    put,
    path = "/api/v1/maintenance",
    tag = HEALTH_TAG,
    request_body = UpdateMaintenanceDto,
    responses(
        (status = 200, description = "Maintenance state updated", body = MaintenanceDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User is not an admin", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_maintenance(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<UpdateMaintenanceDto>,
) -> Result<impl IntoResponse, AppError> {
    let admin = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let maintenance = state
        .maintenance
        .update(&state.db, admin.id, payload.enabled, payload.message)
        .await?;

    Ok((StatusCode::OK, Json(maintenance.into_dto())))
}
