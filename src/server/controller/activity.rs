use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::DateTime;
use serde::Deserialize;
use tower_sessions::Session;

use crate::{
    model::{admin::ActivityEntryDto, api::ErrorDto},
    server::{
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        model::activity::ActivityQuery,
        state::AppState,
    },
};

pub static ACTIVITY_TAG: &str = "activity";

const DEFAULT_LIMIT: usize = 100;

#[derive(Deserialize)]
pub struct ActivityParams {
    pub user_id: Option<i32>,
    pub action: Option<String>,
    /// Unix timestamp in seconds.
    pub since: Option<i64>,
    pub limit: Option<usize>,
}

/// GET /api/admin/activity - Recent user activity, newest first
#[utoipa::path(
    get,
    path = "/api/admin/activity",
    tag = ACTIVITY_TAG,
    params(
        ("user_id" = Option<i32>, Query, description = "Only activity by this user"),
        ("action" = Option<String>, Query, description = "Only this action, e.g. LOGIN"),
        ("since" = Option<i64>, Query, description = "Only activity at or after this Unix timestamp"),
        ("limit" = Option<usize>, Query, description = "Maximum entries returned (default: 100)")
    ),
    responses(
        (status = 200, description = "Successfully retrieved activity", body = Vec<ActivityEntryDto>),
        (status = 400, description = "Invalid timestamp", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User is not an admin", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_activity(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<ActivityParams>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let since = params
        .since
        .map(|ts| {
            DateTime::from_timestamp(ts, 0)
                .ok_or_else(|| AppError::BadRequest(format!("Invalid timestamp {}", ts)))
        })
        .transpose()?;

    let entries = state
        .activity_logger
        .query(&ActivityQuery {
            user_id: params.user_id,
            action: params
                .action
                .map(|a| a.trim().to_uppercase())
                .filter(|a| !a.is_empty()),
            since,
            limit: Some(params.limit.unwrap_or(DEFAULT_LIMIT)),
        })
        .await;

    let entries_dto: Vec<_> = entries.into_iter().map(|e| e.into_dto()).collect();

    Ok((StatusCode::OK, Json(entries_dto)))
}
