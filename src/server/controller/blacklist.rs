use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tower_sessions::Session;

use crate::{
    model::{
        admin::{BlacklistEntryDto, CreateBlacklistEntryDto},
        api::ErrorDto,
    },
    server::{
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        model::blacklist::CreateBlacklistEntryParam,
        service::blacklist::BlacklistService,
        state::AppState,
    },
};

pub static BLACKLIST_TAG: &str = "blacklist";

/// GET /api/admin/blacklist - List active and expired blacklist entries
#[utoipa::path(
    get,
    path = "/api/admin/blacklist",
    tag = BLACKLIST_TAG,
    responses(
        (status = 200, description = "Successfully retrieved blacklist", body = Vec<BlacklistEntryDto>),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User is not an admin", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_blacklist(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let entries = BlacklistService::new(&state.db).get_all().await?;

    let entries_dto: Vec<_> = entries.into_iter().map(|e| e.into_dto()).collect();

    Ok((StatusCode::OK, Json(entries_dto)))
}

/// POST /api/admin/blacklist - Ban a Discord account
///
/// `expires_at` uses "YYYY-MM-DD HH:MM" in UTC; omit it for a permanent ban.
#[utoipa::path(
    post,
    path = "/api/admin/blacklist",
    tag = BLACKLIST_TAG,
    request_body = CreateBlacklistEntryDto,
    responses(
        (status = 201, description = "Successfully added blacklist entry", body = BlacklistEntryDto),
        (status = 400, description = "Invalid blacklist entry data", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User is not an admin", body = ErrorDto),
        (status = 409, description = "Account already has an active entry", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn add_blacklist_entry(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<CreateBlacklistEntryDto>,
) -> Result<impl IntoResponse, AppError> {
    let admin = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let entry = BlacklistService::new(&state.db)
        .add(CreateBlacklistEntryParam::from_dto(admin.id, payload)?)
        .await?;

    Ok((StatusCode::CREATED, Json(entry.into_dto())))
}

/// DELETE /api/admin/blacklist/{id} - Lift a ban
#[utoipa::path(
    delete,
    path = "/api/admin/blacklist/{id}",
    tag = BLACKLIST_TAG,
    params(
        ("id" = i32, Path, description = "Blacklist entry ID")
    ),
    responses(
        (status = 204, description = "Successfully removed blacklist entry"),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User is not an admin", body = ErrorDto),
        (status = 404, description = "Blacklist entry not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn remove_blacklist_entry(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let admin = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    BlacklistService::new(&state.db).remove(admin.id, id).await?;

    Ok(StatusCode::NO_CONTENT)
}
