use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use serde_json::json;
use tower_sessions::Session;

use crate::{
    model::{
        admin::{
            CreateGdprRequestDto, GdprProcessResultDto, GdprRequestDto, GdprRequestStatusDto,
            RejectGdprRequestDto, UserDataExportDto,
        },
        api::ErrorDto,
    },
    server::{
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        model::activity::action,
        service::gdpr::GdprService,
        state::AppState,
    },
};

pub static GDPR_TAG: &str = "gdpr";

#[derive(Deserialize)]
pub struct GdprRequestQuery {
    pub status: Option<GdprRequestStatusDto>,
}

/// POST /api/gdpr/requests - File an export or deletion request
#[utoipa::path(
    post,
    path = "/api/gdpr/requests",
    tag = GDPR_TAG,
    request_body = CreateGdprRequestDto,
    responses(
        (status = 201, description = "Successfully filed request", body = GdprRequestDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 409, description = "A request of that kind is already pending", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_request(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<CreateGdprRequestDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let request = GdprService::new(&state.db)
        .create_request(user.id, payload.kind.into())
        .await?;

    state
        .activity_logger
        .log(
            user.id,
            action::GDPR_REQUEST,
            json!({ "request_id": request.id, "kind": payload.kind }),
        )
        .await;

    Ok((StatusCode::CREATED, Json(request.into_dto())))
}

/// GET /api/gdpr/requests - List the caller's requests
#[utoipa::path(
    get,
    path = "/api/gdpr/requests",
    tag = GDPR_TAG,
    responses(
        (status = 200, description = "Successfully retrieved requests", body = Vec<GdprRequestDto>),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_own_requests(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let requests = GdprService::new(&state.db)
        .get_user_requests(user.id)
        .await?;

    let requests_dto: Vec<_> = requests.into_iter().map(|r| r.into_dto()).collect();

    Ok((StatusCode::OK, Json(requests_dto)))
}

/// GET /api/admin/gdpr/requests - List all requests
#[utoipa::path(
    get,
    path = "/api/admin/gdpr/requests",
    tag = GDPR_TAG,
    params(
        ("status" = Option<GdprRequestStatusDto>, Query, description = "Only requests in this status")
    ),
    responses(
        (status = 200, description = "Successfully retrieved requests", body = Vec<GdprRequestDto>),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User is not an admin", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_all_requests(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<GdprRequestQuery>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let requests = GdprService::new(&state.db)
        .get_all(query.status.map(Into::into))
        .await?;

    let requests_dto: Vec<_> = requests.into_iter().map(|r| r.into_dto()).collect();

    Ok((StatusCode::OK, Json(requests_dto)))
}

/// POST /api/admin/gdpr/requests/{id}/process - Carry out a pending request
///
/// Export requests return the data bundle. Delete requests erase the user's content and
/// anonymise the account.
#[utoipa::path(
    post,
    path = "/api/admin/gdpr/requests/{id}/process",
    tag = GDPR_TAG,
    params(
        ("id" = i32, Path, description = "GDPR request ID")
    ),
    responses(
        (status = 200, description = "Successfully processed request", body = GdprProcessResultDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User is not an admin", body = ErrorDto),
        (status = 404, description = "GDPR request not found", body = ErrorDto),
        (status = 409, description = "GDPR request is not pending", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn process_request(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let admin = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let result = GdprService::new(&state.db).process(admin.id, id).await?;

    Ok((StatusCode::OK, Json(result.into_dto())))
}

/// POST /api/admin/gdpr/requests/{id}/reject - Reject a pending request
#[utoipa::path(
    post,
    path = "/api/admin/gdpr/requests/{id}/reject",
    tag = GDPR_TAG,
    params(
        ("id" = i32, Path, description = "GDPR request ID")
    ),
    request_body = RejectGdprRequestDto,
    responses(
        (status = 200, description = "Successfully rejected request", body = GdprRequestDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User is not an admin", body = ErrorDto),
        (status = 404, description = "GDPR request not found", body = ErrorDto),
        (status = 409, description = "GDPR request is not pending", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn reject_request(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
    Json(payload): Json<RejectGdprRequestDto>,
) -> Result<impl IntoResponse, AppError> {
    let admin = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let request = GdprService::new(&state.db)
        .reject(admin.id, id, payload.note)
        .await?;

    Ok((StatusCode::OK, Json(request.into_dto())))
}

/// GET /api/admin/gdpr/users/{user_id}/export - Export a user's data directly
#[utoipa::path(
    get,
    path = "/api/admin/gdpr/users/{user_id}/export",
    tag = GDPR_TAG,
    params(
        ("user_id" = i32, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "Successfully exported user data", body = UserDataExportDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User is not an admin", body = ErrorDto),
        (status = 404, description = "User not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn export_user(
    State(state): State<AppState>,
    session: Session,
    Path(user_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let export = GdprService::new(&state.db).export_user(user_id).await?;

    Ok((StatusCode::OK, Json(export.into_dto())))
}
