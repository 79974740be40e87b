use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use tower_sessions::Session;

use crate::{
    model::{
        api::ErrorDto,
        user::{LoginDto, UserDto},
    },
    server::{
        error::AppError,
        middleware::{auth::AuthGuard, session::AuthSession},
        model::activity::action,
        service::auth::{AuthService, LoginParam},
        state::AppState,
    },
};

pub static AUTH_TAG: &str = "auth";

/// POST /api/auth/login - Log in with an identity verified by the upstream provider
///
/// Creates the user on first login and refreshes their profile afterwards. A valid
/// one-time admin code grants admin privileges.
#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = AUTH_TAG,
    request_body = LoginDto,
    responses(
        (status = 200, description = "Logged in", body = UserDto),
        (status = 400, description = "Missing identity fields or invalid admin code", body = ErrorDto),
        (status = 403, description = "Identity is blacklisted", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<LoginDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthService::new(&state.db, &state.admin_code_service)
        .login(LoginParam {
            discord_id: payload.discord_id,
            name: payload.name,
            avatar_url: payload.avatar_url,
            admin_code: payload.admin_code,
        })
        .await?;

    AuthSession::new(&session).set_user_id(user.id).await?;

    state
        .activity_logger
        .log(user.id, action::LOGIN, json!({ "admin": user.admin }))
        .await;

    Ok((StatusCode::OK, Json(user.into_dto())))
}

/// POST /api/auth/logout - End the current session
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    tag = AUTH_TAG,
    responses(
        (status = 204, description = "Session cleared"),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn logout(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let auth_session = AuthSession::new(&session);

    if let Some(user_id) = auth_session.get_user_id().await? {
        state
            .activity_logger
            .log(user_id, action::LOGOUT, json!({}))
            .await;
    }

    auth_session.clear().await?;

    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/auth/user - Get the logged in user
#[utoipa::path(
    get,
    path = "/api/auth/user",
    tag = AUTH_TAG,
    responses(
        (status = 200, description = "Current user", body = UserDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_user(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    Ok((StatusCode::OK, Json(user.into_dto())))
}
