use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::json;
use tower_sessions::Session;

use crate::{
    model::{
        api::ErrorDto,
        signup::{CreateSignupDto, SignupDto, UpdateSignupStatusDto},
    },
    server::{
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        model::{
            activity::action,
            signup::{CreateSignupParam, UpdateSignupStatusParam},
        },
        service::signup::SignupService,
        state::AppState,
    },
};

pub static SIGNUP_TAG: &str = "signup";

/// POST /api/port-battles/{id}/signups - Sign up for a fleet role
///
/// The battle must still be scheduled and in the future. Each user can hold one
/// active signup per battle.
#[utoipa::path(
    post,
    path = "/api/port-battles/{id}/signups",
    tag = SIGNUP_TAG,
    params(
        ("id" = i32, Path, description = "Port battle ID")
    ),
    request_body = CreateSignupDto,
    responses(
        (status = 201, description = "Successfully signed up", body = SignupDto),
        (status = 400, description = "Port battle not open for signups", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User is blacklisted", body = ErrorDto),
        (status = 404, description = "Port battle or role not found", body = ErrorDto),
        (status = 409, description = "User already has an active signup", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_signup(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
    Json(payload): Json<CreateSignupDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let signup = SignupService::new(&state.db)
        .create(
            &user,
            CreateSignupParam {
                port_battle_id: id,
                role_id: payload.role_id,
                user_id: user.id,
                note: payload
                    .note
                    .map(|n| n.trim().to_string())
                    .filter(|n| !n.is_empty()),
            },
        )
        .await?;

    state
        .activity_logger
        .log(
            user.id,
            action::SIGNUP_CREATE,
            json!({ "port_battle_id": id, "role_id": signup.role_id }),
        )
        .await;

    Ok((StatusCode::CREATED, Json(signup.into_dto())))
}

/// DELETE /api/port-battles/{id}/signups/{signup_id} - Withdraw or remove a signup
///
/// # Authentication
/// Requires the signup's owner or an admin
#[utoipa::path(
    delete,
    path = "/api/port-battles/{id}/signups/{signup_id}",
    tag = SIGNUP_TAG,
    params(
        ("id" = i32, Path, description = "Port battle ID"),
        ("signup_id" = i32, Path, description = "Signup ID")
    ),
    responses(
        (status = 204, description = "Successfully removed signup"),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User is neither owner nor admin", body = ErrorDto),
        (status = 404, description = "Signup not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_signup(
    State(state): State<AppState>,
    session: Session,
    Path((id, signup_id)): Path<(i32, i32)>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let signup = SignupService::new(&state.db)
        .withdraw(&user, id, signup_id)
        .await?;

    if signup.user_id == user.id {
        state
            .activity_logger
            .log(
                user.id,
                action::SIGNUP_WITHDRAW,
                json!({ "port_battle_id": id, "signup_id": signup_id }),
            )
            .await;
    }

    Ok(StatusCode::NO_CONTENT)
}

/// PUT /api/port-battles/{id}/signups/{signup_id}/status - Review a signup
///
/// # Authentication
/// Requires admin permission
#[utoipa::path(
    put,
    path = "/api/port-battles/{id}/signups/{signup_id}/status",
    tag = SIGNUP_TAG,
    params(
        ("id" = i32, Path, description = "Port battle ID"),
        ("signup_id" = i32, Path, description = "Signup ID")
    ),
    request_body = UpdateSignupStatusDto,
    responses(
        (status = 200, description = "Successfully updated signup", body = SignupDto),
        (status = 400, description = "Transition not allowed, role filled or BR limit exceeded", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User is not an admin", body = ErrorDto),
        (status = 404, description = "Signup not found", body = ErrorDto),
        (status = 409, description = "Signup changed concurrently", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_signup_status(
    State(state): State<AppState>,
    session: Session,
    Path((id, signup_id)): Path<(i32, i32)>,
    Json(payload): Json<UpdateSignupStatusDto>,
) -> Result<impl IntoResponse, AppError> {
    let admin = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let signup = SignupService::new(&state.db)
        .update_status(UpdateSignupStatusParam {
            actor_id: admin.id,
            port_battle_id: id,
            signup_id,
            status: payload.status.into(),
        })
        .await?;

    Ok((StatusCode::OK, Json(signup.into_dto())))
}
