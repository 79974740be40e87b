use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use tower_sessions::Session;

use crate::{
    model::{
        api::{default_entries, ErrorDto},
        port_battle::{
            BrSummaryDto, CreateFleetRoleDto, CreateFleetSetupDto, CreatePortBattleDto,
            FleetRoleDto, FleetSetupDto, PaginatedPortBattlesDto, PortBattleDetailsDto,
            PortBattleDto, UpdatePortBattleDto,
        },
    },
    server::{
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        model::port_battle::{
            CreateFleetRoleParam, CreateFleetSetupParam, CreatePortBattleParam,
            UpdatePortBattleParam,
        },
        service::port_battle::PortBattleService,
        state::AppState,
    },
};

pub static PORT_BATTLE_TAG: &str = "port_battle";

#[derive(Deserialize)]
pub struct PortBattleQuery {
    #[serde(default)]
    pub page: u64,
    #[serde(default = "default_entries")]
    pub entries: u64,
    #[serde(default)]
    pub upcoming: bool,
}

/// GET /api/port-battles - List port battles ordered by start time
#[utoipa::path(
    get,
    path = "/api/port-battles",
    tag = PORT_BATTLE_TAG,
    params(
        ("page" = Option<u64>, Query, description = "Page number (default: 0)"),
        ("entries" = Option<u64>, Query, description = "Items per page (default: 10)"),
        ("upcoming" = Option<bool>, Query, description = "Only scheduled battles that have not started")
    ),
    responses(
        (status = 200, description = "Successfully retrieved port battles", body = PaginatedPortBattlesDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_port_battles(
    State(state): State<AppState>,
    Query(query): Query<PortBattleQuery>,
) -> Result<impl IntoResponse, AppError> {
    let battles = PortBattleService::new(&state.db)
        .get_paginated(query.page, query.entries, query.upcoming)
        .await?;

    Ok((StatusCode::OK, Json(battles.into_dto())))
}

/// GET /api/port-battles/{id} - Get a port battle with fleets, signups and BR totals
#[utoipa::path(
    get,
    path = "/api/port-battles/{id}",
    tag = PORT_BATTLE_TAG,
    params(
        ("id" = i32, Path, description = "Port battle ID")
    ),
    responses(
        (status = 200, description = "Successfully retrieved port battle", body = PortBattleDetailsDto),
        (status = 404, description = "Port battle not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_port_battle(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let details = PortBattleService::new(&state.db).get_details(id).await?;

    Ok((StatusCode::OK, Json(details.into_dto())))
}

/// GET /api/port-battles/{id}/br - BR totals over approved signups
#[utoipa::path(
    get,
    path = "/api/port-battles/{id}/br",
    tag = PORT_BATTLE_TAG,
    params(
        ("id" = i32, Path, description = "Port battle ID")
    ),
    responses(
        (status = 200, description = "Successfully computed BR summary", body = BrSummaryDto),
        (status = 404, description = "Port battle not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_br_summary(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let summary = PortBattleService::new(&state.db).get_br_summary(id).await?;

    Ok((StatusCode::OK, Json(summary.into_dto())))
}

/// POST /api/port-battles - Schedule a port battle with its fleets
///
/// # Authentication
/// Requires admin permission
#[utoipa::path(
    post,
    path = "/api/port-battles",
    tag = PORT_BATTLE_TAG,
    request_body = CreatePortBattleDto,
    responses(
        (status = 201, description = "Successfully created port battle", body = PortBattleDetailsDto),
        (status = 400, description = "Invalid port battle data", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User is not an admin", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_port_battle(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<CreatePortBattleDto>,
) -> Result<impl IntoResponse, AppError> {
    let admin = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let details = PortBattleService::new(&state.db)
        .create(CreatePortBattleParam::from_dto(admin.id, payload)?)
        .await?;

    Ok((StatusCode::CREATED, Json(details.into_dto())))
}

/// PUT /api/port-battles/{id} - Update a port battle
#[utoipa::path(
    put,
    path = "/api/port-battles/{id}",
    tag = PORT_BATTLE_TAG,
    params(
        ("id" = i32, Path, description = "Port battle ID")
    ),
    request_body = UpdatePortBattleDto,
    responses(
        (status = 200, description = "Successfully updated port battle", body = PortBattleDto),
        (status = 400, description = "Invalid update or BR limit below approved BR", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User is not an admin", body = ErrorDto),
        (status = 404, description = "Port battle not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_port_battle(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
    Json(payload): Json<UpdatePortBattleDto>,
) -> Result<impl IntoResponse, AppError> {
    let admin = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let battle = PortBattleService::new(&state.db)
        .update(admin.id, id, UpdatePortBattleParam::from_dto(payload)?)
        .await?;

    Ok((StatusCode::OK, Json(battle.into_dto())))
}

/// DELETE /api/port-battles/{id} - Delete a port battle
#[utoipa::path(
    delete,
    path = "/api/port-battles/{id}",
    tag = PORT_BATTLE_TAG,
    params(
        ("id" = i32, Path, description = "Port battle ID")
    ),
    responses(
        (status = 204, description = "Successfully deleted port battle"),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User is not an admin", body = ErrorDto),
        (status = 404, description = "Port battle not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_port_battle(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let admin = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    PortBattleService::new(&state.db).delete(admin.id, id).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/port-battles/{id}/fleets - Add a fleet setup
#[utoipa::path(
    post,
    path = "/api/port-battles/{id}/fleets",
    tag = PORT_BATTLE_TAG,
    params(
        ("id" = i32, Path, description = "Port battle ID")
    ),
    request_body = CreateFleetSetupDto,
    responses(
        (status = 201, description = "Successfully added fleet setup", body = FleetSetupDto),
        (status = 400, description = "Invalid fleet setup data", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User is not an admin", body = ErrorDto),
        (status = 404, description = "Port battle not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn add_fleet(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
    Json(payload): Json<CreateFleetSetupDto>,
) -> Result<impl IntoResponse, AppError> {
    let admin = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let fleet = PortBattleService::new(&state.db)
        .add_fleet(admin.id, id, CreateFleetSetupParam::from_dto(payload))
        .await?;

    Ok((StatusCode::CREATED, Json(fleet.into_dto())))
}

/// DELETE /api/port-battles/{id}/fleets/{fleet_id} - Remove a fleet setup
#[utoipa::path(
    delete,
    path = "/api/port-battles/{id}/fleets/{fleet_id}",
    tag = PORT_BATTLE_TAG,
    params(
        ("id" = i32, Path, description = "Port battle ID"),
        ("fleet_id" = i32, Path, description = "Fleet setup ID")
    ),
    responses(
        (status = 204, description = "Successfully removed fleet setup"),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User is not an admin", body = ErrorDto),
        (status = 404, description = "Fleet setup not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_fleet(
    State(state): State<AppState>,
    session: Session,
    Path((id, fleet_id)): Path<(i32, i32)>,
) -> Result<impl IntoResponse, AppError> {
    let admin = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    PortBattleService::new(&state.db)
        .delete_fleet(admin.id, id, fleet_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/port-battles/{id}/fleets/{fleet_id}/roles - Add a role to a fleet setup
#[utoipa::path(
    post,
    path = "/api/port-battles/{id}/fleets/{fleet_id}/roles",
    tag = PORT_BATTLE_TAG,
    params(
        ("id" = i32, Path, description = "Port battle ID"),
        ("fleet_id" = i32, Path, description = "Fleet setup ID")
    ),
    request_body = CreateFleetRoleDto,
    responses(
        (status = 201, description = "Successfully added fleet role", body = FleetRoleDto),
        (status = 400, description = "Invalid fleet role data", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User is not an admin", body = ErrorDto),
        (status = 404, description = "Fleet setup not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn add_role(
    State(state): State<AppState>,
    session: Session,
    Path((id, fleet_id)): Path<(i32, i32)>,
    Json(payload): Json<CreateFleetRoleDto>,
) -> Result<impl IntoResponse, AppError> {
    let admin = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let role = PortBattleService::new(&state.db)
        .add_role(admin.id, id, fleet_id, CreateFleetRoleParam::from_dto(payload))
        .await?;

    Ok((StatusCode::CREATED, Json(role.into_dto())))
}

/// DELETE /api/port-battles/{id}/fleets/{fleet_id}/roles/{role_id} - Remove a fleet role
#[utoipa::path(
    delete,
    path = "/api/port-battles/{id}/fleets/{fleet_id}/roles/{role_id}",
    tag = PORT_BATTLE_TAG,
    params(
        ("id" = i32, Path, description = "Port battle ID"),
        ("fleet_id" = i32, Path, description = "Fleet setup ID"),
        ("role_id" = i32, Path, description = "Fleet role ID")
    ),
    responses(
        (status = 204, description = "Successfully removed fleet role"),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User is not an admin", body = ErrorDto),
        (status = 404, description = "Fleet role not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_role(
    State(state): State<AppState>,
    session: Session,
    Path((id, fleet_id, role_id)): Path<(i32, i32, i32)>,
) -> Result<impl IntoResponse, AppError> {
    let admin = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    PortBattleService::new(&state.db)
        .delete_role(admin.id, id, fleet_id, role_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
