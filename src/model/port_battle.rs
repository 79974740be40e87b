use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::model::signup::SignupDto;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PortBattleStatusDto {
    Scheduled,
    Completed,
    Cancelled,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, ToSchema)]
pub struct CreateFleetRoleDto {
    pub ship_class: String,
    pub br_value: i32,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, ToSchema)]
pub struct CreateFleetSetupDto {
    pub name: String,
    #[serde(default)]
    pub roles: Vec<CreateFleetRoleDto>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, ToSchema)]
pub struct CreatePortBattleDto {
    pub name: String,
    pub port: String,
    pub description: Option<String>,
    pub scheduled_at: String, // Format: "YYYY-MM-DD HH:MM" in UTC
    pub br_limit: i32,
    #[serde(default)]
    pub fleets: Vec<CreateFleetSetupDto>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, ToSchema)]
pub struct UpdatePortBattleDto {
    pub name: Option<String>,
    pub port: Option<String>,
    pub description: Option<String>,
    pub scheduled_at: Option<String>, // Format: "YYYY-MM-DD HH:MM" in UTC
    pub br_limit: Option<i32>,
    pub status: Option<PortBattleStatusDto>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, ToSchema)]
pub struct FleetRoleDto {
    pub id: i32,
    pub fleet_setup_id: i32,
    pub ship_class: String,
    pub br_value: i32,
    pub position: i32,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, ToSchema)]
pub struct FleetSetupDto {
    pub id: i32,
    pub port_battle_id: i32,
    pub name: String,
    pub position: i32,
    pub roles: Vec<FleetRoleDto>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, ToSchema)]
pub struct PortBattleDto {
    pub id: i32,
    pub name: String,
    pub port: String,
    pub description: Option<String>,
    #[serde(with = "chrono::serde::ts_seconds")]
    #[schema(value_type = i64)]
    pub scheduled_at: DateTime<Utc>,
    pub br_limit: i32,
    pub status: PortBattleStatusDto,
    pub created_by: i32,
    #[serde(with = "chrono::serde::ts_seconds")]
    #[schema(value_type = i64)]
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, ToSchema)]
pub struct PortBattleDetailsDto {
    #[serde(flatten)]
    pub battle: PortBattleDto,
    pub fleets: Vec<FleetSetupDto>,
    pub signups: Vec<SignupDto>,
    pub br: BrSummaryDto,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, ToSchema)]
pub struct PaginatedPortBattlesDto {
    pub battles: Vec<PortBattleDto>,
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
    pub total_pages: u64,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, ToSchema)]
pub struct FleetBrDto {
    pub fleet_setup_id: i32,
    pub name: String,
    pub approved_br: i32,
    pub approved_count: u64,
}

/// Battle rating accounting over approved signups.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, ToSchema)]
pub struct BrSummaryDto {
    pub port_battle_id: i32,
    pub br_limit: i32,
    pub total_br: i32,
    pub remaining_br: i32,
    pub fleets: Vec<FleetBrDto>,
}
