//! Port battle domain models and parameters.
//!
//! A port battle is a scheduled clan operation with a battle rating (BR) limit. It is
//! organised into fleet setups, each holding ordered fleet roles (a ship class worth a
//! fixed BR). Members sign up for roles; approved signups count against the limit.

use chrono::{DateTime, Utc};
use entity::port_battle::PortBattleStatus;

use crate::{
    model::port_battle::{
        BrSummaryDto, CreateFleetRoleDto, CreateFleetSetupDto, CreatePortBattleDto, FleetBrDto,
        FleetRoleDto, FleetSetupDto, PaginatedPortBattlesDto, PortBattleDetailsDto, PortBattleDto,
        PortBattleStatusDto, UpdatePortBattleDto,
    },
    server::{
        error::AppError,
        model::signup::Signup,
        util::parse::{parse_datetime, parse_optional_datetime},
    },
};

/// Upper bound for a role's BR and a battle's BR limit.
///
/// The largest Naval Action battles stay well below this, and it keeps every BR sum
/// far from `i32::MAX`.
pub const MAX_BR: i32 = 100_000;

/// Checks that a BR value is within `1..=MAX_BR`.
///
/// # Returns
/// - `Ok(())` - Value is in range
/// - `Err(AppError::BadRequest)` - Zero, negative or above `MAX_BR`
pub fn validate_br(field: &str, value: i32) -> Result<(), AppError> {
    if !(1..=MAX_BR).contains(&value) {
        return Err(AppError::BadRequest(format!(
            "{} must be between 1 and {}",
            field, MAX_BR
        )));
    }
    Ok(())
}

impl From<PortBattleStatus> for PortBattleStatusDto {
    fn from(status: PortBattleStatus) -> Self {
        match status {
            PortBattleStatus::Scheduled => Self::Scheduled,
            PortBattleStatus::Completed => Self::Completed,
            PortBattleStatus::Cancelled => Self::Cancelled,
        }
    }
}

impl From<PortBattleStatusDto> for PortBattleStatus {
    fn from(status: PortBattleStatusDto) -> Self {
        match status {
            PortBattleStatusDto::Scheduled => Self::Scheduled,
            PortBattleStatusDto::Completed => Self::Completed,
            PortBattleStatusDto::Cancelled => Self::Cancelled,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PortBattle {
    pub id: i32,
    pub name: String,
    /// Port being attacked or defended.
    pub port: String,
    pub description: Option<String>,
    pub scheduled_at: DateTime<Utc>,
    /// Maximum total BR of approved signups.
    pub br_limit: i32,
    pub status: PortBattleStatus,
    pub created_by: i32,
    pub created_at: DateTime<Utc>,
}

impl PortBattle {
    pub fn from_entity(entity: entity::port_battle::Model) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            port: entity.port,
            description: entity.description,
            scheduled_at: entity.scheduled_at,
            br_limit: entity.br_limit,
            status: entity.status,
            created_by: entity.created_by,
            created_at: entity.created_at,
        }
    }

    pub fn into_dto(self) -> PortBattleDto {
        PortBattleDto {
            id: self.id,
            name: self.name,
            port: self.port,
            description: self.description,
            scheduled_at: self.scheduled_at,
            br_limit: self.br_limit,
            status: self.status.into(),
            created_by: self.created_by,
            created_at: self.created_at,
        }
    }

    /// Whether new signups are accepted at `now`.
    pub fn accepts_signups(&self, now: DateTime<Utc>) -> bool {
        self.status == PortBattleStatus::Scheduled && self.scheduled_at > now
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FleetRole {
    pub id: i32,
    pub fleet_setup_id: i32,
    pub ship_class: String,
    pub br_value: i32,
    pub position: i32,
}

impl FleetRole {
    pub fn from_entity(entity: entity::fleet_role::Model) -> Self {
        Self {
            id: entity.id,
            fleet_setup_id: entity.fleet_setup_id,
            ship_class: entity.ship_class,
            br_value: entity.br_value,
            position: entity.position,
        }
    }

    pub fn into_dto(self) -> FleetRoleDto {
        FleetRoleDto {
            id: self.id,
            fleet_setup_id: self.fleet_setup_id,
            ship_class: self.ship_class,
            br_value: self.br_value,
            position: self.position,
        }
    }
}

/// Fleet setup with its roles ordered by position.
#[derive(Debug, Clone, PartialEq)]
pub struct FleetSetup {
    pub id: i32,
    pub port_battle_id: i32,
    pub name: String,
    pub position: i32,
    pub roles: Vec<FleetRole>,
}

impl FleetSetup {
    pub fn from_entity(
        entity: entity::fleet_setup::Model,
        roles: Vec<entity::fleet_role::Model>,
    ) -> Self {
        Self {
            id: entity.id,
            port_battle_id: entity.port_battle_id,
            name: entity.name,
            position: entity.position,
            roles: roles.into_iter().map(FleetRole::from_entity).collect(),
        }
    }

    pub fn into_dto(self) -> FleetSetupDto {
        FleetSetupDto {
            id: self.id,
            port_battle_id: self.port_battle_id,
            name: self.name,
            position: self.position,
            roles: self.roles.into_iter().map(FleetRole::into_dto).collect(),
        }
    }
}

/// Approved BR within one fleet setup.
#[derive(Debug, Clone, PartialEq)]
pub struct FleetBr {
    pub fleet_setup_id: i32,
    pub name: String,
    pub approved_br: i32,
    pub approved_count: u64,
}

/// BR accounting for a whole battle.
#[derive(Debug, Clone, PartialEq)]
pub struct BrSummary {
    pub port_battle_id: i32,
    pub br_limit: i32,
    /// Sum of role BR over approved signups.
    pub total_br: i32,
    /// `br_limit - total_br`, never negative.
    pub remaining_br: i32,
    pub fleets: Vec<FleetBr>,
}

impl BrSummary {
    /// Sums approved BR per fleet setup.
    ///
    /// # Arguments
    /// - `battle` - The battle providing the limit
    /// - `fleets` - Fleet setups with their roles
    /// - `approved_role_ids` - Role ID of every approved signup in the battle
    pub fn compute(battle: &PortBattle, fleets: &[FleetSetup], approved_role_ids: &[i32]) -> Self {
        let mut total = 0i64;
        let fleets: Vec<FleetBr> = fleets
            .iter()
            .map(|fleet| {
                let (approved_br, approved_count) = fleet
                    .roles
                    .iter()
                    .map(|role| {
                        let count = approved_role_ids.iter().filter(|id| **id == role.id).count();
                        (i64::from(role.br_value) * count as i64, count as u64)
                    })
                    .fold((0i64, 0u64), |(br, n), (role_br, role_n)| {
                        (br + role_br, n + role_n)
                    });

                total += approved_br;

                FleetBr {
                    fleet_setup_id: fleet.id,
                    name: fleet.name.clone(),
                    approved_br: saturate(approved_br),
                    approved_count,
                }
            })
            .collect();

        Self {
            port_battle_id: battle.id,
            br_limit: battle.br_limit,
            total_br: saturate(total),
            remaining_br: saturate((i64::from(battle.br_limit) - total).max(0)),
            fleets,
        }
    }

    pub fn into_dto(self) -> BrSummaryDto {
        BrSummaryDto {
            port_battle_id: self.port_battle_id,
            br_limit: self.br_limit,
            total_br: self.total_br,
            remaining_br: self.remaining_br,
            fleets: self
                .fleets
                .into_iter()
                .map(|f| FleetBrDto {
                    fleet_setup_id: f.fleet_setup_id,
                    name: f.name,
                    approved_br: f.approved_br,
                    approved_count: f.approved_count,
                })
                .collect(),
        }
    }
}

/// Everything shown on a battle's page.
#[derive(Debug, Clone, PartialEq)]
pub struct PortBattleDetails {
    pub battle: PortBattle,
    pub fleets: Vec<FleetSetup>,
    pub signups: Vec<Signup>,
    pub br: BrSummary,
}

impl PortBattleDetails {
    pub fn into_dto(self) -> PortBattleDetailsDto {
        PortBattleDetailsDto {
            battle: self.battle.into_dto(),
            fleets: self.fleets.into_iter().map(FleetSetup::into_dto).collect(),
            signups: self.signups.into_iter().map(Signup::into_dto).collect(),
            br: self.br.into_dto(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PaginatedPortBattles {
    pub battles: Vec<PortBattle>,
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
    pub total_pages: u64,
}

impl PaginatedPortBattles {
    pub fn into_dto(self) -> PaginatedPortBattlesDto {
        PaginatedPortBattlesDto {
            battles: self.battles.into_iter().map(PortBattle::into_dto).collect(),
            total: self.total,
            page: self.page,
            per_page: self.per_page,
            total_pages: self.total_pages,
        }
    }
}

/// Sums are computed in `i64`; the DTO carries `i32`.
fn saturate(value: i64) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

#[derive(Debug, Clone)]
pub struct CreateFleetRoleParam {
    pub ship_class: String,
    pub br_value: i32,
}

impl CreateFleetRoleParam {
    pub fn from_dto(dto: CreateFleetRoleDto) -> Self {
        Self {
            ship_class: dto.ship_class.trim().to_string(),
            br_value: dto.br_value,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateFleetSetupParam {
    pub name: String,
    pub roles: Vec<CreateFleetRoleParam>,
}

impl CreateFleetSetupParam {
    pub fn from_dto(dto: CreateFleetSetupDto) -> Self {
        Self {
            name: dto.name.trim().to_string(),
            roles: dto
                .roles
                .into_iter()
                .map(CreateFleetRoleParam::from_dto)
                .collect(),
        }
    }
}

/// Parameters for creating a battle with its fleets and roles in one go.
#[derive(Debug, Clone)]
pub struct CreatePortBattleParam {
    pub created_by: i32,
    pub name: String,
    pub port: String,
    pub description: Option<String>,
    pub scheduled_at: DateTime<Utc>,
    pub br_limit: i32,
    pub fleets: Vec<CreateFleetSetupParam>,
}

impl CreatePortBattleParam {
    /// Converts the request body, parsing `scheduled_at` as "YYYY-MM-DD HH:MM" UTC.
    ///
    /// # Returns
    /// - `Ok(CreatePortBattleParam)` - Converted parameters
    /// - `Err(AppError::BadRequest)` - `scheduled_at` has the wrong format
    pub fn from_dto(created_by: i32, dto: CreatePortBattleDto) -> Result<Self, AppError> {
        Ok(Self {
            created_by,
            name: dto.name.trim().to_string(),
            port: dto.port.trim().to_string(),
            description: dto.description.filter(|d| !d.trim().is_empty()),
            scheduled_at: parse_datetime("scheduled_at", &dto.scheduled_at)?,
            br_limit: dto.br_limit,
            fleets: dto
                .fleets
                .into_iter()
                .map(CreateFleetSetupParam::from_dto)
                .collect(),
        })
    }
}

/// Partial battle update; `None` fields keep their current value.
#[derive(Debug, Clone, Default)]
pub struct UpdatePortBattleParam {
    pub name: Option<String>,
    pub port: Option<String>,
    pub description: Option<String>,
    pub scheduled_at: Option<DateTime<Utc>>,
    pub br_limit: Option<i32>,
    pub status: Option<PortBattleStatus>,
}

impl UpdatePortBattleParam {
    pub fn from_dto(dto: UpdatePortBattleDto) -> Result<Self, AppError> {
        Ok(Self {
            name: dto.name.map(|n| n.trim().to_string()),
            port: dto.port.map(|p| p.trim().to_string()),
            description: dto.description,
            scheduled_at: parse_optional_datetime("scheduled_at", dto.scheduled_at.as_deref())?,
            br_limit: dto.br_limit,
            status: dto.status.map(Into::into),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn role(id: i32, fleet_setup_id: i32, br_value: i32) -> FleetRole {
        FleetRole {
            id,
            fleet_setup_id,
            ship_class: "Bellona".to_string(),
            br_value,
            position: 0,
        }
    }

    fn battle(br_limit: i32) -> PortBattle {
        PortBattle {
            id: 7,
            name: "Defence of La Habana".to_string(),
            port: "La Habana".to_string(),
            description: None,
            scheduled_at: Utc::now(),
            br_limit,
            status: PortBattleStatus::Scheduled,
            created_by: 1,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn sums_approved_br_per_fleet() {
        let fleets = vec![
            FleetSetup {
                id: 1,
                port_battle_id: 7,
                name: "Main".to_string(),
                position: 0,
                roles: vec![role(10, 1, 250), role(11, 1, 100)],
            },
            FleetSetup {
                id: 2,
                port_battle_id: 7,
                name: "Screen".to_string(),
                position: 1,
                roles: vec![role(20, 2, 50)],
            },
        ];

        let summary = BrSummary::compute(&battle(1000), &fleets, &[10, 20]);

        assert_eq!(summary.total_br, 300);
        assert_eq!(summary.remaining_br, 700);
        assert_eq!(summary.fleets[0].approved_br, 250);
        assert_eq!(summary.fleets[0].approved_count, 1);
        assert_eq!(summary.fleets[1].approved_br, 50);
    }

    #[test]
    fn remaining_never_negative() {
        let fleets = vec![FleetSetup {
            id: 1,
            port_battle_id: 7,
            name: "Main".to_string(),
            position: 0,
            roles: vec![role(10, 1, 250)],
        }];

        let summary = BrSummary::compute(&battle(100), &fleets, &[10]);

        assert_eq!(summary.total_br, 250);
        assert_eq!(summary.remaining_br, 0);
    }

    #[test]
    fn bounds_br_values() {
        assert!(validate_br("br_value", 1).is_ok());
        assert!(validate_br("br_value", MAX_BR).is_ok());
        assert!(matches!(
            validate_br("br_value", 0),
            Err(AppError::BadRequest(_))
        ));
        assert!(matches!(
            validate_br("br_limit", MAX_BR + 1),
            Err(AppError::BadRequest(_))
        ));
    }

    #[test]
    fn sums_large_br_without_overflow() {
        let fleets = vec![FleetSetup {
            id: 1,
            port_battle_id: 7,
            name: "Main".to_string(),
            position: 0,
            roles: vec![role(10, 1, i32::MAX), role(11, 1, i32::MAX)],
        }];

        let summary = BrSummary::compute(&battle(1000), &fleets, &[10, 11]);

        assert_eq!(summary.total_br, i32::MAX);
        assert_eq!(summary.fleets[0].approved_br, i32::MAX);
        assert_eq!(summary.remaining_br, 0);
    }
}
