//! Port battle service: scheduling, fleet setups and BR accounting.

use chrono::{Duration, Utc};
use sea_orm::{ActiveEnum, ConnectionTrait, DatabaseConnection, TransactionTrait};
use serde_json::json;

use crate::{
    model::api::page_size,
    server::{
        data::{
            audit_log::AuditLogRepository, fleet::FleetRepository, port_battle::PortBattleRepository,
            signup::SignupRepository,
        },
        error::AppError,
        model::{
            audit_log::{AuditAction, CreateAuditLogParam},
            port_battle::{
                validate_br, BrSummary, CreateFleetRoleParam, CreateFleetSetupParam,
                CreatePortBattleParam, FleetRole, FleetSetup, PaginatedPortBattles, PortBattle,
                PortBattleDetails, UpdatePortBattleParam,
            },
        },
    },
};

pub struct PortBattleService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> PortBattleService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists battles ordered by start time.
    ///
    /// With `upcoming` only scheduled battles that have not started yet are returned.
    pub async fn get_paginated(
        &self,
        page: u64,
        per_page: u64,
        upcoming: bool,
    ) -> Result<PaginatedPortBattles, AppError> {
        let per_page = page_size(per_page);

        let (battles, total) = PortBattleRepository::new(self.db)
            .get_paginated(page, per_page, upcoming.then(Utc::now))
            .await?;

        let total_pages = (total as f64 / per_page as f64).ceil() as u64;

        Ok(PaginatedPortBattles {
            battles,
            total,
            page,
            per_page,
            total_pages,
        })
    }

    /// Gets a battle with its fleets, signups and BR totals.
    ///
    /// # Returns
    /// - `Ok(PortBattleDetails)` - The battle page
    /// - `Err(AppError::NotFound)` - No battle with that ID
    pub async fn get_details(&self, id: i32) -> Result<PortBattleDetails, AppError> {
        load_details(self.db, id).await
    }

    /// Computes the BR summary of a battle.
    pub async fn get_br_summary(&self, id: i32) -> Result<BrSummary, AppError> {
        let battle = find_battle(self.db, id).await?;
        let fleets = FleetRepository::new(self.db).get_by_battle(id).await?;
        let approved = SignupRepository::new(self.db)
            .get_approved_role_ids(id)
            .await?;

        Ok(BrSummary::compute(&battle, &fleets, &approved))
    }

    /// Schedules a battle with its fleets and roles.
    ///
    /// # Returns
    /// - `Ok(PortBattleDetails)` - The created battle
    /// - `Err(AppError::BadRequest)` - Empty names, BR out of range or a start in the past
    pub async fn create(&self, param: CreatePortBattleParam) -> Result<PortBattleDetails, AppError> {
        if param.name.is_empty() || param.port.is_empty() {
            return Err(AppError::BadRequest("name and port are required".to_string()));
        }
        validate_br("br_limit", param.br_limit)?;
        if param.scheduled_at <= Utc::now() {
            return Err(AppError::BadRequest(
                "scheduled_at must be in the future".to_string(),
            ));
        }
        for fleet in &param.fleets {
            validate_fleet(fleet)?;
        }

        let actor_id = param.created_by;

        let txn = self.db.begin().await?;

        let battle = PortBattleRepository::new(&txn).create(param).await?;

        AuditLogRepository::new(&txn)
            .create(CreateAuditLogParam::new(
                actor_id,
                AuditAction::PortBattleCreate,
                battle.id,
                json!({
                    "name": battle.name,
                    "port": battle.port,
                    "scheduled_at": battle.scheduled_at,
                    "br_limit": battle.br_limit,
                }),
            ))
            .await?;

        let details = load_details(&txn, battle.id).await?;

        txn.commit().await?;

        tracing::info!("Port battle {} scheduled by user {}", battle.id, actor_id);

        Ok(details)
    }

    /// Applies a partial update.
    ///
    /// # Returns
    /// - `Ok(PortBattle)` - The updated battle
    /// - `Err(AppError::NotFound)` - No battle with that ID
    /// - `Err(AppError::BadRequest)` - Empty names or a BR limit below the approved BR
    pub async fn update(
        &self,
        actor_id: i32,
        id: i32,
        param: UpdatePortBattleParam,
    ) -> Result<PortBattle, AppError> {
        if param.name.as_deref().is_some_and(str::is_empty)
            || param.port.as_deref().is_some_and(str::is_empty)
        {
            return Err(AppError::BadRequest("name and port cannot be empty".to_string()));
        }

        let txn = self.db.begin().await?;

        find_battle(&txn, id).await?;

        if let Some(br_limit) = param.br_limit {
            validate_br("br_limit", br_limit)?;

            let approved_br = SignupRepository::new(&txn).get_approved_br(id).await?;
            if i64::from(br_limit) < approved_br {
                return Err(AppError::BadRequest(format!(
                    "br_limit {} is below the approved BR of {}",
                    br_limit, approved_br
                )));
            }
        }

        let changes = json!({
            "name": param.name,
            "port": param.port,
            "scheduled_at": param.scheduled_at,
            "br_limit": param.br_limit,
            "status": param.status.map(|s| s.to_value()),
        });

        let battle = PortBattleRepository::new(&txn)
            .update(id, param)
            .await?
            .ok_or_else(|| AppError::NotFound("Port battle not found".to_string()))?;

        audit(&txn, actor_id, AuditAction::PortBattleUpdate, id, changes).await?;

        txn.commit().await?;

        Ok(battle)
    }

    /// Deletes a battle together with its fleets and signups.
    pub async fn delete(&self, actor_id: i32, id: i32) -> Result<(), AppError> {
        let txn = self.db.begin().await?;

        let battle = find_battle(&txn, id).await?;
        PortBattleRepository::new(&txn).delete(id).await?;

        audit(
            &txn,
            actor_id,
            AuditAction::PortBattleDelete,
            id,
            json!({ "name": battle.name }),
        )
        .await?;

        txn.commit().await?;

        Ok(())
    }

    /// Appends a fleet setup with its roles to a battle.
    pub async fn add_fleet(
        &self,
        actor_id: i32,
        port_battle_id: i32,
        param: CreateFleetSetupParam,
    ) -> Result<FleetSetup, AppError> {
        validate_fleet(&param)?;

        let txn = self.db.begin().await?;

        find_battle(&txn, port_battle_id).await?;

        let repo = FleetRepository::new(&txn);
        let setup = repo.create_setup(port_battle_id, param.name).await?;
        let mut roles = Vec::with_capacity(param.roles.len());
        for role in param.roles {
            roles.push(
                repo.create_role(setup.id, role.ship_class, role.br_value)
                    .await?,
            );
        }

        audit(
            &txn,
            actor_id,
            AuditAction::FleetSetupCreate,
            setup.id,
            json!({ "port_battle_id": port_battle_id, "name": setup.name }),
        )
        .await?;

        txn.commit().await?;

        Ok(FleetSetup {
            id: setup.id,
            port_battle_id: setup.port_battle_id,
            name: setup.name,
            position: setup.position,
            roles,
        })
    }

    /// Removes a fleet setup, its roles and their signups.
    pub async fn delete_fleet(
        &self,
        actor_id: i32,
        port_battle_id: i32,
        fleet_setup_id: i32,
    ) -> Result<(), AppError> {
        let txn = self.db.begin().await?;
        let repo = FleetRepository::new(&txn);

        let setup = repo
            .find_setup(fleet_setup_id)
            .await?
            .filter(|s| s.port_battle_id == port_battle_id)
            .ok_or_else(|| AppError::NotFound("Fleet setup not found".to_string()))?;

        repo.delete_setup(fleet_setup_id).await?;

        audit(
            &txn,
            actor_id,
            AuditAction::FleetSetupDelete,
            fleet_setup_id,
            json!({ "port_battle_id": port_battle_id, "name": setup.name }),
        )
        .await?;

        txn.commit().await?;

        Ok(())
    }

    /// Appends a role to a fleet setup.
    pub async fn add_role(
        &self,
        actor_id: i32,
        port_battle_id: i32,
        fleet_setup_id: i32,
        param: CreateFleetRoleParam,
    ) -> Result<FleetRole, AppError> {
        validate_role(&param)?;

        let txn = self.db.begin().await?;
        let repo = FleetRepository::new(&txn);

        repo.find_setup(fleet_setup_id)
            .await?
            .filter(|s| s.port_battle_id == port_battle_id)
            .ok_or_else(|| AppError::NotFound("Fleet setup not found".to_string()))?;

        let role = repo
            .create_role(fleet_setup_id, param.ship_class, param.br_value)
            .await?;

        audit(
            &txn,
            actor_id,
            AuditAction::FleetRoleCreate,
            role.id,
            json!({
                "fleet_setup_id": fleet_setup_id,
                "ship_class": role.ship_class,
                "br_value": role.br_value,
            }),
        )
        .await?;

        txn.commit().await?;

        Ok(role)
    }

    /// Removes a role and its signups.
    pub async fn delete_role(
        &self,
        actor_id: i32,
        port_battle_id: i32,
        fleet_setup_id: i32,
        role_id: i32,
    ) -> Result<(), AppError> {
        let txn = self.db.begin().await?;
        let repo = FleetRepository::new(&txn);

        let (role, _) = repo
            .find_role(role_id)
            .await?
            .filter(|(role, battle_id)| {
                *battle_id == port_battle_id && role.fleet_setup_id == fleet_setup_id
            })
            .ok_or_else(|| AppError::NotFound("Fleet role not found".to_string()))?;

        repo.delete_role(role_id).await?;

        audit(
            &txn,
            actor_id,
            AuditAction::FleetRoleDelete,
            role_id,
            json!({ "fleet_setup_id": fleet_setup_id, "ship_class": role.ship_class }),
        )
        .await?;

        txn.commit().await?;

        Ok(())
    }

    /// Marks scheduled battles as completed once `battle_duration` has passed since their
    /// start.
    ///
    /// # Returns
    /// - `Ok(u64)` - Number of battles completed
    pub async fn complete_finished(&self, battle_duration: Duration) -> Result<u64, AppError> {
        let completed = PortBattleRepository::new(self.db)
            .complete_started_before(Utc::now() - battle_duration)
            .await?;

        if completed > 0 {
            tracing::info!("Marked {} port battle(s) as completed", completed);
        }

        Ok(completed)
    }
}

pub(crate) async fn find_battle<C: ConnectionTrait>(
    db: &C,
    id: i32,
) -> Result<PortBattle, AppError> {
    PortBattleRepository::new(db)
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Port battle not found".to_string()))
}

async fn load_details<C: ConnectionTrait>(db: &C, id: i32) -> Result<PortBattleDetails, AppError> {
    let battle = find_battle(db, id).await?;
    let fleets = FleetRepository::new(db).get_by_battle(id).await?;

    let signup_repo = SignupRepository::new(db);
    let signups = signup_repo.get_by_battle(id).await?;
    let approved = signup_repo.get_approved_role_ids(id).await?;

    let br = BrSummary::compute(&battle, &fleets, &approved);

    Ok(PortBattleDetails {
        battle,
        fleets,
        signups,
        br,
    })
}

async fn audit<C: ConnectionTrait>(
    db: &C,
    actor_id: i32,
    action: AuditAction,
    target_id: i32,
    details: serde_json::Value,
) -> Result<(), AppError> {
    AuditLogRepository::new(db)
        .create(CreateAuditLogParam::new(actor_id, action, target_id, details))
        .await?;
    Ok(())
}

fn validate_fleet(fleet: &CreateFleetSetupParam) -> Result<(), AppError> {
    if fleet.name.is_empty() {
        return Err(AppError::BadRequest("Fleet name is required".to_string()));
    }
    fleet.roles.iter().try_for_each(validate_role)
}

fn validate_role(role: &CreateFleetRoleParam) -> Result<(), AppError> {
    if role.ship_class.is_empty() {
        return Err(AppError::BadRequest("ship_class is required".to_string()));
    }
    validate_br("br_value", role.br_value)
}
