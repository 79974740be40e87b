//! Port battle repository.
//!
//! Battles own their fleet setups, roles and signups; deleting a battle cascades to all
//! of them.

use chrono::{DateTime, Utc};
use entity::port_battle::PortBattleStatus;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr,
    EntityTrait, IntoActiveModel, PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::server::{
    data::fleet::FleetRepository,
    model::port_battle::{CreatePortBattleParam, PortBattle, UpdatePortBattleParam},
};

pub struct PortBattleRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> PortBattleRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Inserts a scheduled battle together with its fleet setups and roles.
    ///
    /// Setups and roles are positioned in the order given. Run inside a transaction so a
    /// failure part way leaves nothing behind.
    ///
    /// # Returns
    /// - `Ok(PortBattle)` - The created battle
    /// - `Err(DbErr)` - Database error during any insert
    pub async fn create(&self, param: CreatePortBattleParam) -> Result<PortBattle, DbErr> {
        let battle = entity::port_battle::ActiveModel {
            name: ActiveValue::Set(param.name),
            port: ActiveValue::Set(param.port),
            description: ActiveValue::Set(param.description),
            scheduled_at: ActiveValue::Set(param.scheduled_at),
            br_limit: ActiveValue::Set(param.br_limit),
            status: ActiveValue::Set(PortBattleStatus::Scheduled),
            created_by: ActiveValue::Set(param.created_by),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        let fleet_repo = FleetRepository::new(self.db);
        for fleet in param.fleets {
            let setup = fleet_repo.create_setup(battle.id, fleet.name).await?;
            for role in fleet.roles {
                fleet_repo
                    .create_role(setup.id, role.ship_class, role.br_value)
                    .await?;
            }
        }

        Ok(PortBattle::from_entity(battle))
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<PortBattle>, DbErr> {
        let entity = entity::prelude::PortBattle::find_by_id(id)
            .one(self.db)
            .await?;

        Ok(entity.map(PortBattle::from_entity))
    }

    /// Lists battles ordered by start time.
    ///
    /// With `upcoming_after` set, only scheduled battles starting after that instant are
    /// returned.
    ///
    /// # Returns
    /// - `Ok((battles, total))` - Battles for the requested page and total matching count
    /// - `Err(DbErr)` - Database error during pagination query
    pub async fn get_paginated(
        &self,
        page: u64,
        per_page: u64,
        upcoming_after: Option<DateTime<Utc>>,
    ) -> Result<(Vec<PortBattle>, u64), DbErr> {
        let mut query = entity::prelude::PortBattle::find();

        if let Some(after) = upcoming_after {
            query = query
                .filter(entity::port_battle::Column::Status.eq(PortBattleStatus::Scheduled))
                .filter(entity::port_battle::Column::ScheduledAt.gt(after));
        }

        let paginator = query
            .order_by_asc(entity::port_battle::Column::ScheduledAt)
            .order_by_asc(entity::port_battle::Column::Id)
            .paginate(self.db, per_page);

        let total = paginator.num_items().await?;
        let battles = paginator
            .fetch_page(page)
            .await?
            .into_iter()
            .map(PortBattle::from_entity)
            .collect();

        Ok((battles, total))
    }

    /// Applies a partial update.
    ///
    /// # Returns
    /// - `Ok(Some(PortBattle))` - Updated battle
    /// - `Ok(None)` - No battle with that ID
    /// - `Err(DbErr)` - Database error during update
    pub async fn update(
        &self,
        id: i32,
        param: UpdatePortBattleParam,
    ) -> Result<Option<PortBattle>, DbErr> {
        let Some(entity) = entity::prelude::PortBattle::find_by_id(id)
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let mut active = entity.into_active_model();
        if let Some(name) = param.name {
            active.name = ActiveValue::Set(name);
        }
        if let Some(port) = param.port {
            active.port = ActiveValue::Set(port);
        }
        if let Some(description) = param.description {
            let description = description.trim().to_string();
            active.description = ActiveValue::Set((!description.is_empty()).then_some(description));
        }
        if let Some(scheduled_at) = param.scheduled_at {
            active.scheduled_at = ActiveValue::Set(scheduled_at);
        }
        if let Some(br_limit) = param.br_limit {
            active.br_limit = ActiveValue::Set(br_limit);
        }
        if let Some(status) = param.status {
            active.status = ActiveValue::Set(status);
        }

        let updated = active.update(self.db).await?;

        Ok(Some(PortBattle::from_entity(updated)))
    }

    /// Deletes a battle with its fleets, roles and signups.
    pub async fn delete(&self, id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::PortBattle::delete_by_id(id)
            .exec(self.db)
            .await?;
        Ok(result.rows_affected > 0)
    }

    /// Marks scheduled battles that started at or before `started_before` as completed.
    ///
    /// # Returns
    /// - `Ok(u64)` - Number of battles completed
    /// - `Err(DbErr)` - Database error during update
    pub async fn complete_started_before(
        &self,
        started_before: DateTime<Utc>,
    ) -> Result<u64, DbErr> {
        let result = entity::prelude::PortBattle::update_many()
            .filter(entity::port_battle::Column::Status.eq(PortBattleStatus::Scheduled))
            .filter(entity::port_battle::Column::ScheduledAt.lte(started_before))
            .col_expr(
                entity::port_battle::Column::Status,
                Expr::value(PortBattleStatus::Completed),
            )
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }
}
