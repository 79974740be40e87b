//! Fleet setup and fleet role repository.

use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder,
};
use std::collections::HashMap;

use crate::server::model::port_battle::{FleetRole, FleetSetup};

pub struct FleetRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> FleetRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Appends a fleet setup to a battle.
    ///
    /// The new setup is positioned after the existing ones.
    pub async fn create_setup(
        &self,
        port_battle_id: i32,
        name: String,
    ) -> Result<entity::fleet_setup::Model, DbErr> {
        let position = entity::prelude::FleetSetup::find()
            .filter(entity::fleet_setup::Column::PortBattleId.eq(port_battle_id))
            .count(self.db)
            .await?;

        entity::fleet_setup::ActiveModel {
            port_battle_id: ActiveValue::Set(port_battle_id),
            name: ActiveValue::Set(name),
            position: ActiveValue::Set(position as i32),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }

    /// Appends a role to a fleet setup.
    pub async fn create_role(
        &self,
        fleet_setup_id: i32,
        ship_class: String,
        br_value: i32,
    ) -> Result<FleetRole, DbErr> {
        let position = entity::prelude::FleetRole::find()
            .filter(entity::fleet_role::Column::FleetSetupId.eq(fleet_setup_id))
            .count(self.db)
            .await?;

        let entity = entity::fleet_role::ActiveModel {
            fleet_setup_id: ActiveValue::Set(fleet_setup_id),
            ship_class: ActiveValue::Set(ship_class),
            br_value: ActiveValue::Set(br_value),
            position: ActiveValue::Set(position as i32),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(FleetRole::from_entity(entity))
    }

    /// Gets a battle's fleet setups with their roles, both ordered by position.
    pub async fn get_by_battle(&self, port_battle_id: i32) -> Result<Vec<FleetSetup>, DbErr> {
        let setups = entity::prelude::FleetSetup::find()
            .filter(entity::fleet_setup::Column::PortBattleId.eq(port_battle_id))
            .order_by_asc(entity::fleet_setup::Column::Position)
            .order_by_asc(entity::fleet_setup::Column::Id)
            .all(self.db)
            .await?;

        let setup_ids: Vec<i32> = setups.iter().map(|s| s.id).collect();
        let roles = if setup_ids.is_empty() {
            Vec::new()
        } else {
            entity::prelude::FleetRole::find()
                .filter(entity::fleet_role::Column::FleetSetupId.is_in(setup_ids))
                .order_by_asc(entity::fleet_role::Column::Position)
                .order_by_asc(entity::fleet_role::Column::Id)
                .all(self.db)
                .await?
        };

        let mut roles_by_setup: HashMap<i32, Vec<entity::fleet_role::Model>> = HashMap::new();
        for role in roles {
            roles_by_setup.entry(role.fleet_setup_id).or_default().push(role);
        }

        Ok(setups
            .into_iter()
            .map(|setup| {
                let roles = roles_by_setup.remove(&setup.id).unwrap_or_default();
                FleetSetup::from_entity(setup, roles)
            })
            .collect())
    }

    pub async fn find_setup(&self, id: i32) -> Result<Option<entity::fleet_setup::Model>, DbErr> {
        entity::prelude::FleetSetup::find_by_id(id).one(self.db).await
    }

    /// Gets a role together with the battle it belongs to.
    ///
    /// # Returns
    /// - `Ok(Some((role, port_battle_id)))` - Role found
    /// - `Ok(None)` - No role with that ID
    pub async fn find_role(&self, id: i32) -> Result<Option<(FleetRole, i32)>, DbErr> {
        let result = entity::prelude::FleetRole::find_by_id(id)
            .find_also_related(entity::prelude::FleetSetup)
            .one(self.db)
            .await?;

        Ok(result.and_then(|(role, setup)| {
            setup.map(|setup| (FleetRole::from_entity(role), setup.port_battle_id))
        }))
    }

    pub async fn delete_setup(&self, id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::FleetSetup::delete_by_id(id)
            .exec(self.db)
            .await?;
        Ok(result.rows_affected > 0)
    }

    pub async fn delete_role(&self, id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::FleetRole::delete_by_id(id)
            .exec(self.db)
            .await?;
        Ok(result.rows_affected > 0)
    }
}
