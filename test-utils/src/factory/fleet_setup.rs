//! Fleet setup factory.

use crate::factory::helpers::next_id;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Creates a fleet setup named `"Fleet {id}"` at position 0.
pub async fn create_fleet_setup(
    db: &DatabaseConnection,
    port_battle_id: i32,
) -> Result<entity::fleet_setup::Model, DbErr> {
    create_fleet_setup_with_name(db, port_battle_id, format!("Fleet {}", next_id())).await
}

/// Creates a fleet setup with a specific name.
pub async fn create_fleet_setup_with_name(
    db: &DatabaseConnection,
    port_battle_id: i32,
    name: impl Into<String>,
) -> Result<entity::fleet_setup::Model, DbErr> {
    entity::fleet_setup::ActiveModel {
        port_battle_id: ActiveValue::Set(port_battle_id),
        name: ActiveValue::Set(name.into()),
        position: ActiveValue::Set(0),
        ..Default::default()
    }
    .insert(db)
    .await
}
