//! Fleet role factory.

use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Creates a `"Bellona"` role worth 250 BR.
pub async fn create_fleet_role(
    db: &DatabaseConnection,
    fleet_setup_id: i32,
) -> Result<entity::fleet_role::Model, DbErr> {
    create_fleet_role_with_br(db, fleet_setup_id, "Bellona", 250).await
}

/// Creates a role with a specific ship class and BR value.
pub async fn create_fleet_role_with_br(
    db: &DatabaseConnection,
    fleet_setup_id: i32,
    ship_class: impl Into<String>,
    br_value: i32,
) -> Result<entity::fleet_role::Model, DbErr> {
    entity::fleet_role::ActiveModel {
        fleet_setup_id: ActiveValue::Set(fleet_setup_id),
        ship_class: ActiveValue::Set(ship_class.into()),
        br_value: ActiveValue::Set(br_value),
        position: ActiveValue::Set(0),
        ..Default::default()
    }
    .insert(db)
    .await
}
