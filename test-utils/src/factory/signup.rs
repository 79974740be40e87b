//! Signup factory.

use chrono::Utc;
use entity::signup::SignupStatus;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Creates a `PENDING` signup.
pub async fn create_signup(
    db: &DatabaseConnection,
    port_battle_id: i32,
    role_id: i32,
    user_id: i32,
) -> Result<entity::signup::Model, DbErr> {
    create_signup_with_status(db, port_battle_id, role_id, user_id, SignupStatus::Pending).await
}

/// Creates a signup already in the given status.
pub async fn create_signup_with_status(
    db: &DatabaseConnection,
    port_battle_id: i32,
    role_id: i32,
    user_id: i32,
    status: SignupStatus,
) -> Result<entity::signup::Model, DbErr> {
    let now = Utc::now();
    entity::signup::ActiveModel {
        port_battle_id: ActiveValue::Set(port_battle_id),
        role_id: ActiveValue::Set(role_id),
        user_id: ActiveValue::Set(user_id),
        status: ActiveValue::Set(status),
        note: ActiveValue::Set(None),
        created_at: ActiveValue::Set(now),
        updated_at: ActiveValue::Set(now),
        ..Default::default()
    }
    .insert(db)
    .await
}
