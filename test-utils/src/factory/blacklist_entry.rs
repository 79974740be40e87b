//! Blacklist entry factory.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Creates a blacklist entry for `discord_id`.
///
/// # Arguments
/// - `expires_at` - `None` for a permanent entry
pub async fn create_blacklist_entry(
    db: &DatabaseConnection,
    discord_id: impl Into<String>,
    created_by: i32,
    expires_at: Option<DateTime<Utc>>,
) -> Result<entity::blacklist_entry::Model, DbErr> {
    entity::blacklist_entry::ActiveModel {
        discord_id: ActiveValue::Set(discord_id.into()),
        reason: ActiveValue::Set("Griefing during port battle".to_string()),
        created_by: ActiveValue::Set(created_by),
        created_at: ActiveValue::Set(Utc::now()),
        expires_at: ActiveValue::Set(expires_at),
        ..Default::default()
    }
    .insert(db)
    .await
}
