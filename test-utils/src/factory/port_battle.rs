//! Port battle factory.

use crate::factory::helpers::next_id;
use chrono::{DateTime, Duration, Utc};
use entity::port_battle::PortBattleStatus;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for port battles.
///
/// Defaults:
/// - name: `"Port Battle {id}"`
/// - port: `"Port Royal"`
/// - scheduled_at: one day from now
/// - br_limit: 1000
/// - status: `SCHEDULED`
pub struct PortBattleFactory<'a> {
    db: &'a DatabaseConnection,
    created_by: i32,
    name: String,
    port: String,
    scheduled_at: DateTime<Utc>,
    br_limit: i32,
    status: PortBattleStatus,
}

impl<'a> PortBattleFactory<'a> {
    pub fn new(db: &'a DatabaseConnection, created_by: i32) -> Self {
        let id = next_id();
        Self {
            db,
            created_by,
            name: format!("Port Battle {}", id),
            port: "Port Royal".to_string(),
            scheduled_at: Utc::now() + Duration::days(1),
            br_limit: 1000,
            status: PortBattleStatus::Scheduled,
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn scheduled_at(mut self, scheduled_at: DateTime<Utc>) -> Self {
        self.scheduled_at = scheduled_at;
        self
    }

    pub fn br_limit(mut self, br_limit: i32) -> Self {
        self.br_limit = br_limit;
        self
    }

    pub fn status(mut self, status: PortBattleStatus) -> Self {
        self.status = status;
        self
    }

    pub async fn build(self) -> Result<entity::port_battle::Model, DbErr> {
        entity::port_battle::ActiveModel {
            name: ActiveValue::Set(self.name),
            port: ActiveValue::Set(self.port),
            description: ActiveValue::Set(None),
            scheduled_at: ActiveValue::Set(self.scheduled_at),
            br_limit: ActiveValue::Set(self.br_limit),
            status: ActiveValue::Set(self.status),
            created_by: ActiveValue::Set(self.created_by),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates a scheduled port battle with default values.
pub async fn create_port_battle(
    db: &DatabaseConnection,
    created_by: i32,
) -> Result<entity::port_battle::Model, DbErr> {
    PortBattleFactory::new(db, created_by).build().await
}
