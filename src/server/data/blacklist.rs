//! Blacklist repository.

use chrono::{DateTime, Utc};
use sea_orm::{
    sea_query::Condition, ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr,
    EntityTrait, QueryFilter, QueryOrder,
};

use crate::server::model::blacklist::{BlacklistEntry, CreateBlacklistEntryParam};

pub struct BlacklistRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> BlacklistRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(&self, param: CreateBlacklistEntryParam) -> Result<BlacklistEntry, DbErr> {
        let entity = entity::blacklist_entry::ActiveModel {
            discord_id: ActiveValue::Set(param.discord_id),
            reason: ActiveValue::Set(param.reason),
            created_by: ActiveValue::Set(param.created_by),
            created_at: ActiveValue::Set(Utc::now()),
            expires_at: ActiveValue::Set(param.expires_at),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(BlacklistEntry::from_entity(entity))
    }

    /// Every entry, active and expired, newest first.
    pub async fn get_all(&self) -> Result<Vec<BlacklistEntry>, DbErr> {
        let entities = entity::prelude::BlacklistEntry::find()
            .order_by_desc(entity::blacklist_entry::Column::CreatedAt)
            .order_by_desc(entity::blacklist_entry::Column::Id)
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(BlacklistEntry::from_entity).collect())
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<BlacklistEntry>, DbErr> {
        let entity = entity::prelude::BlacklistEntry::find_by_id(id)
            .one(self.db)
            .await?;

        Ok(entity.map(BlacklistEntry::from_entity))
    }

    /// Gets the entry banning `discord_id` at `now`, if any.
    pub async fn find_active(
        &self,
        discord_id: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<BlacklistEntry>, DbErr> {
        let entity = entity::prelude::BlacklistEntry::find()
            .filter(entity::blacklist_entry::Column::DiscordId.eq(discord_id))
            .filter(
                Condition::any()
                    .add(entity::blacklist_entry::Column::ExpiresAt.is_null())
                    .add(entity::blacklist_entry::Column::ExpiresAt.gt(now)),
            )
            .one(self.db)
            .await?;

        Ok(entity.map(BlacklistEntry::from_entity))
    }

    pub async fn delete(&self, id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::BlacklistEntry::delete_by_id(id)
            .exec(self.db)
            .await?;
        Ok(result.rows_affected > 0)
    }
}
