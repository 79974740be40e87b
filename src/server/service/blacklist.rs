use chrono::Utc;
use sea_orm::{DatabaseConnection, TransactionTrait};
use serde_json::json;

use crate::server::{
    data::{audit_log::AuditLogRepository, blacklist::BlacklistRepository},
    error::AppError,
    model::{
        audit_log::{AuditAction, CreateAuditLogParam},
        blacklist::{BlacklistEntry, CreateBlacklistEntryParam},
    },
};

pub struct BlacklistService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> BlacklistService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Gets every entry, active and expired, newest first.
    pub async fn get_all(&self) -> Result<Vec<BlacklistEntry>, AppError> {
        Ok(BlacklistRepository::new(self.db).get_all().await?)
    }

    #[cfg(test)]
    /// Whether `discord_id` is currently banned.
    pub async fn is_blacklisted(&self, discord_id: &str) -> Result<bool, AppError> {
        let entry = BlacklistRepository::new(self.db)
            .find_active(discord_id, Utc::now())
            .await?;
        Ok(entry.is_some())
    }

    /// Adds an entry.
    ///
    /// # Returns
    /// - `Ok(BlacklistEntry)` - The new entry
    /// - `Err(AppError::Conflict)` - The Discord ID already has an active entry
    /// - `Err(AppError::DbErr)` - Database error
    pub async fn add(&self, param: CreateBlacklistEntryParam) -> Result<BlacklistEntry, AppError> {
        let txn = self.db.begin().await?;
        let repo = BlacklistRepository::new(&txn);

        if repo
            .find_active(&param.discord_id, Utc::now())
            .await?
            .is_some()
        {
            return Err(AppError::Conflict(format!(
                "{} is already blacklisted",
                param.discord_id
            )));
        }

        let actor_id = param.created_by;
        let entry = repo.create(param).await?;

        AuditLogRepository::new(&txn)
            .create(CreateAuditLogParam::new(
                actor_id,
                AuditAction::BlacklistAdd,
                entry.id,
                json!({
                    "discord_id": entry.discord_id,
                    "reason": entry.reason,
                    "expires_at": entry.expires_at,
                }),
            ))
            .await?;

        txn.commit().await?;

        Ok(entry)
    }

    /// Removes an entry.
    ///
    /// # Returns
    /// - `Ok(())` - Entry removed
    /// - `Err(AppError::NotFound)` - No entry with that ID
    pub async fn remove(&self, actor_id: i32, id: i32) -> Result<(), AppError> {
        let txn = self.db.begin().await?;
        let repo = BlacklistRepository::new(&txn);

        let entry = repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Blacklist entry not found".to_string()))?;

        repo.delete(id).await?;

        AuditLogRepository::new(&txn)
            .create(CreateAuditLogParam::new(
                actor_id,
                AuditAction::BlacklistRemove,
                id,
                json!({ "discord_id": entry.discord_id }),
            ))
            .await?;

        txn.commit().await?;

        Ok(())
    }
}
