//! Blacklist domain models and parameters.

use chrono::{DateTime, Utc};

use crate::{
    model::admin::{BlacklistEntryDto, CreateBlacklistEntryDto},
    server::{error::AppError, util::parse::parse_optional_datetime},
};

/// A ban of one Discord account, optionally time limited.
#[derive(Debug, Clone, PartialEq)]
pub struct BlacklistEntry {
    pub id: i32,
    pub discord_id: String,
    pub reason: String,
    pub created_by: i32,
    pub created_at: DateTime<Utc>,
    /// `None` bans permanently.
    pub expires_at: Option<DateTime<Utc>>,
}

impl BlacklistEntry {
    pub fn from_entity(entity: entity::blacklist_entry::Model) -> Self {
        Self {
            id: entity.id,
            discord_id: entity.discord_id,
            reason: entity.reason,
            created_by: entity.created_by,
            created_at: entity.created_at,
            expires_at: entity.expires_at,
        }
    }

    /// An entry is active while it has no expiry or the expiry lies after `now`.
    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_none_or(|expires_at| expires_at > now)
    }

    pub fn into_dto(self) -> BlacklistEntryDto {
        let active = self.is_active(Utc::now());

        BlacklistEntryDto {
            id: self.id,
            discord_id: self.discord_id,
            reason: self.reason,
            created_by: self.created_by,
            created_at: self.created_at,
            expires_at: self.expires_at,
            active,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateBlacklistEntryParam {
    pub discord_id: String,
    pub reason: String,
    pub created_by: i32,
    pub expires_at: Option<DateTime<Utc>>,
}

impl CreateBlacklistEntryParam {
    /// Converts and validates the request body.
    ///
    /// # Returns
    /// - `Ok(CreateBlacklistEntryParam)` - Converted parameters
    /// - `Err(AppError::BadRequest)` - Empty Discord ID or reason, malformed or past expiry
    pub fn from_dto(created_by: i32, dto: CreateBlacklistEntryDto) -> Result<Self, AppError> {
        let discord_id = dto.discord_id.trim().to_string();
        if discord_id.is_empty() {
            return Err(AppError::BadRequest("Discord ID is required".to_string()));
        }

        let reason = dto.reason.trim().to_string();
        if reason.is_empty() {
            return Err(AppError::BadRequest("Reason is required".to_string()));
        }

        let expires_at = parse_optional_datetime("expires_at", dto.expires_at.as_deref())?;
        if expires_at.is_some_and(|at| at <= Utc::now()) {
            return Err(AppError::BadRequest(
                "Expiry must lie in the future".to_string(),
            ));
        }

        Ok(Self {
            discord_id,
            reason,
            created_by,
            expires_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn entry(expires_at: Option<DateTime<Utc>>) -> BlacklistEntry {
        BlacklistEntry {
            id: 1,
            discord_id: "42".to_string(),
            reason: "griefing".to_string(),
            created_by: 1,
            created_at: Utc::now(),
            expires_at,
        }
    }

    #[test]
    fn permanent_entries_are_active() {
        assert!(entry(None).is_active(Utc::now()));
    }

    #[test]
    fn expired_entries_are_inactive() {
        let now = Utc::now();
        assert!(entry(Some(now + Duration::hours(1))).is_active(now));
        assert!(!entry(Some(now - Duration::hours(1))).is_active(now));
        assert!(!entry(Some(now)).is_active(now));
    }

    #[test]
    fn rejects_past_expiry() {
        let result = CreateBlacklistEntryParam::from_dto(
            1,
            CreateBlacklistEntryDto {
                discord_id: "42".to_string(),
                reason: "griefing".to_string(),
                expires_at: Some("2001-01-01 00:00".to_string()),
            },
        );

        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }
}
