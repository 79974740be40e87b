//! User activity entries kept by the in-memory activity logger.

use chrono::{DateTime, Utc};

use crate::model::admin::ActivityEntryDto;

/// Actions recorded in the activity log.
pub mod action {
    pub const LOGIN: &str = "LOGIN";
    pub const LOGOUT: &str = "LOGOUT";
    pub const GALLERY_SUBMIT: &str = "GALLERY_SUBMIT";
    pub const GALLERY_VOTE: &str = "GALLERY_VOTE";
    pub const GALLERY_FAVORITE: &str = "GALLERY_FAVORITE";
    pub const GALLERY_COMMENT: &str = "GALLERY_COMMENT";
    pub const SIGNUP_CREATE: &str = "SIGNUP_CREATE";
    pub const SIGNUP_WITHDRAW: &str = "SIGNUP_WITHDRAW";
    pub const GDPR_REQUEST: &str = "GDPR_REQUEST";
}

/// One thing a user did, with free-form details.
#[derive(Debug, Clone, PartialEq)]
pub struct ActivityEntry {
    pub user_id: i32,
    pub action: String,
    pub details: serde_json::Value,
    pub timestamp: DateTime<Utc>,
}

impl ActivityEntry {
    pub fn into_dto(self) -> ActivityEntryDto {
        ActivityEntryDto {
            user_id: self.user_id,
            action: self.action,
            details: self.details,
            timestamp: self.timestamp,
        }
    }
}

/// Combined activity query.
///
/// Every filter is optional; entries must match all filters that are set.
#[derive(Debug, Clone, Default)]
pub struct ActivityQuery {
    pub user_id: Option<i32>,
    pub action: Option<String>,
    /// Only entries at or after this instant.
    pub since: Option<DateTime<Utc>>,
    /// Maximum number of entries returned, newest first.
    pub limit: Option<usize>,
}

impl ActivityQuery {
    /// Whether `entry` satisfies every filter of this query.
    pub fn matches(&self, entry: &ActivityEntry) -> bool {
        self.user_id.is_none_or(|id| entry.user_id == id)
            && self
                .action
                .as_deref()
                .is_none_or(|action| entry.action == action)
            && self.since.is_none_or(|since| entry.timestamp >= since)
    }
}
