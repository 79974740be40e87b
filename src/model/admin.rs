//! DTOs for the admin tooling: audit log, blacklist, GDPR and user activity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::model::{
    gallery::{GalleryCommentDto, GalleryItemDto, VoteTypeDto},
    signup::SignupDto,
    user::UserDto,
};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, ToSchema)]
pub struct AuditLogDto {
    pub id: i32,
    pub actor_id: Option<i32>,
    pub action: String,
    pub target_type: String,
    pub target_id: Option<String>,
    #[schema(value_type = Object)]
    pub details: serde_json::Value,
    #[serde(with = "chrono::serde::ts_seconds")]
    #[schema(value_type = i64)]
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, ToSchema)]
pub struct PaginatedAuditLogsDto {
    pub entries: Vec<AuditLogDto>,
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
    pub total_pages: u64,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, ToSchema)]
pub struct BlacklistEntryDto {
    pub id: i32,
    pub discord_id: String,
    pub reason: String,
    pub created_by: i32,
    #[serde(with = "chrono::serde::ts_seconds")]
    #[schema(value_type = i64)]
    pub created_at: DateTime<Utc>,
    #[serde(with = "chrono::serde::ts_seconds_option")]
    #[schema(value_type = Option<i64>)]
    pub expires_at: Option<DateTime<Utc>>,
    pub active: bool,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, ToSchema)]
pub struct CreateBlacklistEntryDto {
    pub discord_id: String,
    pub reason: String,
    pub expires_at: Option<String>, // Format: "YYYY-MM-DD HH:MM" in UTC
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GdprRequestKindDto {
    Export,
    Delete,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GdprRequestStatusDto {
    Pending,
    Completed,
    Rejected,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, ToSchema)]
pub struct GdprRequestDto {
    pub id: i32,
    pub user_id: i32,
    pub kind: GdprRequestKindDto,
    pub status: GdprRequestStatusDto,
    pub note: Option<String>,
    #[serde(with = "chrono::serde::ts_seconds")]
    #[schema(value_type = i64)]
    pub created_at: DateTime<Utc>,
    #[serde(with = "chrono::serde::ts_seconds_option")]
    #[schema(value_type = Option<i64>)]
    pub processed_at: Option<DateTime<Utc>>,
    pub processed_by: Option<i32>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, ToSchema)]
pub struct CreateGdprRequestDto {
    pub kind: GdprRequestKindDto,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, ToSchema)]
pub struct RejectGdprRequestDto {
    pub note: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, ToSchema)]
pub struct ExportedVoteDto {
    pub item_id: i32,
    pub vote_type: VoteTypeDto,
    #[serde(with = "chrono::serde::ts_seconds")]
    #[schema(value_type = i64)]
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, ToSchema)]
pub struct ExportedFavoriteDto {
    pub item_id: i32,
    #[serde(with = "chrono::serde::ts_seconds")]
    #[schema(value_type = i64)]
    pub created_at: DateTime<Utc>,
}

/// Everything the platform stores about one user.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, ToSchema)]
pub struct UserDataExportDto {
    pub user: UserDto,
    pub gallery_items: Vec<GalleryItemDto>,
    pub comments: Vec<GalleryCommentDto>,
    pub votes: Vec<ExportedVoteDto>,
    pub favorites: Vec<ExportedFavoriteDto>,
    pub signups: Vec<SignupDto>,
    pub gdpr_requests: Vec<GdprRequestDto>,
    #[serde(with = "chrono::serde::ts_seconds")]
    #[schema(value_type = i64)]
    pub exported_at: DateTime<Utc>,
}

/// Result of processing a GDPR request.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, ToSchema)]
pub struct GdprProcessResultDto {
    pub request: GdprRequestDto,
    /// Present for EXPORT requests.
    pub export: Option<UserDataExportDto>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, ToSchema)]
pub struct ActivityEntryDto {
    pub user_id: i32,
    pub action: String,
    #[schema(value_type = Object)]
    pub details: serde_json::Value,
    #[serde(with = "chrono::serde::ts_seconds")]
    #[schema(value_type = i64)]
    pub timestamp: DateTime<Utc>,
}
