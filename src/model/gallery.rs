use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GalleryStatusDto {
    Pending,
    Approved,
    Rejected,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VoteTypeDto {
    Up,
    Down,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum GallerySortDto {
    #[default]
    Newest,
    Top,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, ToSchema)]
pub struct GalleryItemDto {
    pub id: i32,
    pub author_id: i32,
    pub author_name: String,
    pub title: String,
    pub description: Option<String>,
    pub image_url: String,
    pub category: String,
    pub status: GalleryStatusDto,
    pub upvotes: i32,
    pub downvotes: i32,
    pub score: i32,
    /// The caller's vote, `None` when not voted or not logged in.
    pub user_vote: Option<VoteTypeDto>,
    pub favorited: bool,
    #[serde(with = "chrono::serde::ts_seconds")]
    #[schema(value_type = i64)]
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, ToSchema)]
pub struct GalleryItemDetailsDto {
    #[serde(flatten)]
    pub item: GalleryItemDto,
    pub comments: Vec<GalleryCommentDto>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, ToSchema)]
pub struct PaginatedGalleryItemsDto {
    pub items: Vec<GalleryItemDto>,
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
    pub total_pages: u64,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, ToSchema)]
pub struct CreateGalleryItemDto {
    pub title: String,
    pub description: Option<String>,
    pub image_url: String,
    pub category: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, ToSchema)]
pub struct VoteDto {
    #[serde(rename = "type")]
    pub vote_type: VoteTypeDto,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, ToSchema)]
pub struct VoteResultDto {
    pub upvotes: i32,
    pub downvotes: i32,
    pub user_vote: Option<VoteTypeDto>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, ToSchema)]
pub struct FavoriteResultDto {
    pub favorited: bool,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, ToSchema)]
pub struct GalleryCommentDto {
    pub id: i32,
    pub item_id: i32,
    pub author_id: i32,
    pub author_name: String,
    pub content: String,
    #[serde(with = "chrono::serde::ts_seconds")]
    #[schema(value_type = i64)]
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, ToSchema)]
pub struct CreateCommentDto {
    pub content: String,
}
