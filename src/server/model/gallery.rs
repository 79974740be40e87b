//! Gallery domain models and parameters.
//!
//! Gallery items are community screenshots and artwork. Submissions start out pending,
//! are approved or rejected by admins and, once approved, collect votes, favorites and
//! comments.

use chrono::{DateTime, Utc};
use entity::{gallery_item::GalleryStatus, gallery_vote::VoteType};

use crate::{
    model::gallery::{
        CreateGalleryItemDto, GalleryCommentDto, GalleryItemDetailsDto, GalleryItemDto,
        GallerySortDto, GalleryStatusDto, PaginatedGalleryItemsDto, VoteResultDto, VoteTypeDto,
    },
    server::error::AppError,
};

/// Maximum title length in characters.
pub const MAX_TITLE_LENGTH: usize = 100;
/// Maximum comment length in characters.
pub const MAX_COMMENT_LENGTH: usize = 1000;

impl From<GalleryStatus> for GalleryStatusDto {
    fn from(status: GalleryStatus) -> Self {
        match status {
            GalleryStatus::Pending => Self::Pending,
            GalleryStatus::Approved => Self::Approved,
            GalleryStatus::Rejected => Self::Rejected,
        }
    }
}

impl From<VoteType> for VoteTypeDto {
    fn from(vote_type: VoteType) -> Self {
        match vote_type {
            VoteType::Up => Self::Up,
            VoteType::Down => Self::Down,
        }
    }
}

impl From<VoteTypeDto> for VoteType {
    fn from(vote_type: VoteTypeDto) -> Self {
        match vote_type {
            VoteTypeDto::Up => Self::Up,
            VoteTypeDto::Down => Self::Down,
        }
    }
}

/// Gallery item as seen by a particular viewer.
#[derive(Debug, Clone, PartialEq)]
pub struct GalleryItem {
    pub id: i32,
    pub author_id: i32,
    /// Display name of the author at query time.
    pub author_name: String,
    pub title: String,
    pub description: Option<String>,
    pub image_url: String,
    pub category: String,
    pub status: GalleryStatus,
    pub upvotes: i32,
    pub downvotes: i32,
    pub created_at: DateTime<Utc>,
    pub moderated_by: Option<i32>,
    pub moderated_at: Option<DateTime<Utc>>,
    /// The viewer's vote on this item.
    pub user_vote: Option<VoteType>,
    /// Whether the viewer has favorited this item.
    pub favorited: bool,
}

impl GalleryItem {
    /// Converts an item and its (optional) author into a domain model without viewer state.
    ///
    /// Authors are always present thanks to the foreign key; a missing author is
    /// rendered as "Unknown".
    pub fn from_entity(
        entity: entity::gallery_item::Model,
        author: Option<entity::user::Model>,
    ) -> Self {
        Self {
            id: entity.id,
            author_id: entity.author_id,
            author_name: author
                .map(|a| a.name)
                .unwrap_or_else(|| "Unknown".to_string()),
            title: entity.title,
            description: entity.description,
            image_url: entity.image_url,
            category: entity.category,
            status: entity.status,
            upvotes: entity.upvotes,
            downvotes: entity.downvotes,
            created_at: entity.created_at,
            moderated_by: entity.moderated_by,
            moderated_at: entity.moderated_at,
            user_vote: None,
            favorited: false,
        }
    }

    /// Net score, upvotes minus downvotes.
    pub fn score(&self) -> i32 {
        self.upvotes - self.downvotes
    }

    pub fn into_dto(self) -> GalleryItemDto {
        let score = self.score();

        GalleryItemDto {
            id: self.id,
            author_id: self.author_id,
            author_name: self.author_name,
            title: self.title,
            description: self.description,
            image_url: self.image_url,
            category: self.category,
            status: self.status.into(),
            upvotes: self.upvotes,
            downvotes: self.downvotes,
            score,
            user_vote: self.user_vote.map(Into::into),
            favorited: self.favorited,
            created_at: self.created_at,
        }
    }
}

/// Gallery item together with its comments, oldest comment first.
#[derive(Debug, Clone, PartialEq)]
pub struct GalleryItemDetails {
    pub item: GalleryItem,
    pub comments: Vec<GalleryComment>,
}

impl GalleryItemDetails {
    pub fn into_dto(self) -> GalleryItemDetailsDto {
        GalleryItemDetailsDto {
            item: self.item.into_dto(),
            comments: self
                .comments
                .into_iter()
                .map(GalleryComment::into_dto)
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PaginatedGalleryItems {
    pub items: Vec<GalleryItem>,
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
    pub total_pages: u64,
}

impl PaginatedGalleryItems {
    pub fn into_dto(self) -> PaginatedGalleryItemsDto {
        PaginatedGalleryItemsDto {
            items: self.items.into_iter().map(GalleryItem::into_dto).collect(),
            total: self.total,
            page: self.page,
            per_page: self.per_page,
            total_pages: self.total_pages,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GalleryComment {
    pub id: i32,
    pub item_id: i32,
    pub author_id: i32,
    pub author_name: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl GalleryComment {
    pub fn from_entity(
        entity: entity::gallery_comment::Model,
        author: Option<entity::user::Model>,
    ) -> Self {
        Self {
            id: entity.id,
            item_id: entity.item_id,
            author_id: entity.author_id,
            author_name: author
                .map(|a| a.name)
                .unwrap_or_else(|| "Unknown".to_string()),
            content: entity.content,
            created_at: entity.created_at,
        }
    }

    pub fn into_dto(self) -> GalleryCommentDto {
        GalleryCommentDto {
            id: self.id,
            item_id: self.item_id,
            author_id: self.author_id,
            author_name: self.author_name,
            content: self.content,
            created_at: self.created_at,
        }
    }
}

/// Ordering of the public gallery listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GallerySort {
    /// Most recently submitted first.
    #[default]
    Newest,
    /// Highest score first, newest first among equal scores.
    Top,
}

impl From<GallerySortDto> for GallerySort {
    fn from(sort: GallerySortDto) -> Self {
        match sort {
            GallerySortDto::Newest => Self::Newest,
            GallerySortDto::Top => Self::Top,
        }
    }
}

/// Parameters for listing gallery items.
#[derive(Debug, Clone)]
pub struct ListGalleryItemsParam {
    /// Restrict to one moderation state.
    pub status: GalleryStatus,
    /// Restrict to one category.
    pub category: Option<String>,
    pub sort: GallerySort,
    pub page: u64,
    pub per_page: u64,
}

/// Parameters for submitting a gallery item.
#[derive(Debug, Clone)]
pub struct CreateGalleryItemParam {
    pub author_id: i32,
    pub title: String,
    pub description: Option<String>,
    pub image_url: String,
    pub category: String,
}

impl CreateGalleryItemParam {
    /// Builds and validates submission parameters from the request body.
    ///
    /// # Returns
    /// - `Ok(CreateGalleryItemParam)` - Trimmed, validated parameters
    /// - `Err(AppError::BadRequest)` - Title empty or too long, category empty, or the
    ///   image URL is not an http(s) URL
    pub fn from_dto(author_id: i32, dto: CreateGalleryItemDto) -> Result<Self, AppError> {
        let title = dto.title.trim().to_string();
        if title.is_empty() || title.chars().count() > MAX_TITLE_LENGTH {
            return Err(AppError::BadRequest(format!(
                "Title must be between 1 and {} characters",
                MAX_TITLE_LENGTH
            )));
        }

        let category = dto.category.trim().to_string();
        if category.is_empty() {
            return Err(AppError::BadRequest("Category is required".to_string()));
        }

        let image_url = url::Url::parse(dto.image_url.trim())
            .map_err(|_| AppError::BadRequest("Image URL is not a valid URL".to_string()))?;
        if !matches!(image_url.scheme(), "http" | "https") {
            return Err(AppError::BadRequest(
                "Image URL must use http or https".to_string(),
            ));
        }

        let description = dto
            .description
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty());

        Ok(Self {
            author_id,
            title,
            description,
            image_url: image_url.to_string(),
            category,
        })
    }
}

/// Validates and trims comment content.
///
/// # Returns
/// - `Ok(String)` - Trimmed content between 1 and 1000 characters
/// - `Err(AppError::BadRequest)` - Content empty or too long
pub fn validate_comment(content: &str) -> Result<String, AppError> {
    let content = content.trim();
    if content.is_empty() || content.chars().count() > MAX_COMMENT_LENGTH {
        return Err(AppError::BadRequest(format!(
            "Comment must be between 1 and {} characters",
            MAX_COMMENT_LENGTH
        )));
    }

    Ok(content.to_string())
}

/// Counters and the caller's vote after a vote toggle.
#[derive(Debug, Clone, PartialEq)]
pub struct VoteOutcome {
    pub upvotes: i32,
    pub downvotes: i32,
    pub user_vote: Option<VoteType>,
}

impl VoteOutcome {
    pub fn into_dto(self) -> VoteResultDto {
        VoteResultDto {
            upvotes: self.upvotes,
            downvotes: self.downvotes,
            user_vote: self.user_vote.map(Into::into),
        }
    }
}
