//! GDPR request domain models.
//!
//! Users file export or erasure requests; admins process or reject them. Processing an
//! export returns a bundle of everything stored about the user; processing an erasure
//! deletes the user's content and anonymises the user record.

use chrono::{DateTime, Utc};
use entity::{
    gallery_vote::VoteType,
    gdpr_request::{GdprRequestKind, GdprRequestStatus},
};

use crate::{
    model::admin::{
        ExportedFavoriteDto, ExportedVoteDto, GdprProcessResultDto, GdprRequestDto,
        GdprRequestKindDto, GdprRequestStatusDto, UserDataExportDto,
    },
    server::model::{
        gallery::{GalleryComment, GalleryItem},
        signup::Signup,
        user::User,
    },
};

/// Name given to users whose data was erased.
pub const ANONYMIZED_NAME: &str = "Deleted User";

impl From<GdprRequestKind> for GdprRequestKindDto {
    fn from(kind: GdprRequestKind) -> Self {
        match kind {
            GdprRequestKind::Export => Self::Export,
            GdprRequestKind::Delete => Self::Delete,
        }
    }
}

impl From<GdprRequestKindDto> for GdprRequestKind {
    fn from(kind: GdprRequestKindDto) -> Self {
        match kind {
            GdprRequestKindDto::Export => Self::Export,
            GdprRequestKindDto::Delete => Self::Delete,
        }
    }
}

impl From<GdprRequestStatus> for GdprRequestStatusDto {
    fn from(status: GdprRequestStatus) -> Self {
        match status {
            GdprRequestStatus::Pending => Self::Pending,
            GdprRequestStatus::Completed => Self::Completed,
            GdprRequestStatus::Rejected => Self::Rejected,
        }
    }
}

impl From<GdprRequestStatusDto> for GdprRequestStatus {
    fn from(status: GdprRequestStatusDto) -> Self {
        match status {
            GdprRequestStatusDto::Pending => Self::Pending,
            GdprRequestStatusDto::Completed => Self::Completed,
            GdprRequestStatusDto::Rejected => Self::Rejected,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GdprRequest {
    pub id: i32,
    pub user_id: i32,
    pub kind: GdprRequestKind,
    pub status: GdprRequestStatus,
    /// Admin note, set when rejecting.
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
    pub processed_at: Option<DateTime<Utc>>,
    pub processed_by: Option<i32>,
}

impl GdprRequest {
    pub fn from_entity(entity: entity::gdpr_request::Model) -> Self {
        Self {
            id: entity.id,
            user_id: entity.user_id,
            kind: entity.kind,
            status: entity.status,
            note: entity.note,
            created_at: entity.created_at,
            processed_at: entity.processed_at,
            processed_by: entity.processed_by,
        }
    }

    pub fn into_dto(self) -> GdprRequestDto {
        GdprRequestDto {
            id: self.id,
            user_id: self.user_id,
            kind: self.kind.into(),
            status: self.status.into(),
            note: self.note,
            created_at: self.created_at,
            processed_at: self.processed_at,
            processed_by: self.processed_by,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExportedVote {
    pub item_id: i32,
    pub vote_type: VoteType,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExportedFavorite {
    pub item_id: i32,
    pub created_at: DateTime<Utc>,
}

/// Everything the platform stores about one user.
#[derive(Debug, Clone, PartialEq)]
pub struct UserDataExport {
    pub user: User,
    pub gallery_items: Vec<GalleryItem>,
    pub comments: Vec<GalleryComment>,
    pub votes: Vec<ExportedVote>,
    pub favorites: Vec<ExportedFavorite>,
    pub signups: Vec<Signup>,
    pub gdpr_requests: Vec<GdprRequest>,
    pub exported_at: DateTime<Utc>,
}

impl UserDataExport {
    pub fn into_dto(self) -> UserDataExportDto {
        UserDataExportDto {
            user: self.user.into_dto(),
            gallery_items: self
                .gallery_items
                .into_iter()
                .map(GalleryItem::into_dto)
                .collect(),
            comments: self
                .comments
                .into_iter()
                .map(GalleryComment::into_dto)
                .collect(),
            votes: self
                .votes
                .into_iter()
                .map(|v| ExportedVoteDto {
                    item_id: v.item_id,
                    vote_type: v.vote_type.into(),
                    created_at: v.created_at,
                })
                .collect(),
            favorites: self
                .favorites
                .into_iter()
                .map(|f| ExportedFavoriteDto {
                    item_id: f.item_id,
                    created_at: f.created_at,
                })
                .collect(),
            signups: self.signups.into_iter().map(Signup::into_dto).collect(),
            gdpr_requests: self
                .gdpr_requests
                .into_iter()
                .map(GdprRequest::into_dto)
                .collect(),
            exported_at: self.exported_at,
        }
    }
}

/// Outcome of processing a request; `export` is set for export requests.
#[derive(Debug, Clone, PartialEq)]
pub struct GdprProcessResult {
    pub request: GdprRequest,
    pub export: Option<UserDataExport>,
}

impl GdprProcessResult {
    pub fn into_dto(self) -> GdprProcessResultDto {
        GdprProcessResultDto {
            request: self.request.into_dto(),
            export: self.export.map(UserDataExport::into_dto),
        }
    }
}
