//! Gallery service for submissions, voting, favorites, comments and moderation.

use entity::{gallery_item::GalleryStatus, gallery_vote::VoteType};
use sea_orm::{ConnectionTrait, DatabaseConnection, TransactionTrait};
use serde_json::json;

use crate::{
    model::api::page_size,
    server::{
        data::{
            audit_log::AuditLogRepository,
            gallery::{
                GalleryCommentRepository, GalleryFavoriteRepository, GalleryItemRepository,
                GalleryVoteRepository,
            },
        },
        error::{auth::AuthError, AppError},
        model::{
            audit_log::{AuditAction, CreateAuditLogParam},
            gallery::{
                validate_comment, CreateGalleryItemParam, GalleryComment, GalleryItem,
                GalleryItemDetails, ListGalleryItemsParam, PaginatedGalleryItems, VoteOutcome,
            },
            user::User,
        },
    },
};

const CONCURRENT_VOTE: &str = "Another vote on this item is in progress, retry";
const CONCURRENT_FAVORITE: &str = "Another favorite change on this item is in progress, retry";

pub struct GalleryService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> GalleryService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists items in one moderation state.
    ///
    /// When `viewer_id` is set each item carries that user's vote and favorite flag.
    pub async fn list(
        &self,
        viewer_id: Option<i32>,
        mut param: ListGalleryItemsParam,
    ) -> Result<PaginatedGalleryItems, AppError> {
        param.per_page = page_size(param.per_page);

        let (mut items, total) = GalleryItemRepository::new(self.db).list(&param).await?;

        if let Some(viewer_id) = viewer_id {
            self.apply_viewer_state(viewer_id, &mut items).await?;
        }

        let total_pages = (total as f64 / param.per_page as f64).ceil() as u64;

        Ok(PaginatedGalleryItems {
            items,
            total,
            page: param.page,
            per_page: param.per_page,
            total_pages,
        })
    }

    /// Gets an item with its comments.
    ///
    /// Pending and rejected items are reported as missing to everyone except their author
    /// and admins.
    ///
    /// # Returns
    /// - `Ok(GalleryItemDetails)` - Item visible to the viewer
    /// - `Err(AppError::NotFound)` - No such item, or the viewer may not see it
    pub async fn get(
        &self,
        viewer: Option<&User>,
        id: i32,
    ) -> Result<GalleryItemDetails, AppError> {
        let mut item = GalleryItemRepository::new(self.db)
            .find_by_id(id)
            .await?
            .filter(|item| {
                item.status == GalleryStatus::Approved
                    || viewer.is_some_and(|v| v.admin || v.id == item.author_id)
            })
            .ok_or_else(|| AppError::NotFound("Gallery item not found".to_string()))?;

        if let Some(viewer) = viewer {
            self.apply_viewer_state(viewer.id, std::slice::from_mut(&mut item))
                .await?;
        }

        let comments = GalleryCommentRepository::new(self.db)
            .get_by_item(id)
            .await?;

        Ok(GalleryItemDetails { item, comments })
    }

    /// Submits an item for moderation.
    pub async fn create(&self, param: CreateGalleryItemParam) -> Result<GalleryItem, AppError> {
        let item = GalleryItemRepository::new(self.db).create(param).await?;

        tracing::info!("Gallery item {} submitted by user {}", item.id, item.author_id);

        Ok(item)
    }

    /// Deletes an item on behalf of its author or an admin.
    ///
    /// Admin deletions of other users' items are audited.
    ///
    /// # Returns
    /// - `Ok(())` - Item deleted
    /// - `Err(AppError::NotFound)` - No item with that ID
    /// - `Err(AuthError::AccessDenied)` - Actor is neither author nor admin
    pub async fn delete(&self, actor: &User, id: i32) -> Result<(), AppError> {
        let txn = self.db.begin().await?;
        let repo = GalleryItemRepository::new(&txn);

        let item = repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Gallery item not found".to_string()))?;

        if item.author_id != actor.id && !actor.admin {
            return Err(AuthError::AccessDenied(
                actor.id,
                format!("delete gallery item {}", id),
            )
            .into());
        }

        repo.delete(id).await?;

        if item.author_id != actor.id {
            AuditLogRepository::new(&txn)
                .create(CreateAuditLogParam::new(
                    actor.id,
                    AuditAction::GalleryDelete,
                    id,
                    json!({ "title": item.title, "author_id": item.author_id }),
                ))
                .await?;
        }

        txn.commit().await?;

        Ok(())
    }

    /// Toggles a vote.
    ///
    /// An existing vote by the user is removed. If it had the requested type the toggle
    /// ends there; otherwise a vote of the requested type replaces it. Counters are
    /// recomputed from the vote rows inside the same transaction.
    ///
    /// # Returns
    /// - `Ok(VoteOutcome)` - New counters and the user's resulting vote
    /// - `Err(AppError::NotFound)` - No approved item with that ID
    pub async fn vote(
        &self,
        user_id: i32,
        item_id: i32,
        vote_type: VoteType,
    ) -> Result<VoteOutcome, AppError> {
        let txn = self.db.begin().await?;

        require_approved(&txn, item_id).await?;

        let vote_repo = GalleryVoteRepository::new(&txn);
        let user_vote = match vote_repo.find(item_id, user_id).await? {
            Some(existing) => {
                vote_repo.delete(existing.id).await?;
                if existing.vote_type == vote_type {
                    None
                } else {
                    vote_repo
                        .create(item_id, user_id, vote_type)
                        .await
                        .map_err(|e| AppError::conflict_on_duplicate(e, CONCURRENT_VOTE))?;
                    Some(vote_type)
                }
            }
            None => {
                vote_repo
                    .create(item_id, user_id, vote_type)
                    .await
                    .map_err(|e| AppError::conflict_on_duplicate(e, CONCURRENT_VOTE))?;
                Some(vote_type)
            }
        };

        let (upvotes, downvotes) = recount_votes(&txn, item_id).await?;

        txn.commit().await?;

        Ok(VoteOutcome {
            upvotes,
            downvotes,
            user_vote,
        })
    }

    /// Toggles a favorite and returns whether the item is now favorited.
    pub async fn toggle_favorite(&self, user_id: i32, item_id: i32) -> Result<bool, AppError> {
        let txn = self.db.begin().await?;

        require_approved(&txn, item_id).await?;

        let repo = GalleryFavoriteRepository::new(&txn);
        let favorited = match repo.find(item_id, user_id).await? {
            Some(existing) => {
                repo.delete(existing.id).await?;
                false
            }
            None => {
                repo.create(item_id, user_id)
                    .await
                    .map_err(|e| AppError::conflict_on_duplicate(e, CONCURRENT_FAVORITE))?;
                true
            }
        };

        txn.commit().await?;

        Ok(favorited)
    }

    /// Gets the approved items `user_id` favorited.
    pub async fn get_favorites(&self, user_id: i32) -> Result<Vec<GalleryItem>, AppError> {
        let ids = GalleryFavoriteRepository::new(self.db)
            .get_item_ids_by_user(user_id)
            .await?;

        let mut items = GalleryItemRepository::new(self.db)
            .find_many_with_status(ids, GalleryStatus::Approved)
            .await?;
        self.apply_viewer_state(user_id, &mut items).await?;

        Ok(items)
    }

    /// Comments on an approved item.
    ///
    /// # Returns
    /// - `Ok(GalleryComment)` - The stored comment
    /// - `Err(AppError::BadRequest)` - Content empty or too long
    /// - `Err(AppError::NotFound)` - No approved item with that ID
    pub async fn add_comment(
        &self,
        author_id: i32,
        item_id: i32,
        content: &str,
    ) -> Result<GalleryComment, AppError> {
        let content = validate_comment(content)?;

        require_approved(self.db, item_id).await?;

        let comment = GalleryCommentRepository::new(self.db)
            .create(item_id, author_id, content)
            .await?;

        Ok(comment)
    }

    /// Deletes a comment on behalf of its author or an admin.
    pub async fn delete_comment(
        &self,
        actor: &User,
        item_id: i32,
        comment_id: i32,
    ) -> Result<(), AppError> {
        let txn = self.db.begin().await?;
        let repo = GalleryCommentRepository::new(&txn);

        let comment = repo
            .find_by_id(comment_id)
            .await?
            .filter(|c| c.item_id == item_id)
            .ok_or_else(|| AppError::NotFound("Comment not found".to_string()))?;

        if comment.author_id != actor.id && !actor.admin {
            return Err(AuthError::AccessDenied(
                actor.id,
                format!("delete comment {}", comment_id),
            )
            .into());
        }

        repo.delete(comment_id).await?;

        if comment.author_id != actor.id {
            AuditLogRepository::new(&txn)
                .create(CreateAuditLogParam::new(
                    actor.id,
                    AuditAction::CommentDelete,
                    comment_id,
                    json!({ "item_id": item_id, "author_id": comment.author_id }),
                ))
                .await?;
        }

        txn.commit().await?;

        Ok(())
    }

    /// Approves or rejects a pending item.
    ///
    /// # Returns
    /// - `Ok(GalleryItem)` - The moderated item
    /// - `Err(AppError::NotFound)` - No item with that ID
    /// - `Err(AppError::Conflict)` - The item was already moderated
    pub async fn moderate(
        &self,
        moderator_id: i32,
        item_id: i32,
        approve: bool,
    ) -> Result<GalleryItem, AppError> {
        let txn = self.db.begin().await?;
        let repo = GalleryItemRepository::new(&txn);

        let item = repo
            .find_by_id(item_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Gallery item not found".to_string()))?;

        if item.status != GalleryStatus::Pending {
            return Err(AppError::Conflict(
                "Gallery item has already been moderated".to_string(),
            ));
        }

        let (status, action) = if approve {
            (GalleryStatus::Approved, AuditAction::GalleryApprove)
        } else {
            (GalleryStatus::Rejected, AuditAction::GalleryReject)
        };

        let item = repo
            .set_status(item_id, status, moderator_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Gallery item not found".to_string()))?;

        AuditLogRepository::new(&txn)
            .create(CreateAuditLogParam::new(
                moderator_id,
                action,
                item_id,
                json!({ "title": item.title, "author_id": item.author_id }),
            ))
            .await?;

        txn.commit().await?;

        Ok(item)
    }

    async fn apply_viewer_state(
        &self,
        viewer_id: i32,
        items: &mut [GalleryItem],
    ) -> Result<(), AppError> {
        let ids: Vec<i32> = items.iter().map(|item| item.id).collect();

        let votes = GalleryVoteRepository::new(self.db)
            .get_user_votes(viewer_id, ids.clone())
            .await?;
        let favorites = GalleryFavoriteRepository::new(self.db)
            .get_favorited_among(viewer_id, ids)
            .await?;

        for item in items.iter_mut() {
            item.user_vote = votes.get(&item.id).copied();
            item.favorited = favorites.contains(&item.id);
        }

        Ok(())
    }
}

/// Fails with 404 unless `item_id` is an approved item.
async fn require_approved<C: ConnectionTrait>(db: &C, item_id: i32) -> Result<GalleryItem, AppError> {
    GalleryItemRepository::new(db)
        .find_by_id(item_id)
        .await?
        .filter(|item| item.status == GalleryStatus::Approved)
        .ok_or_else(|| AppError::NotFound("Gallery item not found".to_string()))
}

/// Recomputes an item's counters from its vote rows and stores them.
pub(crate) async fn recount_votes<C: ConnectionTrait>(
    db: &C,
    item_id: i32,
) -> Result<(i32, i32), AppError> {
    let vote_repo = GalleryVoteRepository::new(db);
    let upvotes = vote_repo.count(item_id, VoteType::Up).await? as i32;
    let downvotes = vote_repo.count(item_id, VoteType::Down).await? as i32;

    GalleryItemRepository::new(db)
        .set_vote_counts(item_id, upvotes, downvotes)
        .await?;

    Ok((upvotes, downvotes))
}
