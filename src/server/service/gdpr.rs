//! GDPR request handling: filing, export bundles and erasure.

use chrono::Utc;
use entity::gdpr_request::{GdprRequestKind, GdprRequestStatus};
use sea_orm::{ActiveEnum, ConnectionTrait, DatabaseConnection, TransactionTrait};
use serde_json::json;

use crate::server::{
    data::{
        audit_log::AuditLogRepository,
        gallery::{
            GalleryCommentRepository, GalleryFavoriteRepository, GalleryItemRepository,
            GalleryVoteRepository,
        },
        gdpr::GdprRequestRepository,
        signup::SignupRepository,
        user::UserRepository,
    },
    error::AppError,
    model::{
        audit_log::{AuditAction, CreateAuditLogParam},
        gdpr::{GdprProcessResult, GdprRequest, UserDataExport},
    },
    service::gallery::recount_votes,
};

pub struct GdprService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> GdprService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Files a request for the calling user.
    ///
    /// # Returns
    /// - `Ok(GdprRequest)` - The pending request
    /// - `Err(AppError::Conflict)` - A request of that kind is already pending
    pub async fn create_request(
        &self,
        user_id: i32,
        kind: GdprRequestKind,
    ) -> Result<GdprRequest, AppError> {
        let txn = self.db.begin().await?;
        let repo = GdprRequestRepository::new(&txn);

        if repo.has_pending(user_id, kind).await? {
            return Err(AppError::Conflict(format!(
                "A {} request is already pending",
                kind.to_value()
            )));
        }

        let request = repo.create(user_id, kind).await?;

        txn.commit().await?;

        tracing::info!(
            "User {} filed GDPR {} request {}",
            user_id,
            kind.to_value(),
            request.id
        );

        Ok(request)
    }

    /// Requests filed by `user_id`, newest first.
    pub async fn get_user_requests(&self, user_id: i32) -> Result<Vec<GdprRequest>, AppError> {
        Ok(GdprRequestRepository::new(self.db)
            .get_by_user(user_id)
            .await?)
    }

    /// All requests, optionally filtered by status, oldest first.
    pub async fn get_all(
        &self,
        status: Option<GdprRequestStatus>,
    ) -> Result<Vec<GdprRequest>, AppError> {
        Ok(GdprRequestRepository::new(self.db).get_all(status).await?)
    }

    /// Carries out a pending request.
    ///
    /// Export requests return the user's data bundle. Delete requests erase the user's
    /// content and anonymise the account. Either way the request is marked completed.
    ///
    /// # Returns
    /// - `Ok(GdprProcessResult)` - The closed request, with the bundle for exports
    /// - `Err(AppError::NotFound)` - No request with that ID
    /// - `Err(AppError::Conflict)` - The request is not pending
    pub async fn process(
        &self,
        admin_id: i32,
        request_id: i32,
    ) -> Result<GdprProcessResult, AppError> {
        let txn = self.db.begin().await?;
        let repo = GdprRequestRepository::new(&txn);

        let request = find_pending(&repo, request_id).await?;

        let export = match request.kind {
            GdprRequestKind::Export => Some(build_export(&txn, request.user_id).await?),
            GdprRequestKind::Delete => {
                erase_user(&txn, request.user_id).await?;
                None
            }
        };

        if !repo
            .close_if_pending(request_id, GdprRequestStatus::Completed, admin_id, None)
            .await?
        {
            return Err(AppError::Conflict(
                "GDPR request has already been processed".to_string(),
            ));
        }

        AuditLogRepository::new(&txn)
            .create(CreateAuditLogParam::new(
                admin_id,
                AuditAction::GdprProcess,
                request_id,
                json!({ "user_id": request.user_id, "kind": request.kind.to_value() }),
            ))
            .await?;

        let request = repo
            .find_by_id(request_id)
            .await?
            .ok_or_else(|| AppError::NotFound("GDPR request not found".to_string()))?;

        txn.commit().await?;

        tracing::info!(
            "GDPR {} request {} for user {} processed by {}",
            request.kind.to_value(),
            request.id,
            request.user_id,
            admin_id
        );

        Ok(GdprProcessResult { request, export })
    }

    /// Rejects a pending request with an optional note.
    pub async fn reject(
        &self,
        admin_id: i32,
        request_id: i32,
        note: Option<String>,
    ) -> Result<GdprRequest, AppError> {
        let note = note
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty());

        let txn = self.db.begin().await?;
        let repo = GdprRequestRepository::new(&txn);

        let request = find_pending(&repo, request_id).await?;

        if !repo
            .close_if_pending(
                request_id,
                GdprRequestStatus::Rejected,
                admin_id,
                note.clone(),
            )
            .await?
        {
            return Err(AppError::Conflict(
                "GDPR request has already been processed".to_string(),
            ));
        }

        AuditLogRepository::new(&txn)
            .create(CreateAuditLogParam::new(
                admin_id,
                AuditAction::GdprReject,
                request_id,
                json!({ "user_id": request.user_id, "note": note }),
            ))
            .await?;

        let request = repo
            .find_by_id(request_id)
            .await?
            .ok_or_else(|| AppError::NotFound("GDPR request not found".to_string()))?;

        txn.commit().await?;

        Ok(request)
    }

    /// Builds the export bundle for any user without a request.
    pub async fn export_user(&self, user_id: i32) -> Result<UserDataExport, AppError> {
        build_export(self.db, user_id).await
    }
}

async fn find_pending<C: ConnectionTrait>(
    repo: &GdprRequestRepository<'_, C>,
    request_id: i32,
) -> Result<GdprRequest, AppError> {
    let request = repo
        .find_by_id(request_id)
        .await?
        .ok_or_else(|| AppError::NotFound("GDPR request not found".to_string()))?;

    if request.status != GdprRequestStatus::Pending {
        return Err(AppError::Conflict(
            "Only pending GDPR requests can be processed".to_string(),
        ));
    }

    Ok(request)
}

async fn build_export<C: ConnectionTrait>(
    db: &C,
    user_id: i32,
) -> Result<UserDataExport, AppError> {
    let user = UserRepository::new(db)
        .find_by_id(user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    Ok(UserDataExport {
        user,
        gallery_items: GalleryItemRepository::new(db).get_by_author(user_id).await?,
        comments: GalleryCommentRepository::new(db)
            .get_by_author(user_id)
            .await?,
        votes: GalleryVoteRepository::new(db).get_by_user(user_id).await?,
        favorites: GalleryFavoriteRepository::new(db)
            .get_by_user(user_id)
            .await?,
        signups: SignupRepository::new(db).get_by_user(user_id).await?,
        gdpr_requests: GdprRequestRepository::new(db).get_by_user(user_id).await?,
        exported_at: Utc::now(),
    })
}

/// Removes the user's content and anonymises the account.
///
/// Counters of items the user voted on are recomputed once the votes are gone.
async fn erase_user<C: ConnectionTrait>(db: &C, user_id: i32) -> Result<(), AppError> {
    let voted_items = GalleryVoteRepository::new(db).delete_by_user(user_id).await?;
    GalleryFavoriteRepository::new(db)
        .delete_by_user(user_id)
        .await?;
    GalleryCommentRepository::new(db)
        .delete_by_author(user_id)
        .await?;
    SignupRepository::new(db).delete_by_user(user_id).await?;
    GalleryItemRepository::new(db)
        .delete_by_author(user_id)
        .await?;

    for item_id in voted_items {
        recount_votes(db, item_id).await?;
    }

    UserRepository::new(db)
        .anonymize(user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    Ok(())
}
