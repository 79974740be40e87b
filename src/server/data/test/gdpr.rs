use entity::gdpr_request::{GdprRequestKind, GdprRequestStatus};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

use crate::server::data::gdpr::GdprRequestRepository;

/// Tests pending-request detection per kind.
///
/// Expected: pending export detected, no pending delete
#[tokio::test]
async fn detects_pending_request_by_kind() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::user::create_user(db).await?;
    let repo = GdprRequestRepository::new(db);

    let request = repo.create(user.id, GdprRequestKind::Export).await?;

    assert_eq!(request.status, GdprRequestStatus::Pending);
    assert!(repo.has_pending(user.id, GdprRequestKind::Export).await?);
    assert!(!repo.has_pending(user.id, GdprRequestKind::Delete).await?);

    Ok(())
}

/// Tests that a request can only be closed once.
///
/// Expected: first close succeeds and records the admin, second close fails
#[tokio::test]
async fn closes_pending_request_once() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::user::create_user(db).await?;
    let admin = factory::user::create_admin(db).await?;
    let repo = GdprRequestRepository::new(db);
    let request = repo.create(user.id, GdprRequestKind::Delete).await?;

    assert!(
        repo.close_if_pending(
            request.id,
            GdprRequestStatus::Rejected,
            admin.id,
            Some("Duplicate".to_string()),
        )
        .await?
    );
    assert!(
        !repo
            .close_if_pending(request.id, GdprRequestStatus::Completed, admin.id, None)
            .await?
    );

    let stored = repo.find_by_id(request.id).await?.unwrap();
    assert_eq!(stored.status, GdprRequestStatus::Rejected);
    assert_eq!(stored.processed_by, Some(admin.id));
    assert_eq!(stored.note.as_deref(), Some("Duplicate"));

    Ok(())
}

/// Tests listing requests by status.
///
/// Expected: only pending requests when filtered, all requests otherwise
#[tokio::test]
async fn lists_requests_by_status() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::user::create_user(db).await?;
    let admin = factory::user::create_admin(db).await?;
    let repo = GdprRequestRepository::new(db);
    let closed = repo.create(user.id, GdprRequestKind::Export).await?;
    repo.close_if_pending(closed.id, GdprRequestStatus::Completed, admin.id, None)
        .await?;
    let open = repo.create(user.id, GdprRequestKind::Export).await?;

    let pending = repo.get_all(Some(GdprRequestStatus::Pending)).await?;
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].id, open.id);
    assert_eq!(repo.get_all(None).await?.len(), 2);

    Ok(())
}
