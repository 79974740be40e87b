use crate::server::{
    data::audit_log::AuditLogRepository,
    model::audit_log::{AuditAction, AuditLogFilter, CreateAuditLogParam},
};
use sea_orm::DbErr;
use serde_json::json;
use test_utils::builder::TestBuilder;

fn filter() -> AuditLogFilter {
    AuditLogFilter {
        action: None,
        actor_id: None,
        page: 0,
        per_page: 10,
    }
}

/// Tests that structured details survive storage.
///
/// Expected: details come back as the same JSON object with derived target type
#[tokio::test]
async fn stores_details_as_json() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_admin_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let entry = AuditLogRepository::new(db)
        .create(CreateAuditLogParam::new(
            1,
            AuditAction::GalleryApprove,
            42,
            json!({ "title": "Line of battle" }),
        ))
        .await?;

    assert_eq!(entry.action, "GALLERY_APPROVE");
    assert_eq!(entry.target_type, "gallery_item");
    assert_eq!(entry.target_id.as_deref(), Some("42"));
    assert_eq!(entry.details["title"], "Line of battle");

    Ok(())
}

/// Tests filtering and newest-first ordering.
///
/// Expected: only the actor's entries, most recent first
#[tokio::test]
async fn filters_by_actor_and_action() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_admin_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = AuditLogRepository::new(db);
    let first = repo
        .create(CreateAuditLogParam::new(1, AuditAction::BlacklistAdd, 7, json!({})))
        .await?;
    repo.create(CreateAuditLogParam::new(2, AuditAction::BlacklistAdd, 8, json!({})))
        .await?;
    let latest = repo
        .create(CreateAuditLogParam::new(1, AuditAction::BlacklistRemove, 7, json!({})))
        .await?;

    let (entries, total) = repo
        .get_paginated(&AuditLogFilter {
            actor_id: Some(1),
            ..filter()
        })
        .await?;
    assert_eq!(total, 2);
    assert_eq!(entries[0].id, latest.id);
    assert_eq!(entries[1].id, first.id);

    let (entries, total) = repo
        .get_paginated(&AuditLogFilter {
            action: Some("BLACKLIST_ADD".to_string()),
            ..filter()
        })
        .await?;
    assert_eq!(total, 2);
    assert!(entries.iter().all(|e| e.action == "BLACKLIST_ADD"));

    Ok(())
}
