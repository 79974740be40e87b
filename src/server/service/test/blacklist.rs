use chrono::{Duration, Utc};
use test_utils::{builder::TestBuilder, factory};

use crate::server::{
    error::AppError, model::blacklist::CreateBlacklistEntryParam,
    service::blacklist::BlacklistService,
};

fn entry(discord_id: &str, created_by: i32) -> CreateBlacklistEntryParam {
    CreateBlacklistEntryParam {
        discord_id: discord_id.to_string(),
        reason: "Spamming the signup sheet".to_string(),
        created_by,
        expires_at: None,
    }
}

/// Tests that a Discord ID can only have one active entry.
///
/// Expected: second add is a Conflict
#[tokio::test]
async fn rejects_duplicate_active_entry() -> Result<(), AppError> {
    let test = TestBuilder::new().with_admin_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let service = BlacklistService::new(db);

    service.add(entry("42", 1)).await?;
    let result = service.add(entry("42", 1)).await;

    assert!(matches!(result, Err(AppError::Conflict(_))));
    assert!(service.is_blacklisted("42").await?);

    Ok(())
}

/// Tests that an expired entry does not block a new one.
///
/// Expected: Ok and the ID is banned again
#[tokio::test]
async fn allows_new_entry_after_expiry() -> Result<(), AppError> {
    let test = TestBuilder::new().with_admin_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    factory::blacklist_entry::create_blacklist_entry(
        db,
        "42",
        1,
        Some(Utc::now() - Duration::days(1)),
    )
    .await?;
    let service = BlacklistService::new(db);

    assert!(!service.is_blacklisted("42").await?);
    service.add(entry("42", 1)).await?;
    assert!(service.is_blacklisted("42").await?);
    assert_eq!(service.get_all().await?.len(), 2);

    Ok(())
}

/// Tests removing an entry.
///
/// Expected: Ok then NotFound on the second removal
#[tokio::test]
async fn removes_entry() -> Result<(), AppError> {
    let test = TestBuilder::new().with_admin_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let service = BlacklistService::new(db);
    let created = service.add(entry("42", 1)).await?;

    service.remove(1, created.id).await?;

    assert!(!service.is_blacklisted("42").await?);
    assert!(matches!(
        service.remove(1, created.id).await,
        Err(AppError::NotFound(_))
    ));

    Ok(())
}
