use super::*;

fn param(discord_id: &str, name: &str, is_admin: Option<bool>) -> UpsertUserParam {
    UpsertUserParam {
        discord_id: discord_id.to_string(),
        name: name.to_string(),
        avatar_url: None,
        is_admin,
    }
}

/// Tests creating a new user.
///
/// Verifies that the user repository creates a new user record with the specified
/// Discord ID and name and without admin privileges.
///
/// Expected: Ok with user created and admin status set to false
#[tokio::test]
async fn creates_new_user() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = UserRepository::new(db);
    let user = repo.upsert(param("123456789", "Captain Jack", None)).await?;

    assert_eq!(user.discord_id, "123456789");
    assert_eq!(user.name, "Captain Jack");
    assert!(!user.admin);

    Ok(())
}

/// Tests that a later login refreshes profile data for the same Discord account.
///
/// Expected: Ok with the same user ID, the new name and avatar
#[tokio::test]
async fn updates_existing_user() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = UserRepository::new(db);
    let first = repo.upsert(param("123456789", "Old Name", None)).await?;

    let mut update = param("123456789", "New Name", None);
    update.avatar_url = Some("https://cdn.example/avatar.png".to_string());
    let second = repo.upsert(update).await?;

    assert_eq!(first.id, second.id);
    assert_eq!(second.name, "New Name");
    assert_eq!(
        second.avatar_url.as_deref(),
        Some("https://cdn.example/avatar.png")
    );
    assert!(second.last_seen_at >= first.last_seen_at);

    Ok(())
}

/// Tests that a login without admin flag keeps existing admin privileges.
///
/// Expected: Ok with admin status still true
#[tokio::test]
async fn preserves_admin_when_not_specified() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = UserRepository::new(db);
    repo.upsert(param("123456789", "Admiral", Some(true))).await?;
    let user = repo.upsert(param("123456789", "Admiral", None)).await?;

    assert!(user.admin);

    Ok(())
}
