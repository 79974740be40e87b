use super::*;

/// Tests that anonymising replaces every identifying field.
///
/// Expected: Ok(Some) with placeholder name, `deleted-{id}` Discord ID, no avatar and
/// no admin flag; the old Discord ID no longer resolves
#[tokio::test]
async fn replaces_identifying_fields() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::user::UserFactory::new(db)
        .discord_id("555")
        .name("Captain Morgan")
        .avatar_url("https://cdn.example/morgan.png")
        .admin(true)
        .build()
        .await?;

    let repo = UserRepository::new(db);
    let anonymized = repo.anonymize(user.id).await?.unwrap();

    assert_eq!(anonymized.id, user.id);
    assert_eq!(anonymized.name, "Deleted User");
    assert_eq!(anonymized.discord_id, format!("deleted-{}", user.id));
    assert!(anonymized.avatar_url.is_none());
    assert!(!anonymized.admin);
    assert!(repo.find_by_discord_id("555").await?.is_none());

    Ok(())
}
