use super::*;

/// Tests which of a set of items a user favorited.
///
/// Expected: only the favorited item is reported
#[tokio::test]
async fn reports_favorited_items() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_gallery_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, liked) = factory::helpers::create_approved_item_with_author(db).await?;
    let (_, other) = factory::helpers::create_approved_item_with_author(db).await?;
    let user = factory::user::create_user(db).await?;
    let repo = GalleryFavoriteRepository::new(db);

    repo.create(liked.id, user.id).await?;

    let favorited = repo
        .get_favorited_among(user.id, vec![liked.id, other.id])
        .await?;

    assert!(favorited.contains(&liked.id));
    assert!(!favorited.contains(&other.id));
    assert_eq!(repo.get_item_ids_by_user(user.id).await?, vec![liked.id]);

    Ok(())
}
