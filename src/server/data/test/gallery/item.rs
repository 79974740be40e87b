use super::*;

/// Tests that new submissions start pending with zero votes.
///
/// Expected: Ok with status PENDING, zero counters and the author's name
#[tokio::test]
async fn creates_pending_item() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_gallery_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let author = factory::user::UserFactory::new(db)
        .name("Painter")
        .build()
        .await?;

    let item = GalleryItemRepository::new(db)
        .create(CreateGalleryItemParam {
            author_id: author.id,
            title: "Sunset broadside".to_string(),
            description: None,
            image_url: "https://i.example/sunset.png".to_string(),
            category: "screenshots".to_string(),
        })
        .await?;

    assert_eq!(item.status, GalleryStatus::Pending);
    assert_eq!(item.upvotes, 0);
    assert_eq!(item.downvotes, 0);
    assert_eq!(item.author_name, "Painter");
    assert!(item.moderated_by.is_none());

    Ok(())
}

/// Tests that listings only return items in the requested state and category.
///
/// Expected: Ok with only the approved screenshot
#[tokio::test]
async fn lists_by_status_and_category() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_gallery_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let author = factory::user::create_user(db).await?;
    let approved = factory::gallery_item::GalleryItemFactory::new(db, author.id)
        .category("screenshots")
        .approved()
        .build()
        .await?;
    factory::gallery_item::GalleryItemFactory::new(db, author.id)
        .category("artwork")
        .approved()
        .build()
        .await?;
    factory::gallery_item::create_gallery_item(db, author.id).await?;

    let mut param = list_param(GallerySort::Newest);
    param.category = Some("screenshots".to_string());
    let (items, total) = GalleryItemRepository::new(db).list(&param).await?;

    assert_eq!(total, 1);
    assert_eq!(items[0].id, approved.id);

    Ok(())
}

/// Tests the top sort orders by net score.
///
/// Expected: items ordered by upvotes minus downvotes, highest first
#[tokio::test]
async fn sorts_top_by_score() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_gallery_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let author = factory::user::create_user(db).await?;
    let low = factory::gallery_item::GalleryItemFactory::new(db, author.id)
        .approved()
        .votes(10, 9)
        .build()
        .await?;
    let high = factory::gallery_item::GalleryItemFactory::new(db, author.id)
        .approved()
        .votes(5, 0)
        .build()
        .await?;
    let negative = factory::gallery_item::GalleryItemFactory::new(db, author.id)
        .approved()
        .votes(0, 3)
        .build()
        .await?;

    let (items, _) = GalleryItemRepository::new(db)
        .list(&list_param(GallerySort::Top))
        .await?;
    let ids: Vec<i32> = items.iter().map(|i| i.id).collect();

    assert_eq!(ids, vec![high.id, low.id, negative.id]);

    Ok(())
}

/// Tests recording a moderation decision.
///
/// Expected: Ok(Some) with the new status, moderator and timestamp set
#[tokio::test]
async fn sets_status_with_moderator() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_gallery_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let author = factory::user::create_user(db).await?;
    let admin = factory::user::create_admin(db).await?;
    let item = factory::gallery_item::create_gallery_item(db, author.id).await?;

    let updated = GalleryItemRepository::new(db)
        .set_status(item.id, GalleryStatus::Approved, admin.id)
        .await?
        .unwrap();

    assert_eq!(updated.status, GalleryStatus::Approved);
    assert_eq!(updated.moderated_by, Some(admin.id));
    assert!(updated.moderated_at.is_some());

    Ok(())
}

/// Tests that deleting an item removes its votes, favorites and comments.
///
/// Expected: Ok(true) and no child rows left
#[tokio::test]
async fn delete_cascades_to_children() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_gallery_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, item) = factory::helpers::create_approved_item_with_author(db).await?;
    let voter = factory::user::create_user(db).await?;
    GalleryVoteRepository::new(db)
        .create(item.id, voter.id, VoteType::Up)
        .await?;
    GalleryFavoriteRepository::new(db)
        .create(item.id, voter.id)
        .await?;
    GalleryCommentRepository::new(db)
        .create(item.id, voter.id, "Huzzah".to_string())
        .await?;

    assert!(GalleryItemRepository::new(db).delete(item.id).await?);

    assert!(GalleryVoteRepository::new(db).get_by_user(voter.id).await?.is_empty());
    assert!(GalleryFavoriteRepository::new(db)
        .get_by_user(voter.id)
        .await?
        .is_empty());
    assert!(GalleryCommentRepository::new(db)
        .get_by_author(voter.id)
        .await?
        .is_empty());

    Ok(())
}
