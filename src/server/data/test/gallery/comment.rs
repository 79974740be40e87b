use super::*;

/// Tests that comments on an item come back oldest first with author names.
///
/// Expected: Ok with both comments in insertion order
#[tokio::test]
async fn lists_comments_oldest_first() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_gallery_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, item) = factory::helpers::create_approved_item_with_author(db).await?;
    let commenter = factory::user::UserFactory::new(db)
        .name("Bosun")
        .build()
        .await?;
    let repo = GalleryCommentRepository::new(db);

    let first = repo
        .create(item.id, commenter.id, "First!".to_string())
        .await?;
    let second = repo
        .create(item.id, commenter.id, "Second".to_string())
        .await?;

    let comments = repo.get_by_item(item.id).await?;

    assert_eq!(comments.len(), 2);
    assert_eq!(comments[0].id, first.id);
    assert_eq!(comments[1].id, second.id);
    assert_eq!(comments[0].author_name, "Bosun");

    Ok(())
}
