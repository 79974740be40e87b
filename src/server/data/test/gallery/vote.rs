use super::*;

/// Tests counting votes by type.
///
/// Expected: separate counts for UP and DOWN votes on one item
#[tokio::test]
async fn counts_votes_by_type() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_gallery_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, item) = factory::helpers::create_approved_item_with_author(db).await?;
    let repo = GalleryVoteRepository::new(db);
    for vote_type in [VoteType::Up, VoteType::Up, VoteType::Down] {
        let voter = factory::user::create_user(db).await?;
        repo.create(item.id, voter.id, vote_type).await?;
    }

    assert_eq!(repo.count(item.id, VoteType::Up).await?, 2);
    assert_eq!(repo.count(item.id, VoteType::Down).await?, 1);

    Ok(())
}

/// Tests looking up the vote a user cast on an item.
///
/// Expected: Some with the stored vote type
#[tokio::test]
async fn finds_existing_vote() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_gallery_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, item) = factory::helpers::create_approved_item_with_author(db).await?;
    let voter = factory::user::create_user(db).await?;
    let repo = GalleryVoteRepository::new(db);

    repo.create(item.id, voter.id, VoteType::Up).await?;
    let existing = repo.find(item.id, voter.id).await?;

    assert!(existing.is_some());
    assert_eq!(existing.unwrap().vote_type, VoteType::Up);
    assert!(repo.find(item.id, voter.id + 1).await?.is_none());

    Ok(())
}

/// Tests deleting a user's votes reports the affected items.
///
/// Expected: Ok with both item IDs and no votes left
#[tokio::test]
async fn delete_by_user_returns_item_ids() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_gallery_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, first) = factory::helpers::create_approved_item_with_author(db).await?;
    let (_, second) = factory::helpers::create_approved_item_with_author(db).await?;
    let voter = factory::user::create_user(db).await?;
    let repo = GalleryVoteRepository::new(db);
    repo.create(first.id, voter.id, VoteType::Up).await?;
    repo.create(second.id, voter.id, VoteType::Down).await?;

    let mut item_ids = repo.delete_by_user(voter.id).await?;
    item_ids.sort();

    assert_eq!(item_ids, vec![first.id, second.id]);
    assert!(repo.get_by_user(voter.id).await?.is_empty());

    Ok(())
}
