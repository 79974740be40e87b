use entity::{gallery_item::GalleryStatus, gallery_vote::VoteType};
use sea_orm::ConnectionTrait;
use test_utils::{builder::TestBuilder, factory};

use crate::server::{
    data::{
        audit_log::AuditLogRepository,
        gallery::{GalleryCommentRepository, GalleryFavoriteRepository, GalleryVoteRepository},
    },
    error::{auth::AuthError, AppError},
    model::{
        audit_log::AuditLogFilter,
        gallery::{GallerySort, ListGalleryItemsParam},
        user::User,
    },
    service::gallery::GalleryService,
};

/// Tests that repeating the same vote removes it and restores the counters.
///
/// Expected: 1 upvote after the first vote, 0 and no user vote after the second
#[tokio::test]
async fn same_vote_twice_removes_vote() -> Result<(), AppError> {
    let test = TestBuilder::new().with_gallery_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let (_, item) = factory::helpers::create_approved_item_with_author(db).await?;
    let voter = factory::user::create_user(db).await?;
    let service = GalleryService::new(db);

    let first = service.vote(voter.id, item.id, VoteType::Up).await?;
    assert_eq!(first.upvotes, 1);
    assert_eq!(first.user_vote, Some(VoteType::Up));

    let second = service.vote(voter.id, item.id, VoteType::Up).await?;
    assert_eq!(second.upvotes, 0);
    assert_eq!(second.downvotes, 0);
    assert_eq!(second.user_vote, None);

    Ok(())
}

/// Tests that voting the opposite way switches the vote.
///
/// Expected: counters move from up to down
#[tokio::test]
async fn opposite_vote_switches() -> Result<(), AppError> {
    let test = TestBuilder::new().with_gallery_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let (_, item) = factory::helpers::create_approved_item_with_author(db).await?;
    let voter = factory::user::create_user(db).await?;
    let other = factory::user::create_user(db).await?;
    let service = GalleryService::new(db);

    service.vote(other.id, item.id, VoteType::Up).await?;
    service.vote(voter.id, item.id, VoteType::Up).await?;
    let outcome = service.vote(voter.id, item.id, VoteType::Down).await?;

    assert_eq!(outcome.upvotes, 1);
    assert_eq!(outcome.downvotes, 1);
    assert_eq!(outcome.user_vote, Some(VoteType::Down));

    let details = service.get(None, item.id).await?;
    assert_eq!(details.item.upvotes, 1);
    assert_eq!(details.item.downvotes, 1);

    Ok(())
}

/// Tests that pending items cannot be voted on.
///
/// Expected: Err(NotFound)
#[tokio::test]
async fn cannot_vote_on_pending_item() -> Result<(), AppError> {
    let test = TestBuilder::new().with_gallery_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let author = factory::user::create_user(db).await?;
    let item = factory::gallery_item::create_gallery_item(db, author.id).await?;

    let result = GalleryService::new(db)
        .vote(author.id, item.id, VoteType::Up)
        .await;

    assert!(matches!(result, Err(AppError::NotFound(_))));

    Ok(())
}

/// Tests that favorite toggling alternates and shows up in listings.
///
/// Expected: true, then false; favorites list and viewer state follow
#[tokio::test]
async fn favorite_toggle_alternates() -> Result<(), AppError> {
    let test = TestBuilder::new().with_gallery_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let (_, item) = factory::helpers::create_approved_item_with_author(db).await?;
    let user = factory::user::create_user(db).await?;
    let service = GalleryService::new(db);

    assert!(service.toggle_favorite(user.id, item.id).await?);

    let favorites = service.get_favorites(user.id).await?;
    assert_eq!(favorites.len(), 1);
    assert!(favorites[0].favorited);

    assert!(!service.toggle_favorite(user.id, item.id).await?);
    assert!(service.get_favorites(user.id).await?.is_empty());

    Ok(())
}

/// Tests the visibility rule for unmoderated items.
///
/// Expected: author and admin see the item, others and anonymous viewers get NotFound
#[tokio::test]
async fn pending_item_visible_to_author_and_admin_only() -> Result<(), AppError> {
    let test = TestBuilder::new().with_gallery_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let author = User::from_entity(factory::user::create_user(db).await?);
    let admin = User::from_entity(factory::user::create_admin(db).await?);
    let stranger = User::from_entity(factory::user::create_user(db).await?);
    let item = factory::gallery_item::create_gallery_item(db, author.id).await?;
    let service = GalleryService::new(db);

    assert!(service.get(Some(&author), item.id).await.is_ok());
    assert!(service.get(Some(&admin), item.id).await.is_ok());
    assert!(matches!(
        service.get(Some(&stranger), item.id).await,
        Err(AppError::NotFound(_))
    ));
    assert!(matches!(
        service.get(None, item.id).await,
        Err(AppError::NotFound(_))
    ));

    Ok(())
}

/// Tests that listings carry the viewer's vote.
///
/// Expected: the voted item reports the viewer's UP vote
#[tokio::test]
async fn list_includes_viewer_vote() -> Result<(), AppError> {
    let test = TestBuilder::new().with_gallery_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let (_, item) = factory::helpers::create_approved_item_with_author(db).await?;
    let viewer = factory::user::create_user(db).await?;
    let service = GalleryService::new(db);
    service.vote(viewer.id, item.id, VoteType::Up).await?;

    let param = ListGalleryItemsParam {
        status: GalleryStatus::Approved,
        category: None,
        sort: GallerySort::Newest,
        page: 0,
        per_page: 10,
    };
    let page = service.list(Some(viewer.id), param.clone()).await?;
    assert_eq!(page.items[0].user_vote, Some(VoteType::Up));

    let anonymous = service.list(None, param).await?;
    assert_eq!(anonymous.items[0].user_vote, None);

    Ok(())
}

/// Tests that a zero page size is clamped instead of reaching the paginator.
///
/// Expected: one item on a page of size 1
#[tokio::test]
async fn list_clamps_zero_page_size() -> Result<(), AppError> {
    let test = TestBuilder::new().with_gallery_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let (_, first) = factory::helpers::create_approved_item_with_author(db).await?;
    factory::gallery_item::GalleryItemFactory::new(db, first.author_id)
        .approved()
        .build()
        .await?;

    let page = GalleryService::new(db)
        .list(
            None,
            ListGalleryItemsParam {
                status: GalleryStatus::Approved,
                category: None,
                sort: GallerySort::Newest,
                page: 0,
                per_page: 0,
            },
        )
        .await?;

    assert_eq!(page.per_page, 1);
    assert_eq!(page.items.len(), 1);
    assert_eq!(page.total, 2);
    assert_eq!(page.total_pages, 2);

    Ok(())
}

/// Tests moderation of a pending item.
///
/// Expected: approved on first moderation, Conflict on the second
#[tokio::test]
async fn moderates_pending_item_once() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_gallery_tables()
        .with_admin_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let author = factory::user::create_user(db).await?;
    let admin = factory::user::create_admin(db).await?;
    let item = factory::gallery_item::create_gallery_item(db, author.id).await?;
    let service = GalleryService::new(db);

    let approved = service.moderate(admin.id, item.id, true).await?;
    assert_eq!(approved.status, GalleryStatus::Approved);
    assert_eq!(approved.moderated_by, Some(admin.id));

    assert!(matches!(
        service.moderate(admin.id, item.id, false).await,
        Err(AppError::Conflict(_))
    ));

    Ok(())
}

/// Tests comment validation and approval requirement.
///
/// Expected: BadRequest for blank content, NotFound on a pending item
#[tokio::test]
async fn rejects_invalid_comments() -> Result<(), AppError> {
    let test = TestBuilder::new().with_gallery_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let author = factory::user::create_user(db).await?;
    let pending = factory::gallery_item::create_gallery_item(db, author.id).await?;
    let (_, approved) = factory::helpers::create_approved_item_with_author(db).await?;
    let service = GalleryService::new(db);

    assert!(matches!(
        service.add_comment(author.id, approved.id, "   ").await,
        Err(AppError::BadRequest(_))
    ));
    assert!(matches!(
        service.add_comment(author.id, pending.id, "Nice").await,
        Err(AppError::NotFound(_))
    ));

    let comment = service.add_comment(author.id, approved.id, " Nice ").await?;
    assert_eq!(comment.content, "Nice");

    Ok(())
}

/// Tests that only the author or an admin can delete an item.
///
/// Expected: AccessDenied for a stranger, Ok for the author
#[tokio::test]
async fn delete_requires_author_or_admin() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_gallery_tables()
        .with_admin_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let (author, item) = factory::helpers::create_approved_item_with_author(db).await?;
    let stranger = User::from_entity(factory::user::create_user(db).await?);
    let author = User::from_entity(author);
    let service = GalleryService::new(db);

    assert!(matches!(
        service.delete(&stranger, item.id).await,
        Err(AppError::AuthErr(AuthError::AccessDenied(_, _)))
    ));

    service.delete(&author, item.id).await?;
    assert!(matches!(
        service.get(None, item.id).await,
        Err(AppError::NotFound(_))
    ));

    Ok(())
}

/// Tests comment deletion permissions and auditing of admin removals.
///
/// Expected: AccessDenied for a stranger, Ok for the author without an audit entry,
/// Ok for an admin with a COMMENT_DELETE entry
#[tokio::test]
async fn delete_comment_requires_author_or_admin() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_gallery_tables()
        .with_admin_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let (_, item) = factory::helpers::create_approved_item_with_author(db).await?;
    let commenter = User::from_entity(factory::user::create_user(db).await?);
    let stranger = User::from_entity(factory::user::create_user(db).await?);
    let admin = User::from_entity(factory::user::create_admin(db).await?);
    let service = GalleryService::new(db);

    let own = service
        .add_comment(commenter.id, item.id, "Fair winds")
        .await?;
    let other = service
        .add_comment(commenter.id, item.id, "See you in the screen fleet")
        .await?;

    assert!(matches!(
        service.delete_comment(&stranger, item.id, own.id).await,
        Err(AppError::AuthErr(AuthError::AccessDenied(_, _)))
    ));

    service.delete_comment(&commenter, item.id, own.id).await?;
    service.delete_comment(&admin, item.id, other.id).await?;

    assert!(GalleryCommentRepository::new(db)
        .get_by_item(item.id)
        .await?
        .is_empty());

    let audit = AuditLogRepository::new(db);
    let (entries, _) = audit
        .get_paginated(&AuditLogFilter {
            action: Some("COMMENT_DELETE".to_string()),
            actor_id: None,
            page: 0,
            per_page: 10,
        })
        .await?;
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].actor_id, Some(admin.id));
    assert_eq!(entries[0].target_id, Some(other.id.to_string()));

    Ok(())
}

/// Tests that an insert losing the race against an identical vote or favorite maps to Conflict.
///
/// The unique indexes come from the migrations, so they are added here by hand.
///
/// Expected: Conflict for both duplicate inserts, and only the first vote counted
#[tokio::test]
async fn duplicate_vote_or_favorite_insert_is_conflict() -> Result<(), AppError> {
    let test = TestBuilder::new().with_gallery_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    db.execute_unprepared(
        "CREATE UNIQUE INDEX idx_gallery_vote_item_user ON gallery_vote (item_id, user_id)",
    )
    .await?;
    db.execute_unprepared(
        "CREATE UNIQUE INDEX idx_gallery_favorite_item_user ON gallery_favorite (item_id, user_id)",
    )
    .await?;
    let (_, item) = factory::helpers::create_approved_item_with_author(db).await?;
    let voter = factory::user::create_user(db).await?;

    let votes = GalleryVoteRepository::new(db);
    votes.create(item.id, voter.id, VoteType::Up).await?;
    let vote_err = votes
        .create(item.id, voter.id, VoteType::Down)
        .await
        .map_err(|e| AppError::conflict_on_duplicate(e, "duplicate vote"));
    assert!(matches!(vote_err, Err(AppError::Conflict(_))));

    let favorites = GalleryFavoriteRepository::new(db);
    favorites.create(item.id, voter.id).await?;
    let favorite_err = favorites
        .create(item.id, voter.id)
        .await
        .map_err(|e| AppError::conflict_on_duplicate(e, "duplicate favorite"));
    assert!(matches!(favorite_err, Err(AppError::Conflict(_))));

    assert_eq!(votes.count(item.id, VoteType::Up).await?, 1);
    assert_eq!(votes.count(item.id, VoteType::Down).await?, 0);

    Ok(())
}
