use super::*;

/// Tests anonymous sessions resolve to no user.
///
/// Expected: Ok(None)
#[tokio::test]
async fn returns_none_without_session_user() -> Result<(), AppError> {
    let mut test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let (db, session) = test.db_and_session().await.unwrap();

    let result = AuthGuard::new(db, session).current_user().await?;

    assert!(result.is_none());

    Ok(())
}

/// Tests a logged in session resolves to its user.
///
/// Expected: Ok(Some(User)) matching the stored ID
#[tokio::test]
async fn returns_session_user() -> Result<(), AppError> {
    let mut test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let (db, session) = test.db_and_session().await.unwrap();

    let user = factory::user::create_user(db).await?;
    AuthSession::new(session).set_user_id(user.id).await?;

    let result = AuthGuard::new(db, session).current_user().await?;

    assert_eq!(result.map(|u| u.id), Some(user.id));

    Ok(())
}

/// Tests a session for a deleted user counts as anonymous.
///
/// Expected: Ok(None)
#[tokio::test]
async fn stale_session_is_anonymous() -> Result<(), AppError> {
    let mut test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let (db, session) = test.db_and_session().await.unwrap();

    AuthSession::new(session).set_user_id(99).await?;

    let result = AuthGuard::new(db, session).current_user().await?;

    assert!(result.is_none());

    Ok(())
}
