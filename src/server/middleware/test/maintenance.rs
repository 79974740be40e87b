use sea_orm::DatabaseConnection;

use crate::server::{
    error::AppError,
    middleware::{
        maintenance::{check, is_gated},
        session::AuthSession,
    },
    service::{
        activity::ActivityLogger, admin_code::AdminCodeService, maintenance::MaintenanceService,
    },
    state::AppState,
};
use test_utils::{builder::TestBuilder, factory};

fn state(db: &DatabaseConnection, maintenance: bool) -> AppState {
    AppState::new(
        db.clone(),
        AdminCodeService::new(),
        ActivityLogger::new(10),
        MaintenanceService::new(maintenance),
        chrono::Duration::minutes(150),
        chrono::Duration::hours(168),
    )
}

/// Tests which paths maintenance mode applies to.
///
/// Expected: API paths gated; health, maintenance and auth paths exempt
#[test]
fn gates_api_paths_only() {
    assert!(is_gated("/api/gallery"));
    assert!(is_gated("/api/admin/users"));
    assert!(is_gated("/api/port-battles/1/signups"));

    assert!(!is_gated("/health"));
    assert!(!is_gated("/ready"));
    assert!(!is_gated("/docs"));
    assert!(!is_gated("/api/v1/maintenance"));
    assert!(!is_gated("/api/auth/login"));
    assert!(!is_gated("/api/auth/user"));
}

/// Tests requests pass while maintenance is off.
///
/// Expected: Ok(()) for an anonymous API request
#[tokio::test]
async fn passes_when_disabled() -> Result<(), AppError> {
    let mut test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let (db, session) = test.db_and_session().await.unwrap();

    check(&state(db, false), session, "/api/gallery").await?;

    Ok(())
}

/// Tests non-admin API calls are blocked during maintenance.
///
/// Verifies both anonymous and logged in regular users are turned away
/// with the configured message.
///
/// Expected: Err(AppError::ServiceUnavailable)
#[tokio::test]
async fn blocks_non_admin_during_maintenance() -> Result<(), AppError> {
    let mut test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let (db, session) = test.db_and_session().await.unwrap();
    let state = state(db, false);
    state
        .maintenance
        .set(true, Some("Back soon".to_string()))
        .await;

    match check(&state, session, "/api/gallery").await {
        Err(AppError::ServiceUnavailable(message)) => assert_eq!(message, "Back soon"),
        other => panic!("Expected ServiceUnavailable, got: {:?}", other),
    }

    let user = factory::user::create_user(db).await?;
    AuthSession::new(session).set_user_id(user.id).await?;

    assert!(matches!(
        check(&state, session, "/api/port-battles").await,
        Err(AppError::ServiceUnavailable(_))
    ));

    Ok(())
}

/// Tests admins and exempt paths pass during maintenance.
///
/// Expected: Ok(()) for the exempt path anonymously and for any path as admin
#[tokio::test]
async fn lets_admins_and_exempt_paths_through() -> Result<(), AppError> {
    let mut test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let (db, session) = test.db_and_session().await.unwrap();
    let state = state(db, true);

    check(&state, session, "/api/auth/login").await?;
    check(&state, session, "/api/v1/maintenance").await?;

    let admin = factory::user::create_admin(db).await?;
    AuthSession::new(session).set_user_id(admin.id).await?;

    check(&state, session, "/api/admin/audit-logs").await?;

    Ok(())
}
