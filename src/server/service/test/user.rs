use test_utils::{builder::TestBuilder, factory};

use crate::server::{
    data::audit_log::AuditLogRepository,
    error::AppError,
    model::{audit_log::AuditLogFilter, user::SetAdminParam},
    service::user::UserService,
};

/// Tests granting admin privileges writes an audit entry.
///
/// Expected: user becomes admin and one USER_SET_ADMIN entry exists
#[tokio::test]
async fn grants_admin_with_audit() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .with_admin_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let admin = factory::user::create_admin(db).await?;
    let member = factory::user::create_user(db).await?;

    let updated = UserService::new(db)
        .set_admin(SetAdminParam {
            actor_id: admin.id,
            user_id: member.id,
            is_admin: true,
        })
        .await?;

    assert!(updated.admin);

    let (entries, _) = AuditLogRepository::new(db)
        .get_paginated(&AuditLogFilter {
            action: Some("USER_SET_ADMIN".to_string()),
            actor_id: Some(admin.id),
            page: 0,
            per_page: 10,
        })
        .await?;
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].target_id, Some(member.id.to_string()));

    Ok(())
}

/// Tests that admins cannot revoke their own privileges.
///
/// Expected: Err(BadRequest) and the admin flag unchanged
#[tokio::test]
async fn cannot_revoke_own_admin() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .with_admin_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let admin = factory::user::create_admin(db).await?;
    let service = UserService::new(db);

    let result = service
        .set_admin(SetAdminParam {
            actor_id: admin.id,
            user_id: admin.id,
            is_admin: false,
        })
        .await;

    assert!(matches!(result, Err(AppError::BadRequest(_))));
    assert!(service.get_user(admin.id).await?.unwrap().admin);

    Ok(())
}

/// Tests pagination metadata.
///
/// Expected: 3 users over pages of 2 gives 2 pages
#[tokio::test]
async fn computes_total_pages() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    for _ in 0..3 {
        factory::user::create_user(db).await?;
    }

    let page = UserService::new(db).get_all_users(1, 2).await?;

    assert_eq!(page.total, 3);
    assert_eq!(page.total_pages, 2);
    assert_eq!(page.users.len(), 1);

    Ok(())
}
