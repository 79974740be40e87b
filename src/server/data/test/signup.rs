use crate::server::{data::signup::SignupRepository, model::signup::CreateSignupParam};
use entity::signup::SignupStatus;
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

/// Tests that new signups start pending and carry the user's name.
///
/// Expected: Ok with status PENDING and the note preserved
#[tokio::test]
async fn creates_pending_signup() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_port_battle_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, battle, _, role) = factory::helpers::create_battle_with_role(db).await?;
    let user = factory::user::UserFactory::new(db)
        .name("Gunner")
        .build()
        .await?;

    let signup = SignupRepository::new(db)
        .create(CreateSignupParam {
            port_battle_id: battle.id,
            role_id: role.id,
            user_id: user.id,
            note: Some("Can bring a spare".to_string()),
        })
        .await?;

    assert_eq!(signup.status, SignupStatus::Pending);
    assert_eq!(signup.user_name, "Gunner");
    assert_eq!(signup.note.as_deref(), Some("Can bring a spare"));

    Ok(())
}

/// Tests that denied signups do not count as active.
///
/// Expected: false after denial, true for a pending signup unless it is excluded
#[tokio::test]
async fn denied_signup_is_not_active() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_port_battle_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, battle, _, role) = factory::helpers::create_battle_with_role(db).await?;
    let denied = factory::user::create_user(db).await?;
    let pending = factory::user::create_user(db).await?;
    factory::signup::create_signup_with_status(
        db,
        battle.id,
        role.id,
        denied.id,
        SignupStatus::Denied,
    )
    .await?;
    let open = factory::signup::create_signup(db, battle.id, role.id, pending.id).await?;

    let repo = SignupRepository::new(db);

    assert!(!repo.has_active_signup(battle.id, denied.id, None).await?);
    assert!(repo.has_active_signup(battle.id, pending.id, None).await?);
    assert!(!repo
        .has_active_signup(battle.id, pending.id, Some(open.id))
        .await?);

    Ok(())
}

/// Tests role occupancy ignores the signup being evaluated.
///
/// Expected: filled for other signups, not filled for the approved one itself
#[tokio::test]
async fn role_is_filled_excludes_self() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_port_battle_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, battle, _, role) = factory::helpers::create_battle_with_role(db).await?;
    let first = factory::user::create_user(db).await?;
    let second = factory::user::create_user(db).await?;
    let approved = factory::signup::create_signup_with_status(
        db,
        battle.id,
        role.id,
        first.id,
        SignupStatus::Approved,
    )
    .await?;
    let pending = factory::signup::create_signup(db, battle.id, role.id, second.id).await?;

    let repo = SignupRepository::new(db);

    assert!(repo.role_is_filled(role.id, pending.id).await?);
    assert!(!repo.role_is_filled(role.id, approved.id).await?);

    Ok(())
}

/// Tests summing BR over approved signups only.
///
/// Expected: only the approved roles' BR is counted
#[tokio::test]
async fn sums_approved_br() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_port_battle_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, battle, fleet, role) = factory::helpers::create_battle_with_role(db).await?;
    let frigate =
        factory::fleet_role::create_fleet_role_with_br(db, fleet.id, "Surprise", 120).await?;
    let extra =
        factory::fleet_role::create_fleet_role_with_br(db, fleet.id, "Trincomalee", 180).await?;

    for (role_id, status) in [
        (role.id, SignupStatus::Approved),
        (frigate.id, SignupStatus::Approved),
        (extra.id, SignupStatus::Standby),
    ] {
        let user = factory::user::create_user(db).await?;
        factory::signup::create_signup_with_status(db, battle.id, role_id, user.id, status)
            .await?;
    }

    let repo = SignupRepository::new(db);

    assert_eq!(repo.get_approved_br(battle.id).await?, 250 + 120);
    assert_eq!(repo.get_approved_role_ids(battle.id).await?.len(), 2);

    Ok(())
}

/// Tests the conditional status update.
///
/// Expected: first update succeeds, a second update expecting the old status fails
#[tokio::test]
async fn update_status_if_requires_expected_status() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_port_battle_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, battle, _, role) = factory::helpers::create_battle_with_role(db).await?;
    let user = factory::user::create_user(db).await?;
    let signup = factory::signup::create_signup(db, battle.id, role.id, user.id).await?;

    let repo = SignupRepository::new(db);

    assert!(
        repo.update_status_if(signup.id, SignupStatus::Pending, SignupStatus::Approved)
            .await?
    );
    assert!(
        !repo
            .update_status_if(signup.id, SignupStatus::Pending, SignupStatus::Denied)
            .await?
    );

    let stored = repo.find_by_id(signup.id).await?.unwrap();
    assert_eq!(stored.status, SignupStatus::Approved);

    Ok(())
}
