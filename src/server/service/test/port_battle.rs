use chrono::{Duration, Utc};
use entity::{port_battle::PortBattleStatus, signup::SignupStatus};
use test_utils::{builder::TestBuilder, factory};

use crate::server::{
    error::AppError,
    model::port_battle::{
        CreateFleetRoleParam, CreateFleetSetupParam, CreatePortBattleParam, UpdatePortBattleParam,
    },
    service::port_battle::PortBattleService,
};

fn battle_param(created_by: i32) -> CreatePortBattleParam {
    CreatePortBattleParam {
        created_by,
        name: "Hold Charleston".to_string(),
        port: "Charleston".to_string(),
        description: Some("Screen arrives first".to_string()),
        scheduled_at: Utc::now() + Duration::days(1),
        br_limit: 800,
        fleets: vec![CreateFleetSetupParam {
            name: "Main".to_string(),
            roles: vec![
                CreateFleetRoleParam {
                    ship_class: "L'Ocean".to_string(),
                    br_value: 500,
                },
                CreateFleetRoleParam {
                    ship_class: "Essex".to_string(),
                    br_value: 100,
                },
            ],
        }],
    }
}

/// Tests creating a battle returns its full details.
///
/// Expected: one fleet with two roles and an untouched BR budget
#[tokio::test]
async fn creates_battle_with_details() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_port_battle_tables()
        .with_admin_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let admin = factory::user::create_admin(db).await?;

    let details = PortBattleService::new(db)
        .create(battle_param(admin.id))
        .await?;

    assert_eq!(details.battle.status, PortBattleStatus::Scheduled);
    assert_eq!(details.fleets.len(), 1);
    assert_eq!(details.fleets[0].roles.len(), 2);
    assert_eq!(details.br.total_br, 0);
    assert_eq!(details.br.remaining_br, 800);

    Ok(())
}

/// Tests validation of new battles.
///
/// Expected: BadRequest for a past start, zero limit, zero role BR and oversized BR
#[tokio::test]
async fn rejects_invalid_battles() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_port_battle_tables()
        .with_admin_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let admin = factory::user::create_admin(db).await?;
    let service = PortBattleService::new(db);

    let mut past = battle_param(admin.id);
    past.scheduled_at = Utc::now() - Duration::minutes(5);
    assert!(matches!(
        service.create(past).await,
        Err(AppError::BadRequest(_))
    ));

    let mut no_limit = battle_param(admin.id);
    no_limit.br_limit = 0;
    assert!(matches!(
        service.create(no_limit).await,
        Err(AppError::BadRequest(_))
    ));

    let mut free_ship = battle_param(admin.id);
    free_ship.fleets[0].roles[0].br_value = 0;
    assert!(matches!(
        service.create(free_ship).await,
        Err(AppError::BadRequest(_))
    ));

    let mut huge_ship = battle_param(admin.id);
    huge_ship.fleets[0].roles[0].br_value = i32::MAX;
    assert!(matches!(
        service.create(huge_ship).await,
        Err(AppError::BadRequest(_))
    ));

    let mut huge_limit = battle_param(admin.id);
    huge_limit.br_limit = i32::MAX;
    assert!(matches!(
        service.create(huge_limit).await,
        Err(AppError::BadRequest(_))
    ));

    Ok(())
}

/// Tests that the BR limit cannot drop below the approved BR.
///
/// Expected: BadRequest below 250, Ok at exactly 250
#[tokio::test]
async fn rejects_limit_below_approved_br() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_port_battle_tables()
        .with_admin_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let (admin, battle, _, role) = factory::helpers::create_battle_with_role(db).await?;
    let member = factory::user::create_user(db).await?;
    factory::signup::create_signup_with_status(
        db,
        battle.id,
        role.id,
        member.id,
        SignupStatus::Approved,
    )
    .await?;
    let service = PortBattleService::new(db);

    let lowered = service
        .update(
            admin.id,
            battle.id,
            UpdatePortBattleParam {
                br_limit: Some(200),
                ..Default::default()
            },
        )
        .await;
    assert!(matches!(lowered, Err(AppError::BadRequest(_))));

    let updated = service
        .update(
            admin.id,
            battle.id,
            UpdatePortBattleParam {
                br_limit: Some(250),
                ..Default::default()
            },
        )
        .await?;
    assert_eq!(updated.br_limit, 250);

    Ok(())
}

/// Tests the BR summary over approved signups.
///
/// Expected: only the approved role counts towards the fleet and battle totals
#[tokio::test]
async fn summarises_approved_br() -> Result<(), AppError> {
    let test = TestBuilder::new().with_port_battle_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let (_, battle, fleet, role) = factory::helpers::create_battle_with_role(db).await?;
    let pending_role =
        factory::fleet_role::create_fleet_role_with_br(db, fleet.id, "Hercules", 90).await?;
    let first = factory::user::create_user(db).await?;
    let second = factory::user::create_user(db).await?;
    factory::signup::create_signup_with_status(
        db,
        battle.id,
        role.id,
        first.id,
        SignupStatus::Approved,
    )
    .await?;
    factory::signup::create_signup(db, battle.id, pending_role.id, second.id).await?;

    let summary = PortBattleService::new(db).get_br_summary(battle.id).await?;

    assert_eq!(summary.total_br, 250);
    assert_eq!(summary.remaining_br, 750);
    assert_eq!(summary.fleets[0].approved_count, 1);

    Ok(())
}

/// Tests fleet and role management is scoped to the battle.
///
/// Expected: role added to the fleet; deleting it through another battle is NotFound
#[tokio::test]
async fn manages_fleets_within_battle() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_port_battle_tables()
        .with_admin_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let (admin, battle, _, _) = factory::helpers::create_battle_with_role(db).await?;
    let other = factory::port_battle::create_port_battle(db, admin.id).await?;
    let service = PortBattleService::new(db);

    let fleet = service
        .add_fleet(
            admin.id,
            battle.id,
            CreateFleetSetupParam {
                name: "Screen".to_string(),
                roles: vec![],
            },
        )
        .await?;
    let role = service
        .add_role(
            admin.id,
            battle.id,
            fleet.id,
            CreateFleetRoleParam {
                ship_class: "Renommee".to_string(),
                br_value: 80,
            },
        )
        .await?;

    assert_eq!(fleet.position, 1);
    assert!(matches!(
        service.delete_role(admin.id, other.id, fleet.id, role.id).await,
        Err(AppError::NotFound(_))
    ));

    service
        .delete_role(admin.id, battle.id, fleet.id, role.id)
        .await?;
    service.delete_fleet(admin.id, battle.id, fleet.id).await?;

    let details = service.get_details(battle.id).await?;
    assert_eq!(details.fleets.len(), 1);

    Ok(())
}

/// Tests completing battles after their duration.
///
/// Expected: the battle that started three hours ago is completed
#[tokio::test]
async fn completes_finished_battles() -> Result<(), AppError> {
    let test = TestBuilder::new().with_port_battle_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let admin = factory::user::create_admin(db).await?;
    let finished = factory::port_battle::PortBattleFactory::new(db, admin.id)
        .scheduled_at(Utc::now() - Duration::hours(3))
        .build()
        .await?;
    let running = factory::port_battle::PortBattleFactory::new(db, admin.id)
        .scheduled_at(Utc::now() - Duration::minutes(30))
        .build()
        .await?;
    let service = PortBattleService::new(db);

    assert_eq!(service.complete_finished(Duration::minutes(150)).await?, 1);

    let finished = service.get_details(finished.id).await?;
    let running = service.get_details(running.id).await?;
    assert_eq!(finished.battle.status, PortBattleStatus::Completed);
    assert_eq!(running.battle.status, PortBattleStatus::Scheduled);

    Ok(())
}
