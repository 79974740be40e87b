use chrono::{Duration, Utc};
use entity::port_battle::PortBattleStatus;
use sea_orm::{DbErr, TransactionTrait};
use test_utils::{builder::TestBuilder, factory};

use crate::server::{
    data::{fleet::FleetRepository, port_battle::PortBattleRepository},
    model::port_battle::{
        CreateFleetRoleParam, CreateFleetSetupParam, CreatePortBattleParam, UpdatePortBattleParam,
    },
};

/// Tests creating a battle together with its fleets and roles.
///
/// Expected: Ok with two fleets whose roles keep their declared order
#[tokio::test]
async fn creates_battle_with_fleets() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_port_battle_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let admin = factory::user::create_admin(db).await?;
    let param = CreatePortBattleParam {
        created_by: admin.id,
        name: "Defence of La Habana".to_string(),
        port: "La Habana".to_string(),
        description: None,
        scheduled_at: Utc::now() + Duration::days(2),
        br_limit: 1500,
        fleets: vec![
            CreateFleetSetupParam {
                name: "Main".to_string(),
                roles: vec![
                    CreateFleetRoleParam {
                        ship_class: "Santisima".to_string(),
                        br_value: 400,
                    },
                    CreateFleetRoleParam {
                        ship_class: "Bellona".to_string(),
                        br_value: 250,
                    },
                ],
            },
            CreateFleetSetupParam {
                name: "Screen".to_string(),
                roles: vec![],
            },
        ],
    };

    let txn = db.begin().await?;
    let battle = PortBattleRepository::new(&txn).create(param).await?;
    txn.commit().await?;

    assert_eq!(battle.status, PortBattleStatus::Scheduled);

    let fleets = FleetRepository::new(db).get_by_battle(battle.id).await?;
    assert_eq!(fleets.len(), 2);
    assert_eq!(fleets[0].name, "Main");
    assert_eq!(fleets[0].roles[0].ship_class, "Santisima");
    assert_eq!(fleets[0].roles[1].position, 1);
    assert!(fleets[1].roles.is_empty());

    Ok(())
}

/// Tests that the upcoming filter hides past and completed battles.
///
/// Expected: only the future scheduled battle is returned
#[tokio::test]
async fn lists_upcoming_battles() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_port_battle_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let admin = factory::user::create_admin(db).await?;
    let upcoming = factory::port_battle::create_port_battle(db, admin.id).await?;
    factory::port_battle::PortBattleFactory::new(db, admin.id)
        .scheduled_at(Utc::now() - Duration::hours(5))
        .build()
        .await?;
    factory::port_battle::PortBattleFactory::new(db, admin.id)
        .status(PortBattleStatus::Cancelled)
        .build()
        .await?;

    let repo = PortBattleRepository::new(db);
    let (battles, total) = repo.get_paginated(0, 10, Some(Utc::now())).await?;

    assert_eq!(total, 1);
    assert_eq!(battles[0].id, upcoming.id);

    let (_, all) = repo.get_paginated(0, 10, None).await?;
    assert_eq!(all, 3);

    Ok(())
}

/// Tests partial updates only touch provided fields.
///
/// Expected: new BR limit, unchanged name, cleared description
#[tokio::test]
async fn applies_partial_update() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_port_battle_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let admin = factory::user::create_admin(db).await?;
    let battle = factory::port_battle::PortBattleFactory::new(db, admin.id)
        .name("Raid on Mortimer Town")
        .build()
        .await?;

    let updated = PortBattleRepository::new(db)
        .update(
            battle.id,
            UpdatePortBattleParam {
                br_limit: Some(2000),
                description: Some("   ".to_string()),
                ..Default::default()
            },
        )
        .await?
        .unwrap();

    assert_eq!(updated.br_limit, 2000);
    assert_eq!(updated.name, "Raid on Mortimer Town");
    assert!(updated.description.is_none());

    Ok(())
}

/// Tests updating a battle that does not exist.
///
/// Expected: Ok(None)
#[tokio::test]
async fn update_missing_battle_returns_none() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_port_battle_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let result = PortBattleRepository::new(db)
        .update(999, UpdatePortBattleParam::default())
        .await?;

    assert!(result.is_none());

    Ok(())
}

/// Tests completing battles whose start lies before the cutoff.
///
/// Expected: only the scheduled battle in the past is completed
#[tokio::test]
async fn completes_started_battles() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_port_battle_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let admin = factory::user::create_admin(db).await?;
    let past = factory::port_battle::PortBattleFactory::new(db, admin.id)
        .scheduled_at(Utc::now() - Duration::hours(4))
        .build()
        .await?;
    let future = factory::port_battle::create_port_battle(db, admin.id).await?;

    let repo = PortBattleRepository::new(db);
    let completed = repo
        .complete_started_before(Utc::now() - Duration::hours(3))
        .await?;

    assert_eq!(completed, 1);
    assert_eq!(
        repo.find_by_id(past.id).await?.unwrap().status,
        PortBattleStatus::Completed
    );
    assert_eq!(
        repo.find_by_id(future.id).await?.unwrap().status,
        PortBattleStatus::Scheduled
    );

    Ok(())
}
