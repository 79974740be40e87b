use crate::server::data::fleet::FleetRepository;
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

/// Tests that roles get consecutive positions within their setup.
///
/// Expected: positions 0 and 1 in insertion order
#[tokio::test]
async fn assigns_role_positions() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_port_battle_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let admin = factory::user::create_admin(db).await?;
    let battle = factory::port_battle::create_port_battle(db, admin.id).await?;

    let repo = FleetRepository::new(db);
    let setup = repo.create_setup(battle.id, "Vanguard".to_string()).await?;
    let first = repo
        .create_role(setup.id, "Constitution".to_string(), 300)
        .await?;
    let second = repo.create_role(setup.id, "Wasa".to_string(), 220).await?;

    assert_eq!(setup.position, 0);
    assert_eq!(first.position, 0);
    assert_eq!(second.position, 1);

    Ok(())
}

/// Tests resolving the battle a role belongs to.
///
/// Expected: Some with the role and its battle ID; None for unknown roles
#[tokio::test]
async fn finds_role_with_battle() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_port_battle_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, battle, _, role) = factory::helpers::create_battle_with_role(db).await?;

    let repo = FleetRepository::new(db);
    let (found, battle_id) = repo.find_role(role.id).await?.unwrap();

    assert_eq!(found.id, role.id);
    assert_eq!(battle_id, battle.id);
    assert!(repo.find_role(role.id + 100).await?.is_none());

    Ok(())
}

/// Tests that deleting a setup removes its roles.
///
/// Expected: no fleets left for the battle and the role is gone
#[tokio::test]
async fn delete_setup_removes_roles() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_port_battle_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, battle, fleet, role) = factory::helpers::create_battle_with_role(db).await?;

    let repo = FleetRepository::new(db);

    assert!(repo.delete_setup(fleet.id).await?);
    assert!(repo.get_by_battle(battle.id).await?.is_empty());
    assert!(repo.find_role(role.id).await?.is_none());
    assert!(!repo.delete_setup(fleet.id).await?);

    Ok(())
}
