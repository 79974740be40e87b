//! Shared helper utilities for factory methods.

use sea_orm::{DatabaseConnection, DbErr};

/// Counter for generating unique IDs in tests.
static COUNTER: std::sync::atomic::AtomicU64 = std::sync::atomic::AtomicU64::new(1);

/// Gets the next unique counter value for test data.
pub fn next_id() -> u64 {
    COUNTER.fetch_add(1, std::sync::atomic::Ordering::SeqCst)
}

/// Creates a scheduled port battle with one fleet setup holding one role.
///
/// Creates, in order:
/// 1. Admin user (battle creator)
/// 2. Port battle (BR limit 1000, scheduled one day ahead)
/// 3. Fleet setup
/// 4. Fleet role (BR 250)
///
/// # Returns
/// - `Ok((admin, battle, fleet_setup, role))` - Tuple of all created entities
/// - `Err(DbErr)` - Database error during creation
pub async fn create_battle_with_role(
    db: &DatabaseConnection,
) -> Result<
    (
        entity::user::Model,
        entity::port_battle::Model,
        entity::fleet_setup::Model,
        entity::fleet_role::Model,
    ),
    DbErr,
> {
    let admin = crate::factory::user::UserFactory::new(db)
        .admin(true)
        .build()
        .await?;
    let battle = crate::factory::port_battle::create_port_battle(db, admin.id).await?;
    let fleet = crate::factory::fleet_setup::create_fleet_setup(db, battle.id).await?;
    let role = crate::factory::fleet_role::create_fleet_role(db, fleet.id).await?;

    Ok((admin, battle, fleet, role))
}

/// Creates an approved gallery item authored by a fresh user.
///
/// # Returns
/// - `Ok((author, item))` - Author and approved item
/// - `Err(DbErr)` - Database error during creation
pub async fn create_approved_item_with_author(
    db: &DatabaseConnection,
) -> Result<(entity::user::Model, entity::gallery_item::Model), DbErr> {
    let author = crate::factory::user::create_user(db).await?;
    let item = crate::factory::gallery_item::GalleryItemFactory::new(db, author.id)
        .approved()
        .build()
        .await?;

    Ok((author, item))
}
