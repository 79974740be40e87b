pub use sea_orm_migration::prelude::*;

mod m20260901_000001_create_user_table;
mod m20260901_000002_create_gallery_item_table;
mod m20260901_000003_create_gallery_vote_table;
mod m20260901_000004_create_gallery_favorite_table;
mod m20260901_000005_create_gallery_comment_table;
mod m20260902_000006_create_port_battle_table;
mod m20260902_000007_create_fleet_setup_table;
mod m20260902_000008_create_fleet_role_table;
mod m20260902_000009_create_signup_table;
mod m20260903_000010_create_audit_log_table;
mod m20260903_000011_create_blacklist_entry_table;
mod m20260903_000012_create_gdpr_request_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260901_000001_create_user_table::Migration),
            Box::new(m20260901_000002_create_gallery_item_table::Migration),
            Box::new(m20260901_000003_create_gallery_vote_table::Migration),
            Box::new(m20260901_000004_create_gallery_favorite_table::Migration),
            Box::new(m20260901_000005_create_gallery_comment_table::Migration),
            Box::new(m20260902_000006_create_port_battle_table::Migration),
            Box::new(m20260902_000007_create_fleet_setup_table::Migration),
            Box::new(m20260902_000008_create_fleet_role_table::Migration),
            Box::new(m20260902_000009_create_signup_table::Migration),
            Box::new(m20260903_000010_create_audit_log_table::Migration),
            Box::new(m20260903_000011_create_blacklist_entry_table::Migration),
            Box::new(m20260903_000012_create_gdpr_request_table::Migration),
        ]
    }
}
