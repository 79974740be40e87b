use sea_orm_migration::{prelude::*, schema::*};

use super::m20260902_000007_create_fleet_setup_table::FleetSetup;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(FleetRole::Table)
                    .if_not_exists()
                    .col(pk_auto(FleetRole::Id))
                    .col(integer(FleetRole::FleetSetupId))
                    .col(string(FleetRole::ShipClass))
                    .col(integer(FleetRole::BrValue))
                    .col(integer(FleetRole::Position).default(0))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_fleet_role_fleet_setup_id")
                            .from(FleetRole::Table, FleetRole::FleetSetupId)
                            .to(FleetSetup::Table, FleetSetup::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(FleetRole::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum FleetRole {
    Table,
    Id,
    FleetSetupId,
    ShipClass,
    BrValue,
    Position,
}
