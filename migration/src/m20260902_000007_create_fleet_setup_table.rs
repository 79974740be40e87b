use sea_orm_migration::{prelude::*, schema::*};

use super::m20260902_000006_create_port_battle_table::PortBattle;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(FleetSetup::Table)
                    .if_not_exists()
                    .col(pk_auto(FleetSetup::Id))
                    .col(integer(FleetSetup::PortBattleId))
                    .col(string(FleetSetup::Name))
                    .col(integer(FleetSetup::Position).default(0))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_fleet_setup_port_battle_id")
                            .from(FleetSetup::Table, FleetSetup::PortBattleId)
                            .to(PortBattle::Table, PortBattle::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(FleetSetup::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum FleetSetup {
    Table,
    Id,
    PortBattleId,
    Name,
    Position,
}
