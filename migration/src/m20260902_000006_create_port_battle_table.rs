use sea_orm_migration::{prelude::*, schema::*};

use super::m20260901_000001_create_user_table::User;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(PortBattle::Table)
                    .if_not_exists()
                    .col(pk_auto(PortBattle::Id))
                    .col(string(PortBattle::Name))
                    .col(string(PortBattle::Port))
                    .col(text_null(PortBattle::Description))
                    .col(timestamp(PortBattle::ScheduledAt))
                    .col(integer(PortBattle::BrLimit))
                    .col(string_len(PortBattle::Status, 16).default("SCHEDULED"))
                    .col(integer(PortBattle::CreatedBy))
                    .col(
                        timestamp(PortBattle::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_port_battle_created_by")
                            .from(PortBattle::Table, PortBattle::CreatedBy)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PortBattle::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum PortBattle {
    Table,
    Id,
    Name,
    Port,
    Description,
    ScheduledAt,
    BrLimit,
    Status,
    CreatedBy,
    CreatedAt,
}
