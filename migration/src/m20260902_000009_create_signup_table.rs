use sea_orm_migration::{prelude::*, schema::*};

use super::{
    m20260901_000001_create_user_table::User,
    m20260902_000006_create_port_battle_table::PortBattle,
    m20260902_000008_create_fleet_role_table::FleetRole,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Signup::Table)
                    .if_not_exists()
                    .col(pk_auto(Signup::Id))
                    .col(integer(Signup::PortBattleId))
                    .col(integer(Signup::RoleId))
                    .col(integer(Signup::UserId))
                    .col(string_len(Signup::Status, 16).default("PENDING"))
                    .col(string_null(Signup::Note))
                    .col(
                        timestamp(Signup::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .col(
                        timestamp(Signup::UpdatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_signup_port_battle_id")
                            .from(Signup::Table, Signup::PortBattleId)
                            .to(PortBattle::Table, PortBattle::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_signup_role_id")
                            .from(Signup::Table, Signup::RoleId)
                            .to(FleetRole::Table, FleetRole::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_signup_user_id")
                            .from(Signup::Table, Signup::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_signup_port_battle_user")
                    .table(Signup::Table)
                    .col(Signup::PortBattleId)
                    .col(Signup::UserId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Signup::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Signup {
    Table,
    Id,
    PortBattleId,
    RoleId,
    UserId,
    Status,
    Note,
    CreatedAt,
    UpdatedAt,
}
