use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(BlacklistEntry::Table)
                    .if_not_exists()
                    .col(pk_auto(BlacklistEntry::Id))
                    .col(string(BlacklistEntry::DiscordId))
                    .col(text(BlacklistEntry::Reason))
                    .col(integer(BlacklistEntry::CreatedBy))
                    .col(
                        timestamp(BlacklistEntry::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .col(timestamp_null(BlacklistEntry::ExpiresAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_blacklist_entry_discord_id")
                    .table(BlacklistEntry::Table)
                    .col(BlacklistEntry::DiscordId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(BlacklistEntry::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum BlacklistEntry {
    Table,
    Id,
    DiscordId,
    Reason,
    CreatedBy,
    CreatedAt,
    ExpiresAt,
}
