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
                    .table(GdprRequest::Table)
                    .if_not_exists()
                    .col(pk_auto(GdprRequest::Id))
                    .col(integer(GdprRequest::UserId))
                    .col(string_len(GdprRequest::Kind, 16))
                    .col(string_len(GdprRequest::Status, 16).default("PENDING"))
                    .col(string_null(GdprRequest::Note))
                    .col(
                        timestamp(GdprRequest::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .col(timestamp_null(GdprRequest::ProcessedAt))
                    .col(integer_null(GdprRequest::ProcessedBy))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_gdpr_request_user_id")
                            .from(GdprRequest::Table, GdprRequest::UserId)
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
            .drop_table(Table::drop().table(GdprRequest::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum GdprRequest {
    Table,
    Id,
    UserId,
    Kind,
    Status,
    Note,
    CreatedAt,
    ProcessedAt,
    ProcessedBy,
}
