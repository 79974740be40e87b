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
                    .table(GalleryItem::Table)
                    .if_not_exists()
                    .col(pk_auto(GalleryItem::Id))
                    .col(integer(GalleryItem::AuthorId))
                    .col(string(GalleryItem::Title))
                    .col(text_null(GalleryItem::Description))
                    .col(string(GalleryItem::ImageUrl))
                    .col(string(GalleryItem::Category))
                    .col(string_len(GalleryItem::Status, 16).default("PENDING"))
                    .col(integer(GalleryItem::Upvotes).default(0))
                    .col(integer(GalleryItem::Downvotes).default(0))
                    .col(
                        timestamp(GalleryItem::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .col(integer_null(GalleryItem::ModeratedBy))
                    .col(timestamp_null(GalleryItem::ModeratedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_gallery_item_author_id")
                            .from(GalleryItem::Table, GalleryItem::AuthorId)
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
                    .name("idx_gallery_item_status_created_at")
                    .table(GalleryItem::Table)
                    .col(GalleryItem::Status)
                    .col(GalleryItem::CreatedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(GalleryItem::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum GalleryItem {
    Table,
    Id,
    AuthorId,
    Title,
    Description,
    ImageUrl,
    Category,
    Status,
    Upvotes,
    Downvotes,
    CreatedAt,
    ModeratedBy,
    ModeratedAt,
}
