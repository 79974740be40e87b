use sea_orm_migration::{prelude::*, schema::*};

use super::{
    m20260901_000001_create_user_table::User,
    m20260901_000002_create_gallery_item_table::GalleryItem,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(GalleryComment::Table)
                    .if_not_exists()
                    .col(pk_auto(GalleryComment::Id))
                    .col(integer(GalleryComment::ItemId))
                    .col(integer(GalleryComment::AuthorId))
                    .col(text(GalleryComment::Content))
                    .col(
                        timestamp(GalleryComment::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_gallery_comment_item_id")
                            .from(GalleryComment::Table, GalleryComment::ItemId)
                            .to(GalleryItem::Table, GalleryItem::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_gallery_comment_author_id")
                            .from(GalleryComment::Table, GalleryComment::AuthorId)
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
            .drop_table(Table::drop().table(GalleryComment::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum GalleryComment {
    Table,
    Id,
    ItemId,
    AuthorId,
    Content,
    CreatedAt,
}
