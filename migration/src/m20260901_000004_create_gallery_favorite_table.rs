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
                    .table(GalleryFavorite::Table)
                    .if_not_exists()
                    .col(pk_auto(GalleryFavorite::Id))
                    .col(integer(GalleryFavorite::ItemId))
                    .col(integer(GalleryFavorite::UserId))
                    .col(
                        timestamp(GalleryFavorite::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_gallery_favorite_item_id")
                            .from(GalleryFavorite::Table, GalleryFavorite::ItemId)
                            .to(GalleryItem::Table, GalleryItem::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_gallery_favorite_user_id")
                            .from(GalleryFavorite::Table, GalleryFavorite::UserId)
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
                    .name("idx_gallery_favorite_item_user")
                    .table(GalleryFavorite::Table)
                    .col(GalleryFavorite::ItemId)
                    .col(GalleryFavorite::UserId)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(GalleryFavorite::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum GalleryFavorite {
    Table,
    Id,
    ItemId,
    UserId,
    CreatedAt,
}
