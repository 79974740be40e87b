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
                    .table(GalleryVote::Table)
                    .if_not_exists()
                    .col(pk_auto(GalleryVote::Id))
                    .col(integer(GalleryVote::ItemId))
                    .col(integer(GalleryVote::UserId))
                    .col(string_len(GalleryVote::VoteType, 8))
                    .col(
                        timestamp(GalleryVote::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_gallery_vote_item_id")
                            .from(GalleryVote::Table, GalleryVote::ItemId)
                            .to(GalleryItem::Table, GalleryItem::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_gallery_vote_user_id")
                            .from(GalleryVote::Table, GalleryVote::UserId)
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
                    .name("idx_gallery_vote_item_user")
                    .table(GalleryVote::Table)
                    .col(GalleryVote::ItemId)
                    .col(GalleryVote::UserId)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(GalleryVote::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum GalleryVote {
    Table,
    Id,
    ItemId,
    UserId,
    VoteType,
    CreatedAt,
}
