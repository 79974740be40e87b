use chrono::Utc;
use entity::gallery_vote::VoteType;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder,
};
use std::collections::HashMap;

use crate::server::model::gdpr::ExportedVote;

pub struct GalleryVoteRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> GalleryVoteRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Gets the vote `user_id` cast on `item_id`, if any.
    pub async fn find(
        &self,
        item_id: i32,
        user_id: i32,
    ) -> Result<Option<entity::gallery_vote::Model>, DbErr> {
        entity::prelude::GalleryVote::find()
            .filter(entity::gallery_vote::Column::ItemId.eq(item_id))
            .filter(entity::gallery_vote::Column::UserId.eq(user_id))
            .one(self.db)
            .await
    }

    pub async fn create(
        &self,
        item_id: i32,
        user_id: i32,
        vote_type: VoteType,
    ) -> Result<entity::gallery_vote::Model, DbErr> {
        entity::gallery_vote::ActiveModel {
            item_id: ActiveValue::Set(item_id),
            user_id: ActiveValue::Set(user_id),
            vote_type: ActiveValue::Set(vote_type),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }

    pub async fn delete(&self, id: i32) -> Result<(), DbErr> {
        entity::prelude::GalleryVote::delete_by_id(id)
            .exec(self.db)
            .await?;
        Ok(())
    }

    /// Counts votes of one type on an item.
    pub async fn count(&self, item_id: i32, vote_type: VoteType) -> Result<u64, DbErr> {
        entity::prelude::GalleryVote::find()
            .filter(entity::gallery_vote::Column::ItemId.eq(item_id))
            .filter(entity::gallery_vote::Column::VoteType.eq(vote_type))
            .count(self.db)
            .await
    }

    /// Maps item ID to the vote `user_id` cast on it, for the given items.
    pub async fn get_user_votes(
        &self,
        user_id: i32,
        item_ids: Vec<i32>,
    ) -> Result<HashMap<i32, VoteType>, DbErr> {
        if item_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let votes = entity::prelude::GalleryVote::find()
            .filter(entity::gallery_vote::Column::UserId.eq(user_id))
            .filter(entity::gallery_vote::Column::ItemId.is_in(item_ids))
            .all(self.db)
            .await?;

        Ok(votes.into_iter().map(|v| (v.item_id, v.vote_type)).collect())
    }

    /// Gets every vote cast by `user_id`, newest first.
    pub async fn get_by_user(&self, user_id: i32) -> Result<Vec<ExportedVote>, DbErr> {
        let votes = entity::prelude::GalleryVote::find()
            .filter(entity::gallery_vote::Column::UserId.eq(user_id))
            .order_by_desc(entity::gallery_vote::Column::CreatedAt)
            .all(self.db)
            .await?;

        Ok(votes
            .into_iter()
            .map(|v| ExportedVote {
                item_id: v.item_id,
                vote_type: v.vote_type,
                created_at: v.created_at,
            })
            .collect())
    }

    /// Deletes every vote cast by `user_id` and returns the affected item IDs.
    pub async fn delete_by_user(&self, user_id: i32) -> Result<Vec<i32>, DbErr> {
        let item_ids: Vec<i32> = entity::prelude::GalleryVote::find()
            .filter(entity::gallery_vote::Column::UserId.eq(user_id))
            .all(self.db)
            .await?
            .into_iter()
            .map(|v| v.item_id)
            .collect();

        entity::prelude::GalleryVote::delete_many()
            .filter(entity::gallery_vote::Column::UserId.eq(user_id))
            .exec(self.db)
            .await?;

        Ok(item_ids)
    }
}
