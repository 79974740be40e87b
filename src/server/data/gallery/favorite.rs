use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter,
    QueryOrder,
};
use std::collections::HashSet;

use crate::server::model::gdpr::ExportedFavorite;

pub struct GalleryFavoriteRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> GalleryFavoriteRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn find(
        &self,
        item_id: i32,
        user_id: i32,
    ) -> Result<Option<entity::gallery_favorite::Model>, DbErr> {
        entity::prelude::GalleryFavorite::find()
            .filter(entity::gallery_favorite::Column::ItemId.eq(item_id))
            .filter(entity::gallery_favorite::Column::UserId.eq(user_id))
            .one(self.db)
            .await
    }

    pub async fn create(&self, item_id: i32, user_id: i32) -> Result<(), DbErr> {
        entity::gallery_favorite::ActiveModel {
            item_id: ActiveValue::Set(item_id),
            user_id: ActiveValue::Set(user_id),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;
        Ok(())
    }

    pub async fn delete(&self, id: i32) -> Result<(), DbErr> {
        entity::prelude::GalleryFavorite::delete_by_id(id)
            .exec(self.db)
            .await?;
        Ok(())
    }

    /// IDs of the items `user_id` favorited, most recently favorited first.
    pub async fn get_item_ids_by_user(&self, user_id: i32) -> Result<Vec<i32>, DbErr> {
        let favorites = entity::prelude::GalleryFavorite::find()
            .filter(entity::gallery_favorite::Column::UserId.eq(user_id))
            .order_by_desc(entity::gallery_favorite::Column::CreatedAt)
            .all(self.db)
            .await?;

        Ok(favorites.into_iter().map(|f| f.item_id).collect())
    }

    /// Subset of `item_ids` that `user_id` favorited.
    pub async fn get_favorited_among(
        &self,
        user_id: i32,
        item_ids: Vec<i32>,
    ) -> Result<HashSet<i32>, DbErr> {
        if item_ids.is_empty() {
            return Ok(HashSet::new());
        }

        let favorites = entity::prelude::GalleryFavorite::find()
            .filter(entity::gallery_favorite::Column::UserId.eq(user_id))
            .filter(entity::gallery_favorite::Column::ItemId.is_in(item_ids))
            .all(self.db)
            .await?;

        Ok(favorites.into_iter().map(|f| f.item_id).collect())
    }

    pub async fn get_by_user(&self, user_id: i32) -> Result<Vec<ExportedFavorite>, DbErr> {
        let favorites = entity::prelude::GalleryFavorite::find()
            .filter(entity::gallery_favorite::Column::UserId.eq(user_id))
            .order_by_desc(entity::gallery_favorite::Column::CreatedAt)
            .all(self.db)
            .await?;

        Ok(favorites
            .into_iter()
            .map(|f| ExportedFavorite {
                item_id: f.item_id,
                created_at: f.created_at,
            })
            .collect())
    }

    pub async fn delete_by_user(&self, user_id: i32) -> Result<u64, DbErr> {
        let result = entity::prelude::GalleryFavorite::delete_many()
            .filter(entity::gallery_favorite::Column::UserId.eq(user_id))
            .exec(self.db)
            .await?;
        Ok(result.rows_affected)
    }
}
