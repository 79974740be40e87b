use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter,
    QueryOrder,
};

use crate::server::model::gallery::GalleryComment;

pub struct GalleryCommentRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> GalleryCommentRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        item_id: i32,
        author_id: i32,
        content: String,
    ) -> Result<GalleryComment, DbErr> {
        let entity = entity::gallery_comment::ActiveModel {
            item_id: ActiveValue::Set(item_id),
            author_id: ActiveValue::Set(author_id),
            content: ActiveValue::Set(content),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        let author = entity::prelude::User::find_by_id(author_id)
            .one(self.db)
            .await?;

        Ok(GalleryComment::from_entity(entity, author))
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<GalleryComment>, DbErr> {
        let result = entity::prelude::GalleryComment::find_by_id(id)
            .find_also_related(entity::prelude::User)
            .one(self.db)
            .await?;

        Ok(result.map(|(comment, author)| GalleryComment::from_entity(comment, author)))
    }

    /// Comments on an item, oldest first.
    pub async fn get_by_item(&self, item_id: i32) -> Result<Vec<GalleryComment>, DbErr> {
        let results = entity::prelude::GalleryComment::find()
            .filter(entity::gallery_comment::Column::ItemId.eq(item_id))
            .order_by_asc(entity::gallery_comment::Column::CreatedAt)
            .order_by_asc(entity::gallery_comment::Column::Id)
            .find_also_related(entity::prelude::User)
            .all(self.db)
            .await?;

        Ok(results
            .into_iter()
            .map(|(comment, author)| GalleryComment::from_entity(comment, author))
            .collect())
    }

    pub async fn get_by_author(&self, author_id: i32) -> Result<Vec<GalleryComment>, DbErr> {
        let results = entity::prelude::GalleryComment::find()
            .filter(entity::gallery_comment::Column::AuthorId.eq(author_id))
            .order_by_desc(entity::gallery_comment::Column::CreatedAt)
            .find_also_related(entity::prelude::User)
            .all(self.db)
            .await?;

        Ok(results
            .into_iter()
            .map(|(comment, author)| GalleryComment::from_entity(comment, author))
            .collect())
    }

    pub async fn delete(&self, id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::GalleryComment::delete_by_id(id)
            .exec(self.db)
            .await?;
        Ok(result.rows_affected > 0)
    }

    pub async fn delete_by_author(&self, author_id: i32) -> Result<u64, DbErr> {
        let result = entity::prelude::GalleryComment::delete_many()
            .filter(entity::gallery_comment::Column::AuthorId.eq(author_id))
            .exec(self.db)
            .await?;
        Ok(result.rows_affected)
    }
}
