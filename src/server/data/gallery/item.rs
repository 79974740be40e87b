use chrono::Utc;
use entity::gallery_item::GalleryStatus;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr,
    EntityTrait, IntoActiveModel, PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::server::model::gallery::{
    CreateGalleryItemParam, GalleryItem, GallerySort, ListGalleryItemsParam,
};

pub struct GalleryItemRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> GalleryItemRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Inserts a new pending submission with zeroed counters.
    ///
    /// # Returns
    /// - `Ok(GalleryItem)` - The created item with its author name
    /// - `Err(DbErr)` - Database error during insert
    pub async fn create(&self, param: CreateGalleryItemParam) -> Result<GalleryItem, DbErr> {
        let entity = entity::gallery_item::ActiveModel {
            author_id: ActiveValue::Set(param.author_id),
            title: ActiveValue::Set(param.title),
            description: ActiveValue::Set(param.description),
            image_url: ActiveValue::Set(param.image_url),
            category: ActiveValue::Set(param.category),
            status: ActiveValue::Set(GalleryStatus::Pending),
            upvotes: ActiveValue::Set(0),
            downvotes: ActiveValue::Set(0),
            created_at: ActiveValue::Set(Utc::now()),
            moderated_by: ActiveValue::Set(None),
            moderated_at: ActiveValue::Set(None),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        let author = entity::prelude::User::find_by_id(entity.author_id)
            .one(self.db)
            .await?;

        Ok(GalleryItem::from_entity(entity, author))
    }

    /// Gets an item with its author name.
    ///
    /// # Returns
    /// - `Ok(Some(GalleryItem))` - Item found, without viewer state
    /// - `Ok(None)` - No item with that ID
    /// - `Err(DbErr)` - Database error during query
    pub async fn find_by_id(&self, id: i32) -> Result<Option<GalleryItem>, DbErr> {
        let result = entity::prelude::GalleryItem::find_by_id(id)
            .find_also_related(entity::prelude::User)
            .one(self.db)
            .await?;

        Ok(result.map(|(item, author)| GalleryItem::from_entity(item, author)))
    }

    /// Lists items in one moderation state, optionally restricted to a category.
    ///
    /// # Returns
    /// - `Ok((items, total))` - Items for the requested page and total matching count
    /// - `Err(DbErr)` - Database error during pagination query
    pub async fn list(&self, param: &ListGalleryItemsParam) -> Result<(Vec<GalleryItem>, u64), DbErr> {
        let mut query = entity::prelude::GalleryItem::find()
            .filter(entity::gallery_item::Column::Status.eq(param.status));

        if let Some(category) = &param.category {
            query = query.filter(entity::gallery_item::Column::Category.eq(category.as_str()));
        }

        query = match param.sort {
            GallerySort::Newest => query,
            GallerySort::Top => query.order_by_desc(Expr::cust(
                "\"gallery_item\".\"upvotes\" - \"gallery_item\".\"downvotes\"",
            )),
        };

        let paginator = query
            .order_by_desc(entity::gallery_item::Column::CreatedAt)
            .order_by_desc(entity::gallery_item::Column::Id)
            .find_also_related(entity::prelude::User)
            .paginate(self.db, param.per_page);

        let total = paginator.num_items().await?;
        let items = paginator
            .fetch_page(param.page)
            .await?
            .into_iter()
            .map(|(item, author)| GalleryItem::from_entity(item, author))
            .collect();

        Ok((items, total))
    }

    /// Gets items by ID, newest first, keeping only those in `status`.
    pub async fn find_many_with_status(
        &self,
        ids: Vec<i32>,
        status: GalleryStatus,
    ) -> Result<Vec<GalleryItem>, DbErr> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let results = entity::prelude::GalleryItem::find()
            .filter(entity::gallery_item::Column::Id.is_in(ids))
            .filter(entity::gallery_item::Column::Status.eq(status))
            .order_by_desc(entity::gallery_item::Column::CreatedAt)
            .find_also_related(entity::prelude::User)
            .all(self.db)
            .await?;

        Ok(results
            .into_iter()
            .map(|(item, author)| GalleryItem::from_entity(item, author))
            .collect())
    }

    /// Gets every item submitted by `author_id`, whatever its state.
    pub async fn get_by_author(&self, author_id: i32) -> Result<Vec<GalleryItem>, DbErr> {
        let results = entity::prelude::GalleryItem::find()
            .filter(entity::gallery_item::Column::AuthorId.eq(author_id))
            .order_by_desc(entity::gallery_item::Column::CreatedAt)
            .find_also_related(entity::prelude::User)
            .all(self.db)
            .await?;

        Ok(results
            .into_iter()
            .map(|(item, author)| GalleryItem::from_entity(item, author))
            .collect())
    }

    /// Records a moderation decision.
    ///
    /// # Returns
    /// - `Ok(Some(GalleryItem))` - Updated item
    /// - `Ok(None)` - No item with that ID
    /// - `Err(DbErr)` - Database error during update
    pub async fn set_status(
        &self,
        id: i32,
        status: GalleryStatus,
        moderator_id: i32,
    ) -> Result<Option<GalleryItem>, DbErr> {
        let Some(entity) = entity::prelude::GalleryItem::find_by_id(id)
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let mut active = entity.into_active_model();
        active.status = ActiveValue::Set(status);
        active.moderated_by = ActiveValue::Set(Some(moderator_id));
        active.moderated_at = ActiveValue::Set(Some(Utc::now()));
        active.update(self.db).await?;

        self.find_by_id(id).await
    }

    /// Overwrites the vote counters of an item.
    pub async fn set_vote_counts(&self, id: i32, upvotes: i32, downvotes: i32) -> Result<(), DbErr> {
        entity::prelude::GalleryItem::update_many()
            .filter(entity::gallery_item::Column::Id.eq(id))
            .col_expr(entity::gallery_item::Column::Upvotes, Expr::value(upvotes))
            .col_expr(entity::gallery_item::Column::Downvotes, Expr::value(downvotes))
            .exec(self.db)
            .await?;
        Ok(())
    }

    /// Deletes an item; votes, favorites and comments cascade.
    ///
    /// # Returns
    /// - `Ok(true)` - Item deleted
    /// - `Ok(false)` - No item with that ID
    pub async fn delete(&self, id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::GalleryItem::delete_by_id(id)
            .exec(self.db)
            .await?;
        Ok(result.rows_affected > 0)
    }

    /// Deletes every item submitted by `author_id` and returns how many were removed.
    pub async fn delete_by_author(&self, author_id: i32) -> Result<u64, DbErr> {
        let result = entity::prelude::GalleryItem::delete_many()
            .filter(entity::gallery_item::Column::AuthorId.eq(author_id))
            .exec(self.db)
            .await?;
        Ok(result.rows_affected)
    }
}
