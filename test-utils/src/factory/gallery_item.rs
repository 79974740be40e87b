//! Gallery item factory.

use crate::factory::helpers::next_id;
use chrono::Utc;
use entity::gallery_item::GalleryStatus;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for gallery submissions. Items are `PENDING` unless `approved()` or
/// `status()` is used.
pub struct GalleryItemFactory<'a> {
    db: &'a DatabaseConnection,
    author_id: i32,
    title: String,
    image_url: String,
    category: String,
    status: GalleryStatus,
    upvotes: i32,
    downvotes: i32,
}

impl<'a> GalleryItemFactory<'a> {
    pub fn new(db: &'a DatabaseConnection, author_id: i32) -> Self {
        let id = next_id();
        Self {
            db,
            author_id,
            title: format!("Screenshot {}", id),
            image_url: format!("https://cdn.example.com/gallery/{}.png", id),
            category: "screenshots".to_string(),
            status: GalleryStatus::Pending,
            upvotes: 0,
            downvotes: 0,
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn status(mut self, status: GalleryStatus) -> Self {
        self.status = status;
        self
    }

    pub fn approved(self) -> Self {
        self.status(GalleryStatus::Approved)
    }

    pub fn votes(mut self, upvotes: i32, downvotes: i32) -> Self {
        self.upvotes = upvotes;
        self.downvotes = downvotes;
        self
    }

    pub async fn build(self) -> Result<entity::gallery_item::Model, DbErr> {
        entity::gallery_item::ActiveModel {
            author_id: ActiveValue::Set(self.author_id),
            title: ActiveValue::Set(self.title),
            description: ActiveValue::Set(None),
            image_url: ActiveValue::Set(self.image_url),
            category: ActiveValue::Set(self.category),
            status: ActiveValue::Set(self.status),
            upvotes: ActiveValue::Set(self.upvotes),
            downvotes: ActiveValue::Set(self.downvotes),
            created_at: ActiveValue::Set(Utc::now()),
            moderated_by: ActiveValue::Set(None),
            moderated_at: ActiveValue::Set(None),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates a pending gallery item for the given author.
pub async fn create_gallery_item(
    db: &DatabaseConnection,
    author_id: i32,
) -> Result<entity::gallery_item::Model, DbErr> {
    GalleryItemFactory::new(db, author_id).build().await
}
