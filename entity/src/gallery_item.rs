use sea_orm::entity::prelude::*;

/// Moderation state of a gallery submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum GalleryStatus {
    #[sea_orm(string_value = "PENDING")]
    Pending,
    #[sea_orm(string_value = "APPROVED")]
    Approved,
    #[sea_orm(string_value = "REJECTED")]
    Rejected,
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "gallery_item")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub author_id: i32,
    pub title: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub image_url: String,
    pub category: String,
    pub status: GalleryStatus,
    pub upvotes: i32,
    pub downvotes: i32,
    pub created_at: DateTimeUtc,
    pub moderated_by: Option<i32>,
    pub moderated_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::AuthorId",
        to = "super::user::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    User,
    #[sea_orm(has_many = "super::gallery_vote::Entity")]
    GalleryVote,
    #[sea_orm(has_many = "super::gallery_favorite::Entity")]
    GalleryFavorite,
    #[sea_orm(has_many = "super::gallery_comment::Entity")]
    GalleryComment,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::gallery_vote::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GalleryVote.def()
    }
}

impl Related<super::gallery_favorite::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GalleryFavorite.def()
    }
}

impl Related<super::gallery_comment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GalleryComment.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
