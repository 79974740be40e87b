use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "user")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub discord_id: String,
    pub name: String,
    pub avatar_url: Option<String>,
    pub admin: bool,
    pub created_at: DateTimeUtc,
    pub last_seen_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::gallery_item::Entity")]
    GalleryItem,
    #[sea_orm(has_many = "super::signup::Entity")]
    Signup,
    #[sea_orm(has_many = "super::gdpr_request::Entity")]
    GdprRequest,
}

impl Related<super::gallery_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GalleryItem.def()
    }
}

impl Related<super::signup::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Signup.def()
    }
}

impl Related<super::gdpr_request::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GdprRequest.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
