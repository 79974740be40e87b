use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "fleet_role")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub fleet_setup_id: i32,
    pub ship_class: String,
    pub br_value: i32,
    pub position: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::fleet_setup::Entity",
        from = "Column::FleetSetupId",
        to = "super::fleet_setup::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    FleetSetup,
    #[sea_orm(has_many = "super::signup::Entity")]
    Signup,
}

impl Related<super::fleet_setup::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FleetSetup.def()
    }
}

impl Related<super::signup::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Signup.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
