use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "fleet_setup")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub port_battle_id: i32,
    pub name: String,
    pub position: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::port_battle::Entity",
        from = "Column::PortBattleId",
        to = "super::port_battle::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    PortBattle,
    #[sea_orm(has_many = "super::fleet_role::Entity")]
    FleetRole,
}

impl Related<super::port_battle::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PortBattle.def()
    }
}

impl Related<super::fleet_role::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FleetRole.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
