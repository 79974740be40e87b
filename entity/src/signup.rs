use sea_orm::entity::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum SignupStatus {
    #[sea_orm(string_value = "PENDING")]
    Pending,
    #[sea_orm(string_value = "APPROVED")]
    Approved,
    #[sea_orm(string_value = "DENIED")]
    Denied,
    #[sea_orm(string_value = "STANDBY")]
    Standby,
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "signup")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub port_battle_id: i32,
    pub role_id: i32,
    pub user_id: i32,
    pub status: SignupStatus,
    pub note: Option<String>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
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
    #[sea_orm(
        belongs_to = "super::fleet_role::Entity",
        from = "Column::RoleId",
        to = "super::fleet_role::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    FleetRole,
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    User,
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

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
