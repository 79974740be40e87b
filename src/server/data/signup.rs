//! Port battle signup repository.
//!
//! Status changes go through `update_status_if`, which only writes when the stored status
//! still matches the one the caller read. Two admins acting on the same signup at once
//! cannot both succeed.

use chrono::Utc;
use entity::signup::SignupStatus;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr,
    EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::server::model::signup::{CreateSignupParam, Signup};

pub struct SignupRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> SignupRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Inserts a pending signup.
    pub async fn create(&self, param: CreateSignupParam) -> Result<Signup, DbErr> {
        let now = Utc::now();
        let entity = entity::signup::ActiveModel {
            port_battle_id: ActiveValue::Set(param.port_battle_id),
            role_id: ActiveValue::Set(param.role_id),
            user_id: ActiveValue::Set(param.user_id),
            status: ActiveValue::Set(SignupStatus::Pending),
            note: ActiveValue::Set(param.note),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        let user = entity::prelude::User::find_by_id(entity.user_id)
            .one(self.db)
            .await?;

        Ok(Signup::from_entity(entity, user))
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Signup>, DbErr> {
        let result = entity::prelude::Signup::find_by_id(id)
            .find_also_related(entity::prelude::User)
            .one(self.db)
            .await?;

        Ok(result.map(|(signup, user)| Signup::from_entity(signup, user)))
    }

    /// Signups of a battle in the order they were made.
    pub async fn get_by_battle(&self, port_battle_id: i32) -> Result<Vec<Signup>, DbErr> {
        let results = entity::prelude::Signup::find()
            .filter(entity::signup::Column::PortBattleId.eq(port_battle_id))
            .order_by_asc(entity::signup::Column::CreatedAt)
            .order_by_asc(entity::signup::Column::Id)
            .find_also_related(entity::prelude::User)
            .all(self.db)
            .await?;

        Ok(results
            .into_iter()
            .map(|(signup, user)| Signup::from_entity(signup, user))
            .collect())
    }

    pub async fn get_by_user(&self, user_id: i32) -> Result<Vec<Signup>, DbErr> {
        let results = entity::prelude::Signup::find()
            .filter(entity::signup::Column::UserId.eq(user_id))
            .order_by_desc(entity::signup::Column::CreatedAt)
            .find_also_related(entity::prelude::User)
            .all(self.db)
            .await?;

        Ok(results
            .into_iter()
            .map(|(signup, user)| Signup::from_entity(signup, user))
            .collect())
    }

    /// Whether `user_id` holds a signup in the battle that was not denied.
    ///
    /// `excluding_signup_id` leaves one signup out of the check, for reopening it.
    pub async fn has_active_signup(
        &self,
        port_battle_id: i32,
        user_id: i32,
        excluding_signup_id: Option<i32>,
    ) -> Result<bool, DbErr> {
        let mut query = entity::prelude::Signup::find()
            .filter(entity::signup::Column::PortBattleId.eq(port_battle_id))
            .filter(entity::signup::Column::UserId.eq(user_id))
            .filter(entity::signup::Column::Status.ne(SignupStatus::Denied));

        if let Some(id) = excluding_signup_id {
            query = query.filter(entity::signup::Column::Id.ne(id));
        }

        let count = query.count(self.db).await?;

        Ok(count > 0)
    }

    /// Whether the role has an approved signup other than `excluding_signup_id`.
    pub async fn role_is_filled(&self, role_id: i32, excluding_signup_id: i32) -> Result<bool, DbErr> {
        let count = entity::prelude::Signup::find()
            .filter(entity::signup::Column::RoleId.eq(role_id))
            .filter(entity::signup::Column::Status.eq(SignupStatus::Approved))
            .filter(entity::signup::Column::Id.ne(excluding_signup_id))
            .count(self.db)
            .await?;

        Ok(count > 0)
    }

    /// Role ID of every approved signup in the battle.
    pub async fn get_approved_role_ids(&self, port_battle_id: i32) -> Result<Vec<i32>, DbErr> {
        let signups = entity::prelude::Signup::find()
            .filter(entity::signup::Column::PortBattleId.eq(port_battle_id))
            .filter(entity::signup::Column::Status.eq(SignupStatus::Approved))
            .all(self.db)
            .await?;

        Ok(signups.into_iter().map(|s| s.role_id).collect())
    }

    /// Sum of role BR over the battle's approved signups.
    pub async fn get_approved_br(&self, port_battle_id: i32) -> Result<i64, DbErr> {
        let results = entity::prelude::Signup::find()
            .filter(entity::signup::Column::PortBattleId.eq(port_battle_id))
            .filter(entity::signup::Column::Status.eq(SignupStatus::Approved))
            .find_also_related(entity::prelude::FleetRole)
            .all(self.db)
            .await?;

        Ok(results
            .into_iter()
            .filter_map(|(_, role)| role.map(|r| i64::from(r.br_value)))
            .sum())
    }

    /// Moves a signup from `expected` to `status`.
    ///
    /// # Returns
    /// - `Ok(true)` - The signup was still in `expected` and has been updated
    /// - `Ok(false)` - The signup is gone or its status changed since it was read
    /// - `Err(DbErr)` - Database error during update
    pub async fn update_status_if(
        &self,
        id: i32,
        expected: SignupStatus,
        status: SignupStatus,
    ) -> Result<bool, DbErr> {
        let result = entity::prelude::Signup::update_many()
            .filter(entity::signup::Column::Id.eq(id))
            .filter(entity::signup::Column::Status.eq(expected))
            .col_expr(entity::signup::Column::Status, Expr::value(status))
            .col_expr(entity::signup::Column::UpdatedAt, Expr::value(Utc::now()))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected == 1)
    }

    pub async fn delete(&self, id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::Signup::delete_by_id(id)
            .exec(self.db)
            .await?;
        Ok(result.rows_affected > 0)
    }

    pub async fn delete_by_user(&self, user_id: i32) -> Result<u64, DbErr> {
        let result = entity::prelude::Signup::delete_many()
            .filter(entity::signup::Column::UserId.eq(user_id))
            .exec(self.db)
            .await?;
        Ok(result.rows_affected)
    }
}
