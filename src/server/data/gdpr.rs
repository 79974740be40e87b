//! GDPR request repository.

use chrono::Utc;
use entity::gdpr_request::{GdprRequestKind, GdprRequestStatus};
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr,
    EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::server::model::gdpr::GdprRequest;

pub struct GdprRequestRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> GdprRequestRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Files a pending request.
    pub async fn create(&self, user_id: i32, kind: GdprRequestKind) -> Result<GdprRequest, DbErr> {
        let entity = entity::gdpr_request::ActiveModel {
            user_id: ActiveValue::Set(user_id),
            kind: ActiveValue::Set(kind),
            status: ActiveValue::Set(GdprRequestStatus::Pending),
            note: ActiveValue::Set(None),
            created_at: ActiveValue::Set(Utc::now()),
            processed_at: ActiveValue::Set(None),
            processed_by: ActiveValue::Set(None),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(GdprRequest::from_entity(entity))
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<GdprRequest>, DbErr> {
        let entity = entity::prelude::GdprRequest::find_by_id(id)
            .one(self.db)
            .await?;

        Ok(entity.map(GdprRequest::from_entity))
    }

    /// Whether `user_id` already has a pending request of `kind`.
    pub async fn has_pending(&self, user_id: i32, kind: GdprRequestKind) -> Result<bool, DbErr> {
        let count = entity::prelude::GdprRequest::find()
            .filter(entity::gdpr_request::Column::UserId.eq(user_id))
            .filter(entity::gdpr_request::Column::Kind.eq(kind))
            .filter(entity::gdpr_request::Column::Status.eq(GdprRequestStatus::Pending))
            .count(self.db)
            .await?;

        Ok(count > 0)
    }

    /// Requests filed by `user_id`, newest first.
    pub async fn get_by_user(&self, user_id: i32) -> Result<Vec<GdprRequest>, DbErr> {
        let entities = entity::prelude::GdprRequest::find()
            .filter(entity::gdpr_request::Column::UserId.eq(user_id))
            .order_by_desc(entity::gdpr_request::Column::CreatedAt)
            .order_by_desc(entity::gdpr_request::Column::Id)
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(GdprRequest::from_entity).collect())
    }

    /// All requests, optionally restricted to one status, oldest first.
    pub async fn get_all(
        &self,
        status: Option<GdprRequestStatus>,
    ) -> Result<Vec<GdprRequest>, DbErr> {
        let mut query = entity::prelude::GdprRequest::find();

        if let Some(status) = status {
            query = query.filter(entity::gdpr_request::Column::Status.eq(status));
        }

        let entities = query
            .order_by_asc(entity::gdpr_request::Column::CreatedAt)
            .order_by_asc(entity::gdpr_request::Column::Id)
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(GdprRequest::from_entity).collect())
    }

    /// Closes a pending request with `status`.
    ///
    /// # Returns
    /// - `Ok(true)` - The request was pending and has been closed
    /// - `Ok(false)` - The request is gone or was already closed
    /// - `Err(DbErr)` - Database error during update
    pub async fn close_if_pending(
        &self,
        id: i32,
        status: GdprRequestStatus,
        processed_by: i32,
        note: Option<String>,
    ) -> Result<bool, DbErr> {
        let result = entity::prelude::GdprRequest::update_many()
            .filter(entity::gdpr_request::Column::Id.eq(id))
            .filter(entity::gdpr_request::Column::Status.eq(GdprRequestStatus::Pending))
            .col_expr(entity::gdpr_request::Column::Status, Expr::value(status))
            .col_expr(entity::gdpr_request::Column::Note, Expr::value(note))
            .col_expr(
                entity::gdpr_request::Column::ProcessedAt,
                Expr::value(Some(Utc::now())),
            )
            .col_expr(
                entity::gdpr_request::Column::ProcessedBy,
                Expr::value(Some(processed_by)),
            )
            .exec(self.db)
            .await?;

        Ok(result.rows_affected == 1)
    }
}
