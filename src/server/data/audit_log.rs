//! Audit log repository.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::server::model::audit_log::{AuditLogEntry, AuditLogFilter, CreateAuditLogParam};

pub struct AuditLogRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> AuditLogRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Writes an audit entry, storing the details as JSON text.
    pub async fn create(&self, param: CreateAuditLogParam) -> Result<AuditLogEntry, DbErr> {
        let entity = entity::audit_log::ActiveModel {
            actor_id: ActiveValue::Set(param.actor_id),
            action: ActiveValue::Set(param.action.as_str().to_string()),
            target_type: ActiveValue::Set(param.action.target_type().to_string()),
            target_id: ActiveValue::Set(param.target_id),
            details: ActiveValue::Set(param.details.to_string()),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(AuditLogEntry::from_entity(entity))
    }

    /// Lists entries newest first, optionally filtered by action and actor.
    ///
    /// # Returns
    /// - `Ok((entries, total))` - Entries for the requested page and total matching count
    /// - `Err(DbErr)` - Database error during pagination query
    pub async fn get_paginated(
        &self,
        filter: &AuditLogFilter,
    ) -> Result<(Vec<AuditLogEntry>, u64), DbErr> {
        let mut query = entity::prelude::AuditLog::find();

        if let Some(action) = &filter.action {
            query = query.filter(entity::audit_log::Column::Action.eq(action.as_str()));
        }
        if let Some(actor_id) = filter.actor_id {
            query = query.filter(entity::audit_log::Column::ActorId.eq(actor_id));
        }

        let paginator = query
            .order_by_desc(entity::audit_log::Column::CreatedAt)
            .order_by_desc(entity::audit_log::Column::Id)
            .paginate(self.db, filter.per_page);

        let total = paginator.num_items().await?;
        let entries = paginator
            .fetch_page(filter.page)
            .await?
            .into_iter()
            .map(AuditLogEntry::from_entity)
            .collect();

        Ok((entries, total))
    }
}
