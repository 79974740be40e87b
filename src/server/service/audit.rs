use sea_orm::DatabaseConnection;

use crate::{
    model::api::page_size,
    server::{
        data::audit_log::AuditLogRepository,
        error::AppError,
        model::audit_log::{AuditLogEntry, AuditLogFilter, CreateAuditLogParam, PaginatedAuditLogs},
    },
};

/// Reads and writes the admin audit trail.
///
/// Mutations that run inside a transaction write their audit entry through
/// `AuditLogRepository` on the transaction instead, so the entry commits or rolls back with
/// the change it describes.
pub struct AuditService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> AuditService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn record(&self, param: CreateAuditLogParam) -> Result<AuditLogEntry, AppError> {
        let entry = AuditLogRepository::new(self.db).create(param).await?;

        tracing::info!(
            "Audit: {} on {} {:?} by {:?}",
            entry.action,
            entry.target_type,
            entry.target_id,
            entry.actor_id
        );

        Ok(entry)
    }

    /// Gets a page of audit entries, newest first.
    pub async fn get_paginated(
        &self,
        mut filter: AuditLogFilter,
    ) -> Result<PaginatedAuditLogs, AppError> {
        filter.per_page = page_size(filter.per_page);

        let (entries, total) = AuditLogRepository::new(self.db)
            .get_paginated(&filter)
            .await?;

        let total_pages = (total as f64 / filter.per_page as f64).ceil() as u64;

        Ok(PaginatedAuditLogs {
            entries,
            total,
            page: filter.page,
            per_page: filter.per_page,
            total_pages,
        })
    }
}
