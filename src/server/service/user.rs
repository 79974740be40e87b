//! User service for business logic.
//!
//! This module provides the `UserService` for listing users and managing admin
//! privileges. Privilege changes are written to the audit log.

use sea_orm::DatabaseConnection;
use serde_json::json;

use crate::{
    model::api::page_size,
    server::{
        data::user::UserRepository,
        error::AppError,
        model::{
            audit_log::{AuditAction, CreateAuditLogParam},
            user::{PaginatedUsers, SetAdminParam, User},
        },
        service::audit::AuditService,
    },
};

/// Service providing business logic for user management.
pub struct UserService<'a> {
    pub db: &'a DatabaseConnection,
}

impl<'a> UserService<'a> {
    /// Creates a new UserService instance.
    ///
    /// # Arguments
    /// - `db` - Reference to the database connection
    ///
    /// # Returns
    /// - `UserService` - New service instance
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Retrieves a user by their internal ID.
    ///
    /// # Returns
    /// - `Ok(Some(User))` - User found
    /// - `Ok(None)` - No user with that ID
    /// - `Err(AppError::DbErr)` - Database error during query
    pub async fn get_user(&self, user_id: i32) -> Result<Option<User>, AppError> {
        let user = UserRepository::new(self.db).find_by_id(user_id).await?;
        Ok(user)
    }

    /// Retrieves all users with pagination.
    ///
    /// Returns a paginated collection of users ordered alphabetically by name.
    /// Calculates total pages based on the per_page parameter and total user count.
    ///
    /// # Arguments
    /// - `page` - Zero-indexed page number
    /// - `per_page` - Number of users per page
    ///
    /// # Returns
    /// - `Ok(PaginatedUsers)` - Users for the requested page with pagination metadata
    /// - `Err(AppError::DbErr)` - Database error during pagination query
    pub async fn get_all_users(&self, page: u64, per_page: u64) -> Result<PaginatedUsers, AppError> {
        let per_page = page_size(per_page);

        let (users, total_items) = UserRepository::new(self.db)
            .get_all_paginated(page, per_page)
            .await?;

        let total_pages = (total_items as f64 / per_page as f64).ceil() as u64;

        Ok(PaginatedUsers {
            users,
            total: total_items,
            page,
            per_page,
            total_pages,
        })
    }

    /// Grants or revokes admin privileges.
    ///
    /// An admin cannot revoke their own privileges, which keeps at least the acting admin
    /// in place.
    ///
    /// # Arguments
    /// - `param` - Acting admin, target user and new admin flag
    ///
    /// # Returns
    /// - `Ok(User)` - The updated user
    /// - `Err(AppError::BadRequest)` - Admin tried to revoke their own privileges
    /// - `Err(AppError::NotFound)` - Target user does not exist
    /// - `Err(AppError::DbErr)` - Database error during update
    pub async fn set_admin(&self, param: SetAdminParam) -> Result<User, AppError> {
        if param.actor_id == param.user_id && !param.is_admin {
            return Err(AppError::BadRequest(
                "You cannot revoke your own admin privileges".to_string(),
            ));
        }

        let user = UserRepository::new(self.db)
            .set_admin(param.user_id, param.is_admin)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        AuditService::new(self.db)
            .record(CreateAuditLogParam::new(
                param.actor_id,
                AuditAction::UserSetAdmin,
                user.id,
                json!({ "admin": param.is_admin, "name": user.name }),
            ))
            .await?;

        Ok(user)
    }
}
