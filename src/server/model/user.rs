//! User domain models and parameters.
//!
//! Users are created on first login from the identity handed over by the upstream
//! provider and refreshed on every later login.

use chrono::{DateTime, Utc};

use crate::model::user::{PaginatedUsersDto, UserDto};

/// Platform member identified by their Discord account.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    /// Internal user ID.
    pub id: i32,
    /// Discord ID of the user.
    pub discord_id: String,
    /// Display name of the user.
    pub name: String,
    /// Avatar image URL, if the provider supplied one.
    pub avatar_url: Option<String>,
    /// Whether the user has admin privileges.
    pub admin: bool,
    /// When the user first logged in.
    pub created_at: DateTime<Utc>,
    /// When the user last logged in.
    pub last_seen_at: DateTime<Utc>,
}

impl User {
    /// Converts the user domain model to a DTO for API responses.
    pub fn into_dto(self) -> UserDto {
        UserDto {
            id: self.id,
            discord_id: self.discord_id,
            name: self.name,
            avatar_url: self.avatar_url,
            admin: self.admin,
            created_at: self.created_at,
        }
    }

    /// Converts an entity model to a user domain model at the repository boundary.
    pub fn from_entity(entity: entity::user::Model) -> Self {
        Self {
            id: entity.id,
            discord_id: entity.discord_id,
            name: entity.name,
            avatar_url: entity.avatar_url,
            admin: entity.admin,
            created_at: entity.created_at,
            last_seen_at: entity.last_seen_at,
        }
    }
}

/// Parameters for upserting a user during login.
///
/// The optional `is_admin` field preserves the stored admin status when `None`, so a
/// regular login never strips privileges.
#[derive(Debug, Clone)]
pub struct UpsertUserParam {
    /// Discord ID of the user.
    pub discord_id: String,
    /// Display name of the user.
    pub name: String,
    /// Avatar image URL.
    pub avatar_url: Option<String>,
    /// Optional admin status (None preserves existing admin status, Some updates it).
    pub is_admin: Option<bool>,
}

/// Paginated collection of users with metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct PaginatedUsers {
    /// Users for this page.
    pub users: Vec<User>,
    /// Total number of users across all pages.
    pub total: u64,
    /// Current page number (zero-indexed).
    pub page: u64,
    /// Number of users per page.
    pub per_page: u64,
    /// Total number of pages.
    pub total_pages: u64,
}

impl PaginatedUsers {
    pub fn into_dto(self) -> PaginatedUsersDto {
        PaginatedUsersDto {
            users: self.users.into_iter().map(User::into_dto).collect(),
            total: self.total,
            page: self.page,
            per_page: self.per_page,
            total_pages: self.total_pages,
        }
    }
}

/// Parameters for granting or revoking admin privileges.
#[derive(Debug, Clone)]
pub struct SetAdminParam {
    /// ID of the admin performing the change.
    pub actor_id: i32,
    /// ID of the user to modify.
    pub user_id: i32,
    /// Whether the user should have admin privileges.
    pub is_admin: bool,
}
