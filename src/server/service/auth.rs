use chrono::Utc;
use sea_orm::DatabaseConnection;

use crate::server::{
    data::{blacklist::BlacklistRepository, user::UserRepository},
    error::{auth::AuthError, AppError},
    model::user::{UpsertUserParam, User},
    service::admin_code::AdminCodeService,
};

/// Identity handed over by the upstream identity provider.
#[derive(Debug, Clone)]
pub struct LoginParam {
    pub discord_id: String,
    pub name: String,
    pub avatar_url: Option<String>,
    /// One-time code that grants admin privileges when valid.
    pub admin_code: Option<String>,
}

/// Service turning a verified identity into a local user.
///
/// Provider integration happens upstream; by the time `login` runs the Discord identity
/// has been verified and only the local checks remain.
pub struct AuthService<'a> {
    /// Database connection for user operations.
    pub db: &'a DatabaseConnection,
    /// Issuer of the one-time admin code.
    pub admin_code_service: &'a AdminCodeService,
}

impl<'a> AuthService<'a> {
    pub fn new(db: &'a DatabaseConnection, admin_code_service: &'a AdminCodeService) -> Self {
        Self {
            db,
            admin_code_service,
        }
    }

    /// Logs a user in, creating their record on first login.
    ///
    /// Blacklisted identities are rejected before anything is written. When an admin code
    /// is supplied it must be valid; it is consumed and the user becomes an admin.
    ///
    /// # Returns
    /// - `Ok(User)` - The created or refreshed user
    /// - `Err(AuthError::Blacklisted)` - The identity has an active blacklist entry
    /// - `Err(AuthError::InvalidAdminCode)` - Admin code supplied but wrong or expired
    /// - `Err(AppError::BadRequest)` - Missing identity fields
    /// - `Err(AppError::DbErr)` - Database error
    pub async fn login(&self, param: LoginParam) -> Result<User, AppError> {
        let discord_id = param.discord_id.trim().to_string();
        let name = param.name.trim().to_string();
        if discord_id.is_empty() || name.is_empty() {
            return Err(AppError::BadRequest(
                "discord_id and name are required".to_string(),
            ));
        }

        if let Some(entry) = BlacklistRepository::new(self.db)
            .find_active(&discord_id, Utc::now())
            .await?
        {
            tracing::info!("Rejected login for blacklisted user {}", discord_id);
            return Err(AuthError::Blacklisted(entry.reason).into());
        }

        let set_admin = match param.admin_code.as_deref() {
            Some(code) => {
                if !self.admin_code_service.redeem(code).await {
                    return Err(AuthError::InvalidAdminCode.into());
                }
                true
            }
            None => false,
        };

        // Only update admin status if set_admin is true, otherwise preserve existing status
        let user = UserRepository::new(self.db)
            .upsert(UpsertUserParam {
                discord_id,
                name,
                avatar_url: param.avatar_url.filter(|url| !url.trim().is_empty()),
                is_admin: set_admin.then_some(true),
            })
            .await?;

        if set_admin {
            tracing::info!("User {} has been set as admin", user.name)
        }

        Ok(user)
    }
}
