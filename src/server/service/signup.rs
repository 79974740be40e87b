//! Signup service: members applying for fleet roles and the admin review workflow.

use chrono::Utc;
use entity::signup::SignupStatus;
use sea_orm::{ActiveEnum, DatabaseConnection, TransactionTrait};
use serde_json::json;

use crate::server::{
    data::{
        audit_log::AuditLogRepository, blacklist::BlacklistRepository, fleet::FleetRepository,
        signup::SignupRepository,
    },
    error::{auth::AuthError, AppError},
    model::{
        audit_log::{AuditAction, CreateAuditLogParam},
        signup::{is_allowed_transition, CreateSignupParam, Signup, UpdateSignupStatusParam},
        user::User,
    },
    service::port_battle::find_battle,
};

pub struct SignupService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> SignupService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Signs a user up for a role.
    ///
    /// # Returns
    /// - `Ok(Signup)` - The pending signup
    /// - `Err(AuthError::Blacklisted)` - The user has an active blacklist entry
    /// - `Err(AppError::NotFound)` - Battle or role not found, or the role belongs elsewhere
    /// - `Err(AppError::BadRequest)` - The battle is not open for signups
    /// - `Err(AppError::Conflict)` - The user already holds an active signup for the battle
    pub async fn create(&self, user: &User, param: CreateSignupParam) -> Result<Signup, AppError> {
        let txn = self.db.begin().await?;

        if let Some(entry) = BlacklistRepository::new(&txn)
            .find_active(&user.discord_id, Utc::now())
            .await?
        {
            return Err(AuthError::Blacklisted(entry.reason).into());
        }

        let battle = find_battle(&txn, param.port_battle_id).await?;
        if !battle.accepts_signups(Utc::now()) {
            return Err(AppError::BadRequest(
                "Port battle is not open for signups".to_string(),
            ));
        }

        FleetRepository::new(&txn)
            .find_role(param.role_id)
            .await?
            .filter(|(_, battle_id)| *battle_id == battle.id)
            .ok_or_else(|| AppError::NotFound("Fleet role not found".to_string()))?;

        let repo = SignupRepository::new(&txn);
        if repo
            .has_active_signup(battle.id, param.user_id, None)
            .await?
        {
            return Err(AppError::Conflict(
                "You already have an active signup for this port battle".to_string(),
            ));
        }

        let signup = repo.create(param).await?;

        txn.commit().await?;

        tracing::info!(
            "User {} signed up for role {} in port battle {}",
            signup.user_id,
            signup.role_id,
            signup.port_battle_id
        );

        Ok(signup)
    }

    /// Withdraws a signup on behalf of its owner, or removes it as an admin.
    ///
    /// Admin removals of other users' signups are audited.
    pub async fn withdraw(
        &self,
        actor: &User,
        port_battle_id: i32,
        signup_id: i32,
    ) -> Result<Signup, AppError> {
        let txn = self.db.begin().await?;
        let repo = SignupRepository::new(&txn);

        let signup = repo
            .find_by_id(signup_id)
            .await?
            .filter(|s| s.port_battle_id == port_battle_id)
            .ok_or_else(|| AppError::NotFound("Signup not found".to_string()))?;

        if signup.user_id != actor.id && !actor.admin {
            return Err(AuthError::AccessDenied(
                actor.id,
                format!("remove signup {}", signup_id),
            )
            .into());
        }

        repo.delete(signup_id).await?;

        if signup.user_id != actor.id {
            AuditLogRepository::new(&txn)
                .create(CreateAuditLogParam::new(
                    actor.id,
                    AuditAction::SignupRemove,
                    signup_id,
                    json!({ "port_battle_id": port_battle_id, "user_id": signup.user_id }),
                ))
                .await?;
        }

        txn.commit().await?;

        Ok(signup)
    }

    /// Moves a signup to a new status.
    ///
    /// Approval requires the role to be free and the battle's approved BR plus the role's
    /// BR to stay within the limit. The write only succeeds if the status is still the one
    /// read at the start, so of two admins acting at once only one wins.
    ///
    /// # Returns
    /// - `Ok(Signup)` - The updated signup
    /// - `Err(AppError::NotFound)` - No such signup in the battle
    /// - `Err(AppError::BadRequest)` - Transition not allowed, role filled or BR limit exceeded
    /// - `Err(AppError::Conflict)` - The status changed concurrently, or reopening a denied
    ///   signup would give the user a second active signup
    pub async fn update_status(&self, param: UpdateSignupStatusParam) -> Result<Signup, AppError> {
        let txn = self.db.begin().await?;
        let repo = SignupRepository::new(&txn);

        let signup = repo
            .find_by_id(param.signup_id)
            .await?
            .filter(|s| s.port_battle_id == param.port_battle_id)
            .ok_or_else(|| AppError::NotFound("Signup not found".to_string()))?;

        if !is_allowed_transition(signup.status, param.status) {
            return Err(AppError::BadRequest(format!(
                "Cannot change signup status from {} to {}",
                signup.status.to_value(),
                param.status.to_value()
            )));
        }

        if signup.status == SignupStatus::Denied
            && repo
                .has_active_signup(signup.port_battle_id, signup.user_id, Some(signup.id))
                .await?
        {
            return Err(AppError::Conflict(
                "User already has another active signup for this port battle".to_string(),
            ));
        }

        if param.status == SignupStatus::Approved {
            if repo.role_is_filled(signup.role_id, signup.id).await? {
                return Err(AppError::BadRequest(
                    "This role already has an approved signup".to_string(),
                ));
            }

            let battle = find_battle(&txn, signup.port_battle_id).await?;
            let (role, _) = FleetRepository::new(&txn)
                .find_role(signup.role_id)
                .await?
                .ok_or_else(|| AppError::NotFound("Fleet role not found".to_string()))?;
            let approved_br = repo.get_approved_br(battle.id).await?;

            if approved_br + i64::from(role.br_value) > i64::from(battle.br_limit) {
                return Err(AppError::BadRequest(format!(
                    "Approving would exceed the BR limit ({} + {} > {})",
                    approved_br, role.br_value, battle.br_limit
                )));
            }
        }

        if !repo
            .update_status_if(signup.id, signup.status, param.status)
            .await?
        {
            return Err(AppError::Conflict(
                "Signup was modified concurrently, reload and retry".to_string(),
            ));
        }

        AuditLogRepository::new(&txn)
            .create(CreateAuditLogParam::new(
                param.actor_id,
                AuditAction::SignupStatusUpdate,
                signup.id,
                json!({
                    "port_battle_id": signup.port_battle_id,
                    "user_id": signup.user_id,
                    "from": signup.status.to_value(),
                    "to": param.status.to_value(),
                }),
            ))
            .await?;

        let updated = repo
            .find_by_id(signup.id)
            .await?
            .ok_or_else(|| AppError::NotFound("Signup not found".to_string()))?;

        txn.commit().await?;

        Ok(updated)
    }
}
