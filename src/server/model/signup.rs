//! Port battle signup domain models and parameters.

use chrono::{DateTime, Utc};
use entity::signup::SignupStatus;

use crate::model::signup::{SignupDto, SignupStatusDto};

impl From<SignupStatus> for SignupStatusDto {
    fn from(status: SignupStatus) -> Self {
        match status {
            SignupStatus::Pending => Self::Pending,
            SignupStatus::Approved => Self::Approved,
            SignupStatus::Denied => Self::Denied,
            SignupStatus::Standby => Self::Standby,
        }
    }
}

impl From<SignupStatusDto> for SignupStatus {
    fn from(status: SignupStatusDto) -> Self {
        match status {
            SignupStatusDto::Pending => Self::Pending,
            SignupStatusDto::Approved => Self::Approved,
            SignupStatusDto::Denied => Self::Denied,
            SignupStatusDto::Standby => Self::Standby,
        }
    }
}

/// Whether a signup may move from `from` to `to`.
///
/// Allowed transitions:
/// - `PENDING` to `APPROVED`, `DENIED` or `STANDBY`
/// - `STANDBY` to `APPROVED` or `DENIED`
/// - `APPROVED` to `STANDBY` or `DENIED`
/// - `DENIED` back to `PENDING`
pub fn is_allowed_transition(from: SignupStatus, to: SignupStatus) -> bool {
    use SignupStatus::*;

    matches!(
        (from, to),
        (Pending, Approved)
            | (Pending, Denied)
            | (Pending, Standby)
            | (Standby, Approved)
            | (Standby, Denied)
            | (Approved, Standby)
            | (Approved, Denied)
            | (Denied, Pending)
    )
}

/// A user's request to fill a fleet role in a port battle.
#[derive(Debug, Clone, PartialEq)]
pub struct Signup {
    pub id: i32,
    pub port_battle_id: i32,
    pub role_id: i32,
    pub user_id: i32,
    /// Display name of the signed up user at query time.
    pub user_name: String,
    pub status: SignupStatus,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Signup {
    pub fn from_entity(entity: entity::signup::Model, user: Option<entity::user::Model>) -> Self {
        Self {
            id: entity.id,
            port_battle_id: entity.port_battle_id,
            role_id: entity.role_id,
            user_id: entity.user_id,
            user_name: user.map(|u| u.name).unwrap_or_else(|| "Unknown".to_string()),
            status: entity.status,
            note: entity.note,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }

    pub fn into_dto(self) -> SignupDto {
        SignupDto {
            id: self.id,
            port_battle_id: self.port_battle_id,
            role_id: self.role_id,
            user_id: self.user_id,
            user_name: self.user_name,
            status: self.status.into(),
            note: self.note,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Parameters for signing up to a fleet role.
#[derive(Debug, Clone)]
pub struct CreateSignupParam {
    pub port_battle_id: i32,
    pub role_id: i32,
    pub user_id: i32,
    pub note: Option<String>,
}

/// Parameters for an admin moving a signup to a new status.
#[derive(Debug, Clone)]
pub struct UpdateSignupStatusParam {
    pub actor_id: i32,
    pub port_battle_id: i32,
    pub signup_id: i32,
    pub status: SignupStatus,
}

#[cfg(test)]
mod tests {
    use super::*;
    use SignupStatus::*;

    #[test]
    fn allows_documented_transitions() {
        for (from, to) in [
            (Pending, Approved),
            (Pending, Denied),
            (Pending, Standby),
            (Standby, Approved),
            (Standby, Denied),
            (Approved, Standby),
            (Approved, Denied),
            (Denied, Pending),
        ] {
            assert!(is_allowed_transition(from, to), "{:?} -> {:?}", from, to);
        }
    }

    #[test]
    fn rejects_other_transitions() {
        for (from, to) in [
            (Pending, Pending),
            (Approved, Approved),
            (Approved, Pending),
            (Standby, Pending),
            (Denied, Approved),
            (Denied, Standby),
        ] {
            assert!(!is_allowed_transition(from, to), "{:?} -> {:?}", from, to);
        }
    }
}
