use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::server::error::error_response;

#[derive(Error, Debug)]
pub enum AuthError {
    /// No user ID stored in the session.
    ///
    /// The request did not come from a logged in browser session.
    /// Results in a 401 Unauthorized response.
    #[error("No user found in session")]
    UserNotInSession,

    /// The session references a user that no longer exists.
    ///
    /// Happens after a user record is removed while a session is still alive.
    /// Results in a 401 Unauthorized response.
    #[error("User {0} from session not found in database")]
    UserNotInDatabase(i32),

    /// The user is authenticated but lacks the required permission.
    ///
    /// Contains the user ID and a description of the denied action for logging.
    /// Results in a 403 Forbidden response.
    #[error("Access denied for user {0}: {1}")]
    AccessDenied(i32, String),

    /// The identity is on the blacklist.
    ///
    /// Results in a 403 Forbidden response.
    #[error("Blacklisted: {0}")]
    Blacklisted(String),

    /// An admin code was supplied but does not match or has expired.
    ///
    /// Results in a 400 Bad Request response.
    #[error("Invalid or expired admin code")]
    InvalidAdminCode,
}

/// Converts authentication errors into HTTP responses.
///
/// Errors are logged at debug level while client-facing messages stay generic to avoid
/// leaking which users exist or why access was denied.
///
/// # Returns
/// - 400 Bad Request - For an invalid admin code
/// - 401 Unauthorized - For missing sessions and unknown session users
/// - 403 Forbidden - For denied access and blacklisted identities
impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        tracing::debug!("{}", self);

        let (status, message) = match self {
            Self::UserNotInSession | Self::UserNotInDatabase(_) => {
                (StatusCode::UNAUTHORIZED, "Authentication required")
            }
            Self::AccessDenied(_, _) => (
                StatusCode::FORBIDDEN,
                "You don't have permission to perform this action",
            ),
            Self::Blacklisted(_) => (
                StatusCode::FORBIDDEN,
                "This account has been banned from the platform",
            ),
            Self::InvalidAdminCode => (StatusCode::BAD_REQUEST, "Invalid or expired admin code"),
        };

        error_response(status, message)
    }
}
