//! Maintenance gate.
//!
//! While maintenance mode is on, API requests from anyone but an admin are answered
//! with 503. Health probes, the maintenance endpoints and authentication stay reachable
//! so admins can still log in and switch maintenance off.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tower_sessions::Session;

use crate::server::{error::AppError, middleware::auth::AuthGuard, state::AppState};

const GATED_PREFIX: &str = "/api/";
const EXEMPT_PREFIXES: &[&str] = &["/api/v1/maintenance", "/api/auth/"];

/// Whether maintenance mode applies to `path`.
pub fn is_gated(path: &str) -> bool {
    path.starts_with(GATED_PREFIX)
        && !EXEMPT_PREFIXES
            .iter()
            .any(|prefix| path.starts_with(prefix))
}

/// Layer function installed with `axum::middleware::from_fn_with_state`.
///
/// Must run inside the session layer so the `Session` extractor is available.
pub async fn maintenance_gate(
    State(state): State<AppState>,
    session: Session,
    request: Request,
    next: Next,
) -> Response {
    if let Err(error) = check(&state, &session, request.uri().path()).await {
        return error.into_response();
    }

    next.run(request).await
}

/// Decides whether a request to `path` may pass.
///
/// # Returns
/// - `Ok(())` - Maintenance is off, the path is exempt or the caller is an admin
/// - `Err(AppError::ServiceUnavailable)` - Request blocked by maintenance mode
pub async fn check(state: &AppState, session: &Session, path: &str) -> Result<(), AppError> {
    if !is_gated(path) {
        return Ok(());
    }

    let maintenance = state.maintenance.get().await;
    if !maintenance.enabled {
        return Ok(());
    }

    let caller = AuthGuard::new(&state.db, session).current_user().await?;
    if caller.is_some_and(|user| user.admin) {
        return Ok(());
    }

    Err(AppError::ServiceUnavailable(maintenance.message.unwrap_or_else(
        || "The platform is down for maintenance".to_string(),
    )))
}
