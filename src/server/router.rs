//! Route registration and the middleware stack.
//!
//! Every handler is registered through `utoipa_axum::routes!` so the OpenAPI document
//! is assembled from the same annotations the handlers carry. The document is served at
//! `/api-docs/openapi.json` and browsable through Swagger UI at `/docs`.

use std::{sync::Arc, time::Duration};

use axum::{
    http::{header::CONTENT_TYPE, HeaderValue, Method},
    middleware, Router,
};
use tower_governor::{governor::GovernorConfigBuilder, GovernorLayer};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tower_sessions::SessionManagerLayer;
use tower_sessions_sqlx_store::SqliteStore;
use utoipa::OpenApi;
use utoipa_axum::{router::OpenApiRouter, routes};
use utoipa_swagger_ui::SwaggerUi;

use crate::server::{
    config::Config,
    controller::{
        activity, audit_log, auth, blacklist, gallery, gdpr, health, port_battle, signup, user,
    },
    error::{config::ConfigError, AppError},
    middleware::maintenance::maintenance_gate,
    state::AppState,
};

#[derive(OpenApi)]
#[openapi(info(
    title = "UWS clan platform",
    description = "Gallery, port battle scheduling and admin tooling for the UWS Naval Action clan"
))]
struct ApiDoc;

/// Builds the application router with all layers applied.
///
/// Layers from the outside in: request tracing, CORS, per-IP rate limiting, sessions and
/// the maintenance gate. The gate sits inside the session layer because it reads the
/// session user.
pub fn router(
    state: AppState,
    config: &Config,
    session: SessionManagerLayer<SqliteStore>,
) -> Result<Router, AppError> {
    let (router, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        // Health & maintenance
        .routes(routes!(health::health))
        .routes(routes!(health::ready))
        .routes(routes!(health::live))
        .routes(routes!(health::get_maintenance, health::update_maintenance))
        // Auth
        .routes(routes!(auth::login))
        .routes(routes!(auth::logout))
        .routes(routes!(auth::get_user))
        // Users
        .routes(routes!(user::get_all_users))
        .routes(routes!(user::set_admin))
        // Gallery
        .routes(routes!(gallery::list_items, gallery::create_item))
        .routes(routes!(gallery::get_favorites))
        .routes(routes!(gallery::get_item, gallery::delete_item))
        .routes(routes!(gallery::vote))
        .routes(routes!(gallery::toggle_favorite))
        .routes(routes!(gallery::add_comment))
        .routes(routes!(gallery::delete_comment))
        .routes(routes!(gallery::get_pending_items))
        .routes(routes!(gallery::approve_item))
        .routes(routes!(gallery::reject_item))
        // Port battles
        .routes(routes!(
            port_battle::get_port_battles,
            port_battle::create_port_battle
        ))
        .routes(routes!(
            port_battle::get_port_battle,
            port_battle::update_port_battle,
            port_battle::delete_port_battle
        ))
        .routes(routes!(port_battle::get_br_summary))
        .routes(routes!(port_battle::add_fleet))
        .routes(routes!(port_battle::delete_fleet))
        .routes(routes!(port_battle::add_role))
        .routes(routes!(port_battle::delete_role))
        // Signups
        .routes(routes!(signup::create_signup))
        .routes(routes!(signup::delete_signup))
        .routes(routes!(signup::update_signup_status))
        // Admin tooling
        .routes(routes!(audit_log::get_audit_logs))
        .routes(routes!(
            blacklist::get_blacklist,
            blacklist::add_blacklist_entry
        ))
        .routes(routes!(blacklist::remove_blacklist_entry))
        .routes(routes!(gdpr::create_request, gdpr::get_own_requests))
        .routes(routes!(gdpr::get_all_requests))
        .routes(routes!(gdpr::process_request))
        .routes(routes!(gdpr::reject_request))
        .routes(routes!(gdpr::export_user))
        .routes(routes!(activity::get_activity))
        .split_for_parts();

    let governor_config = GovernorConfigBuilder::default()
        .per_millisecond((1000 / config.rate_limit_per_second.max(1)).max(1))
        .burst_size(config.rate_limit_burst.max(1))
        .finish()
        .ok_or_else(|| ConfigError::InvalidValue {
            name: "RATE_LIMIT_BURST".to_string(),
            reason: "rate limit quota must be positive".to_string(),
        })?;
    let governor_config = Arc::new(governor_config);

    // Forget idle clients so the limiter's key map stays small.
    let limiter = governor_config.limiter().clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(60));
        loop {
            interval.tick().await;
            limiter.retain_recent();
        }
    });

    let origin = HeaderValue::from_str(&config.app_url.origin().ascii_serialization())
        .map_err(|e| ConfigError::InvalidValue {
            name: "APP_URL".to_string(),
            reason: e.to_string(),
        })?;

    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_credentials(true)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([CONTENT_TYPE]);

    let router = router
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", api))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            maintenance_gate,
        ))
        .layer(session)
        .layer(GovernorLayer::new(governor_config))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    Ok(router)
}
