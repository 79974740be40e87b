//! Environment-based application configuration.

use std::net::SocketAddr;

use url::Url;

use crate::server::error::{config::ConfigError, AppError};

const DEFAULT_BIND_ADDR: ([u8; 4], u16) = ([0, 0, 0, 0], 8080);
const DEFAULT_APP_URL: &str = "http://localhost:3000";

pub struct Config {
    pub database_url: String,
    /// Address the HTTP listener binds to.
    pub bind_addr: SocketAddr,
    /// Public URL of the web frontend, used as the CORS origin.
    pub app_url: Url,

    /// Sustained requests per second allowed per client IP.
    pub rate_limit_per_second: u64,
    /// Burst size allowed per client IP before 429s start.
    pub rate_limit_burst: u32,

    /// Maximum number of entries kept by the in-memory activity logger.
    pub activity_log_capacity: usize,
    /// Activity entries older than this are pruned by the scheduler.
    pub activity_retention_hours: i64,

    /// How long after `scheduled_at` a port battle is considered over.
    pub port_battle_duration_minutes: i64,

    /// Whether the service starts in maintenance mode.
    pub maintenance_mode: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        let app_url_raw = optional_var("APP_URL").unwrap_or_else(|| DEFAULT_APP_URL.to_string());
        let app_url = Url::parse(&app_url_raw).map_err(|e| ConfigError::InvalidValue {
            name: "APP_URL".to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            database_url: std::env::var("DATABASE_URL")
                .map_err(|_| ConfigError::MissingEnvVar("DATABASE_URL".to_string()))?,
            bind_addr: parse_var("BIND_ADDR", SocketAddr::from(DEFAULT_BIND_ADDR))?,
            app_url,
            rate_limit_per_second: parse_var("RATE_LIMIT_PER_SECOND", 2)?,
            rate_limit_burst: parse_var("RATE_LIMIT_BURST", 30)?,
            activity_log_capacity: parse_var("ACTIVITY_LOG_CAPACITY", 10_000)?,
            activity_retention_hours: parse_var("ACTIVITY_RETENTION_HOURS", 168)?,
            port_battle_duration_minutes: parse_var("PORT_BATTLE_DURATION_MINUTES", 150)?,
            maintenance_mode: parse_var("MAINTENANCE_MODE", false)?,
        })
    }
}

fn optional_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.trim().is_empty())
}

/// Reads an optional variable, falling back to `default` when unset.
fn parse_var<T>(name: &str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match optional_var(name) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|e| ConfigError::InvalidValue {
                name: name.to_string(),
                reason: e.to_string(),
            }),
        None => Ok(default),
    }
}
