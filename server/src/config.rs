//! Server configuration parsed from environment variables.
//!
//! Variables:
//! - `PORT`: listen port, default 3000
//! - `BACKEND_API_URL`: base URL of the POS REST API, default `http://localhost:8000/api`
//! - `BACKEND_TIMEOUT_SECS`: per-request timeout for backend calls, default 10
//! - `COOKIE_SECURE`: mark the session cookie `Secure`; inferred from an
//!   `https` backend URL when unset
//! - `EDGE_PROTECTED_PREFIXES`: comma-separated paths the edge gate guards,
//!   default `/dashboard`

use std::time::Duration;

use access::{RouteTable, RouteTableError};

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_BACKEND_API_URL: &str = "http://localhost:8000/api";
pub const DEFAULT_BACKEND_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_PROTECTED_PREFIXES: &str = "/dashboard";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid PORT: {0}")]
    InvalidPort(String),
    #[error("invalid BACKEND_API_URL: {0}")]
    InvalidBackendUrl(String),
    #[error("invalid route table: {0}")]
    Routes(#[from] RouteTableError),
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub backend_url: String,
    pub backend_timeout: Duration,
    pub cookie_secure: bool,
    pub routes: RouteTable,
}

impl ServerConfig {
    /// Build typed config from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error for an unparseable port, a backend URL without an
    /// http(s) scheme, or protected prefixes that break the route table.
    pub fn from_env() -> Result<Self, ConfigError> {
        let port = match std::env::var("PORT") {
            Ok(raw) => raw.trim().parse::<u16>().map_err(|_| ConfigError::InvalidPort(raw))?,
            Err(_) => DEFAULT_PORT,
        };

        let backend_url = normalize_backend_url(
            &std::env::var("BACKEND_API_URL").unwrap_or_else(|_| DEFAULT_BACKEND_API_URL.to_owned()),
        )?;

        let backend_timeout = Duration::from_secs(env_parse("BACKEND_TIMEOUT_SECS", DEFAULT_BACKEND_TIMEOUT_SECS));

        let cookie_secure = env_bool("COOKIE_SECURE").unwrap_or_else(|| backend_url.starts_with("https://"));

        let prefixes = parse_prefixes(
            &std::env::var("EDGE_PROTECTED_PREFIXES").unwrap_or_else(|_| DEFAULT_PROTECTED_PREFIXES.to_owned()),
        );
        let routes = RouteTable::with_protected(prefixes)?;

        Ok(Self { port, backend_url, backend_timeout, cookie_secure, routes })
    }
}

pub(crate) fn env_bool(key: &str) -> Option<bool> {
    std::env::var(key)
        .ok()
        .and_then(|raw| match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Some(true),
            "0" | "false" | "no" | "off" => Some(false),
            _ => None,
        })
}

fn env_parse<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr + Copy,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse::<T>().ok())
        .unwrap_or(default)
}

fn normalize_backend_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        Ok(trimmed.to_owned())
    } else {
        Err(ConfigError::InvalidBackendUrl(raw.to_owned()))
    }
}

fn parse_prefixes(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_owned)
        .collect()
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
