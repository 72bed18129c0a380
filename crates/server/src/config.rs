//! Server configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `CATALOG_HOST` - Bind address (default: 127.0.0.1)
//! - `CATALOG_PORT` - Listen port (default: 8080)
//! - `CATALOG_CACHE_CAPACITY` - Maximum cached query results (default: 1000)
//! - `CATALOG_SEED_SAMPLE_DATA` - Load demo phones at start-up (default: true)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment tag (default: development)

use std::net::{IpAddr, SocketAddr};

use thiserror::Error;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Catalog server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Maximum number of entries in the query cache
    pub cache_capacity: u64,
    /// Whether to load sample phones and categories on start-up
    pub seed_sample_data: bool,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment tag
    pub sentry_environment: String,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed.
    pub fn from_vars(vars: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get_or = |key: &str, default: &str| vars(key).unwrap_or_else(|| default.to_string());

        let host = parse_var("CATALOG_HOST", &get_or("CATALOG_HOST", "127.0.0.1"))?;
        let port = parse_var("CATALOG_PORT", &get_or("CATALOG_PORT", "8080"))?;
        let cache_capacity: u64 = parse_var(
            "CATALOG_CACHE_CAPACITY",
            &get_or("CATALOG_CACHE_CAPACITY", "1000"),
        )?;
        if cache_capacity == 0 {
            return Err(ConfigError::InvalidEnvVar(
                "CATALOG_CACHE_CAPACITY".to_string(),
                "must be at least 1".to_string(),
            ));
        }
        let seed_sample_data = parse_bool(
            "CATALOG_SEED_SAMPLE_DATA",
            &get_or("CATALOG_SEED_SAMPLE_DATA", "true"),
        )?;
        let sentry_dsn = vars("SENTRY_DSN").filter(|dsn| !dsn.trim().is_empty());
        let sentry_environment = get_or("SENTRY_ENVIRONMENT", "development");

        Ok(Self {
            host,
            port,
            cache_capacity,
            seed_sample_data,
            sentry_dsn,
            sentry_environment,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::from([127, 0, 0, 1]),
            port: 8080,
            cache_capacity: 1000,
            seed_sample_data: true,
            sentry_dsn: None,
            sentry_environment: "development".to_string(),
        }
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

fn parse_var<T>(key: &str, value: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("expected a boolean, got '{other}'"),
        )),
    }
}
