//! Server configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `FRUITVENDOR_DB_PATH` - Path of the redb database file (created if missing)
//!
//! ## Optional
//! - `FRUITVENDOR_HOST` - Bind address (default: 127.0.0.1)
//! - `FRUITVENDOR_PORT` - Listen port (default: 3000)
//! - `SENTRY_DSN` - Sentry error tracking DSN

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use thiserror::Error;

const DB_PATH: &str = "FRUITVENDOR_DB_PATH";
const HOST: &str = "FRUITVENDOR_HOST";
const PORT: &str = "FRUITVENDOR_PORT";
const SENTRY_DSN: &str = "SENTRY_DSN";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Path of the redb database file
    pub db_path: PathBuf,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let db_path = lookup(DB_PATH)
            .filter(|value| !value.is_empty())
            .map(PathBuf::from)
            .ok_or_else(|| ConfigError::MissingEnvVar(DB_PATH.to_string()))?;

        let host = lookup(HOST)
            .unwrap_or_else(|| "127.0.0.1".to_string())
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar(HOST.to_string(), e.to_string()))?;

        let port = lookup(PORT)
            .unwrap_or_else(|| "3000".to_string())
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar(PORT.to_string(), e.to_string()))?;

        let sentry_dsn = lookup(SENTRY_DSN).filter(|value| !value.is_empty());

        Ok(Self {
            db_path,
            host,
            port,
            sentry_dsn,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<ServerConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        ServerConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[(DB_PATH, "/tmp/fruit.redb")]).unwrap();

        assert_eq!(config.db_path, PathBuf::from("/tmp/fruit.redb"));
        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:3000");
        assert!(config.sentry_dsn.is_none());
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            (DB_PATH, "fruit.redb"),
            (HOST, "0.0.0.0"),
            (PORT, "8080"),
            (SENTRY_DSN, "https://key@sentry.example/1"),
        ])
        .unwrap();

        assert_eq!(config.socket_addr().to_string(), "0.0.0.0:8080");
        assert_eq!(
            config.sentry_dsn.as_deref(),
            Some("https://key@sentry.example/1")
        );
    }

    #[test]
    fn test_missing_db_path() {
        let err = load(&[]).unwrap_err();
        assert!(matches!(err, ConfigError::MissingEnvVar(ref key) if key == DB_PATH));

        let err = load(&[(DB_PATH, "")]).unwrap_err();
        assert!(matches!(err, ConfigError::MissingEnvVar(_)));
    }

    #[test]
    fn test_invalid_values() {
        let err = load(&[(DB_PATH, "f.redb"), (PORT, "not-a-port")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(ref key, _) if key == PORT));

        let err = load(&[(DB_PATH, "f.redb"), (HOST, "localhost:1")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(ref key, _) if key == HOST));
    }
}
