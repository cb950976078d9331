//! services/api/src/config.rs
//!
//! Defines the application's configuration structure and loading logic.
//!
//! All configuration is loaded from environment variables at startup. The `.env`
//! file is used for local development.

use axum::http::HeaderValue;
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing::Level;

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for the environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Holds all configuration loaded from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub bind_address: SocketAddr,
    pub log_level: Level,
    /// Directory served as static files; also the default home of the schedule file.
    pub public_dir: PathBuf,
    pub schedule_file: PathBuf,
    pub admin_username: String,
    pub admin_password: String,
    /// Extra origin allowed to call the API cross-site.
    pub cors_origin: Option<HeaderValue>,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// It will look for a `.env` file in the current directory for development,
    /// but this is skipped in test environments to ensure tests are hermetic.
    pub fn from_env() -> Result<Self, ConfigError> {
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }
        Self::from_vars(|name| std::env::var(name).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup.
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        // --- Server Settings ---
        let bind_address_str = var("BIND_ADDRESS").unwrap_or_else(|| "0.0.0.0:4173".to_string());
        let bind_address = bind_address_str.parse::<SocketAddr>().map_err(|e| {
            ConfigError::InvalidValue("BIND_ADDRESS".to_string(), e.to_string())
        })?;

        let log_level_str = var("RUST_LOG").unwrap_or_else(|| "INFO".to_string());
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        let cors_origin = var("CORS_ORIGIN")
            .filter(|origin| !origin.is_empty())
            .map(|origin| {
                origin.parse::<HeaderValue>().map_err(|e| {
                    ConfigError::InvalidValue("CORS_ORIGIN".to_string(), e.to_string())
                })
            })
            .transpose()?;

        // --- Storage ---
        let public_dir = var("PUBLIC_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("./docs"));
        let schedule_file = var("SCHEDULE_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|| public_dir.join("schedule.json"));

        // --- Admin Credential ---
        let admin_username = var("ADMIN_USERNAME").unwrap_or_else(|| "admin".to_string());
        let admin_password = var("ADMIN_PASSWORD").unwrap_or_else(|| "plan123".to_string());
        if admin_password.is_empty() {
            return Err(ConfigError::InvalidValue(
                "ADMIN_PASSWORD".to_string(),
                "must not be empty".to_string(),
            ));
        }

        Ok(Self {
            bind_address,
            log_level,
            public_dir,
            schedule_file,
            admin_username,
            admin_password,
            cors_origin,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_vars(|name| vars.get(name).cloned())
    }

    #[test]
    fn defaults_match_the_single_admin_setup() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.bind_address.port(), 4173);
        assert_eq!(config.admin_username, "admin");
        assert_eq!(config.admin_password, "plan123");
        assert_eq!(config.schedule_file, PathBuf::from("./docs").join("schedule.json"));
        assert_eq!(config.log_level, Level::INFO);
        assert!(config.cors_origin.is_none());
    }

    #[test]
    fn schedule_file_follows_public_dir() {
        let config = config_from(&[("PUBLIC_DIR", "/srv/www")]).unwrap();
        assert_eq!(config.schedule_file, PathBuf::from("/srv/www/schedule.json"));

        let config = config_from(&[("SCHEDULE_FILE", "/data/plan.json")]).unwrap();
        assert_eq!(config.schedule_file, PathBuf::from("/data/plan.json"));
    }

    #[test]
    fn rejects_invalid_values() {
        assert!(matches!(
            config_from(&[("BIND_ADDRESS", "not-an-address")]),
            Err(ConfigError::InvalidValue(name, _)) if name == "BIND_ADDRESS"
        ));
        assert!(config_from(&[("RUST_LOG", "chatty")]).is_err());
        assert!(config_from(&[("ADMIN_PASSWORD", "")]).is_err());
    }
}
