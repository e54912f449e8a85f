//! Configuration module
//!
//! `AppConfig` is read from a TOML file. Every section and every key is
//! optional and falls back to its default:
//!
//! ```toml
//! [server]
//! host = "0.0.0.0"
//! port = 8080
//!
//! [database]
//! url = "sqlite://./rental.db?mode=rwc"
//!
//! [logging]
//! level = "info"
//! format = "json"
//!
//! [pricing]
//! minimum_days = 1
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::domain::query::PageLimits;
use crate::domain::PricingPolicy;
use crate::infrastructure::DatabaseConfig;
use crate::shared::InfraError;

/// Environment variable holding an explicit config file path
pub const CONFIG_PATH_ENV: &str = "RENTAL_CONFIG";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
    pub pricing: PricingPolicy,
    pub listing: ListingConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Deadline applied to every core operation started by a request
    pub request_timeout_secs: u64,
    /// Seconds to wait for in-flight requests on shutdown
    pub shutdown_timeout: u64,
}

impl ServerConfig {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            request_timeout_secs: 30,
            shutdown_timeout: 30,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive, overridden by `RUST_LOG`
    pub level: String,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct ListingConfig {
    pub default_page_size: u64,
    pub max_page_size: u64,
}

impl Default for ListingConfig {
    fn default() -> Self {
        let limits = PageLimits::default();
        Self {
            default_page_size: limits.default_page_size,
            max_page_size: limits.max_page_size,
        }
    }
}

impl ListingConfig {
    pub fn limits(&self) -> PageLimits {
        PageLimits {
            default_page_size: self.default_page_size,
            max_page_size: self.max_page_size,
        }
    }
}

impl AppConfig {
    /// Read and validate the TOML file at `path`. A missing file yields
    /// `Ok(None)`; unreadable or invalid files are errors.
    pub fn load_optional(path: &Path) -> Result<Option<Self>, InfraError> {
        match std::fs::read_to_string(path) {
            Ok(raw) => Self::from_toml(&raw).map(Some),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub fn from_toml(raw: &str) -> Result<Self, InfraError> {
        let config: Self = toml::from_str(raw).map_err(|e| InfraError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), InfraError> {
        let listing = &self.listing;
        if listing.default_page_size == 0 || listing.max_page_size == 0 {
            return Err(InfraError::Config("page sizes must be at least 1".into()));
        }
        if listing.default_page_size > listing.max_page_size {
            return Err(InfraError::Config(format!(
                "default_page_size {} exceeds max_page_size {}",
                listing.default_page_size, listing.max_page_size
            )));
        }
        if self.server.request_timeout_secs == 0 {
            return Err(InfraError::Config("server.request_timeout_secs must be at least 1".into()));
        }
        if self.database.url.trim().is_empty() {
            return Err(InfraError::Config("database.url is empty".into()));
        }
        Ok(())
    }
}

/// `$RENTAL_CONFIG`, or `<config dir>/rental-service/config.toml`.
pub fn config_path() -> PathBuf {
    std::env::var_os(CONFIG_PATH_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(default_config_path)
}

pub fn default_config_path() -> PathBuf {
    dirs_next::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("rental-service")
        .join("config.toml")
}
