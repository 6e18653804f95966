//! Configuration management
//!
//! Settings are layered with the `config` crate:
//!
//! 1. built-in defaults
//! 2. an optional file (`--config <path>`, or `parking-ticket.{toml,yaml}` in
//!    the working directory)
//! 3. environment variables with the `PARKING_` prefix, using `__` between
//!    sections (`PARKING_SERVER__PORT=8080`)

use crate::core::DEFAULT_HOURLY_RATE;
use crate::error::{ParkingError, Result};
use config::{Environment, File};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Base name of the configuration file looked up in the working directory
pub const DEFAULT_CONFIG_NAME: &str = "parking-ticket";

/// Prefix of environment overrides
pub const ENV_PREFIX: &str = "PARKING";

/// Effective configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub pricing: PricingConfig,
    pub storage: StorageConfig,
    pub logging: LoggingConfig,
}

/// HTTP listener settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Fee settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingConfig {
    /// Currency units charged per hour parked
    pub hourly_rate: Decimal,
}

/// Which ticket store to use and where it lives
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    /// Root directory of the file backend
    pub path: PathBuf,
    /// Connection URL of the sqlite backend
    pub database_url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Memory,
    File,
    Sqlite,
}

impl fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Memory => "memory",
            Self::File => "file",
            Self::Sqlite => "sqlite",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default `tracing` filter when `RUST_LOG` is unset
    pub level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 5000,
            },
            pricing: PricingConfig {
                hourly_rate: DEFAULT_HOURLY_RATE,
            },
            storage: StorageConfig {
                backend: StorageBackend::File,
                path: PathBuf::from(".parking-ticket"),
                database_url: "sqlite://parking-ticket.db".to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
            },
        }
    }
}

impl Config {
    /// Load configuration, reading `path` if given
    ///
    /// Without an explicit path, `parking-ticket.{toml,yaml,...}` in the
    /// working directory is used when present.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let defaults = Self::default();
        let mut builder = config::Config::builder()
            .set_default("server.host", defaults.server.host)?
            .set_default("server.port", i64::from(defaults.server.port))?
            .set_default("pricing.hourly_rate", defaults.pricing.hourly_rate.to_string())?
            .set_default("storage.backend", defaults.storage.backend.to_string())?
            .set_default("storage.path", defaults.storage.path.display().to_string())?
            .set_default("storage.database_url", defaults.storage.database_url)?
            .set_default("logging.level", defaults.logging.level)?;

        builder = match path {
            Some(path) => builder.add_source(File::from(path).required(true)),
            None => builder.add_source(File::with_name(DEFAULT_CONFIG_NAME).required(false)),
        };

        let config: Self = builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.pricing.hourly_rate.is_sign_negative() && !self.pricing.hourly_rate.is_zero() {
            return Err(ParkingError::Config(
                "pricing.hourly_rate must not be negative".to_string(),
            ));
        }
        if self.server.host.trim().is_empty() {
            return Err(ParkingError::Config("server.host must not be empty".to_string()));
        }
        Ok(())
    }

    /// Address the HTTP server binds to
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
