//! API server configuration module.
//!
//! Configuration is loaded from environment variables with fallback to defaults.
//!
//! | Variable                 | Default            |
//! |--------------------------|--------------------|
//! | `HOST`                   | `0.0.0.0`          |
//! | `PORT`                   | `8080`             |
//! | `DATABASE_PATH`          | `./packulator.db`  |
//! | `DB_MAX_CONNECTIONS`     | `5`                |
//! | `ENVIRONMENT`            | `development`      |
//! | `LOG_LEVEL`              | `info`             |
//! | `MAX_REQUESTED_AMOUNT`   | `1000000`          |
//! | `MAX_SEARCH_BOUND`       | `10000000`         |
//! | `CALCULATION_TIMEOUT_MS` | `5000`             |

use std::env;
use std::str::FromStr;
use std::time::Duration;

use packulator_core::{SearchLimits, DEFAULT_MAX_SEARCH_BOUND};
use packulator_db::DbConfig;

/// API server configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Interface to bind
    pub host: String,

    /// HTTP port
    pub port: u16,

    /// SQLite database file
    pub database_path: String,

    /// Pool size for the catalog store
    pub db_max_connections: u32,

    /// `development` or `production`
    pub environment: String,

    /// Default tracing filter when `RUST_LOG` is unset
    pub log_level: String,

    /// Largest amount `/packaging/number_of_packages` accepts
    pub max_requested_amount: i64,

    /// Ceiling for `amount + largest size` in the optimizer
    pub max_search_bound: u64,

    /// Deadline for one calculation
    pub calculation_timeout: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        ApiConfig {
            host: "0.0.0.0".to_string(),
            port: 8080,
            database_path: "./packulator.db".to_string(),
            db_max_connections: 5,
            environment: "development".to_string(),
            log_level: "info".to_string(),
            max_requested_amount: 1_000_000,
            max_search_bound: DEFAULT_MAX_SEARCH_BOUND,
            calculation_timeout: Duration::from_millis(5000),
        }
    }
}

impl ApiConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn load_from<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = ApiConfig::default();

        let config = ApiConfig {
            host: lookup("HOST").unwrap_or(defaults.host),
            port: parse_or(&lookup, "PORT", defaults.port)?,
            database_path: lookup("DATABASE_PATH").unwrap_or(defaults.database_path),
            db_max_connections: parse_or(&lookup, "DB_MAX_CONNECTIONS", defaults.db_max_connections)?,
            environment: lookup("ENVIRONMENT").unwrap_or(defaults.environment),
            log_level: lookup("LOG_LEVEL").unwrap_or(defaults.log_level),
            max_requested_amount: parse_or(
                &lookup,
                "MAX_REQUESTED_AMOUNT",
                defaults.max_requested_amount,
            )?,
            max_search_bound: parse_or(&lookup, "MAX_SEARCH_BOUND", defaults.max_search_bound)?,
            calculation_timeout: Duration::from_millis(parse_or(
                &lookup,
                "CALCULATION_TIMEOUT_MS",
                defaults.calculation_timeout.as_millis() as u64,
            )?),
        };

        if config.db_max_connections == 0 {
            return Err(ConfigError::InvalidValue("DB_MAX_CONNECTIONS".to_string()));
        }
        if config.max_requested_amount <= 0 {
            return Err(ConfigError::InvalidValue("MAX_REQUESTED_AMOUNT".to_string()));
        }
        if config.max_search_bound <= config.max_requested_amount as u64 {
            return Err(ConfigError::InvalidValue("MAX_SEARCH_BOUND".to_string()));
        }
        if config.calculation_timeout.is_zero() {
            return Err(ConfigError::InvalidValue("CALCULATION_TIMEOUT_MS".to_string()));
        }

        Ok(config)
    }

    pub fn is_production(&self) -> bool {
        self.environment.eq_ignore_ascii_case("production")
    }

    pub fn is_development(&self) -> bool {
        self.environment.eq_ignore_ascii_case("development")
    }

    /// `host:port` for the listener.
    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Catalog store settings derived from this config.
    pub fn db_config(&self) -> DbConfig {
        DbConfig::new(&self.database_path).max_connections(self.db_max_connections)
    }

    /// Largest pack size a catalog may register: any accepted amount plus
    /// this size stays within `max_search_bound`.
    pub fn max_pack_size(&self) -> u64 {
        self.search_limits()
            .max_search_bound
            .saturating_sub(self.max_requested_amount as u64)
    }

    /// Optimizer limits derived from this config.
    pub fn search_limits(&self) -> SearchLimits {
        SearchLimits::new(self.max_search_bound)
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue(key.to_string())),
        None => Ok(default),
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}
