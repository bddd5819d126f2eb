//! # App Configuration
//!
//! Where the store lives and how money is shown.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     HOTELBOOK_DB_PATH=/data/hotelbook.db                               │
//! │     HOTELBOOK_DB_MAX_CONNECTIONS=8                                     │
//! │     HOTELBOOK_CURRENCY_SYMBOL=R                                        │
//! │     HOTELBOOK_SEED_CATALOG=false                                       │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/hotelbook/hotelbook.toml (Linux)                         │
//! │     ~/Library/Application Support/com.hotelbook.app/hotelbook.toml     │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [database]
//! path = "/var/lib/hotelbook/hotelbook.db"
//! max_connections = 5
//!
//! [booking]
//! currency_symbol = "R"
//! seed_catalog = true
//! ```

use hotelbook_core::Money;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, info, warn};

use crate::error::{DbError, DbResult};
use crate::pool::DbConfig;

// =============================================================================
// Sections
// =============================================================================

/// `[database]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatabaseSettings {
    /// SQLite file path.
    #[serde(default = "default_db_path")]
    pub path: PathBuf,

    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_db_path() -> PathBuf {
    directories::ProjectDirs::from("com", "hotelbook", "app")
        .map(|dirs| dirs.data_dir().join("hotelbook.db"))
        .unwrap_or_else(|| PathBuf::from("./hotelbook.db"))
}

fn default_max_connections() -> u32 {
    5
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        DatabaseSettings {
            path: default_db_path(),
            max_connections: default_max_connections(),
        }
    }
}

/// `[booking]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingSettings {
    /// Prefix for displayed amounts.
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,

    /// Insert the bundled hotel list into an empty store.
    #[serde(default = "default_seed_catalog")]
    pub seed_catalog: bool,
}

fn default_currency_symbol() -> String {
    "R".to_string()
}

fn default_seed_catalog() -> bool {
    true
}

impl Default for BookingSettings {
    fn default() -> Self {
        BookingSettings {
            currency_symbol: default_currency_symbol(),
            seed_catalog: default_seed_catalog(),
        }
    }
}

// =============================================================================
// App Configuration
// =============================================================================

/// Complete application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub database: DatabaseSettings,

    #[serde(default)]
    pub booking: BookingSettings,
}

impl AppConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (hotelbook.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> DbResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Validates the configuration.
    pub fn validate(&self) -> DbResult<()> {
        if self.database.path.as_os_str().is_empty() {
            return Err(DbError::InvalidConfig("database.path must not be empty".into()));
        }

        if self.database.max_connections == 0 {
            return Err(DbError::InvalidConfig(
                "database.max_connections must be greater than 0".into(),
            ));
        }

        if self.booking.currency_symbol.trim().is_empty() {
            return Err(DbError::InvalidConfig(
                "booking.currency_symbol must not be blank".into(),
            ));
        }

        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(path) = std::env::var("HOTELBOOK_DB_PATH") {
            debug!(path = %path, "Overriding database path from environment");
            self.database.path = PathBuf::from(path);
        }

        if let Ok(max) = std::env::var("HOTELBOOK_DB_MAX_CONNECTIONS") {
            if let Ok(n) = max.parse::<u32>() {
                self.database.max_connections = n;
            }
        }

        if let Ok(symbol) = std::env::var("HOTELBOOK_CURRENCY_SYMBOL") {
            self.booking.currency_symbol = symbol;
        }

        if let Ok(seed) = std::env::var("HOTELBOOK_SEED_CATALOG") {
            if let Ok(b) = seed.parse::<bool>() {
                self.booking.seed_catalog = b;
            }
        }
    }

    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "hotelbook", "app")
            .map(|dirs| dirs.config_dir().join("hotelbook.toml"))
    }

    /// Pool settings for [`Database::new`](crate::Database::new).
    pub fn db_config(&self) -> DbConfig {
        DbConfig::new(&self.database.path).max_connections(self.database.max_connections)
    }

    /// Formats an amount with the configured currency symbol.
    pub fn format_money(&self, amount: Money) -> String {
        amount.format_with(&self.booking.currency_symbol)
    }
}
