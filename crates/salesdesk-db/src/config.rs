//! # Connection Configuration
//!
//! Where the connection provider gets its URL and driver properties from.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variable (highest priority)                            │
//! │     SALESDESK_DB_URL=sqlite://./salesdesk.db                           │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     db.toml next to the working directory                              │
//! │                                                                         │
//! │  Any type implementing ConfigSource can stand in (tests hand over a    │
//! │  ConnectionSettings value directly).                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # db.toml
//! url = "sqlite://salesdesk.db"
//!
//! # Forwarded to SQLite as PRAGMA key = value on connect
//! [properties]
//! journal_mode = "WAL"
//! busy_timeout = "5000"
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{DataAccessError, DataAccessResult};

/// Environment variable overriding the configured URL.
pub const DB_URL_ENV: &str = "SALESDESK_DB_URL";

/// Default config file name.
pub const DEFAULT_CONFIG_FILE: &str = "db.toml";

// =============================================================================
// Connection Settings
// =============================================================================

/// Connection URL plus arbitrary driver properties.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionSettings {
    /// Connection URL, e.g. `sqlite://salesdesk.db` or `sqlite::memory:`.
    pub url: String,

    /// Driver properties, applied as SQLite PRAGMAs.
    #[serde(default)]
    pub properties: BTreeMap<String, String>,
}

impl ConnectionSettings {
    /// Settings for `url` with no extra properties.
    pub fn new(url: impl Into<String>) -> Self {
        ConnectionSettings {
            url: url.into(),
            properties: BTreeMap::new(),
        }
    }

    /// Adds a driver property.
    pub fn property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    /// A private in-memory database (for testing).
    ///
    /// The database lives as long as the provider's connection; closing the
    /// connection discards it.
    pub fn in_memory() -> Self {
        ConnectionSettings::new("sqlite::memory:")
    }

    fn validate(&self) -> DataAccessResult<()> {
        if self.url.trim().is_empty() {
            return Err(DataAccessError::InvalidConfig(
                "connection url is empty".to_string(),
            ));
        }
        Ok(())
    }
}

// =============================================================================
// Config Source
// =============================================================================

/// Supplies connection settings on demand.
///
/// The provider calls `load` once, right before opening its connection.
pub trait ConfigSource: Send + Sync {
    fn load(&self) -> DataAccessResult<ConnectionSettings>;
}

impl ConfigSource for ConnectionSettings {
    fn load(&self) -> DataAccessResult<ConnectionSettings> {
        self.validate()?;
        Ok(self.clone())
    }
}

/// Settings read from a TOML file, with environment override.
#[derive(Debug, Clone)]
pub struct FileConfig {
    path: PathBuf,
}

impl FileConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileConfig { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parses settings from TOML text.
    pub fn parse(contents: &str) -> DataAccessResult<ConnectionSettings> {
        Ok(toml::from_str(contents)?)
    }

    /// Loads the file, then applies overrides found through `env`.
    fn load_with(
        &self,
        env: impl Fn(&str) -> Option<String>,
    ) -> DataAccessResult<ConnectionSettings> {
        info!(path = %self.path.display(), "Loading connection config from file");

        let contents = std::fs::read_to_string(&self.path).map_err(|e| {
            DataAccessError::InvalidConfig(format!("{}: {e}", self.path.display()))
        })?;

        let mut settings = Self::parse(&contents)?;
        Self::apply_env_overrides(&mut settings, env);
        settings.validate()?;

        Ok(settings)
    }

    fn apply_env_overrides(
        settings: &mut ConnectionSettings,
        env: impl Fn(&str) -> Option<String>,
    ) {
        if let Some(url) = env(DB_URL_ENV) {
            debug!(env = DB_URL_ENV, "Overriding connection url from environment");
            settings.url = url;
        }
    }
}

impl Default for FileConfig {
    fn default() -> Self {
        FileConfig::new(DEFAULT_CONFIG_FILE)
    }
}

impl ConfigSource for FileConfig {
    /// ## Load Order (later overrides earlier)
    /// 1. Config file
    /// 2. Environment variable
    fn load(&self) -> DataAccessResult<ConnectionSettings> {
        self.load_with(|key| std::env::var(key).ok())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
