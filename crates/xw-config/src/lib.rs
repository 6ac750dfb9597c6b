//! # xw-config
//!
//! Layered configuration loading for xword using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`XWORD_*` prefix, `__` as separator)
//! 2. Project-level `.xword/config.toml`
//! 3. User-level `~/.config/xword/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `XWORD_STORE__DB_PATH` -> `store.db_path`,
//! `XWORD_QUERY__TIMEOUT_MS` -> `query.timeout_ms`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use xw_config::XwConfig;
//!
//! let config = XwConfig::load_with_dotenv().expect("config");
//! println!("corpus: {}", config.store.db_path);
//! ```

mod error;
mod query;
mod report;
mod store;

pub use error::ConfigError;
pub use query::QueryConfig;
pub use report::ReportConfig;
pub use store::StoreConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct XwConfig {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub query: QueryConfig,
    #[serde(default)]
    pub report: ReportConfig,
}

impl XwConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] for `.env` support.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Figment`] if a source cannot be parsed, or
    /// [`ConfigError::InvalidValue`] if a value is out of range.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_figment(&Self::figment())
    }

    /// Load configuration with `.env` file support from the current directory.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Extract and validate a config from an arbitrary figment.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn from_figment(figment: &Figment) -> Result<Self, ConfigError> {
        let config: Self = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Build the figment provider chain.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        let local_path = PathBuf::from(".xword/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed("XWORD_").split("__"))
    }

    /// Reject values that would make the query layer misbehave.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] naming the first bad field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.store.db_path.trim().is_empty() {
            return Err(invalid("store.db_path", "must not be empty"));
        }
        if self.query.default_page_length == 0 {
            return Err(invalid("query.default_page_length", "must be at least 1"));
        }
        if self.query.timeout_ms == 0 {
            return Err(invalid("query.timeout_ms", "must be at least 1"));
        }
        if self.report.top_answers == 0 {
            return Err(invalid("report.top_answers", "must be at least 1"));
        }
        Ok(())
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("xword").join("config.toml"))
    }
}

fn invalid(field: &str, reason: &str) -> ConfigError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        reason: reason.to_string(),
    }
}
