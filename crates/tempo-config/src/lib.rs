//! # tempo-config
//!
//! Layered configuration loading for Tempo using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`TEMPO_*` prefix, `__` as separator)
//! 2. Project-level `.tempo/config.toml`
//! 3. User-level `~/.config/tempo/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `TEMPO_STORE__PATH` -> `store.path`,
//! `TEMPO_IDENTITY__USER_ID` -> `identity.user_id`, etc.
//! The `__` (double underscore) separates nested config sections.
//!
//! # Usage
//!
//! ```no_run
//! use tempo_config::TempoConfig;
//!
//! let config = TempoConfig::load().expect("config");
//!
//! if config.identity.is_configured() {
//!     println!("signed in as {}", config.identity.user_id);
//! }
//! ```

mod error;
mod identity;
mod report;
mod store;

pub use error::ConfigError;
pub use identity::IdentityConfig;
pub use report::ReportConfig;
pub use store::StoreConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct TempoConfig {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub identity: IdentityConfig,
    #[serde(default)]
    pub report: ReportConfig,
}

impl TempoConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does not read `.env`; the binary loads it before calling this.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if any source fails to parse or a value is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Self::figment().extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment or layer providers on top.
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        let local_path = PathBuf::from(".tempo/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed("TEMPO_").split("__"))
    }

    /// Reject values that parse but cannot be used.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` for an out-of-range report offset
    /// or an empty store path.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.store.path.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "store.path".into(),
                reason: "must not be empty".into(),
            });
        }
        self.report.offset()?;
        Ok(())
    }

    /// Require a signed-in identity.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotConfigured` when `identity.user_id` is blank.
    pub fn require_identity(&self) -> Result<&IdentityConfig, ConfigError> {
        if self.identity.is_configured() {
            Ok(&self.identity)
        } else {
            Err(ConfigError::NotConfigured {
                section: "identity".into(),
            })
        }
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("tempo").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_loads() {
        let config = TempoConfig::default();
        assert!(!config.identity.is_configured());
        assert_eq!(config.store.path, ".tempo/tempo.db");
        assert_eq!(config.report.utc_offset_minutes, 0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn require_identity_fails_when_blank() {
        let config = TempoConfig::default();
        assert!(matches!(
            config.require_identity(),
            Err(ConfigError::NotConfigured { .. })
        ));
    }

    #[test]
    fn empty_store_path_is_invalid() {
        let mut config = TempoConfig::default();
        config.store.path = String::new();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { .. })
        ));
    }
}
