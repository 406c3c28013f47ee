//! Application configuration loading and validation.
//!
//! Configuration is loaded from a TOML file with environment variable overrides
//! for the webhook bot name and shared secret.

use serde::Deserialize;
use std::path::Path;

use crate::error::{ConfigError, Result};

mod logging;
mod service;

pub use logging::LoggingConfig;
pub use service::{
    ApiConfig, DisplayConfig, NotifierConfig, SamplerConfig, StoreConfig, StoreFormat,
};

/// Environment variable holding the webhook bot name.
pub const BOT_NAME_ENV: &str = "COINPULSE_BOT_NAME";
/// Environment variable holding the webhook shared secret.
pub const BOT_SECRET_ENV: &str = "COINPULSE_BOT_SECRET";

/// Main application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub sampler: SamplerConfig,
    pub store: StoreConfig,
    pub notifier: NotifierConfig,
    pub display: DisplayConfig,
    pub logging: LoggingConfig,
}

impl Config {
    /// Load and validate a TOML configuration file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::from_toml(&content)
    }

    /// Load `path` if it exists, otherwise start from defaults.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        if path.as_ref().exists() {
            return Self::load(path);
        }
        let mut config = Self::default();
        config.apply_env();
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self> {
        let mut config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.apply_env();
        config.validate()?;
        Ok(config)
    }

    // Secrets are never read from the config file.
    fn apply_env(&mut self) {
        self.notifier.bot_name = non_empty_env(BOT_NAME_ENV);
        self.notifier.secret = non_empty_env(BOT_SECRET_ENV);
    }

    fn validate(&self) -> Result<()> {
        if self.api.base_url.trim().is_empty() {
            return Err(ConfigError::MissingField { field: "base_url" }.into());
        }
        if let Err(e) = url::Url::parse(&self.api.base_url) {
            return Err(ConfigError::InvalidValue {
                field: "base_url",
                reason: e.to_string(),
            }
            .into());
        }
        if self.sampler.interval_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "interval_secs",
                reason: "must be greater than zero".into(),
            }
            .into());
        }
        if self.sampler.notify_threshold_pct.is_sign_negative() {
            return Err(ConfigError::InvalidValue {
                field: "notify_threshold_pct",
                reason: "must not be negative".into(),
            }
            .into());
        }
        if self
            .store
            .path
            .as_ref()
            .is_some_and(|path| path.as_os_str().is_empty())
        {
            return Err(ConfigError::MissingField { field: "store.path" }.into());
        }
        if let Some(base) = &self.notifier.webhook_base {
            if let Err(e) = url::Url::parse(base) {
                return Err(ConfigError::InvalidValue {
                    field: "webhook_base",
                    reason: e.to_string(),
                }
                .into());
            }
        }
        Ok(())
    }

    /// Initialize logging with the configured settings.
    pub fn init_logging(&self) {
        self.logging.init();
    }
}

fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
