//! Settings for the market API, sampler, store, notifier and display.

use std::path::PathBuf;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;

use crate::domain::Grouping;

/// Market API endpoints and HTTP timeouts.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL serving `/portfolio` and `/sellPrice`.
    pub base_url: String,
    pub timeout_ms: u64,
    pub connect_timeout_ms: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".into(),
            timeout_ms: 10_000,
            connect_timeout_ms: 5_000,
        }
    }
}

/// Sampling cadence and alert threshold.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SamplerConfig {
    pub interval_secs: u64,
    /// Minimum absolute percentage move that triggers a notification.
    pub notify_threshold_pct: Decimal,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            interval_secs: 300,
            notify_threshold_pct: dec!(0.5),
        }
    }
}

/// On-disk layout of the store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreFormat {
    /// One JSON document holding `portfolio` and `logs`, rewritten per write.
    #[default]
    Document,
    /// A directory with `portfolio.json` and an append-only `logs.jsonl`.
    Jsonl,
}

impl StoreFormat {
    /// Location used when `store.path` is not set.
    #[must_use]
    pub fn default_path(self) -> &'static str {
        match self {
            StoreFormat::Document => "db.json",
            StoreFormat::Jsonl => "data",
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Document file, or directory for the `jsonl` format. Defaults per format.
    pub path: Option<PathBuf>,
    pub format: StoreFormat,
}

impl StoreConfig {
    /// The configured path, or the format's default.
    #[must_use]
    pub fn resolved_path(&self) -> PathBuf {
        self.path
            .clone()
            .unwrap_or_else(|| PathBuf::from(self.format.default_path()))
    }
}

/// Webhook delivery. Bot name and secret come from the environment.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NotifierConfig {
    /// Base URL; the bot name is appended as the last path segment.
    pub webhook_base: Option<String>,
    /// Also alert when a sampling cycle fails.
    pub notify_failures: bool,
    /// Bot name, populated from `COINPULSE_BOT_NAME`.
    #[serde(skip)]
    pub bot_name: Option<String>,
    /// Shared secret, populated from `COINPULSE_BOT_SECRET`.
    #[serde(skip)]
    pub secret: Option<String>,
}

/// How amounts are shown on the console and in alerts.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Currency label printed before the total.
    pub currency: String,
    pub grouping: Grouping,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            currency: "INR".into(),
            grouping: Grouping::Indian,
        }
    }
}
