//! App orchestration module.
//!
//! Wires configuration into the market client, store, notifiers and sampler,
//! then hands the sampler to the scheduler.

use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use super::config::Config;
use super::sampler::{Sample, Sampler, SamplerSettings};
use super::scheduler;
use crate::adapter::outbound::http::MarketClient;
use crate::adapter::outbound::notifier::webhook::{WebhookConfig, WebhookNotifier};
use crate::adapter::outbound::store;
use crate::error::Result;
use crate::port::{LogNotifier, NotifierRegistry};

/// Main application struct.
pub struct App;

impl App {
    /// Run the sampling loop until the process is stopped.
    pub async fn run(config: Config) -> Result<()> {
        let sampler = build_sampler(&config)?;
        let period = Duration::from_secs(config.sampler.interval_secs);
        scheduler::run(&sampler, period, &config.display).await;
        Ok(())
    }

    /// Run a single cycle.
    pub async fn run_once(config: Config) -> Result<Sample> {
        let sampler = build_sampler(&config)?;
        scheduler::run_cycle(&sampler, &config.display).await
    }
}

/// Build the sampler and everything it drives from configuration.
///
/// Must be called inside a Tokio runtime when the webhook is configured.
pub fn build_sampler(config: &Config) -> Result<Sampler> {
    let market = Arc::new(MarketClient::from_config(&config.api)?);
    info!(url = %market.portfolio_url(), "Market API configured");

    let store = store::open(&config.store)?;
    info!(
        path = %config.store.resolved_path().display(),
        format = ?config.store.format,
        "Store opened"
    );

    let notifiers = Arc::new(build_notifier_registry(config)?);
    info!(notifiers = notifiers.len(), "Notifiers initialized");

    Sampler::new(
        market,
        store,
        notifiers,
        SamplerSettings {
            notify_threshold: config.sampler.notify_threshold_pct,
        },
    )
}

fn build_notifier_registry(config: &Config) -> Result<NotifierRegistry> {
    let mut registry = NotifierRegistry::new();
    registry.register(Box::new(LogNotifier));

    match WebhookConfig::from_settings(&config.notifier, &config.display)? {
        Some(webhook) => {
            registry.register(Box::new(WebhookNotifier::new(webhook)));
            info!("Webhook notifications enabled");
        }
        None => info!("Webhook notifications disabled"),
    }

    Ok(registry)
}
