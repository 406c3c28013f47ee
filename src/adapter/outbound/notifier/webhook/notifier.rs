//! Webhook notifier.
//!
//! Provides the [`WebhookNotifier`], which queues events and delivers them
//! from a background worker as a single JSON `POST` each. Delivery is never
//! retried; failures are logged and dropped.

use std::time::Duration;

use reqwest::Client as HttpClient;
use serde::Serialize;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};
use url::Url;

use super::format::format_event_message;
use crate::adapter::outbound::http::directory_url;
use crate::app::config::{DisplayConfig, NotifierConfig};
use crate::domain::Grouping;
use crate::error::Result;
use crate::port::{Event, Notifier};

const DELIVERY_TIMEOUT: Duration = Duration::from_secs(10);

/// Configuration for the webhook notifier.
#[derive(Debug, Clone)]
pub struct WebhookConfig {
    /// Full endpoint: the configured base with the bot name appended.
    pub url: Url,
    /// Shared secret sent in every body.
    pub secret: String,
    /// Also deliver cycle failures.
    pub notify_failures: bool,
    pub currency: String,
    pub grouping: Grouping,
    pub timeout: Duration,
}

impl WebhookConfig {
    /// Build from settings. Returns `None` unless the base URL, bot name and
    /// secret are all present.
    pub fn from_settings(
        notifier: &NotifierConfig,
        display: &DisplayConfig,
    ) -> Result<Option<Self>> {
        let (Some(base), Some(bot_name), Some(secret)) = (
            notifier.webhook_base.as_deref(),
            notifier.bot_name.as_deref(),
            notifier.secret.as_deref(),
        ) else {
            return Ok(None);
        };

        let url = directory_url(base)?.join(bot_name.trim_matches('/'))?;

        Ok(Some(Self {
            url,
            secret: secret.to_string(),
            notify_failures: notifier.notify_failures,
            currency: display.currency.clone(),
            grouping: display.grouping,
            timeout: DELIVERY_TIMEOUT,
        }))
    }
}

/// Request body accepted by the webhook.
#[derive(Debug, Serialize)]
struct WebhookPayload<'a> {
    text: &'a str,
    secret: &'a str,
}

/// Notifier that posts messages to a webhook.
///
/// Must be created inside a Tokio runtime; the constructor spawns the
/// delivery worker.
pub struct WebhookNotifier {
    /// Channel sender for queuing outbound notifications.
    sender: mpsc::UnboundedSender<Event>,
}

impl WebhookNotifier {
    /// Create a new webhook notifier and spawn the background worker.
    #[must_use]
    pub fn new(config: WebhookConfig) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        tokio::spawn(webhook_worker(config, receiver));
        Self { sender }
    }
}

impl Notifier for WebhookNotifier {
    fn notify(&self, event: Event) {
        if self.sender.send(event).is_err() {
            warn!("Webhook notifier channel closed");
        }
    }
}

/// Background worker that delivers queued messages.
async fn webhook_worker(config: WebhookConfig, mut receiver: mpsc::UnboundedReceiver<Event>) {
    let http = HttpClient::builder()
        .timeout(config.timeout)
        .build()
        .unwrap_or_else(|err| {
            warn!(error = %err, "Failed to build HTTP client, using defaults");
            HttpClient::new()
        });

    info!(
        host = config.url.host_str().unwrap_or_default(),
        "Webhook notifier started"
    );

    while let Some(event) = receiver.recv().await {
        if let Some(text) = format_event_message(&event, &config) {
            deliver(&http, &config, &text).await;
        }
    }

    warn!("Webhook notifier worker shutting down");
}

async fn deliver(http: &HttpClient, config: &WebhookConfig, text: &str) {
    let payload = WebhookPayload {
        text,
        secret: &config.secret,
    };

    match http.post(config.url.clone()).json(&payload).send().await {
        Ok(response) if response.status().is_success() => {
            debug!("Webhook notification sent");
        }
        Ok(response) => {
            warn!(status = %response.status(), "Webhook rejected notification");
        }
        Err(e) => {
            warn!(error = %e, "Failed to send webhook notification");
        }
    }
}
