//! Webhook notifications for threshold-crossing valuation moves.

mod format;
mod notifier;

pub use format::{bar_length, format_event_message, MAX_BAR};
pub use notifier::{WebhookConfig, WebhookNotifier};
