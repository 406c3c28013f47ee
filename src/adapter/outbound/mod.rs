//! Outbound adapters: the market API, persistence and notifications.

pub mod http;
pub mod notifier;
pub mod store;
