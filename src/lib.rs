//! Coinpulse - periodic valuation of a crypto portfolio with change alerts.
//!
//! Every cycle fetches the holdings, prices each one concurrently, folds the
//! quotes into a timestamped [`domain::LogEntry`], compares it to the previous
//! total, prints a status line and, when the move is large enough, queues a
//! webhook notification.
//!
//! # Modules
//!
//! - [`domain`] - holdings, quotes, log entries, change math and formatting
//! - [`port`] - traits for the market API, the store and notifiers
//! - [`adapter`] - reqwest market client, JSON stores, webhook notifier, CLI
//! - [`app`] - configuration, the sampler and the fixed-rate scheduler
//! - [`error`] - error types for the crate
//!
//! # Example
//!
//! ```no_run
//! use coinpulse::app::{App, Config};
//!
//! # async fn run() -> coinpulse::error::Result<()> {
//! let config = Config::load_or_default("coinpulse.toml")?;
//! let sample = App::run_once(config).await?;
//! println!("worth {}", sample.entry.total_worth);
//! # Ok(())
//! # }
//! ```

pub mod adapter;
pub mod app;
pub mod domain;
pub mod error;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
