//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`market`] — `ScriptedMarket`, an in-process [`MarketApi`](crate::port::MarketApi)
//!   with scripted holdings, quotes and per-coin latency.
//! - [`notifier`] — `RecordingNotifier`, which keeps every event it is given.
//! - [`store`] — `MemoryStore`, a [`Store`](crate::port::Store) with injectable
//!   write failures.

pub mod market;
pub mod notifier;
pub mod store;
