//! Exchange-agnostic valuation types. No I/O lives here.
//!
//! - [`holding`] - what the portfolio API reports and what a quote prices
//! - [`valuation`] - folding quotes into a [`LogEntry`] and comparing samples
//! - [`money`] - cent rounding and human-readable number formatting

pub mod holding;
pub mod money;
pub mod valuation;

pub use holding::{Holding, Quote};
pub use money::Grouping;
pub use valuation::{Change, CoinValue, LogEntry};
