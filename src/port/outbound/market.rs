//! Market data port: what the portfolio holds and what it would sell for.

use async_trait::async_trait;

use crate::domain::{Holding, Quote};
use crate::error::Result;

/// Source of holdings and sell-price quotes.
#[async_trait]
pub trait MarketApi: Send + Sync {
    /// Fetch the current holdings.
    async fn portfolio(&self) -> Result<Vec<Holding>>;

    /// Quote what `holding` would sell for right now.
    async fn sell_price(&self, holding: &Holding) -> Result<Quote>;

    /// Human-readable name for logs.
    fn name(&self) -> &'static str;
}
