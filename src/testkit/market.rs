//! Scripted market API.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use rust_decimal::Decimal;

use crate::domain::{Holding, Quote};
use crate::error::{Error, Result};
use crate::port::MarketApi;

#[derive(Debug, Clone, Copy)]
enum Pricing {
    Fixed { value: Decimal, rate: Decimal },
    PerUnit(Decimal),
}

/// In-process [`MarketApi`] driven by test scripts.
///
/// Quotes are looked up by the uppercased holding symbol and echo the
/// holding's symbol as given. A holding without a scripted quote fails with
/// [`Error::Api`].
#[derive(Default)]
pub struct ScriptedMarket {
    portfolio: Mutex<Option<Vec<Holding>>>,
    pricing: Mutex<HashMap<String, Pricing>>,
    latency: Mutex<Duration>,
    coin_latency: Mutex<HashMap<String, Duration>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    quote_requests: AtomicUsize,
}

impl ScriptedMarket {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_portfolio(&self, holdings: Vec<Holding>) {
        *self.portfolio.lock() = Some(holdings);
    }

    /// Make portfolio fetches fail until a portfolio is set again.
    pub fn fail_portfolio(&self) {
        *self.portfolio.lock() = None;
    }

    /// Quote `coin` at a fixed value regardless of amount.
    pub fn set_quote(&self, coin: &str, value: Decimal, rate: Decimal) {
        self.pricing
            .lock()
            .insert(coin.to_uppercase(), Pricing::Fixed { value, rate });
    }

    /// Quote `coin` at `rate` per unit.
    pub fn set_rate(&self, coin: &str, rate: Decimal) {
        self.pricing
            .lock()
            .insert(coin.to_uppercase(), Pricing::PerUnit(rate));
    }

    pub fn remove_quote(&self, coin: &str) {
        self.pricing.lock().remove(&coin.to_uppercase());
    }

    /// Delay applied to every request.
    pub fn set_latency(&self, latency: Duration) {
        *self.latency.lock() = latency;
    }

    /// Extra delay for quotes of one holding symbol, matched exactly.
    pub fn set_coin_latency(&self, coin: &str, latency: Duration) {
        self.coin_latency.lock().insert(coin.to_string(), latency);
    }

    /// Highest number of quote requests observed in flight at once.
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    pub fn quote_requests(&self) -> usize {
        self.quote_requests.load(Ordering::SeqCst)
    }

    async fn delay(&self, extra: Duration) {
        let total = *self.latency.lock() + extra;
        if !total.is_zero() {
            tokio::time::sleep(total).await;
        }
    }
}

#[async_trait]
impl MarketApi for ScriptedMarket {
    async fn portfolio(&self) -> Result<Vec<Holding>> {
        self.delay(Duration::ZERO).await;
        self.portfolio.lock().clone().ok_or_else(|| Error::Api {
            endpoint: "portfolio",
            reason: "portfolio unavailable".into(),
        })
    }

    async fn sell_price(&self, holding: &Holding) -> Result<Quote> {
        self.quote_requests.fetch_add(1, Ordering::SeqCst);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        let extra = self
            .coin_latency
            .lock()
            .get(&holding.coin)
            .copied()
            .unwrap_or_default();
        self.delay(extra).await;
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        let pricing = self.pricing.lock().get(&holding.coin.to_uppercase()).copied();
        match pricing {
            Some(Pricing::Fixed { value, rate }) => Ok(Quote::new(&holding.coin, value, rate)),
            Some(Pricing::PerUnit(rate)) => {
                Ok(Quote::new(&holding.coin, rate * holding.amount, rate))
            }
            None => Err(Error::Api {
                endpoint: "sellPrice",
                reason: format!("no quote scripted for {}", holding.coin),
            }),
        }
    }

    fn name(&self) -> &'static str {
        "scripted"
    }
}
