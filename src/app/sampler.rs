//! The valuation sampler.
//!
//! One [`Sampler::sample`] call is one cycle:
//!
//! 1. fetch holdings and overwrite the stored portfolio snapshot
//! 2. dispatch one sell-price request per holding, all in flight at once
//! 3. fold the quotes, in holding order, into a [`LogEntry`]
//! 4. append the entry and compare it to the previous total
//! 5. queue a notification when the move reaches the threshold
//!
//! Any failure aborts the cycle before the log append, so the log and the
//! remembered previous total stay consistent.

use std::sync::Arc;

use chrono::Utc;
use futures_util::future::try_join_all;
use rust_decimal::Decimal;
use tokio::sync::Mutex;
use tokio::task;
use tracing::{debug, info};

use crate::domain::valuation::{aggregate, Change};
use crate::domain::LogEntry;
use crate::error::{Error, Result};
use crate::port::{Event, MarketApi, MoveEvent, Notifier, Store};

/// Tunables for the sampler.
#[derive(Debug, Clone)]
pub struct SamplerSettings {
    /// Minimum absolute percentage move that triggers a notification.
    pub notify_threshold: Decimal,
}

/// State carried from one cycle to the next.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SamplerState {
    /// Total worth of the last written entry; zero before the first one.
    pub previous_total: Decimal,
    /// Timestamp of the last written entry, in epoch milliseconds.
    pub last_time: i64,
}

impl SamplerState {
    /// Recover state from the last persisted entry.
    pub fn seed(store: &dyn Store) -> Result<Self> {
        Ok(store
            .last_log()?
            .map(|entry| Self {
                previous_total: entry.total_worth,
                last_time: entry.time,
            })
            .unwrap_or_default())
    }
}

/// Result of one successful cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub entry: LogEntry,
    pub change: Change,
    /// Whether a notification was queued.
    pub notified: bool,
}

pub struct Sampler {
    market: Arc<dyn MarketApi>,
    store: Arc<dyn Store>,
    notifier: Arc<dyn Notifier>,
    settings: SamplerSettings,
    /// Single-flight guard around the carried state.
    state: Mutex<SamplerState>,
}

impl Sampler {
    /// Create a sampler seeded from the store's last entry.
    pub fn new(
        market: Arc<dyn MarketApi>,
        store: Arc<dyn Store>,
        notifier: Arc<dyn Notifier>,
        settings: SamplerSettings,
    ) -> Result<Self> {
        let state = SamplerState::seed(store.as_ref())?;
        info!(
            market = market.name(),
            previous_total = %state.previous_total,
            "Sampler ready"
        );

        Ok(Self {
            market,
            store,
            notifier,
            settings,
            state: Mutex::new(state),
        })
    }

    /// Snapshot of the carried state. `None` while a cycle is running.
    pub fn state(&self) -> Option<SamplerState> {
        self.state.try_lock().ok().map(|state| *state)
    }

    /// Run one cycle.
    ///
    /// Returns [`Error::CycleInProgress`] without side effects if another
    /// cycle holds the sampler.
    pub async fn sample(&self) -> Result<Sample> {
        let mut state = self.state.try_lock().map_err(|_| Error::CycleInProgress)?;

        let holdings = self.market.portfolio().await?;
        let snapshot = holdings.clone();
        self.with_store(move |store| store.replace_portfolio(&snapshot))
            .await?;
        debug!(holdings = holdings.len(), "Portfolio snapshot stored");

        let quotes =
            try_join_all(holdings.iter().map(|holding| self.market.sell_price(holding))).await?;

        let time = Utc::now().timestamp_millis().max(state.last_time);
        let entry = aggregate(time, quotes);
        let record = entry.clone();
        self.with_store(move |store| store.append_log(&record)).await?;

        let change = Change::between(state.previous_total, entry.total_worth);
        let notified = match change.percent {
            Some(percent) if change.crosses(self.settings.notify_threshold) => {
                self.notifier.notify(Event::ValuationMoved(MoveEvent {
                    delta: change.delta,
                    percent,
                    total_worth: entry.total_worth,
                }));
                true
            }
            _ => false,
        };

        state.previous_total = entry.total_worth;
        state.last_time = entry.time;

        debug!(
            total_worth = %entry.total_worth,
            delta = %change.delta,
            coins = entry.coin_values.len(),
            notified,
            "Cycle complete"
        );

        Ok(Sample {
            entry,
            change,
            notified,
        })
    }

    /// Run a store call on the blocking pool; file stores fsync and rename.
    async fn with_store<T, F>(&self, call: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&dyn Store) -> Result<T> + Send + 'static,
    {
        let store = Arc::clone(&self.store);
        task::spawn_blocking(move || call(store.as_ref()))
            .await
            .map_err(|e| Error::Store(format!("store task failed: {e}")))?
    }

    /// Report a failed cycle to the notifier.
    pub fn report_failure(&self, error: &Error) {
        self.notifier.notify(Event::CycleFailed {
            reason: error.to_string(),
        });
    }
}
