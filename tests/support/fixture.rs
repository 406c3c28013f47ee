use std::path::Path;
use std::sync::Arc;

use coinpulse::adapter::outbound::store::{DocumentStore, JsonLinesStore};
use coinpulse::app::{Sampler, SamplerSettings};
use coinpulse::domain::Holding;
use coinpulse::port::Store;
use coinpulse::testkit::market::ScriptedMarket;
use coinpulse::testkit::notifier::RecordingNotifier;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// A sampler over a scripted market, a real on-disk store and a recorder.
pub struct Rig {
    pub market: Arc<ScriptedMarket>,
    pub store: Arc<dyn Store>,
    pub notifier: Arc<RecordingNotifier>,
    pub sampler: Sampler,
}

impl Rig {
    pub fn new(market: Arc<ScriptedMarket>, store: Arc<dyn Store>) -> Self {
        Self::with_threshold(market, store, dec!(0.5))
    }

    pub fn with_threshold(
        market: Arc<ScriptedMarket>,
        store: Arc<dyn Store>,
        notify_threshold: Decimal,
    ) -> Self {
        let notifier = Arc::new(RecordingNotifier::new());
        let sampler = Sampler::new(
            market.clone(),
            store.clone(),
            notifier.clone(),
            SamplerSettings { notify_threshold },
        )
        .expect("build sampler");

        Self {
            market,
            store,
            notifier,
            sampler,
        }
    }
}

pub fn document_store(dir: &Path) -> Arc<dyn Store> {
    Arc::new(DocumentStore::open(dir.join("db.json")).expect("open document store"))
}

pub fn jsonl_store(dir: &Path) -> Arc<dyn Store> {
    Arc::new(JsonLinesStore::open(dir.join("data")).expect("open jsonl store"))
}

pub fn holding(coin: &str, amount: Decimal) -> Holding {
    Holding::new(coin, amount)
}

/// Market holding one coin worth `value` at a unit rate of `value`.
pub fn single_coin_market(coin: &str, value: Decimal) -> Arc<ScriptedMarket> {
    let market = Arc::new(ScriptedMarket::new());
    market.set_portfolio(vec![holding(coin, dec!(1))]);
    market.set_quote(coin, value, value);
    market
}
