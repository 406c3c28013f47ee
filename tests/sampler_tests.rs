mod support;

use std::fs;
use std::sync::Arc;
use std::time::Duration;

use coinpulse::domain::CoinValue;
use coinpulse::error::Error;
use coinpulse::port::{Event, MoveEvent};
use coinpulse::testkit::market::ScriptedMarket;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use support::fixture::{document_store, holding, jsonl_store, single_coin_market, Rig};
use tokio_test::assert_ok;

#[tokio::test]
async fn two_coins_sum_into_total_and_breakdown() {
    let dir = tempfile::tempdir().unwrap();
    let market = Arc::new(ScriptedMarket::new());
    market.set_portfolio(vec![holding("BTC", dec!(1)), holding("ETH", dec!(2))]);
    market.set_quote("BTC", dec!(100), dec!(100));
    market.set_quote("ETH", dec!(200), dec!(100));
    let rig = Rig::new(market, document_store(dir.path()));

    let sample = rig.sampler.sample().await.unwrap();

    assert_eq!(sample.entry.total_worth, dec!(300.00));
    assert_eq!(
        sample.entry.coin_values.get("BTC"),
        Some(&CoinValue {
            value: dec!(100),
            rate: dec!(100)
        })
    );
    assert_eq!(
        sample.entry.coin_values.get("ETH"),
        Some(&CoinValue {
            value: dec!(200),
            rate: dec!(100)
        })
    );

    let raw: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(dir.path().join("db.json")).unwrap()).unwrap();
    assert_eq!(raw["logs"][0]["totalWorth"], "300.00");
    assert_eq!(raw["logs"][0]["coinValues"]["ETH"]["value"], 200.0);
    assert_eq!(raw["portfolio"][1]["coin"], "ETH");
}

#[tokio::test]
async fn duplicate_coins_collapse_into_one_key() {
    let dir = tempfile::tempdir().unwrap();
    let market = Arc::new(ScriptedMarket::new());
    market.set_portfolio(vec![holding("btc", dec!(1)), holding("BTC", dec!(1))]);
    market.set_quote("BTC", dec!(100), dec!(100));
    let rig = Rig::new(market, document_store(dir.path()));

    let sample = rig.sampler.sample().await.unwrap();

    assert_eq!(sample.entry.total_worth, dec!(200.00));
    assert_eq!(sample.entry.coin_values.len(), 1);
    assert_eq!(sample.entry.coin_values["BTC"].value, dec!(100));
}

#[tokio::test]
async fn later_holding_wins_even_when_it_finishes_first() {
    let dir = tempfile::tempdir().unwrap();
    let market = Arc::new(ScriptedMarket::new());
    market.set_portfolio(vec![holding("sol", dec!(1)), holding("SOL", dec!(3))]);
    market.set_rate("SOL", dec!(10));
    market.set_coin_latency("sol", Duration::from_millis(30));
    let rig = Rig::new(market.clone(), document_store(dir.path()));

    let sample = rig.sampler.sample().await.unwrap();

    assert_eq!(market.max_in_flight(), 2);
    assert_eq!(sample.entry.total_worth, dec!(40.00));
    assert_eq!(
        sample.entry.coin_values["SOL"],
        CoinValue {
            value: dec!(30),
            rate: dec!(10)
        }
    );
}

#[tokio::test]
async fn first_run_has_no_percentage_and_no_alert() {
    let dir = tempfile::tempdir().unwrap();
    let rig = Rig::new(single_coin_market("BTC", dec!(300)), document_store(dir.path()));

    let sample = assert_ok!(rig.sampler.sample().await);

    assert_eq!(sample.change.delta, sample.entry.total_worth);
    assert!(sample.change.percent.is_none());
    assert!(!sample.notified);
    assert!(rig.notifier.is_empty());
}

#[tokio::test]
async fn exactly_half_a_percent_alerts() {
    let dir = tempfile::tempdir().unwrap();
    let market = single_coin_market("BTC", dec!(1000));
    let rig = Rig::new(market.clone(), document_store(dir.path()));
    rig.sampler.sample().await.unwrap();

    market.set_quote("BTC", dec!(1005), dec!(1005));
    let sample = rig.sampler.sample().await.unwrap();

    assert_eq!(sample.change.percent, Some(dec!(0.50)));
    assert!(sample.notified);
    assert_eq!(
        rig.notifier.events(),
        vec![Event::ValuationMoved(MoveEvent {
            delta: dec!(5.00),
            percent: dec!(0.50),
            total_worth: dec!(1005.00),
        })]
    );
}

#[tokio::test]
async fn just_under_half_a_percent_stays_quiet() {
    let dir = tempfile::tempdir().unwrap();
    let market = single_coin_market("BTC", dec!(1000));
    let rig = Rig::new(market.clone(), document_store(dir.path()));
    rig.sampler.sample().await.unwrap();

    market.set_quote("BTC", dec!(995.1), dec!(995.1));
    let sample = rig.sampler.sample().await.unwrap();

    assert_eq!(sample.change.percent, Some(dec!(-0.49)));
    assert!(!sample.notified);
    assert!(rig.notifier.is_empty());
}

#[tokio::test]
async fn losses_alert_too() {
    let dir = tempfile::tempdir().unwrap();
    let market = single_coin_market("ETH", dec!(2000));
    let rig = Rig::new(market.clone(), document_store(dir.path()));
    rig.sampler.sample().await.unwrap();

    market.set_quote("ETH", dec!(1900), dec!(1900));
    let sample = rig.sampler.sample().await.unwrap();

    assert_eq!(sample.change.delta, dec!(-100.00));
    assert_eq!(sample.change.percent, Some(dec!(-5.00)));
    assert!(sample.notified);
}

#[tokio::test]
async fn configured_threshold_is_honored() {
    let dir = tempfile::tempdir().unwrap();
    let market = single_coin_market("BTC", dec!(1000));
    let rig = Rig::with_threshold(market.clone(), document_store(dir.path()), dec!(2));
    rig.sampler.sample().await.unwrap();

    market.set_quote("BTC", dec!(1015), dec!(1015));
    assert!(!rig.sampler.sample().await.unwrap().notified);

    market.set_quote("BTC", dec!(1040), dec!(1040));
    assert!(rig.sampler.sample().await.unwrap().notified);
}

#[tokio::test]
async fn logs_grow_by_one_per_successful_cycle_only() {
    let dir = tempfile::tempdir().unwrap();
    let market = single_coin_market("BTC", dec!(100));
    let rig = Rig::new(market.clone(), document_store(dir.path()));

    rig.sampler.sample().await.unwrap();
    rig.sampler.sample().await.unwrap();
    assert_eq!(rig.store.logs().unwrap().len(), 2);
    assert_eq!(rig.store.portfolio().unwrap(), vec![holding("BTC", dec!(1))]);

    market.remove_quote("BTC");
    let err = rig.sampler.sample().await.unwrap_err();
    assert!(matches!(err, Error::Api { endpoint: "sellPrice", .. }));
    assert_eq!(rig.store.logs().unwrap().len(), 2);

    market.fail_portfolio();
    assert!(rig.sampler.sample().await.is_err());
    assert_eq!(rig.store.logs().unwrap().len(), 2);
}

#[tokio::test]
async fn failed_cycle_keeps_previous_total() {
    let dir = tempfile::tempdir().unwrap();
    let market = single_coin_market("BTC", dec!(1000));
    let rig = Rig::new(market.clone(), document_store(dir.path()));
    rig.sampler.sample().await.unwrap();

    market.fail_portfolio();
    assert!(rig.sampler.sample().await.is_err());
    assert_eq!(
        rig.sampler.state().unwrap().previous_total,
        dec!(1000.00)
    );

    market.set_portfolio(vec![holding("BTC", dec!(1))]);
    market.set_quote("BTC", dec!(1010), dec!(1010));
    let sample = rig.sampler.sample().await.unwrap();
    assert_eq!(sample.change.delta, dec!(10.00));
}

#[tokio::test]
async fn log_times_never_go_backwards() {
    let dir = tempfile::tempdir().unwrap();
    let rig = Rig::new(single_coin_market("BTC", dec!(100)), document_store(dir.path()));

    for _ in 0..5 {
        rig.sampler.sample().await.unwrap();
    }

    let logs = rig.store.logs().unwrap();
    assert_eq!(logs.len(), 5);
    assert!(logs.windows(2).all(|pair| pair[0].time <= pair[1].time));
}

#[tokio::test]
async fn restart_resumes_from_last_entry() {
    let dir = tempfile::tempdir().unwrap();
    {
        let rig = Rig::new(single_coin_market("BTC", dec!(2000)), document_store(dir.path()));
        rig.sampler.sample().await.unwrap();
    }

    let rig = Rig::new(single_coin_market("BTC", dec!(2100)), document_store(dir.path()));
    assert_eq!(rig.sampler.state().unwrap().previous_total, dec!(2000));

    let sample = rig.sampler.sample().await.unwrap();
    assert_eq!(sample.change.delta, dec!(100.00));
    assert_eq!(sample.change.percent, Some(dec!(5.00)));
    assert!(sample.notified);
    assert_eq!(rig.store.logs().unwrap().len(), 2);
}

#[tokio::test]
async fn jsonl_store_behaves_like_document_store() {
    let dir = tempfile::tempdir().unwrap();
    {
        let rig = Rig::new(single_coin_market("ETH", dec!(50)), jsonl_store(dir.path()));
        rig.sampler.sample().await.unwrap();
        rig.sampler.sample().await.unwrap();
    }

    let raw = fs::read_to_string(dir.path().join("data").join("logs.jsonl")).unwrap();
    assert_eq!(raw.lines().count(), 2);

    let rig = Rig::new(single_coin_market("ETH", dec!(60)), jsonl_store(dir.path()));
    let sample = rig.sampler.sample().await.unwrap();
    assert_eq!(sample.change.delta, dec!(10.00));
    assert_eq!(sample.change.percent, Some(dec!(20.00)));
}

#[tokio::test]
async fn empty_portfolio_is_worth_zero_and_does_not_divide() {
    let dir = tempfile::tempdir().unwrap();
    let market = Arc::new(ScriptedMarket::new());
    market.set_portfolio(Vec::new());
    let rig = Rig::new(market.clone(), document_store(dir.path()));

    let first = rig.sampler.sample().await.unwrap();
    assert_eq!(first.entry.total_worth, Decimal::ZERO);
    assert_eq!(market.quote_requests(), 0);

    let second = rig.sampler.sample().await.unwrap();
    assert!(second.change.percent.is_none());
    assert!(!second.notified);
}
