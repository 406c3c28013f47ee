//! Portfolio valuation: folding quotes into a log entry and comparing samples.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::holding::Quote;
use super::money::round_cents;

/// Value and unit rate recorded for one coin in a log entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoinValue {
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub value: Decimal,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub rate: Decimal,
}

/// One timestamped valuation of the whole portfolio.
///
/// Entries are append-only. `total_worth` is always rounded to cents and
/// serialized as fixed two-decimal text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    /// Milliseconds since the Unix epoch.
    pub time: i64,
    pub total_worth: Decimal,
    pub coin_values: BTreeMap<String, CoinValue>,
}

impl LogEntry {
    #[must_use]
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.time)
    }
}

/// Fold quotes, in issuance order, into a log entry.
///
/// Every quote counts towards the total. Symbols are uppercased before keying
/// the breakdown, so a later quote for the same symbol replaces an earlier one
/// there while both remain in the total.
pub fn aggregate<I>(time: i64, quotes: I) -> LogEntry
where
    I: IntoIterator<Item = Quote>,
{
    let mut total = Decimal::ZERO;
    let mut coin_values = BTreeMap::new();

    for quote in quotes {
        total += quote.value;
        coin_values.insert(
            quote.symbol(),
            CoinValue {
                value: quote.value,
                rate: quote.rate,
            },
        );
    }

    LogEntry {
        time,
        total_worth: round_cents(total),
        coin_values,
    }
}

/// Movement of the total worth between two consecutive samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Change {
    pub delta: Decimal,
    /// Percentage of the previous total, rounded to cents. `None` when there
    /// is no previous total to divide by, which is the case on a first sample.
    pub percent: Option<Decimal>,
}

impl Change {
    #[must_use]
    pub fn between(previous: Decimal, current: Decimal) -> Self {
        let delta = round_cents(current - previous);
        let percent = if previous.is_zero() {
            None
        } else {
            delta
                .checked_div(previous)
                .and_then(|ratio| ratio.checked_mul(dec!(100)))
                .map(round_cents)
        };
        Self { delta, percent }
    }

    #[must_use]
    pub fn is_loss(&self) -> bool {
        self.delta.is_sign_negative() && !self.delta.is_zero()
    }

    /// Whether the magnitude of the percentage move reaches `threshold`.
    #[must_use]
    pub fn crosses(&self, threshold: Decimal) -> bool {
        self.percent.is_some_and(|pct| pct.abs() >= threshold)
    }
}
