//! Portfolio holdings and the quotes that price them.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single asset and the quantity held.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Holding {
    pub coin: String,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub amount: Decimal,
}

impl Holding {
    pub fn new(coin: impl Into<String>, amount: Decimal) -> Self {
        Self {
            coin: coin.into(),
            amount,
        }
    }
}

/// Sell-side valuation of one holding in the quote currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    pub coin: String,
    /// What the whole holding would sell for.
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub value: Decimal,
    /// Unit price.
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub rate: Decimal,
}

impl Quote {
    pub fn new(coin: impl Into<String>, value: Decimal, rate: Decimal) -> Self {
        Self {
            coin: coin.into(),
            value,
            rate,
        }
    }

    /// Symbol used as the key in a log entry's coin breakdown.
    #[must_use]
    pub fn symbol(&self) -> String {
        self.coin.to_uppercase()
    }
}
