//! Response envelopes of the market API.

use serde::Deserialize;

use crate::domain::{Holding, Quote};

/// Every market API response wraps its payload in `data`.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    pub data: T,
}

/// `GET /portfolio`
pub type PortfolioResponse = Envelope<Vec<Holding>>;

/// `GET /sellPrice`
pub type SellPriceResponse = Envelope<Quote>;
