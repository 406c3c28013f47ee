//! Market API REST client.
//!
//! Two endpoints under one base URL:
//! - `GET /portfolio` returns the tracked holdings
//! - `GET /sellPrice?coin=<symbol>&amount=<amount>` prices one holding
//!
//! Requests are issued once. Transport failures and non-2xx statuses surface
//! as [`Error::Http`]; bodies that do not match the expected envelope surface
//! as [`Error::Api`].

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client as HttpClient, RequestBuilder};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;

use super::dto::{PortfolioResponse, SellPriceResponse};
use crate::app::config::ApiConfig;
use crate::domain::{Holding, Quote};
use crate::error::{Error, Result};
use crate::port::MarketApi;

const PORTFOLIO: &str = "portfolio";
const SELL_PRICE: &str = "sellPrice";

/// HTTP client for the portfolio and sell-price endpoints.
pub struct MarketClient {
    http: HttpClient,
    portfolio_url: Url,
    sell_price_url: Url,
}

impl MarketClient {
    /// Create a client with default HTTP settings.
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_http(HttpClient::new(), base_url)
    }

    pub fn from_config(config: &ApiConfig) -> Result<Self> {
        let http = HttpClient::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .connect_timeout(Duration::from_millis(config.connect_timeout_ms))
            .build()
            .unwrap_or_else(|err| {
                warn!(error = %err, "Failed to build HTTP client, using defaults");
                HttpClient::new()
            });

        Self::with_http(http, &config.base_url)
    }

    fn with_http(http: HttpClient, base_url: &str) -> Result<Self> {
        let base = directory_url(base_url)?;
        Ok(Self {
            http,
            portfolio_url: base.join(PORTFOLIO)?,
            sell_price_url: base.join(SELL_PRICE)?,
        })
    }

    /// Resolved `/portfolio` endpoint.
    #[must_use]
    pub fn portfolio_url(&self) -> &Url {
        &self.portfolio_url
    }

    async fn get_json<T>(&self, endpoint: &'static str, request: RequestBuilder) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let response = request.send().await?.error_for_status()?;
        let body = response.bytes().await?;
        decode(endpoint, &body)
    }
}

#[async_trait]
impl MarketApi for MarketClient {
    async fn portfolio(&self) -> Result<Vec<Holding>> {
        let request = self.http.get(self.portfolio_url.clone());
        let response: PortfolioResponse = self.get_json(PORTFOLIO, request).await?;

        debug!(holdings = response.data.len(), "Fetched portfolio");
        Ok(response.data)
    }

    async fn sell_price(&self, holding: &Holding) -> Result<Quote> {
        let amount = holding.amount.normalize().to_string();
        let request = self
            .http
            .get(self.sell_price_url.clone())
            .query(&[("coin", holding.coin.as_str()), ("amount", amount.as_str())]);
        let response: SellPriceResponse = self.get_json(SELL_PRICE, request).await?;

        debug!(
            coin = %response.data.coin,
            value = %response.data.value,
            rate = %response.data.rate,
            "Fetched sell price"
        );
        Ok(response.data)
    }

    fn name(&self) -> &'static str {
        "market-api"
    }
}

/// Parse `base` so that relative joins append to its path instead of
/// replacing the last segment.
pub(crate) fn directory_url(base: &str) -> Result<Url> {
    let mut url = Url::parse(base)?;
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

fn decode<T: DeserializeOwned>(endpoint: &'static str, body: &[u8]) -> Result<T> {
    serde_json::from_slice(body).map_err(|err| Error::Api {
        endpoint,
        reason: err.to_string(),
    })
}
