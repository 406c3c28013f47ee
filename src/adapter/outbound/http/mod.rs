//! HTTP adapter for the market API.

mod client;
pub mod dto;

pub(crate) use client::directory_url;
pub use client::MarketClient;
