//! Market data types
//!
//! The quote model the dashboard renders plus the source abstraction behind
//! the refresh task. Real exchange connectivity lives behind the
//! [`MarketSource`] trait and is supplied by other modules; the library
//! ships a deterministic sample source so the application and its tests run
//! without any network.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MarketError {
    #[error("unknown symbol: {0}")]
    UnknownSymbol(String),

    #[error("market source failed: {0}")]
    Source(String),
}

/// A single tradeable asset quote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoinQuote {
    pub symbol: String,
    pub name: String,
    pub price_usd: f64,
    pub change_24h_pct: f64,
    pub updated_at: DateTime<Utc>,
}

/// Supplies quotes for a set of symbols.
#[async_trait]
pub trait MarketSource: Send + Sync {
    async fn fetch(&self, symbols: &[String]) -> Result<Vec<CoinQuote>, MarketError>;
}

// Base prices the sample source jitters around.
const SAMPLE_QUOTES: &[(&str, &str, f64)] = &[
    ("BTC", "Bitcoin", 64_250.0),
    ("ETH", "Ethereum", 3_180.0),
    ("SOL", "Solana", 148.0),
    ("ADA", "Cardano", 0.46),
    ("DOT", "Polkadot", 6.9),
    ("XRP", "Ripple", 0.52),
];

/// Deterministic in-process source with simulated latency.
///
/// Prices are the base table plus a small random walk, so repeated
/// refreshes look alive without being a real feed.
pub struct SampleMarketSource {
    latency: Duration,
}

impl SampleMarketSource {
    pub fn new(latency: Duration) -> Self {
        Self { latency }
    }

    /// The symbols the sample source knows about.
    pub fn known_symbols() -> Vec<String> {
        SAMPLE_QUOTES.iter().map(|(s, _, _)| s.to_string()).collect()
    }
}

impl Default for SampleMarketSource {
    fn default() -> Self {
        Self::new(Duration::from_millis(150))
    }
}

#[async_trait]
impl MarketSource for SampleMarketSource {
    async fn fetch(&self, symbols: &[String]) -> Result<Vec<CoinQuote>, MarketError> {
        tokio::time::sleep(self.latency).await;

        let now = Utc::now();
        let mut rng = rand::thread_rng();
        let mut quotes = Vec::with_capacity(symbols.len());
        for symbol in symbols {
            let &(sym, name, base) = SAMPLE_QUOTES
                .iter()
                .find(|(s, _, _)| *s == symbol.as_str())
                .ok_or_else(|| MarketError::UnknownSymbol(symbol.clone()))?;
            let drift: f64 = rng.gen_range(-2.0..2.0);
            quotes.push(CoinQuote {
                symbol: sym.to_string(),
                name: name.to_string(),
                price_usd: base * (1.0 + drift / 100.0),
                change_24h_pct: drift,
                updated_at: now,
            });
        }
        Ok(quotes)
    }
}
