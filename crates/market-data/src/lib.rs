//! HTTP clients for the public quote sources the daily report reads:
//! Sina futures daily K-lines (domestic and foreign), the Sina forex
//! day-line for USD/CNY, SGE spot benchmarks, and SHFE warehouse
//! receipts.
//!
//! All methods degrade gracefully: a dead or drifting source yields an
//! empty result (logged), never a panic, so one broken feed cannot take
//! down the rest of the run.

pub mod contracts;
pub mod forex;
pub mod sge;
pub mod sina;
pub mod warehouse;

pub use contracts::candidate_codes;
pub use forex::FX_FALLBACK;
pub use sina::{parse_kline_payload, strip_jsonp};

use std::time::Duration;

use report_core::DailyBar;
use reqwest::Client;

/// Which currency a benchmark series is quoted in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BenchmarkCurrency {
    Usd,
    Cny,
}

/// A benchmark price series plus enough context to convert and label it.
#[derive(Debug, Clone)]
pub struct Benchmark {
    pub bars: Vec<DailyBar>,
    pub currency: BenchmarkCurrency,
    pub source: &'static str,
}

#[derive(Clone)]
pub struct MarketDataClient {
    client: Client,
}

impl Default for MarketDataClient {
    fn default() -> Self {
        Self::new()
    }
}

impl MarketDataClient {
    pub fn new() -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(60))
            .user_agent("Mozilla/5.0")
            .build()
            .unwrap_or_else(|_| Client::new());

        Self { client }
    }

    pub(crate) fn http(&self) -> &Client {
        &self.client
    }
}
