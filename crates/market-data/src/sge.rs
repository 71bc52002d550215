//! Shanghai Gold Exchange spot benchmark history.
//!
//! The SGE daily-quote endpoint takes an instrument id as form data and
//! answers JSON with parallel `time`/`data` arrays.

use chrono::NaiveDate;
use report_core::{DailyBar, ReportError};
use serde_json::Value;

use crate::MarketDataClient;

const SGE_DAILY_URL: &str = "https://www.sge.com.cn/graph/Dailyhq";

impl MarketDataClient {
    /// Spot close history for an SGE instrument, e.g. "Pt99.95" or
    /// "Ag(T+D)".
    pub async fn fetch_sge_spot(&self, instrument: &str) -> Result<Vec<DailyBar>, ReportError> {
        tracing::debug!("Fetching SGE spot history for {}", instrument);

        let response = self
            .http()
            .post(SGE_DAILY_URL)
            .form(&[("instid", instrument)])
            .send()
            .await
            .map_err(|e| ReportError::ApiError(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ReportError::ApiError(format!(
                "HTTP {} fetching SGE history for {}",
                response.status(),
                instrument
            )));
        }

        let payload: Value = response
            .json()
            .await
            .map_err(|e| ReportError::ApiError(e.to_string()))?;

        Ok(parse_sge_payload(&payload))
    }
}

/// Zip the `time` and `data` arrays into dated close prices.
pub fn parse_sge_payload(payload: &Value) -> Vec<DailyBar> {
    let times = match payload.get("time").and_then(|v| v.as_array()) {
        Some(t) => t,
        None => return Vec::new(),
    };
    let prices = match payload.get("data").and_then(|v| v.as_array()) {
        Some(d) => d,
        None => return Vec::new(),
    };

    let mut bars: Vec<DailyBar> = times
        .iter()
        .zip(prices.iter())
        .filter_map(|(t, p)| {
            let date = NaiveDate::parse_from_str(t.as_str()?.trim(), "%Y-%m-%d").ok()?;
            let close = match p {
                Value::Number(n) => n.as_f64()?,
                Value::String(s) => s.trim().parse().ok()?,
                _ => return None,
            };
            Some(DailyBar {
                date,
                close,
                volume: None,
                open_interest: None,
            })
        })
        .collect();
    bars.sort_by_key(|b| b.date);
    bars
}
