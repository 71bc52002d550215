//! Sina futures daily K-line endpoints (domestic and foreign markets).
//!
//! Both services answer JSONP; the payload is a JSON array of row objects
//! whose key names have drifted over the years ("p" vs "hold" vs
//! "position" for open interest), so extraction tolerates the known
//! aliases instead of binding to one schema.

use chrono::NaiveDate;
use report_core::{DailyBar, ReportError};
use serde_json::Value;

use crate::MarketDataClient;

const DOMESTIC_KLINE_URL: &str =
    "https://stock2.finance.sina.com.cn/futures/api/jsonp.php/var%20t=/InnerFuturesNewService.getDailyKLine";
const FOREIGN_KLINE_URL: &str =
    "https://stock2.finance.sina.com.cn/futures/api/jsonp.php/var%20t=/GlobalFuturesService.getGlobalFuturesDailyKLine";

impl MarketDataClient {
    /// Daily bars for a domestic contract or continuous symbol
    /// (e.g. "au0", "ag0", "pt2606").
    pub async fn fetch_domestic_daily(&self, symbol: &str) -> Result<Vec<DailyBar>, ReportError> {
        self.fetch_kline(DOMESTIC_KLINE_URL, symbol).await
    }

    /// Daily history for a foreign (COMEX/NYMEX) symbol
    /// (e.g. "GC", "SI", "PL", "PA").
    pub async fn fetch_foreign_daily(&self, symbol: &str) -> Result<Vec<DailyBar>, ReportError> {
        self.fetch_kline(FOREIGN_KLINE_URL, symbol).await
    }

    async fn fetch_kline(&self, base: &str, symbol: &str) -> Result<Vec<DailyBar>, ReportError> {
        let url = format!("{}?symbol={}", base, symbol);
        tracing::debug!("Fetching daily K-line for {}", symbol);

        let response = self
            .http()
            .get(&url)
            .send()
            .await
            .map_err(|e| ReportError::ApiError(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ReportError::ApiError(format!(
                "HTTP {} fetching K-line for {}",
                response.status(),
                symbol
            )));
        }

        let text = response
            .text()
            .await
            .map_err(|e| ReportError::ApiError(e.to_string()))?;

        let bars = parse_kline_payload(&text);
        if bars.is_empty() {
            tracing::debug!("No rows in K-line payload for {}", symbol);
        }
        Ok(bars)
    }
}

/// Strip a `var t=([...])`-style JSONP wrapper, returning the inner JSON.
pub fn strip_jsonp(text: &str) -> Option<&str> {
    let start = text.find('(')?;
    let end = text.rfind(')')?;
    if end <= start {
        return None;
    }
    Some(&text[start + 1..end])
}

/// Parse a K-line payload (JSONP-wrapped or bare JSON) into bars.
///
/// Rows missing a date or close are dropped; volume and open interest
/// stay optional since the foreign service omits them.
pub fn parse_kline_payload(text: &str) -> Vec<DailyBar> {
    let json = strip_jsonp(text).unwrap_or(text.trim());
    let rows: Vec<Value> = match serde_json::from_str(json) {
        Ok(Value::Array(rows)) => rows,
        _ => return Vec::new(),
    };

    let mut bars: Vec<DailyBar> = rows.iter().filter_map(parse_kline_row).collect();
    bars.sort_by_key(|b| b.date);
    bars
}

fn parse_kline_row(row: &Value) -> Option<DailyBar> {
    let date = field_str(row, &["d", "date"])?;
    let date = NaiveDate::parse_from_str(&date, "%Y-%m-%d").ok()?;
    let close = field_f64(row, &["c", "close"])?;

    Some(DailyBar {
        date,
        close,
        volume: field_f64(row, &["v", "volume"]),
        open_interest: field_f64(row, &["p", "hold", "position", "open_interest"]),
    })
}

fn field_str(row: &Value, keys: &[&str]) -> Option<String> {
    keys.iter()
        .find_map(|k| row.get(k))
        .and_then(|v| v.as_str())
        .map(|s| s.to_string())
}

/// Numeric field that may arrive as a JSON number or a quoted string.
fn field_f64(row: &Value, keys: &[&str]) -> Option<f64> {
    let value = keys.iter().find_map(|k| row.get(k))?;
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
