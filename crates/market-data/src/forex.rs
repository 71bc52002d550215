//! USD/CNY day-line from the Sina forex service.
//!
//! The payload is JSONP wrapping a single pipe-separated string of
//! "date,open,low,high,close" rows.

use chrono::NaiveDate;
use report_core::FxSeries;

use crate::sina::strip_jsonp;
use crate::MarketDataClient;

const FOREX_KLINE_URL: &str =
    "https://vip.stock.finance.sina.com.cn/forex/api/jsonp.php/var%20t=/NewForexService.getDayKLine?symbol=fx_susdcny";

/// Fixed rate used whenever the FX source is unavailable.
pub const FX_FALLBACK: f64 = 7.25;

impl MarketDataClient {
    /// USD/CNY daily series.
    ///
    /// Never fails: any fetch or parse problem falls back to the fixed
    /// rate, which is what every premium formula assumes as a floor.
    pub async fn fetch_fx_usd_cny(&self) -> FxSeries {
        let text = match self.http().get(FOREX_KLINE_URL).send().await {
            Ok(response) if response.status().is_success() => match response.text().await {
                Ok(t) => t,
                Err(e) => {
                    tracing::warn!("FX payload unreadable ({}), using fixed {}", e, FX_FALLBACK);
                    return FxSeries::fixed(FX_FALLBACK);
                }
            },
            Ok(response) => {
                tracing::warn!(
                    "FX source returned HTTP {}, using fixed {}",
                    response.status(),
                    FX_FALLBACK
                );
                return FxSeries::fixed(FX_FALLBACK);
            }
            Err(e) => {
                tracing::warn!("FX source unreachable ({}), using fixed {}", e, FX_FALLBACK);
                return FxSeries::fixed(FX_FALLBACK);
            }
        };

        let points = parse_forex_payload(&text);
        if points.is_empty() {
            tracing::warn!("FX payload had no usable rows, using fixed {}", FX_FALLBACK);
            return FxSeries::fixed(FX_FALLBACK);
        }

        FxSeries::new(points, FX_FALLBACK)
    }
}

/// Parse the pipe-separated day-line rows into (date, close-rate) points.
pub fn parse_forex_payload(text: &str) -> Vec<(NaiveDate, f64)> {
    let inner = strip_jsonp(text).unwrap_or(text.trim());
    let inner = inner.trim().trim_matches('"');

    inner
        .split('|')
        .filter_map(|line| {
            let mut parts = line.split(',');
            let date = NaiveDate::parse_from_str(parts.next()?.trim(), "%Y-%m-%d").ok()?;
            // date,open,low,high,close — the close is the last field.
            let close: f64 = parts.nth(3)?.trim().parse().ok()?;
            Some((date, close))
        })
        .collect()
}
