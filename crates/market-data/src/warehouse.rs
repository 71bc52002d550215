//! SHFE warehouse-receipt (exchange stocks) series.
//!
//! The exchange publishes one JSON document per trading day; the series
//! is assembled by walking the calendar window and summing the receipt
//! weights of the rows matching the requested commodity.

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use report_core::WarehouseReceipt;
use serde_json::Value;

use crate::MarketDataClient;

const SHFE_DAILY_STOCK_URL: &str = "https://www.shfe.com.cn/data/dailydata";

impl MarketDataClient {
    /// Warehouse receipts for a commodity (matched by keyword, e.g.
    /// "silver") over the `days` calendar days ending at `end`.
    ///
    /// Non-trading days and fetch failures contribute nothing; the
    /// result is whatever subset of the window was published.
    pub async fn fetch_warehouse_receipts(
        &self,
        keyword: &str,
        end: NaiveDate,
        days: i64,
    ) -> Vec<WarehouseReceipt> {
        let mut series = Vec::new();
        let start = end - Duration::days(days);

        let mut date = start;
        while date <= end {
            if !matches!(date.weekday(), Weekday::Sat | Weekday::Sun) {
                if let Some(receipts) = self.fetch_daily_stock(date, keyword).await {
                    series.push(WarehouseReceipt { date, receipts });
                }
            }
            date += Duration::days(1);
        }

        tracing::info!(
            "Collected {} warehouse-receipt rows for '{}' over {} days",
            series.len(),
            keyword,
            days
        );
        series
    }

    async fn fetch_daily_stock(&self, date: NaiveDate, keyword: &str) -> Option<f64> {
        let url = format!(
            "{}/{}dailystock.dat",
            SHFE_DAILY_STOCK_URL,
            date.format("%Y%m%d")
        );

        let response = match self.http().get(&url).send().await {
            Ok(r) if r.status().is_success() => r,
            Ok(r) => {
                tracing::debug!("No stock file for {} (HTTP {})", date, r.status());
                return None;
            }
            Err(e) => {
                tracing::debug!("Stock file fetch failed for {}: {}", date, e);
                return None;
            }
        };

        let payload: Value = response.json().await.ok()?;
        parse_daily_stock(&payload, keyword)
    }
}

/// Sum receipt weights over rows whose variety name matches `keyword`.
pub fn parse_daily_stock(payload: &Value, keyword: &str) -> Option<f64> {
    let rows = payload.get("o_cursor")?.as_array()?;
    let keyword = keyword.to_lowercase();

    let mut total = 0.0;
    let mut matched = false;
    for row in rows {
        let name = row
            .get("VARNAME")
            .and_then(|v| v.as_str())
            .unwrap_or_default();
        if !name.to_lowercase().contains(&keyword) {
            continue;
        }
        let weight = match row.get("WRTWGHTS") {
            Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
            Some(Value::String(s)) => s.trim().parse().unwrap_or(0.0),
            _ => 0.0,
        };
        total += weight;
        matched = true;
    }

    matched.then_some(total)
}
