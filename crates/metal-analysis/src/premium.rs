//! Onshore premium/discount between domestic quotes and an international
//! benchmark, after FX and unit conversion.

use chrono::NaiveDate;
use report_core::{DailyBar, FxSeries};
use serde::{Deserialize, Serialize};

use crate::align::inner_join_closes;

/// Grams per troy ounce (gold/platinum quotes convert USD/oz -> CNY/g).
pub const GRAMS_PER_TROY_OUNCE: f64 = 31.1035;
/// Troy ounces per kilogram (silver converts USD/oz -> CNY/kg).
pub const TROY_OUNCES_PER_KG: f64 = 32.1507;

/// How to express the benchmark in the domestic contract's unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BenchmarkConversion {
    /// USD/oz benchmark vs a CNY/g contract (gold, platinum vs NYMEX).
    UsdPerOunceToCnyPerGram,
    /// USD/oz benchmark vs a CNY/kg contract (silver).
    UsdPerOunceToCnyPerKg,
    /// Benchmark already in the contract's currency and unit (SGE spot).
    None,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PremiumPoint {
    pub date: NaiveDate,
    pub premium_pct: f64,
}

/// Premium series: (domestic / implied-benchmark − 1) × 100 per shared
/// trading day.
pub fn premium_series(
    domestic: &[DailyBar],
    benchmark: &[DailyBar],
    fx: &FxSeries,
    conversion: BenchmarkConversion,
) -> Vec<PremiumPoint> {
    inner_join_closes(domestic, benchmark)
        .into_iter()
        .filter_map(|(date, dom, bench)| {
            let implied = match conversion {
                BenchmarkConversion::UsdPerOunceToCnyPerGram => {
                    bench * fx.rate_on(date) / GRAMS_PER_TROY_OUNCE
                }
                BenchmarkConversion::UsdPerOunceToCnyPerKg => {
                    bench * TROY_OUNCES_PER_KG * fx.rate_on(date)
                }
                BenchmarkConversion::None => bench,
            };
            if implied == 0.0 {
                return None;
            }
            Some(PremiumPoint {
                date,
                premium_pct: (dom / implied - 1.0) * 100.0,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bar(y: i32, m: u32, d: u32, close: f64) -> DailyBar {
        DailyBar {
            date: NaiveDate::from_ymd_opt(y, m, d).unwrap(),
            close,
            volume: None,
            open_interest: None,
        }
    }

    #[test]
    fn test_gold_premium_formula() {
        // SHFE 780 CNY/g vs COMEX 3300 USD/oz at 7.25:
        // implied = 3300 * 7.25 / 31.1035 = 769.206... CNY/g
        let shfe = vec![bar(2025, 6, 2, 780.0)];
        let comex = vec![bar(2025, 6, 2, 3300.0)];
        let fx = FxSeries::fixed(7.25);

        let series = premium_series(&shfe, &comex, &fx, BenchmarkConversion::UsdPerOunceToCnyPerGram);
        assert_eq!(series.len(), 1);
        let implied = 3300.0 * 7.25 / GRAMS_PER_TROY_OUNCE;
        let expected = (780.0 / implied - 1.0) * 100.0;
        assert!((series[0].premium_pct - expected).abs() < 1e-9);
        assert!(series[0].premium_pct > 0.0);
    }

    #[test]
    fn test_silver_premium_formula() {
        // SHFE 8900 CNY/kg vs COMEX 38 USD/oz at 7.20:
        // implied = 38 * 32.1507 * 7.20 CNY/kg
        let shfe = vec![bar(2025, 6, 2, 8900.0)];
        let comex = vec![bar(2025, 6, 2, 38.0)];
        let fx = FxSeries::fixed(7.20);

        let series = premium_series(&shfe, &comex, &fx, BenchmarkConversion::UsdPerOunceToCnyPerKg);
        let implied = 38.0 * TROY_OUNCES_PER_KG * 7.20;
        let expected = (8900.0 / implied - 1.0) * 100.0;
        assert!((series[0].premium_pct - expected).abs() < 1e-9);
    }

    #[test]
    fn test_direct_premium_no_conversion() {
        let futures = vec![bar(2025, 6, 2, 222.0)];
        let spot = vec![bar(2025, 6, 2, 220.0)];
        let fx = FxSeries::fixed(7.25);

        let series = premium_series(&futures, &spot, &fx, BenchmarkConversion::None);
        assert!((series[0].premium_pct - (222.0 / 220.0 - 1.0) * 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_unmatched_dates_produce_nothing() {
        let a = vec![bar(2025, 6, 2, 1.0)];
        let b = vec![bar(2025, 6, 3, 1.0)];
        assert!(premium_series(&a, &b, &FxSeries::fixed(7.25), BenchmarkConversion::None).is_empty());
    }
}
