//! Volume / open-interest turnover ratio.

use chrono::NaiveDate;
use report_core::{DailyBar, Thresholds};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TurnoverPoint {
    pub date: NaiveDate,
    pub ratio: f64,
    /// Ratio at or above the configured threshold.
    pub high_turnover: bool,
}

/// Daily turnover ratio for bars that carry both volume and open
/// interest; days missing either are skipped.
pub fn turnover_series(bars: &[DailyBar], thresholds: &Thresholds) -> Vec<TurnoverPoint> {
    bars.iter()
        .filter_map(|bar| {
            let volume = bar.volume?;
            let open_interest = bar.open_interest?;
            if open_interest <= 0.0 {
                return None;
            }
            let ratio = volume / open_interest;
            Some(TurnoverPoint {
                date: bar.date,
                ratio,
                high_turnover: ratio >= thresholds.high_turnover_ratio,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bar(d: u32, volume: Option<f64>, oi: Option<f64>) -> DailyBar {
        DailyBar {
            date: NaiveDate::from_ymd_opt(2025, 6, d).unwrap(),
            close: 1.0,
            volume,
            open_interest: oi,
        }
    }

    #[test]
    fn test_threshold_boundary() {
        let thresholds = Thresholds::default();
        let bars = vec![
            bar(2, Some(300.0), Some(100.0)),  // exactly 3x
            bar(3, Some(299.0), Some(100.0)),  // just under
        ];
        let series = turnover_series(&bars, &thresholds);
        assert!(series[0].high_turnover);
        assert!(!series[1].high_turnover);
    }

    #[test]
    fn test_missing_fields_skipped() {
        let thresholds = Thresholds::default();
        let bars = vec![bar(2, None, Some(100.0)), bar(3, Some(1.0), None), bar(4, Some(1.0), Some(0.0))];
        assert!(turnover_series(&bars, &thresholds).is_empty());
    }
}
