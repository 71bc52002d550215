//! Forward-curve spread between a near and a far delivery month.

use chrono::NaiveDate;
use report_core::DailyBar;
use serde::{Deserialize, Serialize};

use crate::align::inner_join_closes;

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SpreadPoint {
    pub date: NaiveDate,
    pub spread_pct: f64,
}

/// (far / near − 1) × 100 per shared trading day on or after `cutoff`.
///
/// Negative spread = backwardation: the near month trades over the far
/// month, the usual tightness signal.
pub fn forward_spread_series(
    near: &[DailyBar],
    far: &[DailyBar],
    cutoff: NaiveDate,
) -> Vec<SpreadPoint> {
    inner_join_closes(near, far)
        .into_iter()
        .filter(|(date, near_close, _)| *date >= cutoff && *near_close != 0.0)
        .map(|(date, near_close, far_close)| SpreadPoint {
            date,
            spread_pct: (far_close / near_close - 1.0) * 100.0,
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
    fn test_contango_positive_backwardation_negative() {
        let near = vec![bar(2025, 6, 2, 100.0), bar(2025, 6, 3, 100.0)];
        let far = vec![bar(2025, 6, 2, 102.0), bar(2025, 6, 3, 99.0)];
        let cutoff = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();

        let series = forward_spread_series(&near, &far, cutoff);
        assert_eq!(series.len(), 2);
        assert!((series[0].spread_pct - 2.0).abs() < 1e-9);
        assert!((series[1].spread_pct + 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_cutoff_filters_old_rows() {
        let near = vec![bar(2025, 1, 2, 100.0), bar(2025, 6, 2, 100.0)];
        let far = vec![bar(2025, 1, 2, 101.0), bar(2025, 6, 2, 101.0)];
        let cutoff = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();

        assert_eq!(forward_spread_series(&near, &far, cutoff).len(), 1);
    }
}
