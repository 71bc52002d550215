//! Normalized relative-strength comparison of two price series.

use chrono::NaiveDate;
use report_core::DailyBar;
use serde::{Deserialize, Serialize};

use crate::align::inner_join_closes;

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ComparisonPoint {
    pub date: NaiveDate,
    pub a_rebased: f64,
    pub b_rebased: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comparison {
    pub points: Vec<ComparisonPoint>,
    /// Latest a_rebased − b_rebased; positive means series A is the
    /// stronger performer over the window.
    pub latest_strength_diff: f64,
}

/// Rebase both series to 100 at their first shared date so absolute
/// price levels drop out and only relative performance remains.
pub fn normalized_comparison(a: &[DailyBar], b: &[DailyBar]) -> Option<Comparison> {
    let joined = inner_join_closes(a, b);
    let (_, first_a, first_b) = *joined.first()?;
    if first_a == 0.0 || first_b == 0.0 {
        return None;
    }

    let points: Vec<ComparisonPoint> = joined
        .iter()
        .map(|&(date, a_close, b_close)| ComparisonPoint {
            date,
            a_rebased: a_close / first_a * 100.0,
            b_rebased: b_close / first_b * 100.0,
        })
        .collect();

    let last = points.last()?;
    Some(Comparison {
        latest_strength_diff: last.a_rebased - last.b_rebased,
        points,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bar(d: u32, close: f64) -> DailyBar {
        DailyBar {
            date: NaiveDate::from_ymd_opt(2025, 6, d).unwrap(),
            close,
            volume: None,
            open_interest: None,
        }
    }

    #[test]
    fn test_rebased_to_100_at_start() {
        let a = vec![bar(2, 200.0), bar(3, 210.0)];
        let b = vec![bar(2, 50.0), bar(3, 51.0)];
        let cmp = normalized_comparison(&a, &b).unwrap();

        assert_eq!(cmp.points[0].a_rebased, 100.0);
        assert_eq!(cmp.points[0].b_rebased, 100.0);
        // A gained 5%, B gained 2%: A is ~3 points stronger.
        assert!((cmp.latest_strength_diff - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_no_overlap_is_none() {
        let a = vec![bar(2, 1.0)];
        let b = vec![bar(3, 1.0)];
        assert!(normalized_comparison(&a, &b).is_none());
    }
}
