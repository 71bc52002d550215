//! Date-indexed alignment of quote series.
//!
//! Prices are inner-joined (mismatched holidays between Shanghai and New
//! York drop out); only FX is forward-filled, and that happens inside
//! `FxSeries::rate_on`.

use chrono::NaiveDate;
use report_core::DailyBar;
use std::collections::BTreeMap;

/// Inner-join two daily series on date, ascending.
pub fn inner_join_closes(a: &[DailyBar], b: &[DailyBar]) -> Vec<(NaiveDate, f64, f64)> {
    let b_by_date: BTreeMap<NaiveDate, f64> = b.iter().map(|bar| (bar.date, bar.close)).collect();

    let mut joined: Vec<(NaiveDate, f64, f64)> = a
        .iter()
        .filter_map(|bar| b_by_date.get(&bar.date).map(|&bc| (bar.date, bar.close, bc)))
        .collect();
    joined.sort_by_key(|(d, _, _)| *d);
    joined
}

/// Keep only bars on or after `cutoff`.
pub fn since(bars: &[DailyBar], cutoff: NaiveDate) -> Vec<DailyBar> {
    bars.iter().filter(|b| b.date >= cutoff).cloned().collect()
}

/// Last `n` bars of a series (the whole series when shorter).
pub fn tail(bars: &[DailyBar], n: usize) -> &[DailyBar] {
    let start = bars.len().saturating_sub(n);
    &bars[start..]
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
    fn test_inner_join_drops_unmatched_dates() {
        let a = vec![bar(2025, 6, 2, 780.0), bar(2025, 6, 3, 785.0), bar(2025, 6, 4, 790.0)];
        // June 3rd is a US holiday here.
        let b = vec![bar(2025, 6, 2, 3350.0), bar(2025, 6, 4, 3360.0)];
        let joined = inner_join_closes(&a, &b);
        assert_eq!(joined.len(), 2);
        assert_eq!(joined[0], (NaiveDate::from_ymd_opt(2025, 6, 2).unwrap(), 780.0, 3350.0));
    }

    #[test]
    fn test_tail_shorter_than_n() {
        let bars = vec![bar(2025, 6, 2, 1.0)];
        assert_eq!(tail(&bars, 30).len(), 1);
    }
}
