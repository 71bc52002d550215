use report_core::{NetPoint, PositionRecord};

/// Net-position series for one market code, date-ascending.
///
/// Derived on demand from the full record set; no ordering guarantee from
/// the source is relied upon.
pub fn net_position_series(records: &[PositionRecord], market_code: &str) -> Vec<NetPoint> {
    let mut points: Vec<NetPoint> = records
        .iter()
        .filter(|r| r.market_code == market_code)
        .map(|r| NetPoint {
            date: r.date,
            net: r.net(),
        })
        .collect();
    points.sort_by_key(|p| p.date);
    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use report_core::CFTC_CODE_GOLD;

    fn rec(date: (i32, u32, u32), code: &str, long: i64, short: i64) -> PositionRecord {
        PositionRecord {
            date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            market_code: code.to_string(),
            long_interest: long,
            short_interest: short,
        }
    }

    #[test]
    fn test_filters_and_sorts() {
        let records = vec![
            rec((2025, 1, 14), CFTC_CODE_GOLD, 255_400, 130_000),
            rec((2025, 1, 7), "084691", 60_000, 22_000),
            rec((2025, 1, 7), CFTC_CODE_GOLD, 250_000, 130_000),
        ];
        let series = net_position_series(&records, CFTC_CODE_GOLD);
        assert_eq!(series.len(), 2);
        assert!(series[0].date < series[1].date);
        assert_eq!(series[0].net, 120_000);
        assert_eq!(series[1].net, 125_400);
    }

    #[test]
    fn test_unknown_code_is_empty() {
        let records = vec![rec((2025, 1, 7), CFTC_CODE_GOLD, 1, 2)];
        assert!(net_position_series(&records, "000000").is_empty());
    }
}
