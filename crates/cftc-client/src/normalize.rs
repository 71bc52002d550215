//! Row-level cleaning of raw report values into `PositionRecord`s.

use chrono::NaiveDate;
use csv::StringRecord;
use report_core::PositionRecord;

use crate::columns::ColumnMapping;

/// Width of a CFTC market code after zero-padding.
const MARKET_CODE_WIDTH: usize = 6;

/// Report dates are published as two-digit-year YYMMDD, e.g. "250107".
pub fn parse_report_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%y%m%d").ok()
}

/// Normalize a raw market code to the fixed 6-character form.
///
/// Codes sometimes arrive numeric-typed and render with a trailing ".0",
/// so anything after the first "." is stripped before padding.
pub fn normalize_market_code(raw: &str) -> String {
    let stem = raw.trim().split('.').next().unwrap_or("");
    format!("{:0>width$}", stem, width = MARKET_CODE_WIDTH)
}

/// Coerce an interest value to a non-negative contract count.
///
/// Non-numeric, missing, or negative input becomes 0. Distinguishing
/// "zero interest" from "value missing" is not required downstream.
pub fn parse_interest(raw: &str) -> i64 {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .map(|v| v.round() as i64)
        .unwrap_or(0)
        .max(0)
}

/// Transform one raw row into zero or one normalized record.
///
/// Rows whose date fails the strict pattern are dropped, not errored:
/// trailing/footer rows in the source routinely fail it.
pub fn normalize_row(mapping: &ColumnMapping, row: &StringRecord) -> Option<PositionRecord> {
    let date = parse_report_date(row.get(mapping.date)?)?;
    let market_code = normalize_market_code(row.get(mapping.market_code)?);
    let long_interest = parse_interest(row.get(mapping.long_interest).unwrap_or(""));
    let short_interest = parse_interest(row.get(mapping.short_interest).unwrap_or(""));

    Some(PositionRecord {
        date,
        market_code,
        long_interest,
        short_interest,
    })
}
