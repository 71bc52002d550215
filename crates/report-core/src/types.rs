use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// CFTC market codes for the metals tracked by the daily report.
/// Fixed-width, zero-padded identifiers as published by the CFTC.
pub const CFTC_CODE_GOLD: &str = "088691";
pub const CFTC_CODE_SILVER: &str = "084691";
pub const CFTC_CODE_PLATINUM: &str = "076651";

/// Metals covered by the report tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Metal {
    Gold,
    Silver,
    Platinum,
    Palladium,
}

impl Metal {
    pub fn name(&self) -> &'static str {
        match self {
            Metal::Gold => "Gold",
            Metal::Silver => "Silver",
            Metal::Platinum => "Platinum",
            Metal::Palladium => "Palladium",
        }
    }

    /// CFTC commitment-of-traders market code, where one exists.
    pub fn cftc_code(&self) -> Option<&'static str> {
        match self {
            Metal::Gold => Some(CFTC_CODE_GOLD),
            Metal::Silver => Some(CFTC_CODE_SILVER),
            Metal::Platinum => Some(CFTC_CODE_PLATINUM),
            Metal::Palladium => None,
        }
    }
}

/// One normalized weekly commitment-of-traders row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionRecord {
    pub date: NaiveDate,
    /// Exactly 6 characters, left-padded with zeros.
    pub market_code: String,
    pub long_interest: i64,
    pub short_interest: i64,
}

impl PositionRecord {
    /// Net speculative position (long minus short).
    pub fn net(&self) -> i64 {
        self.long_interest - self.short_interest
    }
}

/// One point of a derived net-position series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetPoint {
    pub date: NaiveDate,
    pub net: i64,
}

/// Daily quote row for a futures contract or spot benchmark.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyBar {
    pub date: NaiveDate,
    pub close: f64,
    #[serde(default)]
    pub volume: Option<f64>,
    #[serde(default)]
    pub open_interest: Option<f64>,
}

/// Warehouse-receipt (exchange stocks) row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WarehouseReceipt {
    pub date: NaiveDate,
    pub receipts: f64,
}

/// Date-indexed USD/CNY series with a fixed fallback rate.
///
/// Lookups forward-fill from the most recent prior observation; dates
/// before the first observation (or an empty series) resolve to the
/// fallback.
#[derive(Debug, Clone)]
pub struct FxSeries {
    points: Vec<(NaiveDate, f64)>,
    fallback: f64,
}

impl FxSeries {
    pub fn new(mut points: Vec<(NaiveDate, f64)>, fallback: f64) -> Self {
        points.sort_by_key(|(d, _)| *d);
        Self { points, fallback }
    }

    /// Constant-rate series (used when the FX source is unavailable).
    pub fn fixed(rate: f64) -> Self {
        Self {
            points: Vec::new(),
            fallback: rate,
        }
    }

    pub fn fallback(&self) -> f64 {
        self.fallback
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Rate effective on `date`, forward-filled.
    pub fn rate_on(&self, date: NaiveDate) -> f64 {
        match self.points.partition_point(|(d, _)| *d <= date) {
            0 => self.fallback,
            n => self.points[n - 1].1,
        }
    }
}

/// Direction of a period-over-period positioning change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveDirection {
    Increase,
    Decrease,
}

/// Magnitude tier relative to the configured large-move threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveMagnitude {
    Large,
    Small,
}

/// Net-positioning change signal for one market code.
///
/// `InsufficientData` is distinct from `Flat`: the former means fewer than
/// two observations exist, the latter means two observations agree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NetPositionSignal {
    InsufficientData,
    Flat,
    Move {
        direction: MoveDirection,
        magnitude: MoveMagnitude,
        delta: i64,
    },
}

impl NetPositionSignal {
    /// Human-readable commentary line for the report.
    pub fn describe(&self, market: &str) -> String {
        match self {
            NetPositionSignal::InsufficientData => {
                format!("{}: insufficient positioning history for a signal", market)
            }
            NetPositionSignal::Flat => {
                format!("{}: speculative net positioning unchanged week-over-week", market)
            }
            NetPositionSignal::Move {
                direction,
                magnitude,
                delta,
            } => {
                let dir = match direction {
                    MoveDirection::Increase => "increased",
                    MoveDirection::Decrease => "decreased",
                };
                let mag = match magnitude {
                    MoveMagnitude::Large => "large",
                    MoveMagnitude::Small => "small",
                };
                format!(
                    "{}: speculative net positioning {} by {} contracts ({} adjustment)",
                    market,
                    dir,
                    delta.abs(),
                    mag
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_net_position() {
        let rec = PositionRecord {
            date: d(2025, 6, 3),
            market_code: CFTC_CODE_GOLD.to_string(),
            long_interest: 250_000,
            short_interest: 130_000,
        };
        assert_eq!(rec.net(), 120_000);
    }

    #[test]
    fn test_fx_forward_fill() {
        let fx = FxSeries::new(
            vec![(d(2025, 1, 6), 7.19), (d(2025, 1, 10), 7.22)],
            7.25,
        );
        // Before the first observation: fallback.
        assert_eq!(fx.rate_on(d(2025, 1, 1)), 7.25);
        // Exact hit.
        assert_eq!(fx.rate_on(d(2025, 1, 6)), 7.19);
        // Gap forward-fills from the prior observation.
        assert_eq!(fx.rate_on(d(2025, 1, 8)), 7.19);
        // After the last observation.
        assert_eq!(fx.rate_on(d(2025, 2, 1)), 7.22);
    }

    #[test]
    fn test_fx_fixed() {
        let fx = FxSeries::fixed(7.25);
        assert!(fx.is_empty());
        assert_eq!(fx.rate_on(d(2025, 7, 1)), 7.25);
    }

    #[test]
    fn test_signal_describe_distinguishes_no_signal_from_flat() {
        let none = NetPositionSignal::InsufficientData.describe("Gold");
        let flat = NetPositionSignal::Flat.describe("Gold");
        assert_ne!(none, flat);
        assert!(none.contains("insufficient"));
        assert!(flat.contains("unchanged"));
    }
}
