use serde::{Deserialize, Serialize};

/// Tunable thresholds for derived-signal classification.
///
/// The reference values come from the desk's reporting conventions, not
/// from any validated model; treat them as configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Thresholds {
    /// A week-over-week net-positioning change of at least this many
    /// contracts is classified as a large adjustment.
    pub large_move_contracts: i64,
    /// Volume / open-interest at or above this ratio counts as high
    /// turnover.
    pub high_turnover_ratio: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            large_move_contracts: 5_000,
            high_turnover_ratio: 3.0,
        }
    }
}

impl Thresholds {
    /// Read overrides from `LARGE_MOVE_CONTRACTS` / `HIGH_TURNOVER_RATIO`,
    /// falling back to the defaults for anything unset or unparsable.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            large_move_contracts: std::env::var("LARGE_MOVE_CONTRACTS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.large_move_contracts),
            high_turnover_ratio: std::env::var("HIGH_TURNOVER_RATIO")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.high_turnover_ratio),
        }
    }
}
