//! Week-over-week classification of the speculative net-position series.

use report_core::{MoveDirection, MoveMagnitude, NetPoint, NetPositionSignal, Thresholds};

/// Classify the most recent period-over-period change of a date-ascending
/// net series.
///
/// Fewer than two points is `InsufficientData` — deliberately not zero
/// and not an error, so callers can tell "no signal" from "flat". The
/// comparison is always two-point; no smoothing is applied.
pub fn classify_net_change(series: &[NetPoint], thresholds: &Thresholds) -> NetPositionSignal {
    let [.., previous, latest] = series else {
        return NetPositionSignal::InsufficientData;
    };

    let delta = latest.net - previous.net;
    if delta == 0 {
        return NetPositionSignal::Flat;
    }

    let direction = if delta > 0 {
        MoveDirection::Increase
    } else {
        MoveDirection::Decrease
    };
    let magnitude = if delta.abs() >= thresholds.large_move_contracts {
        MoveMagnitude::Large
    } else {
        MoveMagnitude::Small
    };

    NetPositionSignal::Move {
        direction,
        magnitude,
        delta,
    }
}
