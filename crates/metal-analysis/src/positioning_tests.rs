#[cfg(test)]
mod tests {
    use crate::positioning::classify_net_change;
    use chrono::NaiveDate;
    use report_core::{MoveDirection, MoveMagnitude, NetPoint, NetPositionSignal, Thresholds};

    fn series(values: &[i64]) -> Vec<NetPoint> {
        values
            .iter()
            .enumerate()
            .map(|(i, &net)| NetPoint {
                date: NaiveDate::from_ymd_opt(2025, 1, 7).unwrap()
                    + chrono::Duration::weeks(i as i64),
                net,
            })
            .collect()
    }

    #[test]
    fn test_two_point_history_reports_large_increase() {
        // Gold net positioning moving 120,000 -> 125,400: delta 5,400 >= 5,000.
        let signal = classify_net_change(&series(&[120_000, 125_400]), &Thresholds::default());
        assert_eq!(
            signal,
            NetPositionSignal::Move {
                direction: MoveDirection::Increase,
                magnitude: MoveMagnitude::Large,
                delta: 5_400,
            }
        );
    }

    #[test]
    fn test_exact_threshold_is_large() {
        let signal = classify_net_change(&series(&[100_000, 105_000]), &Thresholds::default());
        assert!(matches!(
            signal,
            NetPositionSignal::Move {
                magnitude: MoveMagnitude::Large,
                ..
            }
        ));
    }

    #[test]
    fn test_one_below_threshold_is_small() {
        let signal = classify_net_change(&series(&[100_000, 104_999]), &Thresholds::default());
        assert!(matches!(
            signal,
            NetPositionSignal::Move {
                direction: MoveDirection::Increase,
                magnitude: MoveMagnitude::Small,
                ..
            }
        ));
    }

    #[test]
    fn test_decrease_direction() {
        let signal = classify_net_change(&series(&[100_000, 93_000]), &Thresholds::default());
        assert_eq!(
            signal,
            NetPositionSignal::Move {
                direction: MoveDirection::Decrease,
                magnitude: MoveMagnitude::Large,
                delta: -7_000,
            }
        );
    }

    #[test]
    fn test_single_record_is_insufficient_not_flat() {
        let signal = classify_net_change(&series(&[120_000]), &Thresholds::default());
        assert_eq!(signal, NetPositionSignal::InsufficientData);
        assert_ne!(signal, NetPositionSignal::Flat);
    }

    #[test]
    fn test_empty_history_is_insufficient() {
        let signal = classify_net_change(&[], &Thresholds::default());
        assert_eq!(signal, NetPositionSignal::InsufficientData);
    }

    #[test]
    fn test_unchanged_is_flat() {
        let signal = classify_net_change(&series(&[50_000, 50_000]), &Thresholds::default());
        assert_eq!(signal, NetPositionSignal::Flat);
    }

    #[test]
    fn test_only_last_two_points_matter() {
        // Earlier history is ignored: trend is always a two-point comparison.
        let signal = classify_net_change(&series(&[0, 200_000, 200_100]), &Thresholds::default());
        assert!(matches!(
            signal,
            NetPositionSignal::Move {
                magnitude: MoveMagnitude::Small,
                delta: 100,
                ..
            }
        ));
    }

    #[test]
    fn test_custom_threshold() {
        let thresholds = Thresholds {
            large_move_contracts: 100,
            ..Thresholds::default()
        };
        let signal = classify_net_change(&series(&[1_000, 1_100]), &thresholds);
        assert!(matches!(
            signal,
            NetPositionSignal::Move {
                magnitude: MoveMagnitude::Large,
                ..
            }
        ));
    }
}
