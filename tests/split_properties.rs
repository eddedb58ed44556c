//! Public API tests for split computation
//!
//! Worked examples from race pacing plus property checks over arbitrary goal times
//! and distances.

use paceband::types::{DistanceUnit, GoalTime, Marker, RaceDistance, StandardDistance};
use paceband::{BandConfig, BandSession, PaceBand, SplitCalculator, SplitTable};
use proptest::prelude::*;

fn marathon() -> RaceDistance {
    RaceDistance::standard(StandardDistance::Marathon, DistanceUnit::Kilometers)
}

fn half() -> RaceDistance {
    RaceDistance::standard(StandardDistance::HalfMarathon, DistanceUnit::Kilometers)
}

#[test]
fn three_hour_marathon() {
    let splits = SplitCalculator::compute("03:00:00", &marathon()).unwrap();

    assert_eq!(splits.len(), 43);
    assert_eq!(splits[0].marker, Marker::Whole(1));
    assert_eq!(splits[0].elapsed.to_string(), "0:04:15");
    assert_eq!(splits[41].marker, Marker::Whole(42));
    assert_eq!(splits[42].marker, Marker::Finish("42.195".to_string()));
    assert_eq!(splits[42].elapsed.to_string(), "3:00:00");
}

#[test]
fn one_forty_five_half_marathon() {
    let splits = SplitCalculator::compute("01:45:00", &half()).unwrap();

    assert_eq!(splits.len(), 22);
    assert!(splits[..21].iter().all(|record| !record.marker.is_finish()));
    assert_eq!(splits[21].marker.to_string(), "21.0975");
    assert_eq!(splits[21].elapsed.to_string(), "1:45:00");
}

#[test]
fn malformed_goal_keeps_table() {
    let mut table = SplitTable::new();
    assert!(table.update("3:00:00", &marathon()));
    let before = table.clone();

    for input in ["abc", "", ":30:00", "-1:00:00"] {
        assert!(!table.update(input, &marathon()), "'{}' should be a no-op", input);
        assert_eq!(table, before);
    }
}

#[test]
fn facade_reports_parse_errors() {
    let error = PaceBand::splits("abc", &marathon()).unwrap_err();
    assert!(matches!(error, paceband::PaceBandError::Parse { .. }));
    assert!(!error.recovery_suggestions().is_empty());
}

#[test]
fn unit_toggle_is_exact() {
    let miles = half().with_unit(DistanceUnit::Miles).unwrap();
    assert_eq!(miles.value(), 13.1094);

    let mut session = BandSession::from_config(&BandConfig::default()).unwrap();
    session.set_distance(half());
    session.set_unit(DistanceUnit::Miles);
    session.set_unit(DistanceUnit::Kilometers);
    assert_eq!(session.distance().value(), 21.0975);
}

#[test]
fn split_records_serialize_for_display() {
    let ten_k = RaceDistance::new(10.0, DistanceUnit::Kilometers).unwrap();
    let splits = SplitCalculator::compute("0:50:00", &ten_k).unwrap();

    let json = serde_json::to_value(&splits[0]).unwrap();
    assert_eq!(json, serde_json::json!({ "marker": 1, "elapsed": "0:05:00" }));

    let finish = serde_json::to_value(splits.last().unwrap()).unwrap();
    assert_eq!(finish, serde_json::json!({ "marker": "10", "elapsed": "0:50:00" }));
}

fn distance_strategy() -> impl Strategy<Value = RaceDistance> {
    (0.1f64..200.0, prop_oneof![Just(DistanceUnit::Kilometers), Just(DistanceUnit::Miles)])
        .prop_map(|(value, unit)| RaceDistance::new(value, unit).unwrap())
}

proptest! {
    #[test]
    fn record_count_is_whole_units_plus_finish(
        hours in 0u64..30, minutes in 0u64..60, seconds in 0u64..60,
        distance in distance_strategy(),
    ) {
        let goal = GoalTime::new(hours, minutes, seconds);
        let splits = SplitCalculator::splits_for(goal, &distance);
        prop_assert_eq!(splits.len() as u64, distance.value().floor() as u64 + 1);
    }

    #[test]
    fn finish_round_trips_goal(
        hours in 0u64..30, minutes in 0u64..60, seconds in 0u64..60,
        distance in distance_strategy(),
    ) {
        let text = format!("{}:{:02}:{:02}", hours, minutes, seconds);
        let splits = SplitCalculator::compute(&text, &distance).unwrap();
        let finish = splits.last().unwrap();

        prop_assert!(finish.marker.is_finish());
        let parsed = GoalTime::parse(&finish.elapsed.to_string()).unwrap();
        prop_assert_eq!(parsed.total_seconds(), hours * 3600 + minutes * 60 + seconds);
    }

    #[test]
    fn elapsed_never_decreases(total in 0u64..200_000, distance in distance_strategy()) {
        let splits = SplitCalculator::splits_for(GoalTime::from_total_seconds(total), &distance);
        for pair in splits.windows(2) {
            prop_assert!(pair[0].elapsed <= pair[1].elapsed);
        }
    }

    #[test]
    fn computation_is_idempotent(
        text in "[0-9]{1,2}:[0-9]{2}:[0-9]{2}",
        distance in distance_strategy(),
    ) {
        prop_assert_eq!(
            SplitCalculator::compute(&text, &distance),
            SplitCalculator::compute(&text, &distance)
        );
    }
}
