//! Tests for odds/unit normalization and pick filtering

use potd_pipeline::validate::{
    filter_valid, format_odds, validate_all, validate_odds, validate_unit, DEFAULT_ODDS, MAX_ODDS,
    MIN_ODDS,
};
use potd_pipeline::ExtractionResult;
use proptest::prelude::*;

fn record(pick: &str, odds: &str, unit: &str) -> ExtractionResult {
    ExtractionResult {
        pick: pick.to_string(),
        odds: odds.to_string(),
        sport: "NBA".to_string(),
        unit: unit.to_string(),
    }
}

#[test]
fn test_odds_examples() {
    assert_eq!(validate_odds(Some("-150")), 1.67);
    assert_eq!(validate_odds(Some("+150")), 2.5);
    assert_eq!(validate_odds(Some("150")), 2.5);
    assert_eq!(validate_odds(Some("-110")), 1.91);
    assert_eq!(validate_odds(Some("-99")), 2.01);
    assert_eq!(validate_odds(Some("+75")), 1.75);
    assert_eq!(validate_odds(Some("2")), DEFAULT_ODDS);
    assert_eq!(validate_odds(Some("2.0")), 2.0);
    assert_eq!(validate_odds(Some("-9223372036854775808")), DEFAULT_ODDS);
    assert_eq!(validate_odds(Some("1.95")), 1.95);
    assert_eq!(validate_odds(Some("5.0")), DEFAULT_ODDS);
    assert_eq!(validate_odds(Some("-500")), DEFAULT_ODDS);
    assert_eq!(validate_odds(Some("evens")), DEFAULT_ODDS);
    assert_eq!(validate_odds(Some("")), DEFAULT_ODDS);
    assert_eq!(validate_odds(None), DEFAULT_ODDS);
}

#[test]
fn test_unit_examples() {
    assert_eq!(validate_unit(Some("3 units")), 3);
    assert_eq!(validate_unit(Some("2u")), 2);
    assert_eq!(validate_unit(Some("risking 7u")), 1);
    assert_eq!(validate_unit(Some("0")), 1);
    assert_eq!(validate_unit(Some("half")), 1);
    assert_eq!(validate_unit(Some("\u{663} units")), 1);
    assert_eq!(validate_unit(None), 1);
}

#[test]
fn test_filter_valid_drops_unusable_picks() {
    let records = vec![
        record("Lakers -5.5", "-110", "1"),
        record("N/A", "-110", "1"),
        record("  n/a ", "-110", "1"),
        record("", "-110", "1"),
        record("   ", "-110", "1"),
        record("Over 2.5", "1.9", "2"),
    ];

    let kept = filter_valid(records);
    let picks: Vec<&str> = kept.iter().map(|r| r.pick.as_str()).collect();
    assert_eq!(picks, ["Lakers -5.5", "Over 2.5"]);
}

#[test]
fn test_validate_all() {
    let validated = validate_all(vec![
        record("Lakers -5.5", "-150", "3 units"),
        record("N/A", "-150", "3"),
    ]);

    assert_eq!(validated.len(), 1);
    assert_eq!(validated[0].odds, 1.67);
    assert_eq!(validated[0].unit, 3);
}

proptest! {
    #[test]
    fn prop_odds_always_in_range(raw in ".{0,12}") {
        let odds = validate_odds(Some(raw.as_str()));
        prop_assert!((MIN_ODDS..=MAX_ODDS).contains(&odds));
    }

    #[test]
    fn prop_any_integer_is_safe(raw in any::<i64>()) {
        let odds = validate_odds(Some(raw.to_string().as_str()));
        prop_assert!((MIN_ODDS..=MAX_ODDS).contains(&odds));
    }

    #[test]
    fn prop_odds_idempotent(raw in "[-+]?[0-9]{1,4}(\\.[0-9]{1,3})?") {
        let once = validate_odds(Some(raw.as_str()));
        let twice = validate_odds(Some(format_odds(once).as_str()));
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn prop_unit_always_in_range(raw in ".{0,12}") {
        let unit = validate_unit(Some(raw.as_str()));
        prop_assert!((1..=5).contains(&unit));
        prop_assert_eq!(validate_unit(Some(unit.to_string().as_str())), unit);
    }
}
