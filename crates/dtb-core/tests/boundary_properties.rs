//! Properties that must hold over the full generated case set.

use dtb_core::{
    boundary_cases, parse_composite_duration, safe_span, CaseRegistry, ColumnType, DateFunction,
    Endpoint, Literal, TestCase,
};
use std::collections::HashMap;

fn multiset(registry: &CaseRegistry) -> HashMap<&TestCase, usize> {
    let mut counts = HashMap::new();
    for case in registry.iter() {
        *counts.entry(case).or_insert(0) += 1;
    }
    counts
}

#[test]
fn regeneration_yields_same_multiset() {
    let first = CaseRegistry::build();
    let second = CaseRegistry::build();
    assert_eq!(multiset(&first), multiset(&second));
}

#[test]
fn low_levels_are_always_expected_valid() {
    for ty in ColumnType::ALL {
        for case in boundary_cases(ty).filter(|c| c.level <= 1) {
            assert!(case.expected_valid, "{ty} {case:?}");
        }
    }
}

#[test]
fn relaxed_types_have_no_upper_overflow_case() {
    let registry = CaseRegistry::build();
    for ty in [ColumnType::Date, ColumnType::Datetime] {
        let upper = Literal::instant(ty.max() - safe_span(), ty);
        let invalid_upper = registry
            .iter()
            .filter(|c| c.column_type == ty && c.initial_value == upper && !c.expected_valid)
            .count();
        assert_eq!(invalid_upper, 0, "{ty}");
    }
}

/// Net shift a case applies to its stored value, in seconds.
fn applied_shift(case: &TestCase) -> i64 {
    let raw = match case.arguments[1] {
        Literal::Interval { unit, amount } => amount * unit.span().num_seconds(),
        Literal::CompositeDuration { seconds } => seconds,
        ref other => panic!("unexpected argument {other:?}"),
    };
    match case.function {
        DateFunction::AddDate | DateFunction::AddTime => raw,
        DateFunction::SubDate | DateFunction::SubTime => -raw,
    }
}

#[test]
fn date_upper_bound_cases_never_move_upward() {
    let upper = Literal::instant(ColumnType::Date.max() - safe_span(), ColumnType::Date);
    let registry = CaseRegistry::build();
    for function in DateFunction::ALL {
        let at_upper: Vec<&TestCase> = registry
            .get(function)
            .iter()
            .filter(|c| c.column_type == ColumnType::Date && c.initial_value == upper)
            .collect();
        assert!(!at_upper.is_empty());
        for case in at_upper {
            assert!(applied_shift(case) <= 0, "{case}");
        }
    }
}

#[test]
fn invalid_cases_shift_past_the_range() {
    let registry = CaseRegistry::build();
    for case in registry.iter().filter(|c| !c.expected_valid) {
        let shift = applied_shift(case).abs();
        assert!(shift >= 2 * safe_span().num_seconds(), "{case}");
    }
}

#[test]
fn timestamp_keeps_both_overflow_directions() {
    let invalid: Vec<_> = boundary_cases(ColumnType::Timestamp)
        .filter(|c| !c.expected_valid)
        .collect();
    assert_eq!(invalid.len(), 4);
    assert_eq!(
        invalid.iter().filter(|c| c.endpoint == Endpoint::Max).count(),
        2
    );
    assert_eq!(
        invalid.iter().filter(|c| c.endpoint == Endpoint::Min).count(),
        2
    );
}

#[test]
fn composite_durations_round_trip() {
    let registry = CaseRegistry::build();
    for function in [DateFunction::AddTime, DateFunction::SubTime] {
        for case in registry.get(function) {
            let Literal::CompositeDuration { seconds } = case.arguments[1] else {
                panic!("unexpected argument {:?}", case.arguments[1]);
            };
            let parsed = parse_composite_duration(&case.arguments[1].to_string()).unwrap();
            assert_eq!(parsed.num_seconds(), seconds);
        }
    }
}
