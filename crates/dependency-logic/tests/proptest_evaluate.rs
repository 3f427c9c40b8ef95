// crates/dependency-logic/tests/proptest_evaluate.rs
// ============================================================================
// Module: Evaluation Property-Based Tests
// Description: Property tests for group folding and coercion invariants.
// Purpose: Check AND/OR folding against a direct boolean model.
// ============================================================================

//! Property-based tests for dependency evaluation invariants.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only assertions and helpers are permitted."
)]

use std::convert::Infallible;

use dependency_logic::Comparison;
use dependency_logic::Dependency;
use dependency_logic::DependencyBuildError;
use dependency_logic::DependencyBuilder;
use dependency_logic::GroupLogic;
use dependency_logic::is_empty;
use dependency_logic::is_truthy;
use proptest::prelude::*;
use serde_json::Value;

/// Builds a flat group over targets `0..flags.len()`, each tested for truthiness.
fn flat_group(logic: GroupLogic, count: usize) -> Result<Dependency<usize>, DependencyBuildError> {
    let mut builder: DependencyBuilder<usize> = Dependency::builder();
    for target in 0 .. count {
        let pending = if target == 0 {
            builder.on(target)
        } else {
            match logic {
                GroupLogic::And => builder.and(target)?,
                GroupLogic::Or => builder.or(target)?,
            }
        };
        builder = pending.being_truthy();
    }
    builder.build()
}

fn json_leaf_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(|v| Value::Number(v.into())),
        "[0-9a-z]{0,3}".prop_map(Value::String),
        prop::collection::vec(any::<u8>().prop_map(|v| Value::Number(v.into())), 0 .. 3)
            .prop_map(Value::Array),
    ]
}

proptest! {
    #[test]
    fn and_group_matches_all(flags in prop::collection::vec(any::<bool>(), 1 .. 12)) {
        let dependency = flat_group(GroupLogic::And, flags.len()).unwrap();
        let resolver = |target: &usize| -> Result<Value, Infallible> {
            Ok(Value::Bool(flags[*target]))
        };
        prop_assert_eq!(dependency.evaluate(&resolver).unwrap(), flags.iter().all(|flag| *flag));
    }

    #[test]
    fn or_group_matches_any(flags in prop::collection::vec(any::<bool>(), 1 .. 12)) {
        let dependency = flat_group(GroupLogic::Or, flags.len()).unwrap();
        let resolver = |target: &usize| -> Result<Value, Infallible> {
            Ok(Value::Bool(flags[*target]))
        };
        prop_assert_eq!(dependency.evaluate(&resolver).unwrap(), flags.iter().any(|flag| *flag));
    }

    #[test]
    fn truthy_and_falsy_partition_values(value in json_leaf_strategy()) {
        prop_assert_ne!(Comparison::Truthy.verify(&value), Comparison::Falsy.verify(&value));
        prop_assert_eq!(is_empty(&value), !is_truthy(&value));
    }

    #[test]
    fn membership_matches_equality(
        value in json_leaf_strategy(),
        set in prop::collection::vec(json_leaf_strategy(), 0 .. 5),
    ) {
        let any_equal = set.iter().any(|member| Comparison::Equal(member.clone()).verify(&value));
        prop_assert_eq!(Comparison::In(set.clone()).verify(&value), any_equal);
        prop_assert_eq!(Comparison::NotIn(set).verify(&value), !any_equal);
    }
}
