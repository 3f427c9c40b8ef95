// crates/dependency-logic/tests/evaluate.rs
// ============================================================================
// Module: Evaluation Tests
// Description: AND/OR folding, subgroup composition, and resolver errors.
// Purpose: Ensure dependency trees gate values exactly as declared.
// ============================================================================
//! ## Overview
//! Integration tests running built trees against map-backed resolvers.

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
    reason = "Test-only output and panic-based assertions are permitted."
)]

mod support;

use dependency_logic::Dependency;
use dependency_logic::GroupLogic;
use dependency_logic::resolve_dependencies;
use serde_json::Value;
use serde_json::json;
use support::MapResolver;
use support::TestResult;
use support::ensure;

type Tree = Dependency<&'static str>;

// ============================================================================
// SECTION: Pass-Through
// ============================================================================

#[test]
fn absent_dependency_passes_value_through() -> TestResult {
    let resolver = MapResolver::new([]);
    let resolved = resolve_dependencies::<&'static str, _>(json!("v"), None, &resolver)?;
    ensure(resolved == Some(json!("v")), "value should pass unchanged")?;
    ensure(resolver.lookups().is_empty(), "no targets should be resolved")?;
    Ok(())
}

#[test]
fn empty_root_passes() -> TestResult {
    let dependency = Tree::builder().build()?;
    let resolver = MapResolver::new([]);
    ensure(dependency.evaluate(&resolver)?, "empty AND group passes")?;
    Ok(())
}

#[test]
fn unset_inner_group_defaults_to_and_and_passes() -> TestResult {
    let dependency = Tree::builder().or_group()?.or_group()?.end_group()?.end_group()?.build()?;
    let innermost = dependency.groups().last().map(|(_, group)| group.declared_logic());
    ensure(innermost == Some(None), "innermost group never fixes its logic")?;
    let resolver = MapResolver::new([]);
    ensure(dependency.evaluate(&resolver)?, "unset empty group folds as AND")?;
    Ok(())
}

#[test]
fn empty_or_group_fails() -> TestResult {
    let dependency = Tree::builder().or("unused")?.cancel().build()?;
    ensure(dependency.root().declared_logic() == Some(GroupLogic::Or), "root fixed to OR")?;
    ensure(dependency.root().is_empty(), "cancelled condition never attaches")?;
    let resolver = MapResolver::new([]);
    ensure(!dependency.evaluate(&resolver)?, "empty OR group cannot pass")?;
    ensure(resolver.lookups().is_empty(), "no targets should be resolved")?;
    Ok(())
}

#[test]
fn or_subgroup_with_only_failing_condition_fails() -> TestResult {
    let dependency =
        Tree::builder().or_group()?.or("flag")?.being_truthy().end_group()?.build()?;
    let resolver = MapResolver::new([("flag", json!(false))]);
    ensure(!dependency.evaluate(&resolver)?, "failing OR subgroup fails the root")?;
    Ok(())
}

// ============================================================================
// SECTION: Single Conditions
// ============================================================================

#[test]
fn equal_condition_gates_value() -> TestResult {
    let dependency = Tree::builder().on("parent").being_equal_to("testValue").build()?;

    let passing = MapResolver::new([("parent", json!("testValue"))]);
    ensure(
        dependency.gate(json!("settingValue"), &passing)? == Some(json!("settingValue")),
        "dependency condition OK",
    )?;

    let failing = MapResolver::new([("parent", json!("testValueDiffers"))]);
    ensure(dependency.gate(json!("settingValue"), &failing)?.is_none(), "condition fails")?;
    Ok(())
}

#[test]
fn gated_null_value_still_passes() -> TestResult {
    let dependency = Tree::builder().on("parent").being_truthy().build()?;
    let resolver = MapResolver::new([("parent", json!(true))]);
    ensure(
        dependency.gate(Value::Null, &resolver)? == Some(Value::Null),
        "a passing gate returns the value even when it is null",
    )?;
    Ok(())
}

// ============================================================================
// SECTION: Group Folding
// ============================================================================

#[test]
fn and_group_requires_every_condition() -> TestResult {
    let dependency = Tree::builder()
        .on("a")
        .being_in(["value1", "value2"])
        .and("b")?
        .being_equal_to("value3")
        .build()?;

    let all = MapResolver::new([("a", json!("value1")), ("b", json!("value3"))]);
    ensure(dependency.evaluate(&all)?, "all conditions pass")?;

    let one_fails = MapResolver::new([("a", json!("value1")), ("b", json!("value2"))]);
    ensure(!dependency.evaluate(&one_fails)?, "one failing condition fails the group")?;
    Ok(())
}

#[test]
fn or_group_requires_any_condition() -> TestResult {
    let dependency = Tree::builder()
        .on("a")
        .being_in(["value1", "value2"])
        .or("b")?
        .being_equal_to("value3")
        .build()?;

    let second_passes = MapResolver::new([("a", json!("value3")), ("b", json!("value3"))]);
    ensure(dependency.evaluate(&second_passes)?, "one passing condition suffices")?;

    let none_pass = MapResolver::new([("a", json!("value3")), ("b", json!("value1"))]);
    ensure(!dependency.evaluate(&none_pass)?, "no passing condition fails the group")?;
    Ok(())
}

#[test]
fn and_with_nested_or_group() -> TestResult {
    let dependency = Tree::builder()
        .on("a")
        .being_in(["value1", "value2"])
        .and_group()?
        .on("b")
        .being_equal_to("value3")
        .or("b")?
        .being_equal_to("value1")
        .end_group()?
        .build()?;

    let cases = [
        ("value1", "value3", true),
        ("value2", "value1", true),
        ("value3", "value1", false),
        ("value1", "value2", false),
    ];
    for (a, b, expected) in cases {
        let resolver = MapResolver::new([("a", json!(a)), ("b", json!(b))]);
        ensure(
            dependency.evaluate(&resolver)? == expected,
            format!("a={a} b={b} expected {expected}"),
        )?;
    }
    Ok(())
}

#[test]
fn or_with_nested_or_group() -> TestResult {
    let dependency = Tree::builder()
        .on("a")
        .being_in(["value1", "value2"])
        .or_group()?
        .on("b")
        .being_equal_to("value3")
        .or("b")?
        .being_equal_to("value1")
        .end_group()?
        .build()?;

    let subgroup_passes = MapResolver::new([("a", json!("value3")), ("b", json!("value3"))]);
    ensure(dependency.evaluate(&subgroup_passes)?, "nested group alone satisfies OR")?;

    let nothing_passes = MapResolver::new([("a", json!("value3")), ("b", json!("value2"))]);
    ensure(!dependency.evaluate(&nothing_passes)?, "neither branch passes")?;
    Ok(())
}

// ============================================================================
// SECTION: Full Evaluation
// ============================================================================

#[test]
fn evaluation_does_not_short_circuit() -> TestResult {
    let dependency = Tree::builder()
        .on("a")
        .being_truthy()
        .and("b")?
        .being_truthy()
        .and_group()?
        .on("c")
        .being_truthy()
        .end_group()?
        .build()?;
    let resolver = MapResolver::new([("a", json!(false)), ("b", json!(true)), ("c", json!(true))]);
    ensure(!dependency.evaluate(&resolver)?, "first condition fails the group")?;
    ensure(resolver.lookups() == ["a", "b", "c"], "every condition is still resolved")?;
    Ok(())
}

#[test]
fn resolver_error_surfaces_after_outcome_is_decided() -> TestResult {
    let dependency = Tree::builder()
        .on("a")
        .being_truthy()
        .or("missing")?
        .being_truthy()
        .build()?;
    let resolver = MapResolver::new([("a", json!(true))]);
    match dependency.evaluate(&resolver) {
        Err(message) => ensure(message == "unknown target missing", message),
        Ok(_) => Err("expected the unknown target to fail evaluation".into()),
    }
}

#[test]
fn closure_resolver_is_accepted() -> TestResult {
    let dependency = Tree::builder().on("flag").being_not_empty().build()?;
    let resolver = |target: &&'static str| -> Result<Value, String> {
        if *target == "flag" { Ok(json!("on")) } else { Err(format!("unknown {target}")) }
    };
    ensure(dependency.evaluate(&resolver)?, "closure resolver should pass")?;
    Ok(())
}
