// crates/dependency-logic/tests/support/mod.rs
// ============================================================================
// Module: Test Support
// Description: Shared result helpers and resolvers for dependency tests.
// ============================================================================
//! ## Overview
//! Shared test helpers for consistent Result-based assertions.

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
    dead_code,
    reason = "Test-only helpers; not every test binary uses every helper."
)]

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt;

use dependency_logic::ConditionResolver;
use serde_json::Value;

// ========================================================================
// Test Result Helpers
// ========================================================================

/// Standard result type used across dependency integration tests.
pub type TestResult<T = ()> = Result<T, Box<dyn Error>>;

/// Lightweight error type for test assertions.
#[derive(Debug)]
struct TestError {
    /// Human-readable failure message.
    message: String,
}

impl fmt::Display for TestError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.message)
    }
}

impl Error for TestError {}

/// Returns an error when a test condition fails.
///
/// # Errors
/// Returns a `TestError` when the condition is false.
pub fn ensure(condition: bool, message: impl Into<String>) -> TestResult {
    if condition {
        Ok(())
    } else {
        Err(Box::new(TestError {
            message: message.into(),
        }))
    }
}

// ========================================================================
// Map Resolver
// ========================================================================

/// Resolver over a fixed map that records every lookup.
#[derive(Debug, Default)]
pub struct MapResolver {
    /// Values by target name.
    values: BTreeMap<String, Value>,
    /// Targets resolved so far, in order.
    lookups: RefCell<Vec<String>>,
}

impl MapResolver {
    /// Builds a resolver from name/value pairs.
    pub fn new<const N: usize>(entries: [(&str, Value); N]) -> Self {
        Self {
            values: entries.into_iter().map(|(key, value)| (key.to_string(), value)).collect(),
            lookups: RefCell::new(Vec::new()),
        }
    }

    /// Returns the targets resolved so far.
    pub fn lookups(&self) -> Vec<String> {
        self.lookups.borrow().clone()
    }
}

impl ConditionResolver<&'static str> for MapResolver {
    type Error = String;

    fn resolve(&self, target: &&'static str) -> Result<Value, String> {
        self.lookups.borrow_mut().push((*target).to_string());
        self.values.get(*target).cloned().ok_or_else(|| format!("unknown target {target}"))
    }
}
