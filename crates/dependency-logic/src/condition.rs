// crates/dependency-logic/src/condition.rs
// ============================================================================
// Module: Dependency Conditions
// Description: Single comparison tests against one target's resolved value.
// Purpose: Define comparison operators and their evaluation semantics.
// Dependencies: serde, serde_json, crate::value
// ============================================================================

//! ## Overview
//! A [`Condition`] pairs a target with a [`Comparison`]. Equality and set
//! membership are strict: JSON type and value must both match, so `"1"` never
//! equals `1` and `1` never equals `1.0`.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Serialize;
use serde_json::Value;

use crate::value::is_empty;
use crate::value::is_truthy;

// ============================================================================
// SECTION: Operators
// ============================================================================

/// Operator label for a comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ConditionOperator {
    /// Strict equality.
    #[serde(rename = "=")]
    Equal,
    /// Strict inequality.
    #[serde(rename = "!=")]
    NotEqual,
    /// Value coerces to `true`.
    #[serde(rename = "TRUTHY")]
    Truthy,
    /// Value coerces to `false`.
    #[serde(rename = "FALSY")]
    Falsy,
    /// Value is empty.
    #[serde(rename = "EMPTY")]
    Empty,
    /// Value is not empty.
    #[serde(rename = "!EMPTY")]
    NotEmpty,
    /// Value is a strict member of a set.
    #[serde(rename = "IN")]
    In,
    /// Value is not a strict member of a set.
    #[serde(rename = "!IN")]
    NotIn,
}

impl ConditionOperator {
    /// Returns the canonical label for the operator.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Equal => "=",
            Self::NotEqual => "!=",
            Self::Truthy => "TRUTHY",
            Self::Falsy => "FALSY",
            Self::Empty => "EMPTY",
            Self::NotEmpty => "!EMPTY",
            Self::In => "IN",
            Self::NotIn => "!IN",
        }
    }
}

impl fmt::Display for ConditionOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// SECTION: Comparisons
// ============================================================================

/// Operator plus its comparison operand, if the operator takes one.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "operator", content = "operand", rename_all = "snake_case")]
pub enum Comparison {
    /// Passes when the value equals the operand.
    Equal(Value),
    /// Passes when the value differs from the operand.
    NotEqual(Value),
    /// Passes when the value is truthy.
    Truthy,
    /// Passes when the value is falsy.
    Falsy,
    /// Passes when the value is empty.
    Empty,
    /// Passes when the value is not empty.
    NotEmpty,
    /// Passes when the value is one of the operands.
    In(Vec<Value>),
    /// Passes when the value is none of the operands.
    NotIn(Vec<Value>),
}

impl Comparison {
    /// Returns the operator label for this comparison.
    #[must_use]
    pub const fn operator(&self) -> ConditionOperator {
        match self {
            Self::Equal(_) => ConditionOperator::Equal,
            Self::NotEqual(_) => ConditionOperator::NotEqual,
            Self::Truthy => ConditionOperator::Truthy,
            Self::Falsy => ConditionOperator::Falsy,
            Self::Empty => ConditionOperator::Empty,
            Self::NotEmpty => ConditionOperator::NotEmpty,
            Self::In(_) => ConditionOperator::In,
            Self::NotIn(_) => ConditionOperator::NotIn,
        }
    }

    /// Tests a resolved value against the comparison.
    #[must_use]
    pub fn verify(&self, value: &Value) -> bool {
        match self {
            Self::Equal(expected) => value == expected,
            Self::NotEqual(expected) => value != expected,
            Self::Truthy => is_truthy(value),
            Self::Falsy => !is_truthy(value),
            Self::Empty => is_empty(value),
            Self::NotEmpty => !is_empty(value),
            Self::In(set) => set.contains(value),
            Self::NotIn(set) => !set.contains(value),
        }
    }
}

// ============================================================================
// SECTION: Conditions
// ============================================================================

/// A comparison bound to the target whose value it tests.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Condition<T> {
    /// Target whose resolved value is compared.
    target: T,
    /// Comparison applied to the resolved value.
    comparison: Comparison,
}

impl<T> Condition<T> {
    /// Creates a condition.
    #[must_use]
    pub const fn new(target: T, comparison: Comparison) -> Self {
        Self {
            target,
            comparison,
        }
    }

    /// Returns the condition target.
    #[must_use]
    pub const fn target(&self) -> &T {
        &self.target
    }

    /// Returns the comparison.
    #[must_use]
    pub const fn comparison(&self) -> &Comparison {
        &self.comparison
    }

    /// Returns the operator label.
    #[must_use]
    pub const fn operator(&self) -> ConditionOperator {
        self.comparison.operator()
    }

    /// Tests a resolved target value against the comparison.
    #[must_use]
    pub fn verify(&self, value: &Value) -> bool {
        self.comparison.verify(value)
    }
}
