// crates/dependency-logic/src/value.rs
// ============================================================================
// Module: Value Coercion
// Description: Boolean coercion rules for JSON values.
// Purpose: Back the TRUTHY, FALSY, EMPTY, and NOT_EMPTY comparisons.
// Dependencies: serde_json
// ============================================================================

//! ## Overview
//! A value is falsy (and empty) when it is `null`, `false`, numeric zero, the
//! empty string, the string `"0"`, an empty array, or an empty object. Every
//! other value is truthy.

use serde_json::Number;
use serde_json::Value;

// ============================================================================
// SECTION: Coercion
// ============================================================================

/// Returns true when the value coerces to boolean `true`.
#[must_use]
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number_is_truthy(number),
        Value::String(text) => !(text.is_empty() || text == "0"),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

/// Returns true when the value is considered empty.
///
/// Emptiness and falsiness coincide for JSON values.
#[must_use]
pub fn is_empty(value: &Value) -> bool {
    !is_truthy(value)
}

/// Numeric zero (integer or float, either sign) is falsy.
fn number_is_truthy(number: &Number) -> bool {
    if let Some(signed) = number.as_i64() {
        return signed != 0;
    }
    if let Some(unsigned) = number.as_u64() {
        return unsigned != 0;
    }
    number.as_f64().is_some_and(|float| float != 0.0)
}
