// crates/dependency-logic/src/evaluate.rs
// ============================================================================
// Module: Dependency Evaluation
// Description: Lazy evaluation of dependency trees against resolved values.
// Purpose: Decide whether a gated value is returned or withheld.
// Dependencies: serde_json, crate::{condition, tree}
// ============================================================================

//! ## Overview
//! Evaluation walks every child of every reachable group. It does not
//! short-circuit: once a group's outcome is decided the remaining children are
//! still resolved, so resolver failures (unknown targets, invalid values)
//! surface regardless of child order. Only the boolean accumulation latches.
//!
//! Subgroups gate the same outer value as their parent; a subgroup counts as
//! a passing child when its own accumulation ends `true`.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde_json::Value;

use crate::tree::Dependency;
use crate::tree::DependencyGroup;
use crate::tree::DependencyNode;

// ============================================================================
// SECTION: Resolver Contract
// ============================================================================

/// Resolves a condition target to the value its comparison runs against.
pub trait ConditionResolver<T> {
    /// Error raised when a target cannot be resolved.
    type Error;

    /// Returns the current value of `target`.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] when the target is unknown or its value is
    /// unusable.
    fn resolve(&self, target: &T) -> Result<Value, Self::Error>;
}

impl<T, E, F> ConditionResolver<T> for F
where
    F: Fn(&T) -> Result<Value, E>,
{
    type Error = E;

    fn resolve(&self, target: &T) -> Result<Value, E> {
        self(target)
    }
}

// ============================================================================
// SECTION: Evaluation
// ============================================================================

impl<T> Dependency<T> {
    /// Evaluates the tree, returning the root group's outcome.
    ///
    /// # Errors
    ///
    /// Propagates the first resolver failure encountered in child order.
    pub fn evaluate<R>(&self, resolver: &R) -> Result<bool, R::Error>
    where
        R: ConditionResolver<T> + ?Sized,
    {
        self.evaluate_group(self.root(), resolver)
    }

    /// Returns `Some(value)` when the tree passes and `None` otherwise.
    ///
    /// # Errors
    ///
    /// Propagates resolver failures.
    pub fn gate<R>(&self, value: Value, resolver: &R) -> Result<Option<Value>, R::Error>
    where
        R: ConditionResolver<T> + ?Sized,
    {
        Ok(self.evaluate(resolver)?.then_some(value))
    }

    /// Folds every child of `group` under the group's logic.
    fn evaluate_group<R>(&self, group: &DependencyGroup<T>, resolver: &R) -> Result<bool, R::Error>
    where
        R: ConditionResolver<T> + ?Sized,
    {
        let logic = group.logic();
        let mut pass = logic.seed();
        for child in group.children() {
            let outcome = match child {
                DependencyNode::Condition(condition) => {
                    let value = resolver.resolve(condition.target())?;
                    condition.verify(&value)
                }
                DependencyNode::Group(index) => match self.group(*index) {
                    Some(subgroup) => self.evaluate_group(subgroup, resolver)?,
                    None => false,
                },
            };
            pass = logic.fold(pass, outcome);
        }
        Ok(pass)
    }
}

/// Gates `value` behind an optional dependency.
///
/// With no dependency the value passes through unchanged.
///
/// # Errors
///
/// Propagates resolver failures.
pub fn resolve_dependencies<T, R>(
    value: Value,
    dependency: Option<&Dependency<T>>,
    resolver: &R,
) -> Result<Option<Value>, R::Error>
where
    R: ConditionResolver<T> + ?Sized,
{
    match dependency {
        None => Ok(Some(value)),
        Some(dependency) => dependency.gate(value, resolver),
    }
}
