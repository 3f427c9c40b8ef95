// crates/dependency-logic/src/lib.rs
// ============================================================================
// Module: Dependency Logic Root
// Description: Public API surface for declarative dependency trees.
// Purpose: Wire together the tree, builder, comparison, and evaluator modules.
// Dependencies: crate::{builder, condition, error, evaluate, tree, value}
// ============================================================================

//! ## Overview
//! Dependency trees gate a value on the state of other values. A tree is a set
//! of AND/OR groups stored in an arena; each group holds ordered conditions and
//! nested subgroups. Trees are assembled with a fail-fast fluent builder,
//! frozen, and then evaluated lazily against a [`ConditionResolver`] supplied
//! by the caller. The crate is agnostic to what a condition targets.

// ============================================================================
// SECTION: Core Modules
// ============================================================================

pub mod builder;
pub mod condition;
pub mod error;
pub mod evaluate;
pub mod tree;
pub mod value;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use builder::ConditionBuilder;
pub use builder::DependencyBuilder;
pub use condition::Comparison;
pub use condition::Condition;
pub use condition::ConditionOperator;
pub use error::DependencyBuildError;
pub use evaluate::ConditionResolver;
pub use evaluate::resolve_dependencies;
pub use tree::Dependency;
pub use tree::DependencyGroup;
pub use tree::DependencyNode;
pub use tree::GroupIndex;
pub use tree::GroupLogic;
pub use value::is_empty;
pub use value::is_truthy;
