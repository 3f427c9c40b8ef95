// crates/dependency-logic/src/builder.rs
// ============================================================================
// Module: Dependency Builders
// Description: Fluent, order-sensitive construction of dependency trees.
// Purpose: Fail fast on AND/OR mixing and unbalanced group nesting.
// Dependencies: serde_json, crate::{condition, error, tree}
// ============================================================================

//! ## Overview
//! [`DependencyBuilder`] owns the root group and a stack of open subgroups.
//! The innermost open subgroup, or the root when none is open, receives new
//! children. `on`, `and`, and `or` hand out a [`ConditionBuilder`]; only a
//! terminal comparator (`being_*`) attaches the condition and hands the
//! builder back. `and_group`/`or_group` push a fresh subgroup and `end_group`
//! pops it and attaches it to its parent.
//!
//! ```
//! use dependency_logic::Dependency;
//! use serde_json::json;
//!
//! # fn main() -> Result<(), dependency_logic::DependencyBuildError> {
//! let dependency: Dependency<&str> = Dependency::builder()
//!     .on("mode")
//!     .being_in([json!("fast"), json!("safe")])
//!     .and_group()?
//!     .on("region")
//!     .being_equal_to("eu")
//!     .or("region")?
//!     .being_equal_to("us")
//!     .end_group()?
//!     .build()?;
//! assert_eq!(dependency.depth(), 2);
//! # Ok(())
//! # }
//! ```

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde_json::Value;

use crate::condition::Comparison;
use crate::condition::Condition;
use crate::error::DependencyBuildError;
use crate::tree::Dependency;
use crate::tree::DependencyGroup;
use crate::tree::DependencyNode;
use crate::tree::GroupIndex;
use crate::tree::GroupLogic;

// ============================================================================
// SECTION: Dependency Builder
// ============================================================================

/// Builder for a [`Dependency`] tree.
///
/// # Type Parameter
/// * `T` - The condition target type
#[derive(Debug, Clone)]
#[must_use]
pub struct DependencyBuilder<T> {
    /// Root group under construction.
    root: DependencyGroup<T>,
    /// Open subgroups with their arena indices, innermost last.
    open: Vec<(GroupIndex, DependencyGroup<T>)>,
    /// Closed subgroups with their arena indices, in closing order.
    closed: Vec<(GroupIndex, DependencyGroup<T>)>,
}

impl<T> DependencyBuilder<T> {
    /// Creates a builder positioned on an empty root group.
    pub fn new() -> Self {
        Self {
            root: DependencyGroup::new(None),
            open: Vec::new(),
            closed: Vec::new(),
        }
    }

    /// Starts a condition on the current group without fixing its logic.
    pub fn on(self, target: impl Into<T>) -> ConditionBuilder<T> {
        ConditionBuilder {
            builder: self,
            target: target.into(),
        }
    }

    /// Starts a condition and fixes the current group to AND.
    ///
    /// # Errors
    ///
    /// Returns [`DependencyBuildError::MixedGroupLogic`] when the group is
    /// already fixed to OR.
    pub fn and(
        mut self,
        target: impl Into<T>,
    ) -> Result<ConditionBuilder<T>, DependencyBuildError> {
        self.current_mut().fix_logic(GroupLogic::And)?;
        Ok(self.on(target))
    }

    /// Starts a condition and fixes the current group to OR.
    ///
    /// # Errors
    ///
    /// Returns [`DependencyBuildError::MixedGroupLogic`] when the group is
    /// already fixed to AND.
    pub fn or(
        mut self,
        target: impl Into<T>,
    ) -> Result<ConditionBuilder<T>, DependencyBuildError> {
        self.current_mut().fix_logic(GroupLogic::Or)?;
        Ok(self.on(target))
    }

    /// Fixes the current group to AND and opens a subgroup inside it.
    ///
    /// The subgroup's own logic starts unset.
    ///
    /// # Errors
    ///
    /// Returns [`DependencyBuildError::MixedGroupLogic`] when the current
    /// group is already fixed to OR.
    pub fn and_group(mut self) -> Result<Self, DependencyBuildError> {
        self.current_mut().fix_logic(GroupLogic::And)?;
        Ok(self.open_group())
    }

    /// Fixes the current group to OR and opens a subgroup inside it.
    ///
    /// # Errors
    ///
    /// Returns [`DependencyBuildError::MixedGroupLogic`] when the current
    /// group is already fixed to AND.
    pub fn or_group(mut self) -> Result<Self, DependencyBuildError> {
        self.current_mut().fix_logic(GroupLogic::Or)?;
        Ok(self.open_group())
    }

    /// Closes the current subgroup, appends it to its parent, and returns to
    /// the parent.
    ///
    /// # Errors
    ///
    /// Returns [`DependencyBuildError::NoOpenGroup`] on the root group.
    pub fn end_group(mut self) -> Result<Self, DependencyBuildError> {
        let Some((index, group)) = self.open.pop() else {
            return Err(DependencyBuildError::NoOpenGroup);
        };
        self.current_mut().push(DependencyNode::Group(index));
        self.closed.push((index, group));
        Ok(self)
    }

    /// Returns how many subgroups are currently open.
    #[must_use]
    pub fn open_groups(&self) -> usize {
        self.open.len()
    }

    /// Freezes the tree.
    ///
    /// # Errors
    ///
    /// Returns [`DependencyBuildError::UnclosedGroup`] when subgroups are
    /// still open.
    pub fn build(self) -> Result<Dependency<T>, DependencyBuildError> {
        let open = self.open_groups();
        if open > 0 {
            return Err(DependencyBuildError::UnclosedGroup {
                open,
            });
        }
        let mut closed = self.closed;
        closed.sort_unstable_by_key(|(index, _)| *index);
        let subgroups = closed.into_iter().map(|(_, group)| group).collect();
        Ok(Dependency::from_parts(self.root, subgroups))
    }

    /// Pushes a fresh subgroup under the current group.
    ///
    /// Arena indices follow opening order, so every subgroup's parent has a
    /// smaller index than the subgroup itself.
    fn open_group(mut self) -> Self {
        let index = GroupIndex::new(1 + self.open.len() + self.closed.len());
        let parent = self.open.last().map_or(GroupIndex::ROOT, |(parent, _)| *parent);
        self.open.push((index, DependencyGroup::new(Some(parent))));
        self
    }

    /// Attaches a finished condition to the current group.
    fn attach(mut self, condition: Condition<T>) -> Self {
        self.current_mut().push(DependencyNode::Condition(condition));
        self
    }

    /// Returns the innermost open subgroup, or the root when none is open.
    fn current_mut(&mut self) -> &mut DependencyGroup<T> {
        match self.open.last_mut() {
            Some((_, group)) => group,
            None => &mut self.root,
        }
    }
}

impl<T> Default for DependencyBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// SECTION: Condition Builder
// ============================================================================

/// A pending condition; attaches to its group only through a terminal
/// comparator.
#[derive(Debug, Clone)]
#[must_use]
pub struct ConditionBuilder<T> {
    /// Builder the condition returns to.
    builder: DependencyBuilder<T>,
    /// Target the condition will test.
    target: T,
}

impl<T> ConditionBuilder<T> {
    /// Returns the pending target.
    #[must_use]
    pub const fn target(&self) -> &T {
        &self.target
    }

    /// Discards the pending condition and returns the builder unchanged.
    pub fn cancel(self) -> DependencyBuilder<T> {
        self.builder
    }

    /// Requires the target to equal `value` (type and value).
    pub fn being_equal_to(self, value: impl Into<Value>) -> DependencyBuilder<T> {
        self.finish(Comparison::Equal(value.into()))
    }

    /// Requires the target to differ from `value`.
    pub fn being_not_equal_to(self, value: impl Into<Value>) -> DependencyBuilder<T> {
        self.finish(Comparison::NotEqual(value.into()))
    }

    /// Requires the target to be truthy.
    pub fn being_truthy(self) -> DependencyBuilder<T> {
        self.finish(Comparison::Truthy)
    }

    /// Requires the target to be falsy.
    pub fn being_falsy(self) -> DependencyBuilder<T> {
        self.finish(Comparison::Falsy)
    }

    /// Requires the target to be one of `values`.
    pub fn being_in<I, V>(self, values: I) -> DependencyBuilder<T>
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.finish(Comparison::In(values.into_iter().map(Into::into).collect()))
    }

    /// Requires the target to be none of `values`.
    pub fn being_not_in<I, V>(self, values: I) -> DependencyBuilder<T>
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.finish(Comparison::NotIn(values.into_iter().map(Into::into).collect()))
    }

    /// Requires the target to be empty.
    pub fn being_empty(self) -> DependencyBuilder<T> {
        self.finish(Comparison::Empty)
    }

    /// Requires the target to be non-empty.
    pub fn being_not_empty(self) -> DependencyBuilder<T> {
        self.finish(Comparison::NotEmpty)
    }

    /// Attaches the condition and hands the builder back.
    fn finish(self, comparison: Comparison) -> DependencyBuilder<T> {
        self.builder.attach(Condition::new(self.target, comparison))
    }
}
