// crates/dependency-logic/src/tree.rs
// ============================================================================
// Module: Dependency Tree
// Description: Arena-backed AND/OR groups of conditions and subgroups.
// Purpose: Hold frozen dependency declarations for evaluation.
// Dependencies: serde, smallvec, crate::{builder, condition}
// ============================================================================

//! ## Overview
//! A [`Dependency`] stores its groups in an arena. The root group sits at
//! [`GroupIndex::ROOT`]; subgroups follow in the order they were opened, and
//! parents always precede their children, so the tree is acyclic by
//! construction. Nothing outside the builder can mutate a frozen tree.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Serialize;
use smallvec::SmallVec;

use crate::builder::DependencyBuilder;
use crate::condition::Condition;
use crate::error::DependencyBuildError;

// ============================================================================
// SECTION: Group Logic
// ============================================================================

/// Boolean combinator applied to a group's children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum GroupLogic {
    /// Every child must pass.
    And,
    /// At least one child must pass.
    Or,
}

impl GroupLogic {
    /// Returns the accumulator seed: `true` for AND, `false` for OR.
    #[must_use]
    pub const fn seed(self) -> bool {
        matches!(self, Self::And)
    }

    /// Folds one child outcome into the accumulator.
    ///
    /// A failing child latches AND to `false`; a passing child latches OR to
    /// `true`. Neither ever flips back.
    #[must_use]
    pub const fn fold(self, accumulated: bool, outcome: bool) -> bool {
        match self {
            Self::And => accumulated && outcome,
            Self::Or => accumulated || outcome,
        }
    }

    /// Returns the canonical label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::And => "AND",
            Self::Or => "OR",
        }
    }
}

impl fmt::Display for GroupLogic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// SECTION: Arena Index
// ============================================================================

/// Position of a group inside its dependency arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct GroupIndex(usize);

impl GroupIndex {
    /// Index of the root group.
    pub const ROOT: Self = Self(0);

    /// Creates an index from a raw arena position.
    pub(crate) const fn new(raw: usize) -> Self {
        Self(raw)
    }

    /// Returns the raw arena position.
    #[must_use]
    pub const fn get(self) -> usize {
        self.0
    }

    /// Returns true for the root group.
    #[must_use]
    pub const fn is_root(self) -> bool {
        self.0 == 0
    }
}

// ============================================================================
// SECTION: Nodes and Groups
// ============================================================================

/// One child of a group.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DependencyNode<T> {
    /// A single comparison.
    Condition(Condition<T>),
    /// A nested subgroup, referenced by arena index.
    Group(GroupIndex),
}

/// A group of children combined with one [`GroupLogic`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DependencyGroup<T> {
    /// Logic fixed by the first `and`/`or` style call, if any.
    logic: Option<GroupLogic>,
    /// Children in attachment order.
    children: SmallVec<[DependencyNode<T>; 4]>,
    /// Enclosing group; `None` only for the root.
    parent: Option<GroupIndex>,
}

impl<T> DependencyGroup<T> {
    /// Creates an empty group with unset logic.
    pub(crate) fn new(parent: Option<GroupIndex>) -> Self {
        Self {
            logic: None,
            children: SmallVec::new(),
            parent,
        }
    }

    /// Returns the effective logic; an unset group behaves as AND.
    #[must_use]
    pub fn logic(&self) -> GroupLogic {
        self.logic.unwrap_or(GroupLogic::And)
    }

    /// Returns the logic exactly as declared, `None` when never fixed.
    #[must_use]
    pub const fn declared_logic(&self) -> Option<GroupLogic> {
        self.logic
    }

    /// Returns the children in attachment order.
    #[must_use]
    pub fn children(&self) -> &[DependencyNode<T>] {
        &self.children
    }

    /// Returns the enclosing group.
    #[must_use]
    pub const fn parent(&self) -> Option<GroupIndex> {
        self.parent
    }

    /// Returns true when the group has no children.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Fixes the logic on first use and rejects the opposite logic afterwards.
    pub(crate) fn fix_logic(&mut self, requested: GroupLogic) -> Result<(), DependencyBuildError> {
        match self.logic {
            None => {
                self.logic = Some(requested);
                Ok(())
            }
            Some(fixed) if fixed == requested => Ok(()),
            Some(fixed) => Err(DependencyBuildError::MixedGroupLogic {
                requested,
                fixed,
            }),
        }
    }

    /// Appends a child.
    pub(crate) fn push(&mut self, node: DependencyNode<T>) {
        self.children.push(node);
    }
}

// ============================================================================
// SECTION: Frozen Dependency
// ============================================================================

/// Immutable dependency tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dependency<T> {
    /// Root group.
    root: DependencyGroup<T>,
    /// Subgroups; arena index `n` lives at position `n - 1`.
    subgroups: Vec<DependencyGroup<T>>,
}

impl<T> Dependency<T> {
    /// Starts a new builder.
    #[must_use]
    pub fn builder() -> DependencyBuilder<T> {
        DependencyBuilder::new()
    }

    /// Freezes builder output.
    pub(crate) const fn from_parts(
        root: DependencyGroup<T>,
        subgroups: Vec<DependencyGroup<T>>,
    ) -> Self {
        Self {
            root,
            subgroups,
        }
    }

    /// Returns the root group.
    #[must_use]
    pub const fn root(&self) -> &DependencyGroup<T> {
        &self.root
    }

    /// Looks up a group by arena index.
    #[must_use]
    pub fn group(&self, index: GroupIndex) -> Option<&DependencyGroup<T>> {
        if index.is_root() {
            return Some(&self.root);
        }
        self.subgroups.get(index.get() - 1)
    }

    /// Iterates every group with its arena index, root first.
    pub fn groups(&self) -> impl Iterator<Item = (GroupIndex, &DependencyGroup<T>)> {
        std::iter::once(&self.root)
            .chain(self.subgroups.iter())
            .enumerate()
            .map(|(raw, group)| (GroupIndex::new(raw), group))
    }

    /// Returns the nesting depth; a tree with only a root group has depth 1.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.groups().map(|(_, group)| 1 + self.ancestors(group)).max().unwrap_or(1)
    }

    /// Counts conditions across all groups.
    #[must_use]
    pub fn condition_count(&self) -> usize {
        self.conditions().count()
    }

    /// Iterates all conditions in arena order.
    pub fn conditions(&self) -> impl Iterator<Item = &Condition<T>> {
        self.groups().flat_map(|(_, group)| {
            group.children().iter().filter_map(|node| match node {
                DependencyNode::Condition(condition) => Some(condition),
                DependencyNode::Group(_) => None,
            })
        })
    }

    /// Counts the ancestors of a group.
    fn ancestors(&self, group: &DependencyGroup<T>) -> usize {
        let mut count = 0;
        let mut cursor = group.parent();
        while let Some(index) = cursor {
            count += 1;
            cursor = self.group(index).and_then(DependencyGroup::parent);
        }
        count
    }
}
