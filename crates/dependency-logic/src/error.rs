// crates/dependency-logic/src/error.rs
// ============================================================================
// Module: Dependency Build Errors
// Description: Failures raised while assembling a dependency tree.
// Purpose: Surface builder misuse at build time rather than at evaluation.
// Dependencies: thiserror
// ============================================================================

//! ## Overview
//! Builder misuse is always fatal to the current chain. Mixing AND and OR on a
//! single group, closing a group that was never opened, or freezing a tree with
//! open subgroups each map to a distinct variant.

use thiserror::Error;

use crate::tree::GroupLogic;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised by [`crate::DependencyBuilder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DependencyBuildError {
    /// A group already fixed to one logic was asked to use the other.
    #[error("called {requested} on a group whose logic is already {fixed}")]
    MixedGroupLogic {
        /// Logic requested by the failing call.
        requested: GroupLogic,
        /// Logic the group was fixed to earlier.
        fixed: GroupLogic,
    },

    /// `end_group` was called while the builder sat on the root group.
    #[error("called end_group without an open group")]
    NoOpenGroup,

    /// `build` was called while subgroups were still open.
    #[error("cannot build a dependency with {open} unclosed group(s)")]
    UnclosedGroup {
        /// Number of groups still open.
        open: usize,
    },
}
