// crates/settings-registry/src/runtime/options.rs
// ============================================================================
// Module: Registry Options
// Description: Runtime limits and audit behavior for a registry instance.
// Purpose: Keep tunables in one plain value type.
// Dependencies: none
// ============================================================================

//! ## Overview
//! [`RegistryOptions`] is fixed at construction time. The configuration crate
//! builds it from TOML; tests construct it directly.

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default maximum depth of a dependency tree (root group alone is depth 1).
pub const DEFAULT_MAX_DEPENDENCY_DEPTH: usize = 32;

// ============================================================================
// SECTION: Options
// ============================================================================

/// Registry tunables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegistryOptions {
    /// Dependency trees deeper than this are rejected at read time.
    pub max_dependency_depth: usize,
    /// Include setting values in audit events.
    pub audit_values: bool,
}

impl Default for RegistryOptions {
    fn default() -> Self {
        Self {
            max_dependency_depth: DEFAULT_MAX_DEPENDENCY_DEPTH,
            audit_values: false,
        }
    }
}
