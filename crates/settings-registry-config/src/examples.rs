// crates/settings-registry-config/src/examples.rs
// ============================================================================
// Module: Config Examples
// Description: Canonical example configuration payload.
// Purpose: Deterministic example for docs and tooling.
// Dependencies: std
// ============================================================================

//! ## Overview
//! Canonical example for registry configuration. Kept in sync with the
//! config model by the crate's tests.

/// Returns a canonical example `settings-registry.toml` configuration.
#[must_use]
pub fn config_toml_example() -> String {
    String::from(
        r#"[limits]
max_dependency_depth = 32

[audit]
sink = "file"
path = "settings-registry-audit.jsonl"
log_values = false
"#,
    )
}
