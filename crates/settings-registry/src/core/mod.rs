// crates/settings-registry/src/core/mod.rs
// ============================================================================
// Module: Settings Registry Core Types
// Description: Identifiers, setting references, and raw storage aliases.
// Purpose: Provide the vocabulary shared by observers, registry, and audit.
// Dependencies: crate::core::identifiers
// ============================================================================

//! ## Overview
//! Core types are plain data: opaque string identifiers for contexts,
//! settings, and resources, plus the [`SettingRef`] used as the target of
//! dependency conditions.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod identifiers;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use identifiers::CONTEXT_APP;
pub use identifiers::ContextId;
pub use identifiers::ResourceId;
pub use identifiers::ResourceMap;
pub use identifiers::SettingDependency;
pub use identifiers::SettingDependencyBuilder;
pub use identifiers::SettingId;
pub use identifiers::SettingRef;
pub use identifiers::SettingsMap;
