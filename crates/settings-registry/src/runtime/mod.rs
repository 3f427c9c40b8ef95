// crates/settings-registry/src/runtime/mod.rs
// ============================================================================
// Module: Settings Registry Runtime
// Description: Registry storage, read/write pipelines, and dependency gating.
// Purpose: Mediate every setting access through its bound observer.
// Dependencies: crate::{audit, core, interfaces}, dependency-logic
// ============================================================================

//! ## Overview
//! The runtime owns the [`SettingsRegistry`]. Reads run the full observer
//! pipeline and gate the result on the observer's dependency tree; writes
//! validate and sanitize but never consult dependencies.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod error;
pub mod options;
pub mod registry;
pub mod resolver;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use error::RegistryError;
pub use options::DEFAULT_MAX_DEPENDENCY_DEPTH;
pub use options::RegistryOptions;
pub use registry::SettingsRegistry;
pub use resolver::RegistryConditionResolver;
