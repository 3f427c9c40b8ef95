// crates/settings-registry/src/lib.rs
// ============================================================================
// Module: Settings Registry Root
// Description: Public API surface for the runtime settings registry.
// Purpose: Wire together identifiers, observer contracts, runtime, and audit.
// Dependencies: crate::{audit, core, interfaces, runtime}, dependency-logic
// ============================================================================

//! ## Overview
//! A runtime settings registry. Values are stored per context (and per
//! resource for properties), mediated by caller-supplied observers, and gated
//! on read by declarative AND/OR dependency trees evaluated against other
//! settings' current values.
//!
//! Dependency trees are built with [`SettingDependency::builder`]:
//!
//! ```
//! use settings_registry::SettingDependency;
//!
//! let dependency = SettingDependency::builder()
//!     .on("mode")
//!     .being_in(["fast", "turbo"])
//!     .and_group()?
//!     .on(("enabled", "features"))
//!     .being_truthy()
//!     .or("override")?
//!     .being_not_empty()
//!     .end_group()?
//!     .build()?;
//! assert_eq!(dependency.depth(), 2);
//! # Ok::<(), settings_registry::DependencyBuildError>(())
//! ```

// ============================================================================
// SECTION: Core Modules
// ============================================================================

pub mod audit;
pub mod core;
pub mod interfaces;
pub mod runtime;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use audit::FileAuditSink;
pub use audit::InMemoryAuditSink;
pub use audit::NoopAuditSink;
pub use audit::RegistryAction;
pub use audit::RegistryAuditEvent;
pub use audit::RegistryAuditSink;
pub use audit::RegistryOutcome;
pub use audit::StderrAuditSink;
pub use crate::core::CONTEXT_APP;
pub use crate::core::ContextId;
pub use crate::core::ResourceId;
pub use crate::core::ResourceMap;
pub use crate::core::SettingDependency;
pub use crate::core::SettingDependencyBuilder;
pub use crate::core::SettingId;
pub use crate::core::SettingRef;
pub use crate::core::SettingsMap;
pub use dependency_logic::Comparison;
pub use dependency_logic::ConditionOperator;
pub use dependency_logic::DependencyBuildError;
pub use dependency_logic::GroupLogic;
pub use interfaces::ObserverError;
pub use interfaces::PropertyObserver;
pub use interfaces::SettingObserver;
pub use runtime::DEFAULT_MAX_DEPENDENCY_DEPTH;
pub use runtime::RegistryConditionResolver;
pub use runtime::RegistryError;
pub use runtime::RegistryOptions;
pub use runtime::SettingsRegistry;
