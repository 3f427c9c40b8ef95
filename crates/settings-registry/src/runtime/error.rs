// crates/settings-registry/src/runtime/error.rs
// ============================================================================
// Module: Registry Errors
// Description: Failures surfaced by registry reads, writes, and registration.
// Purpose: Give every hard failure a typed variant with its identifiers.
// Dependencies: thiserror, serde_json
// ============================================================================

//! ## Overview
//! Every registry failure is fatal to the current call. Nothing is retried or
//! defaulted; observer failures pass through untouched.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde_json::Value;
use thiserror::Error;

use crate::core::ContextId;
use crate::core::ResourceId;
use crate::core::SettingId;
use crate::interfaces::ObserverError;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Registry failure.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// No observer is bound to the setting.
    #[error("{setting} is not a registered setting in context {context}")]
    UnregisteredSetting {
        /// Context searched.
        context: ContextId,
        /// Setting requested.
        setting: SettingId,
    },
    /// No property observer is bound to the property.
    #[error("{setting} is not a registered property in context {context}")]
    UnregisteredProperty {
        /// Context searched.
        context: ContextId,
        /// Property requested.
        setting: SettingId,
    },
    /// An observer is already bound to the setting.
    #[error("{setting} is already registered in context {context}")]
    AlreadyRegistered {
        /// Context of the existing binding.
        context: ContextId,
        /// Setting already bound.
        setting: SettingId,
    },
    /// A property observer is already bound to the property.
    #[error("property {setting} is already registered in context {context}")]
    PropertyAlreadyRegistered {
        /// Context of the existing binding.
        context: ContextId,
        /// Property already bound.
        setting: SettingId,
    },
    /// The observer rejected a stored, default, or submitted value.
    #[error("{setting} has an invalid value in context {context}: {value}")]
    InvalidValue {
        /// Context of the setting.
        context: ContextId,
        /// Setting whose value was rejected.
        setting: SettingId,
        /// Rejected value.
        value: Value,
    },
    /// The property observer rejected a value for one resource.
    #[error("{setting} has an invalid value for resource {resource} in context {context}: {value}")]
    InvalidPropertyValue {
        /// Context of the resource.
        context: ContextId,
        /// Resource holding the property.
        resource: ResourceId,
        /// Property whose value was rejected.
        setting: SettingId,
        /// Rejected value.
        value: Value,
    },
    /// A dependency tree exceeds the configured depth limit.
    #[error("dependencies of {setting} in context {context} are {depth} levels deep (max {max})")]
    DependencyTooDeep {
        /// Context of the gated setting.
        context: ContextId,
        /// Gated setting.
        setting: SettingId,
        /// Measured depth.
        depth: usize,
        /// Configured limit.
        max: usize,
    },
    /// An observer hook failed.
    #[error(transparent)]
    Observer(#[from] ObserverError),
}

impl RegistryError {
    /// Returns a stable label for the failure class.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::UnregisteredSetting { .. } => "unregistered_setting",
            Self::UnregisteredProperty { .. } => "unregistered_property",
            Self::AlreadyRegistered { .. } => "already_registered",
            Self::PropertyAlreadyRegistered { .. } => "property_already_registered",
            Self::InvalidValue { .. } => "invalid_value",
            Self::InvalidPropertyValue { .. } => "invalid_property_value",
            Self::DependencyTooDeep { .. } => "dependency_too_deep",
            Self::Observer(_) => "observer",
        }
    }
}
