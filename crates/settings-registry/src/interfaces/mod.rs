// crates/settings-registry/src/interfaces/mod.rs
// ============================================================================
// Module: Settings Registry Interfaces
// Description: Observer contracts bound to settings and resource properties.
// Purpose: Define the hooks the registry invokes on every read and write.
// Dependencies: crate::core, crate::runtime, serde_json, thiserror
// ============================================================================

//! ## Overview
//! Every setting is bound to exactly one observer. The registry calls the
//! observer's hooks in a fixed order:
//!
//! - read: `on_before_get`, `default_value` (when nothing is stored),
//!   `validate`, `on_get`, `sanitize`, `dependencies`, `on_get_filter`
//! - write: `validate`, `on_save`, `sanitize`
//!
//! [`PropertyObserver`] mirrors [`SettingObserver`] with an extra
//! [`ResourceId`] on every call. Hook failures are returned as
//! [`ObserverError`] and surface unchanged from `get` and `save`.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::error::Error as StdError;
use std::rc::Rc;

use serde_json::Value;
use thiserror::Error;

use crate::core::ResourceId;
use crate::core::SettingDependency;
use crate::runtime::SettingsRegistry;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Failure raised inside an observer hook.
///
/// Displays exactly as the wrapped error so callers see the hook's own
/// message.
#[derive(Debug, Error)]
#[error(transparent)]
pub struct ObserverError(Box<dyn StdError + Send + Sync + 'static>);

impl ObserverError {
    /// Wraps an arbitrary error raised by a hook.
    #[must_use]
    pub fn new(error: impl Into<Box<dyn StdError + Send + Sync + 'static>>) -> Self {
        Self(error.into())
    }

    /// Creates an error from a plain message.
    #[must_use]
    pub fn message(message: impl Into<String>) -> Self {
        let message: String = message.into();
        Self(message.into())
    }

    /// Returns the wrapped error.
    #[must_use]
    pub fn into_inner(self) -> Box<dyn StdError + Send + Sync + 'static> {
        self.0
    }
}

// ============================================================================
// SECTION: Setting Observer
// ============================================================================

/// Observer bound to one setting in one context.
pub trait SettingObserver {
    /// Returns true when `value` is acceptable for this setting.
    fn validate(&self, value: &Value) -> bool;

    /// Returns the value used when nothing is stored.
    fn default_value(&self) -> Value;

    /// Normalizes a validated value. Must be pure.
    fn sanitize(&self, value: Value) -> Value {
        value
    }

    /// Called with the validated value before it is stored.
    ///
    /// # Errors
    ///
    /// Returns [`ObserverError`] to abort the save.
    fn on_save(&self, _value: &Value) -> Result<(), ObserverError> {
        Ok(())
    }

    /// Called with the validated value on every read.
    ///
    /// # Errors
    ///
    /// Returns [`ObserverError`] to abort the read.
    fn on_get(&self, _value: &Value) -> Result<(), ObserverError> {
        Ok(())
    }

    /// Called first on every read. The hook may mutate `registry`, including
    /// the value about to be read.
    ///
    /// # Errors
    ///
    /// Returns [`ObserverError`] to abort the read.
    fn on_before_get(&self, _registry: &SettingsRegistry) -> Result<(), ObserverError> {
        Ok(())
    }

    /// Final transform of a read. Runs even when dependencies gated the value.
    ///
    /// # Errors
    ///
    /// Returns [`ObserverError`] to abort the read.
    fn on_get_filter(&self, value: Option<Value>) -> Result<Option<Value>, ObserverError> {
        Ok(value)
    }

    /// Declares the conditions gating this setting on read.
    fn dependencies(&self) -> Option<SettingDependency> {
        None
    }
}

impl<O: SettingObserver + ?Sized> SettingObserver for Rc<O> {
    fn validate(&self, value: &Value) -> bool {
        (**self).validate(value)
    }

    fn default_value(&self) -> Value {
        (**self).default_value()
    }

    fn sanitize(&self, value: Value) -> Value {
        (**self).sanitize(value)
    }

    fn on_save(&self, value: &Value) -> Result<(), ObserverError> {
        (**self).on_save(value)
    }

    fn on_get(&self, value: &Value) -> Result<(), ObserverError> {
        (**self).on_get(value)
    }

    fn on_before_get(&self, registry: &SettingsRegistry) -> Result<(), ObserverError> {
        (**self).on_before_get(registry)
    }

    fn on_get_filter(&self, value: Option<Value>) -> Result<Option<Value>, ObserverError> {
        (**self).on_get_filter(value)
    }

    fn dependencies(&self) -> Option<SettingDependency> {
        (**self).dependencies()
    }
}

// ============================================================================
// SECTION: Property Observer
// ============================================================================

/// Observer bound to one property name in one context, shared by every
/// resource of that context.
pub trait PropertyObserver {
    /// Returns true when `value` is acceptable for this property.
    fn validate(&self, value: &Value, resource: &ResourceId) -> bool;

    /// Returns the value used when the resource stores nothing.
    fn default_value(&self, resource: &ResourceId) -> Value;

    /// Normalizes a validated value. Must be pure.
    fn sanitize(&self, value: Value, _resource: &ResourceId) -> Value {
        value
    }

    /// Called with the validated value before it is stored.
    ///
    /// # Errors
    ///
    /// Returns [`ObserverError`] to abort the save.
    fn on_save(&self, _value: &Value, _resource: &ResourceId) -> Result<(), ObserverError> {
        Ok(())
    }

    /// Called with the validated value on every read.
    ///
    /// # Errors
    ///
    /// Returns [`ObserverError`] to abort the read.
    fn on_get(&self, _value: &Value, _resource: &ResourceId) -> Result<(), ObserverError> {
        Ok(())
    }

    /// Called first on every read; may mutate `registry`.
    ///
    /// # Errors
    ///
    /// Returns [`ObserverError`] to abort the read.
    fn on_before_get(
        &self,
        _registry: &SettingsRegistry,
        _resource: &ResourceId,
    ) -> Result<(), ObserverError> {
        Ok(())
    }

    /// Final transform of a read. Runs even when dependencies gated the value.
    ///
    /// # Errors
    ///
    /// Returns [`ObserverError`] to abort the read.
    fn on_get_filter(
        &self,
        _resource: &ResourceId,
        value: Option<Value>,
    ) -> Result<Option<Value>, ObserverError> {
        Ok(value)
    }

    /// Declares the conditions gating this property on read.
    fn dependencies(&self, _resource: &ResourceId) -> Option<SettingDependency> {
        None
    }
}

impl<O: PropertyObserver + ?Sized> PropertyObserver for Rc<O> {
    fn validate(&self, value: &Value, resource: &ResourceId) -> bool {
        (**self).validate(value, resource)
    }

    fn default_value(&self, resource: &ResourceId) -> Value {
        (**self).default_value(resource)
    }

    fn sanitize(&self, value: Value, resource: &ResourceId) -> Value {
        (**self).sanitize(value, resource)
    }

    fn on_save(&self, value: &Value, resource: &ResourceId) -> Result<(), ObserverError> {
        (**self).on_save(value, resource)
    }

    fn on_get(&self, value: &Value, resource: &ResourceId) -> Result<(), ObserverError> {
        (**self).on_get(value, resource)
    }

    fn on_before_get(
        &self,
        registry: &SettingsRegistry,
        resource: &ResourceId,
    ) -> Result<(), ObserverError> {
        (**self).on_before_get(registry, resource)
    }

    fn on_get_filter(
        &self,
        resource: &ResourceId,
        value: Option<Value>,
    ) -> Result<Option<Value>, ObserverError> {
        (**self).on_get_filter(resource, value)
    }

    fn dependencies(&self, resource: &ResourceId) -> Option<SettingDependency> {
        (**self).dependencies(resource)
    }
}
