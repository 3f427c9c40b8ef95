// crates/settings-registry/src/runtime/resolver.rs
// ============================================================================
// Module: Registry Condition Resolver
// Description: Resolves dependency condition targets against a registry.
// Purpose: Bridge dependency-logic evaluation to stored settings.
// Dependencies: dependency-logic, serde_json
// ============================================================================

//! ## Overview
//! A condition target resolves to the referenced setting's stored value, or
//! its default, checked by the setting's `validate` hook. No other hook runs
//! and the target's own dependencies are not evaluated.

// ============================================================================
// SECTION: Imports
// ============================================================================

use dependency_logic::ConditionResolver;
use serde_json::Value;

use crate::core::SettingRef;
use crate::runtime::RegistryError;
use crate::runtime::SettingsRegistry;

// ============================================================================
// SECTION: Resolver
// ============================================================================

/// Condition resolver backed by a [`SettingsRegistry`].
#[derive(Debug, Clone, Copy)]
pub struct RegistryConditionResolver<'a> {
    /// Registry holding the referenced settings.
    registry: &'a SettingsRegistry,
}

impl<'a> RegistryConditionResolver<'a> {
    /// Creates a resolver reading from `registry`.
    #[must_use]
    pub const fn new(registry: &'a SettingsRegistry) -> Self {
        Self {
            registry,
        }
    }
}

impl ConditionResolver<SettingRef> for RegistryConditionResolver<'_> {
    type Error = RegistryError;

    fn resolve(&self, target: &SettingRef) -> Result<Value, Self::Error> {
        self.registry.condition_value(target)
    }
}
