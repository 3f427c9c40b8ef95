// crates/settings-registry/src/core/identifiers.rs
// ============================================================================
// Module: Settings Registry Identifiers
// Description: Opaque identifiers for contexts, settings, and resources.
// Purpose: Provide strongly typed, serializable IDs with stable string forms.
// Dependencies: dependency-logic, serde, serde_json
// ============================================================================

//! ## Overview
//! Identifiers are opaque and serialize as strings. Settings are partitioned
//! by [`ContextId`]; there is no implicit lookup across contexts. A
//! [`SettingRef`] names one setting inside one context and is the target type
//! of every dependency condition.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::fmt;

use dependency_logic::Dependency;
use dependency_logic::DependencyBuilder;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Name of the default context.
pub const CONTEXT_APP: &str = "app";

// ============================================================================
// SECTION: Identifier Types
// ============================================================================

/// Namespace partitioning settings and resources.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContextId(String);

impl ContextId {
    /// Creates a new context identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the default application context.
    #[must_use]
    pub fn app() -> Self {
        Self::new(CONTEXT_APP)
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ContextId {
    fn default() -> Self {
        Self::app()
    }
}

impl fmt::Display for ContextId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for ContextId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ContextId {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<&ContextId> for ContextId {
    fn from(value: &ContextId) -> Self {
        value.clone()
    }
}

/// Setting identifier, unique within a context.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SettingId(String);

impl SettingId {
    /// Creates a new setting identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SettingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for SettingId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for SettingId {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<&SettingId> for SettingId {
    fn from(value: &SettingId) -> Self {
        value.clone()
    }
}

/// Resource identifier, unique within a context.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceId(String);

impl ResourceId {
    /// Creates a new resource identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for ResourceId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ResourceId {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<&ResourceId> for ResourceId {
    fn from(value: &ResourceId) -> Self {
        value.clone()
    }
}

// ============================================================================
// SECTION: Setting References
// ============================================================================

/// A setting inside a context.
///
/// Converting from a bare string targets the `app` context; a
/// `(setting, context)` tuple targets the named context.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SettingRef {
    /// Context holding the setting.
    pub context: ContextId,
    /// Setting identifier.
    pub setting: SettingId,
}

impl SettingRef {
    /// Creates a reference to `setting` in `context`.
    #[must_use]
    pub fn new(setting: impl Into<SettingId>, context: impl Into<ContextId>) -> Self {
        Self {
            context: context.into(),
            setting: setting.into(),
        }
    }

    /// Creates a reference to `setting` in the `app` context.
    #[must_use]
    pub fn app(setting: impl Into<SettingId>) -> Self {
        Self::new(setting, ContextId::app())
    }
}

impl fmt::Display for SettingRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.context, self.setting)
    }
}

impl From<&str> for SettingRef {
    fn from(setting: &str) -> Self {
        Self::app(setting)
    }
}

impl From<String> for SettingRef {
    fn from(setting: String) -> Self {
        Self::app(setting)
    }
}

impl From<(&str, &str)> for SettingRef {
    fn from((setting, context): (&str, &str)) -> Self {
        Self::new(setting, context)
    }
}

impl From<(SettingId, ContextId)> for SettingRef {
    fn from((setting, context): (SettingId, ContextId)) -> Self {
        Self::new(setting, context)
    }
}

// ============================================================================
// SECTION: Aliases
// ============================================================================

/// Raw values of one context (or one resource), keyed by setting.
pub type SettingsMap = BTreeMap<SettingId, Value>;

/// Raw property maps of one context, keyed by resource.
pub type ResourceMap = BTreeMap<ResourceId, SettingsMap>;

/// Dependency tree whose conditions target settings.
pub type SettingDependency = Dependency<SettingRef>;

/// Builder for [`SettingDependency`].
pub type SettingDependencyBuilder = DependencyBuilder<SettingRef>;
