// crates/settings-registry/src/runtime/registry.rs
// ============================================================================
// Module: Settings Registry
// Description: Context-partitioned settings store mediated by observers.
// Purpose: Run the read and write pipelines and gate reads on dependencies.
// Dependencies: crate::{audit, core, interfaces}, dependency-logic, serde_json
// ============================================================================

//! ## Overview
//! [`SettingsRegistry`] stores raw values per context, and per resource for
//! properties. Every single-item access goes through the observer bound to
//! the setting:
//!
//! - `get`: `on_before_get`, stored value or default, `validate`, `on_get`,
//!   `sanitize`, dependency gating, `on_get_filter`.
//! - `save`: `validate`, `on_save`, store `sanitize(value)`. Dependencies are
//!   never evaluated on save.
//!
//! The registry is single-threaded and takes `&self` everywhere. Storage sits
//! behind a [`RefCell`] that is never borrowed across an observer call, so
//! hooks may re-enter the registry, including to rewrite the value being
//! read.
//!
//! A stored JSON `null` counts as "nothing stored" and falls back to the
//! observer's default.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::fmt;
use std::rc::Rc;

use serde_json::Value;

use crate::audit::NoopAuditSink;
use crate::audit::RegistryAction;
use crate::audit::RegistryAuditEvent;
use crate::audit::RegistryAuditEventParams;
use crate::audit::RegistryAuditSink;
use crate::audit::RegistryOutcome;
use crate::core::ContextId;
use crate::core::ResourceId;
use crate::core::ResourceMap;
use crate::core::SettingDependency;
use crate::core::SettingId;
use crate::core::SettingRef;
use crate::core::SettingsMap;
use crate::interfaces::PropertyObserver;
use crate::interfaces::SettingObserver;
use crate::runtime::RegistryConditionResolver;
use crate::runtime::RegistryError;
use crate::runtime::RegistryOptions;

// ============================================================================
// SECTION: State
// ============================================================================

/// Observer bindings of one kind, by context then setting.
type ObserverTable<O> = BTreeMap<ContextId, BTreeMap<SettingId, Rc<O>>>;

/// Mutable registry storage.
#[derive(Default)]
struct RegistryState {
    /// Raw setting values by context.
    settings: BTreeMap<ContextId, SettingsMap>,
    /// Raw property values by context then resource.
    resources: BTreeMap<ContextId, ResourceMap>,
    /// Setting observers.
    observers: ObserverTable<dyn SettingObserver>,
    /// Property observers.
    property_observers: ObserverTable<dyn PropertyObserver>,
}

/// Outcome of a read before the audit event is emitted.
struct ReadResult {
    /// Value returned to the caller.
    value: Option<Value>,
    /// Dependencies resolved the value to absent.
    gated: bool,
}

/// Identifiers attached to one audit event.
#[derive(Clone, Copy)]
struct AuditScope<'a> {
    /// Operation performed.
    action: RegistryAction,
    /// Context addressed.
    context: &'a ContextId,
    /// Setting addressed.
    setting: Option<&'a SettingId>,
    /// Resource addressed.
    resource: Option<&'a ResourceId>,
}

// ============================================================================
// SECTION: Registry
// ============================================================================

/// Runtime settings registry.
///
/// # Examples
///
/// ```
/// use serde_json::Value;
/// use serde_json::json;
/// use settings_registry::SettingObserver;
/// use settings_registry::SettingsRegistry;
///
/// struct Greeting;
///
/// impl SettingObserver for Greeting {
///     fn validate(&self, value: &Value) -> bool {
///         value.is_string()
///     }
///
///     fn default_value(&self) -> Value {
///         json!("hello")
///     }
/// }
///
/// let registry = SettingsRegistry::new();
/// registry.register_observer("greeting", Greeting, "app")?;
/// assert_eq!(registry.get("greeting", "app")?, Some(json!("hello")));
///
/// registry.save("greeting", json!("hi"), "app")?;
/// assert_eq!(registry.get("greeting", "app")?, Some(json!("hi")));
/// # Ok::<(), settings_registry::RegistryError>(())
/// ```
pub struct SettingsRegistry {
    /// Interior-mutable storage and bindings.
    state: RefCell<RegistryState>,
    /// Runtime limits and audit behavior.
    options: RegistryOptions,
    /// Destination of audit events.
    audit: Box<dyn RegistryAuditSink>,
}

impl SettingsRegistry {
    /// Creates an empty registry with default options.
    #[must_use]
    pub fn new() -> Self {
        Self::with_options(RegistryOptions::default())
    }

    /// Creates an empty registry with the given options.
    #[must_use]
    pub fn with_options(options: RegistryOptions) -> Self {
        let mut state = RegistryState::default();
        state.settings.insert(ContextId::app(), SettingsMap::new());
        Self {
            state: RefCell::new(state),
            options,
            audit: Box::new(NoopAuditSink),
        }
    }

    /// Creates a registry whose `app` context starts with `data`.
    #[must_use]
    pub fn with_app_settings<I, K>(data: I) -> Self
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<SettingId>,
    {
        let registry = Self::new();
        registry.replace_settings(ContextId::app(), collect_settings(data));
        registry
    }

    /// Routes audit events to `sink`.
    #[must_use]
    pub fn with_audit_sink(mut self, sink: impl RegistryAuditSink + 'static) -> Self {
        self.audit = Box::new(sink);
        self
    }

    /// Returns the options this registry was built with.
    #[must_use]
    pub const fn options(&self) -> &RegistryOptions {
        &self.options
    }

    // ------------------------------------------------------------------------
    // Bulk raw state
    // ------------------------------------------------------------------------

    /// Replaces every raw value of `context`. No observer is consulted.
    pub fn hydrate<I, K>(&self, data: I, context: impl Into<ContextId>)
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<SettingId>,
    {
        let context = context.into();
        self.replace_settings(context.clone(), collect_settings(data));
        self.record_ok(AuditScope {
            action: RegistryAction::Hydrate,
            context: &context,
            setting: None,
            resource: None,
        });
    }

    /// Replaces every raw property of one resource. No observer is consulted.
    pub fn hydrate_resource<I, K>(
        &self,
        data: I,
        context: impl Into<ContextId>,
        resource: impl Into<ResourceId>,
    ) where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<SettingId>,
    {
        let context = context.into();
        let resource = resource.into();
        self.state
            .borrow_mut()
            .resources
            .entry(context.clone())
            .or_default()
            .insert(resource.clone(), collect_settings(data));
        self.record_ok(AuditScope {
            action: RegistryAction::HydrateResource,
            context: &context,
            setting: None,
            resource: Some(&resource),
        });
    }

    /// Removes one resource and all of its properties.
    ///
    /// Returns true when the resource existed.
    pub fn drop_resource(
        &self,
        context: impl Into<ContextId>,
        resource: impl Into<ResourceId>,
    ) -> bool {
        let context = context.into();
        let resource = resource.into();
        let removed = self
            .state
            .borrow_mut()
            .resources
            .get_mut(&context)
            .and_then(|resources| resources.remove(&resource))
            .is_some();
        self.record_ok(AuditScope {
            action: RegistryAction::DropResource,
            context: &context,
            setting: None,
            resource: Some(&resource),
        });
        removed
    }

    /// Removes every resource of `context`.
    ///
    /// Returns the number of resources removed.
    pub fn drop_resources(&self, context: impl Into<ContextId>) -> usize {
        let context = context.into();
        let removed = self
            .state
            .borrow_mut()
            .resources
            .remove(&context)
            .map_or(0, |resources| resources.len());
        self.record_ok(AuditScope {
            action: RegistryAction::DropResources,
            context: &context,
            setting: None,
            resource: None,
        });
        removed
    }

    // ------------------------------------------------------------------------
    // Registration
    // ------------------------------------------------------------------------

    /// Binds `observer` to `setting` in `context`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::AlreadyRegistered`] when the setting is
    /// already bound in that context.
    pub fn register_observer(
        &self,
        setting: impl Into<SettingId>,
        observer: impl SettingObserver + 'static,
        context: impl Into<ContextId>,
    ) -> Result<(), RegistryError> {
        let setting = setting.into();
        let context = context.into();
        let result = {
            let mut state = self.state.borrow_mut();
            match state.observers.entry(context.clone()).or_default().entry(setting.clone()) {
                Entry::Occupied(_) => Err(RegistryError::AlreadyRegistered {
                    context: context.clone(),
                    setting: setting.clone(),
                }),
                Entry::Vacant(slot) => {
                    slot.insert(Rc::new(observer));
                    Ok(())
                }
            }
        };
        self.record_result(
            AuditScope {
                action: RegistryAction::RegisterObserver,
                context: &context,
                setting: Some(&setting),
                resource: None,
            },
            &result,
        );
        result
    }

    /// Binds `observer` to the property `setting` for every resource of
    /// `context`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::PropertyAlreadyRegistered`] when the property
    /// is already bound in that context.
    pub fn register_property_observer(
        &self,
        setting: impl Into<SettingId>,
        observer: impl PropertyObserver + 'static,
        context: impl Into<ContextId>,
    ) -> Result<(), RegistryError> {
        let setting = setting.into();
        let context = context.into();
        let result = {
            let mut state = self.state.borrow_mut();
            let observers = state.property_observers.entry(context.clone()).or_default();
            match observers.entry(setting.clone()) {
                Entry::Occupied(_) => Err(RegistryError::PropertyAlreadyRegistered {
                    context: context.clone(),
                    setting: setting.clone(),
                }),
                Entry::Vacant(slot) => {
                    slot.insert(Rc::new(observer));
                    Ok(())
                }
            }
        };
        self.record_result(
            AuditScope {
                action: RegistryAction::RegisterPropertyObserver,
                context: &context,
                setting: Some(&setting),
                resource: None,
            },
            &result,
        );
        result
    }

    // ------------------------------------------------------------------------
    // Single-item access
    // ------------------------------------------------------------------------

    /// Reads a setting through its observer.
    ///
    /// Returns `None` when the setting's dependencies are not satisfied, unless
    /// `on_get_filter` supplies a value.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] when the setting or a dependency target is
    /// unregistered, a value fails validation, the dependency tree is too
    /// deep, or a hook fails.
    pub fn get(
        &self,
        setting: impl Into<SettingId>,
        context: impl Into<ContextId>,
    ) -> Result<Option<Value>, RegistryError> {
        let setting = setting.into();
        let context = context.into();
        let result = self.read_setting(&context, &setting);
        self.record_read(
            AuditScope {
                action: RegistryAction::Get,
                context: &context,
                setting: Some(&setting),
                resource: None,
            },
            &result,
        );
        result.map(|read| read.value)
    }

    /// Reads one resource's property through its property observer.
    ///
    /// A missing resource behaves like a missing value.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] when the property or a dependency target is
    /// unregistered, a value fails validation, the dependency tree is too
    /// deep, or a hook fails.
    pub fn get_property(
        &self,
        setting: impl Into<SettingId>,
        context: impl Into<ContextId>,
        resource: impl Into<ResourceId>,
    ) -> Result<Option<Value>, RegistryError> {
        let setting = setting.into();
        let context = context.into();
        let resource = resource.into();
        let result = self.read_property(&context, &resource, &setting);
        self.record_read(
            AuditScope {
                action: RegistryAction::GetProperty,
                context: &context,
                setting: Some(&setting),
                resource: Some(&resource),
            },
            &result,
        );
        result.map(|read| read.value)
    }

    /// Validates and stores a setting value.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] when the setting is unregistered, the value
    /// fails validation, or `on_save` fails. Nothing is stored on error.
    pub fn save(
        &self,
        setting: impl Into<SettingId>,
        value: Value,
        context: impl Into<ContextId>,
    ) -> Result<(), RegistryError> {
        let setting = setting.into();
        let context = context.into();
        let result = self.write_setting(&context, &setting, value);
        self.record_write(
            AuditScope {
                action: RegistryAction::Save,
                context: &context,
                setting: Some(&setting),
                resource: None,
            },
            &result,
        );
        result.map(|_| ())
    }

    /// Validates and stores one resource's property value.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] when the property is unregistered, the value
    /// fails validation, or `on_save` fails. Nothing is stored on error.
    pub fn save_property(
        &self,
        setting: impl Into<SettingId>,
        value: Value,
        context: impl Into<ContextId>,
        resource: impl Into<ResourceId>,
    ) -> Result<(), RegistryError> {
        let setting = setting.into();
        let context = context.into();
        let resource = resource.into();
        let result = self.write_property(&context, &resource, &setting, value);
        self.record_write(
            AuditScope {
                action: RegistryAction::SaveProperty,
                context: &context,
                setting: Some(&setting),
                resource: Some(&resource),
            },
            &result,
        );
        result.map(|_| ())
    }

    // ------------------------------------------------------------------------
    // Bulk views
    // ------------------------------------------------------------------------

    /// Reads every registered setting of `context` through [`Self::get`].
    ///
    /// # Errors
    ///
    /// Returns the first error raised by a single read.
    pub fn get_all_by_context(
        &self,
        context: impl Into<ContextId>,
    ) -> Result<BTreeMap<SettingId, Option<Value>>, RegistryError> {
        let context = context.into();
        let settings: Vec<SettingId> = self
            .state
            .borrow()
            .observers
            .get(&context)
            .map(|observers| observers.keys().cloned().collect())
            .unwrap_or_default();
        let mut values = BTreeMap::new();
        for setting in settings {
            let value = self.get(&setting, &context)?;
            values.insert(setting, value);
        }
        Ok(values)
    }

    /// Reads every registered property of one resource through
    /// [`Self::get_property`].
    ///
    /// # Errors
    ///
    /// Returns the first error raised by a single read.
    pub fn get_all_properties(
        &self,
        context: impl Into<ContextId>,
        resource: impl Into<ResourceId>,
    ) -> Result<BTreeMap<SettingId, Option<Value>>, RegistryError> {
        let context = context.into();
        let resource = resource.into();
        let settings: Vec<SettingId> = self
            .state
            .borrow()
            .property_observers
            .get(&context)
            .map(|observers| observers.keys().cloned().collect())
            .unwrap_or_default();
        let mut values = BTreeMap::new();
        for setting in settings {
            let value = self.get_property(&setting, &context, &resource)?;
            values.insert(setting, value);
        }
        Ok(values)
    }

    /// Returns every stored setting value, by context.
    #[must_use]
    pub fn get_all_raw(&self) -> BTreeMap<ContextId, SettingsMap> {
        self.state.borrow().settings.clone()
    }

    /// Returns the stored setting values of `context`; empty when unknown.
    #[must_use]
    pub fn get_all_by_context_raw(&self, context: impl Into<ContextId>) -> SettingsMap {
        self.state.borrow().settings.get(&context.into()).cloned().unwrap_or_default()
    }

    /// Returns the stored properties of one resource; empty when unknown.
    #[must_use]
    pub fn get_all_properties_raw(
        &self,
        context: impl Into<ContextId>,
        resource: impl Into<ResourceId>,
    ) -> SettingsMap {
        self.state
            .borrow()
            .resources
            .get(&context.into())
            .and_then(|resources| resources.get(&resource.into()))
            .cloned()
            .unwrap_or_default()
    }

    /// Returns the stored properties of every resource of `context`.
    #[must_use]
    pub fn get_all_resources_raw(&self, context: impl Into<ContextId>) -> ResourceMap {
        self.state.borrow().resources.get(&context.into()).cloned().unwrap_or_default()
    }

    // ------------------------------------------------------------------------
    // Introspection
    // ------------------------------------------------------------------------

    /// Returns true when an observer is bound to `setting` in `context`.
    #[must_use]
    pub fn is_registered(
        &self,
        setting: impl Into<SettingId>,
        context: impl Into<ContextId>,
    ) -> bool {
        self.state
            .borrow()
            .observers
            .get(&context.into())
            .is_some_and(|observers| observers.contains_key(&setting.into()))
    }

    /// Returns true when a property observer is bound to `setting` in
    /// `context`.
    #[must_use]
    pub fn is_property_registered(
        &self,
        setting: impl Into<SettingId>,
        context: impl Into<ContextId>,
    ) -> bool {
        self.state
            .borrow()
            .property_observers
            .get(&context.into())
            .is_some_and(|observers| observers.contains_key(&setting.into()))
    }

    /// Returns every context holding stored settings or resources, sorted.
    #[must_use]
    pub fn contexts(&self) -> Vec<ContextId> {
        let state = self.state.borrow();
        let mut contexts: Vec<ContextId> =
            state.settings.keys().chain(state.resources.keys()).cloned().collect();
        contexts.sort();
        contexts.dedup();
        contexts
    }

    /// Returns the resources stored under `context`, sorted.
    #[must_use]
    pub fn resources(&self, context: impl Into<ContextId>) -> Vec<ResourceId> {
        self.state
            .borrow()
            .resources
            .get(&context.into())
            .map(|resources| resources.keys().cloned().collect())
            .unwrap_or_default()
    }

    // ------------------------------------------------------------------------
    // Dependency targets
    // ------------------------------------------------------------------------

    /// Resolves a dependency condition target: stored value or default,
    /// validated. No other hook runs.
    pub(crate) fn condition_value(&self, target: &SettingRef) -> Result<Value, RegistryError> {
        let observer = self.setting_observer(&target.context, &target.setting)?;
        self.validated_setting(observer.as_ref(), &target.context, &target.setting)
    }

    // ------------------------------------------------------------------------
    // Pipelines
    // ------------------------------------------------------------------------

    /// Runs the read pipeline for a setting.
    fn read_setting(
        &self,
        context: &ContextId,
        setting: &SettingId,
    ) -> Result<ReadResult, RegistryError> {
        let observer = self.setting_observer(context, setting)?;
        observer.on_before_get(self)?;
        let value = self.validated_setting(observer.as_ref(), context, setting)?;
        observer.on_get(&value)?;
        let sanitized = observer.sanitize(value);
        let gated = self.gate(sanitized, observer.dependencies().as_ref(), context, setting)?;
        let was_gated = gated.is_none();
        Ok(ReadResult {
            value: observer.on_get_filter(gated)?,
            gated: was_gated,
        })
    }

    /// Runs the read pipeline for a resource property.
    fn read_property(
        &self,
        context: &ContextId,
        resource: &ResourceId,
        setting: &SettingId,
    ) -> Result<ReadResult, RegistryError> {
        let observer = self.property_observer(context, setting)?;
        observer.on_before_get(self, resource)?;
        let value = self
            .stored_property(context, resource, setting)
            .unwrap_or_else(|| observer.default_value(resource));
        if !observer.validate(&value, resource) {
            return Err(RegistryError::InvalidPropertyValue {
                context: context.clone(),
                resource: resource.clone(),
                setting: setting.clone(),
                value,
            });
        }
        observer.on_get(&value, resource)?;
        let sanitized = observer.sanitize(value, resource);
        let gated =
            self.gate(sanitized, observer.dependencies(resource).as_ref(), context, setting)?;
        let was_gated = gated.is_none();
        Ok(ReadResult {
            value: observer.on_get_filter(resource, gated)?,
            gated: was_gated,
        })
    }

    /// Runs the write pipeline for a setting and returns the stored value.
    fn write_setting(
        &self,
        context: &ContextId,
        setting: &SettingId,
        value: Value,
    ) -> Result<Value, RegistryError> {
        let observer = self.setting_observer(context, setting)?;
        if !observer.validate(&value) {
            return Err(RegistryError::InvalidValue {
                context: context.clone(),
                setting: setting.clone(),
                value,
            });
        }
        observer.on_save(&value)?;
        let sanitized = observer.sanitize(value);
        self.state
            .borrow_mut()
            .settings
            .entry(context.clone())
            .or_default()
            .insert(setting.clone(), sanitized.clone());
        Ok(sanitized)
    }

    /// Runs the write pipeline for a property and returns the stored value.
    fn write_property(
        &self,
        context: &ContextId,
        resource: &ResourceId,
        setting: &SettingId,
        value: Value,
    ) -> Result<Value, RegistryError> {
        let observer = self.property_observer(context, setting)?;
        if !observer.validate(&value, resource) {
            return Err(RegistryError::InvalidPropertyValue {
                context: context.clone(),
                resource: resource.clone(),
                setting: setting.clone(),
                value,
            });
        }
        observer.on_save(&value, resource)?;
        let sanitized = observer.sanitize(value, resource);
        self.state
            .borrow_mut()
            .resources
            .entry(context.clone())
            .or_default()
            .entry(resource.clone())
            .or_default()
            .insert(setting.clone(), sanitized.clone());
        Ok(sanitized)
    }

    /// Gates `value` on `dependency`, rejecting trees over the depth limit.
    fn gate(
        &self,
        value: Value,
        dependency: Option<&SettingDependency>,
        context: &ContextId,
        setting: &SettingId,
    ) -> Result<Option<Value>, RegistryError> {
        let Some(dependency) = dependency else {
            return Ok(Some(value));
        };
        let depth = dependency.depth();
        if depth > self.options.max_dependency_depth {
            return Err(RegistryError::DependencyTooDeep {
                context: context.clone(),
                setting: setting.clone(),
                depth,
                max: self.options.max_dependency_depth,
            });
        }
        dependency.gate(value, &RegistryConditionResolver::new(self))
    }

    // ------------------------------------------------------------------------
    // Storage helpers
    // ------------------------------------------------------------------------

    /// Stored value or default, checked by `validate`.
    fn validated_setting(
        &self,
        observer: &dyn SettingObserver,
        context: &ContextId,
        setting: &SettingId,
    ) -> Result<Value, RegistryError> {
        let value =
            self.stored_setting(context, setting).unwrap_or_else(|| observer.default_value());
        if observer.validate(&value) {
            Ok(value)
        } else {
            Err(RegistryError::InvalidValue {
                context: context.clone(),
                setting: setting.clone(),
                value,
            })
        }
    }

    /// Returns the observer bound to a setting.
    fn setting_observer(
        &self,
        context: &ContextId,
        setting: &SettingId,
    ) -> Result<Rc<dyn SettingObserver>, RegistryError> {
        let observer = self
            .state
            .borrow()
            .observers
            .get(context)
            .and_then(|observers| observers.get(setting))
            .cloned();
        observer.ok_or_else(|| RegistryError::UnregisteredSetting {
            context: context.clone(),
            setting: setting.clone(),
        })
    }

    /// Returns the observer bound to a property.
    fn property_observer(
        &self,
        context: &ContextId,
        setting: &SettingId,
    ) -> Result<Rc<dyn PropertyObserver>, RegistryError> {
        let observer = self
            .state
            .borrow()
            .property_observers
            .get(context)
            .and_then(|observers| observers.get(setting))
            .cloned();
        observer.ok_or_else(|| RegistryError::UnregisteredProperty {
            context: context.clone(),
            setting: setting.clone(),
        })
    }

    /// Returns the non-null stored value of a setting.
    fn stored_setting(&self, context: &ContextId, setting: &SettingId) -> Option<Value> {
        self.state
            .borrow()
            .settings
            .get(context)
            .and_then(|settings| settings.get(setting))
            .filter(|value| !value.is_null())
            .cloned()
    }

    /// Returns the non-null stored value of a resource property.
    fn stored_property(
        &self,
        context: &ContextId,
        resource: &ResourceId,
        setting: &SettingId,
    ) -> Option<Value> {
        self.state
            .borrow()
            .resources
            .get(context)
            .and_then(|resources| resources.get(resource))
            .and_then(|properties| properties.get(setting))
            .filter(|value| !value.is_null())
            .cloned()
    }

    /// Replaces the raw map of a context.
    fn replace_settings(&self, context: ContextId, settings: SettingsMap) {
        self.state.borrow_mut().settings.insert(context, settings);
    }

    // ------------------------------------------------------------------------
    // Audit
    // ------------------------------------------------------------------------

    /// Records a successful operation that carries no value.
    fn record_ok(&self, scope: AuditScope<'_>) {
        self.record(scope, RegistryOutcome::Ok, None, None);
    }

    /// Records a registration result.
    fn record_result(&self, scope: AuditScope<'_>, result: &Result<(), RegistryError>) {
        match result {
            Ok(()) => self.record(scope, RegistryOutcome::Ok, None, None),
            Err(err) => self.record(scope, RegistryOutcome::Error, Some(err), None),
        }
    }

    /// Records a read result.
    fn record_read(&self, scope: AuditScope<'_>, result: &Result<ReadResult, RegistryError>) {
        match result {
            Ok(read) => {
                let outcome = if read.gated { RegistryOutcome::Gated } else { RegistryOutcome::Ok };
                self.record(scope, outcome, None, read.value.as_ref());
            }
            Err(err) => self.record(scope, RegistryOutcome::Error, Some(err), None),
        }
    }

    /// Records a write result.
    fn record_write(&self, scope: AuditScope<'_>, result: &Result<Value, RegistryError>) {
        match result {
            Ok(stored) => self.record(scope, RegistryOutcome::Ok, None, Some(stored)),
            Err(err) => self.record(scope, RegistryOutcome::Error, Some(err), None),
        }
    }

    /// Emits one audit event, redacting the value unless opted in.
    fn record(
        &self,
        scope: AuditScope<'_>,
        outcome: RegistryOutcome,
        error: Option<&RegistryError>,
        value: Option<&Value>,
    ) {
        let (value, redaction) = if self.options.audit_values {
            (value.cloned(), "none")
        } else {
            (None, "values")
        };
        let event = RegistryAuditEvent::new(RegistryAuditEventParams {
            action: scope.action,
            context: scope.context.clone(),
            setting_id: scope.setting.cloned(),
            resource_id: scope.resource.cloned(),
            outcome,
            error_kind: error.map(RegistryError::kind),
            value,
            redaction,
        });
        self.audit.record(&event);
    }
}

impl Default for SettingsRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SettingsRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("SettingsRegistry")
            .field("settings", &state.settings)
            .field("resources", &state.resources)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Collects raw pairs into a [`SettingsMap`].
fn collect_settings<I, K>(data: I) -> SettingsMap
where
    I: IntoIterator<Item = (K, Value)>,
    K: Into<SettingId>,
{
    data.into_iter().map(|(setting, value)| (setting.into(), value)).collect()
}
