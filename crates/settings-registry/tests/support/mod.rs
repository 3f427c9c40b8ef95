// crates/settings-registry/tests/support/mod.rs
// ============================================================================
// Module: Test Support
// Description: Shared result helpers and scripted observers for registry tests.
// ============================================================================
//! ## Overview
//! Shared test helpers for consistent Result-based assertions, plus observers
//! that record every hook call and fail on demand.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    dead_code,
    reason = "Test-only helpers; not every test binary uses every helper."
)]

use std::cell::RefCell;
use std::error::Error;
use std::fmt;

use serde_json::Value;
use settings_registry::ObserverError;
use settings_registry::PropertyObserver;
use settings_registry::ResourceId;
use settings_registry::SettingDependency;
use settings_registry::SettingObserver;
use settings_registry::SettingsRegistry;

// ========================================================================
// Test Result Helpers
// ========================================================================

/// Standard result type used across registry integration tests.
pub type TestResult<T = ()> = Result<T, Box<dyn Error>>;

/// Lightweight error type for test assertions.
#[derive(Debug)]
struct TestError {
    /// Human-readable failure message.
    message: String,
}

impl fmt::Display for TestError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.message)
    }
}

impl Error for TestError {}

/// Returns an error when a test condition does not hold.
pub fn ensure(condition: bool, message: impl Into<String>) -> TestResult {
    if condition {
        Ok(())
    } else {
        Err(Box::new(TestError {
            message: message.into(),
        }))
    }
}

// ========================================================================
// Scripted Setting Observer
// ========================================================================

/// Hook stage names recorded by scripted observers.
pub const ON_BEFORE_GET: &str = "on_before_get";
/// Default lookup stage.
pub const DEFAULT: &str = "default";
/// Validation stage.
pub const VALIDATE: &str = "validate";
/// Post-validation read hook.
pub const ON_GET: &str = "on_get";
/// Sanitization stage.
pub const SANITIZE: &str = "sanitize";
/// Dependency declaration stage.
pub const DEPENDENCIES: &str = "dependencies";
/// Final read filter.
pub const ON_GET_FILTER: &str = "on_get_filter";
/// Pre-store write hook.
pub const ON_SAVE: &str = "on_save";

/// Setting observer with configurable behavior that records hook calls.
pub struct ScriptedObserver {
    /// Default value.
    default: Value,
    /// Acceptance predicate.
    accepts: fn(&Value) -> bool,
    /// Sanitization transform.
    sanitizer: fn(Value) -> Value,
    /// Final read filter.
    filter: fn(Option<Value>) -> Option<Value>,
    /// Dependency declaration.
    dependency: Option<SettingDependency>,
    /// Hook that fails with its own name.
    fail_on: Option<&'static str>,
    /// Recorded hook calls.
    calls: RefCell<Vec<&'static str>>,
}

impl ScriptedObserver {
    /// Accepts everything and passes values through.
    pub fn new(default: Value) -> Self {
        Self {
            default,
            accepts: |_| true,
            sanitizer: |value| value,
            filter: |value| value,
            dependency: None,
            fail_on: None,
            calls: RefCell::new(Vec::new()),
        }
    }

    /// Uses `accepts` as the validation predicate.
    pub fn accepting(mut self, accepts: fn(&Value) -> bool) -> Self {
        self.accepts = accepts;
        self
    }

    /// Uses `sanitizer` as the sanitize hook.
    pub fn sanitizing(mut self, sanitizer: fn(Value) -> Value) -> Self {
        self.sanitizer = sanitizer;
        self
    }

    /// Uses `filter` as the final read filter.
    pub fn filtering(mut self, filter: fn(Option<Value>) -> Option<Value>) -> Self {
        self.filter = filter;
        self
    }

    /// Gates reads on `dependency`.
    pub fn depending_on(mut self, dependency: SettingDependency) -> Self {
        self.dependency = Some(dependency);
        self
    }

    /// Fails the named hook with an error whose message is the hook name.
    pub fn failing_on(mut self, hook: &'static str) -> Self {
        self.fail_on = Some(hook);
        self
    }

    /// Returns the recorded hook calls.
    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.borrow().clone()
    }

    /// Clears the recorded hook calls.
    pub fn reset(&self) {
        self.calls.borrow_mut().clear();
    }

    /// Records a fallible hook call and fails it when scripted to.
    fn hook(&self, name: &'static str) -> Result<(), ObserverError> {
        self.calls.borrow_mut().push(name);
        if self.fail_on == Some(name) { Err(ObserverError::message(name)) } else { Ok(()) }
    }
}

impl SettingObserver for ScriptedObserver {
    fn validate(&self, value: &Value) -> bool {
        self.calls.borrow_mut().push(VALIDATE);
        (self.accepts)(value)
    }

    fn default_value(&self) -> Value {
        self.calls.borrow_mut().push(DEFAULT);
        self.default.clone()
    }

    fn sanitize(&self, value: Value) -> Value {
        self.calls.borrow_mut().push(SANITIZE);
        (self.sanitizer)(value)
    }

    fn on_save(&self, _value: &Value) -> Result<(), ObserverError> {
        self.hook(ON_SAVE)
    }

    fn on_get(&self, _value: &Value) -> Result<(), ObserverError> {
        self.hook(ON_GET)
    }

    fn on_before_get(&self, _registry: &SettingsRegistry) -> Result<(), ObserverError> {
        self.hook(ON_BEFORE_GET)
    }

    fn on_get_filter(&self, value: Option<Value>) -> Result<Option<Value>, ObserverError> {
        self.hook(ON_GET_FILTER)?;
        Ok((self.filter)(value))
    }

    fn dependencies(&self) -> Option<SettingDependency> {
        self.calls.borrow_mut().push(DEPENDENCIES);
        self.dependency.clone()
    }
}

// ========================================================================
// Scripted Property Observer
// ========================================================================

/// Property observer whose default is derived from the resource id.
pub struct ScriptedProperty {
    /// Acceptance predicate.
    accepts: fn(&Value) -> bool,
    /// Dependency declaration.
    dependency: Option<SettingDependency>,
    /// Hook that fails with its own name.
    fail_on: Option<&'static str>,
    /// Recorded `(hook, resource)` calls.
    calls: RefCell<Vec<(&'static str, String)>>,
}

impl ScriptedProperty {
    /// Accepts everything; defaults to `"default:<resource>"`.
    pub fn new() -> Self {
        Self {
            accepts: |_| true,
            dependency: None,
            fail_on: None,
            calls: RefCell::new(Vec::new()),
        }
    }

    /// Uses `accepts` as the validation predicate.
    pub fn accepting(mut self, accepts: fn(&Value) -> bool) -> Self {
        self.accepts = accepts;
        self
    }

    /// Gates reads on `dependency`.
    pub fn depending_on(mut self, dependency: SettingDependency) -> Self {
        self.dependency = Some(dependency);
        self
    }

    /// Fails the named hook with an error whose message is the hook name.
    pub fn failing_on(mut self, hook: &'static str) -> Self {
        self.fail_on = Some(hook);
        self
    }

    /// Returns the recorded hook calls.
    pub fn calls(&self) -> Vec<(&'static str, String)> {
        self.calls.borrow().clone()
    }

    /// Records one hook call for `resource`.
    fn record(&self, name: &'static str, resource: &ResourceId) {
        self.calls.borrow_mut().push((name, resource.to_string()));
    }

    /// Records a fallible hook call and fails it when scripted to.
    fn hook(&self, name: &'static str, resource: &ResourceId) -> Result<(), ObserverError> {
        self.record(name, resource);
        if self.fail_on == Some(name) { Err(ObserverError::message(name)) } else { Ok(()) }
    }
}

impl Default for ScriptedProperty {
    fn default() -> Self {
        Self::new()
    }
}

impl PropertyObserver for ScriptedProperty {
    fn validate(&self, value: &Value, resource: &ResourceId) -> bool {
        self.record(VALIDATE, resource);
        (self.accepts)(value)
    }

    fn default_value(&self, resource: &ResourceId) -> Value {
        self.record(DEFAULT, resource);
        Value::String(format!("default:{resource}"))
    }

    fn sanitize(&self, value: Value, resource: &ResourceId) -> Value {
        self.record(SANITIZE, resource);
        value
    }

    fn on_save(&self, _value: &Value, resource: &ResourceId) -> Result<(), ObserverError> {
        self.hook(ON_SAVE, resource)
    }

    fn on_get(&self, _value: &Value, resource: &ResourceId) -> Result<(), ObserverError> {
        self.hook(ON_GET, resource)
    }

    fn on_before_get(
        &self,
        _registry: &SettingsRegistry,
        resource: &ResourceId,
    ) -> Result<(), ObserverError> {
        self.hook(ON_BEFORE_GET, resource)
    }

    fn on_get_filter(
        &self,
        resource: &ResourceId,
        value: Option<Value>,
    ) -> Result<Option<Value>, ObserverError> {
        self.hook(ON_GET_FILTER, resource)?;
        Ok(value)
    }

    fn dependencies(&self, resource: &ResourceId) -> Option<SettingDependency> {
        self.record(DEPENDENCIES, resource);
        self.dependency.clone()
    }
}

/// Accepts only strings.
pub fn only_strings(value: &Value) -> bool {
    value.is_string()
}
