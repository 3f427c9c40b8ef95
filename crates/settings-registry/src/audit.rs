// crates/settings-registry/src/audit.rs
// ============================================================================
// Module: Registry Audit Logging
// Description: Structured audit events for registry reads and writes.
// Purpose: Emit redacted audit logs without hard logging dependencies.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! Every registry operation emits one [`RegistryAuditEvent`] to the
//! registry's [`RegistryAuditSink`]. Values are redacted unless the registry
//! was built with `audit_values` enabled. Sinks are synchronous and
//! infallible; a sink that cannot write drops the event.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::cell::RefCell;
use std::fs::OpenOptions;
use std::io;
use std::io::Write;
use std::path::Path;
use std::rc::Rc;
use std::sync::Mutex;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use serde::Serialize;
use serde_json::Value;

use crate::core::ContextId;
use crate::core::ResourceId;
use crate::core::SettingId;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Registry operation being audited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RegistryAction {
    /// Observer registration.
    RegisterObserver,
    /// Property observer registration.
    RegisterPropertyObserver,
    /// Bulk replacement of a context.
    Hydrate,
    /// Bulk replacement of one resource.
    HydrateResource,
    /// Removal of one resource.
    DropResource,
    /// Removal of every resource in a context.
    DropResources,
    /// Setting read.
    Get,
    /// Property read.
    GetProperty,
    /// Setting write.
    Save,
    /// Property write.
    SaveProperty,
}

/// Result classification of an audited operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RegistryOutcome {
    /// Operation succeeded.
    Ok,
    /// Read succeeded but dependencies resolved the value to absent.
    Gated,
    /// Operation failed.
    Error,
}

/// Registry audit event payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegistryAuditEvent {
    /// Event identifier.
    pub event: &'static str,
    /// Event timestamp (milliseconds since epoch).
    pub timestamp_ms: u128,
    /// Operation performed.
    pub action: RegistryAction,
    /// Context addressed.
    pub context: ContextId,
    /// Setting or property addressed, when the operation has one.
    pub setting_id: Option<SettingId>,
    /// Resource addressed, for property operations.
    pub resource_id: Option<ResourceId>,
    /// Operation outcome.
    pub outcome: RegistryOutcome,
    /// Error kind label on failure.
    pub error_kind: Option<&'static str>,
    /// Value read or stored (explicit opt-in only).
    pub value: Option<Value>,
    /// Redaction classification for value logging.
    pub redaction: &'static str,
}

/// Inputs required to construct a registry audit event.
pub struct RegistryAuditEventParams {
    /// Operation performed.
    pub action: RegistryAction,
    /// Context addressed.
    pub context: ContextId,
    /// Setting or property addressed.
    pub setting_id: Option<SettingId>,
    /// Resource addressed.
    pub resource_id: Option<ResourceId>,
    /// Operation outcome.
    pub outcome: RegistryOutcome,
    /// Error kind label on failure.
    pub error_kind: Option<&'static str>,
    /// Value read or stored; `None` when redacted or absent.
    pub value: Option<Value>,
    /// Redaction classification for value logging.
    pub redaction: &'static str,
}

impl RegistryAuditEvent {
    /// Creates a new registry audit event with a consistent timestamp.
    #[must_use]
    pub fn new(params: RegistryAuditEventParams) -> Self {
        let timestamp_ms =
            SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_millis();
        Self {
            event: "settings_registry",
            timestamp_ms,
            action: params.action,
            context: params.context,
            setting_id: params.setting_id,
            resource_id: params.resource_id,
            outcome: params.outcome,
            error_kind: params.error_kind,
            value: params.value,
            redaction: params.redaction,
        }
    }
}

// ============================================================================
// SECTION: Trait
// ============================================================================

/// Audit sink for registry events.
pub trait RegistryAuditSink {
    /// Record an audit event.
    fn record(&self, event: &RegistryAuditEvent);
}

impl<S: RegistryAuditSink + ?Sized> RegistryAuditSink for Rc<S> {
    fn record(&self, event: &RegistryAuditEvent) {
        (**self).record(event);
    }
}

impl<S: RegistryAuditSink + ?Sized> RegistryAuditSink for Box<S> {
    fn record(&self, event: &RegistryAuditEvent) {
        (**self).record(event);
    }
}

// ============================================================================
// SECTION: Sinks
// ============================================================================

/// No-op audit sink.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopAuditSink;

impl RegistryAuditSink for NoopAuditSink {
    fn record(&self, _event: &RegistryAuditEvent) {}
}

/// Audit sink that logs JSON lines to stderr.
#[derive(Debug, Clone, Copy, Default)]
pub struct StderrAuditSink;

impl RegistryAuditSink for StderrAuditSink {
    fn record(&self, event: &RegistryAuditEvent) {
        if let Ok(payload) = serde_json::to_string(event) {
            let _ = writeln!(std::io::stderr(), "{payload}");
        }
    }
}

/// Audit sink that logs JSON lines to a file.
#[derive(Debug)]
pub struct FileAuditSink {
    /// File handle used for append-only logging.
    file: Mutex<std::fs::File>,
}

impl FileAuditSink {
    /// Opens the audit log file in append mode.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened.
    pub fn new(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            file: Mutex::new(file),
        })
    }
}

impl RegistryAuditSink for FileAuditSink {
    fn record(&self, event: &RegistryAuditEvent) {
        if let Ok(payload) = serde_json::to_string(event)
            && let Ok(mut file) = self.file.lock()
        {
            let _ = writeln!(file, "{payload}");
            let _ = file.flush();
        }
    }
}

/// Audit sink that keeps events in memory for inspection.
#[derive(Debug, Default)]
pub struct InMemoryAuditSink {
    /// Recorded events in emission order.
    events: RefCell<Vec<RegistryAuditEvent>>,
}

impl InMemoryAuditSink {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of the recorded events.
    #[must_use]
    pub fn events(&self) -> Vec<RegistryAuditEvent> {
        self.events.borrow().clone()
    }

    /// Removes and returns the recorded events.
    pub fn take(&self) -> Vec<RegistryAuditEvent> {
        self.events.take()
    }
}

impl RegistryAuditSink for InMemoryAuditSink {
    fn record(&self, event: &RegistryAuditEvent) {
        self.events.borrow_mut().push(event.clone());
    }
}
