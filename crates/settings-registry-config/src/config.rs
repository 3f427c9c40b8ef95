// crates/settings-registry-config/src/config.rs
// ============================================================================
// Module: Settings Registry Configuration
// Description: Configuration loading and validation for the settings registry.
// Purpose: Provide strict, fail-closed config parsing with hard limits.
// Dependencies: settings-registry, serde, toml
// ============================================================================

//! ## Overview
//! Configuration is loaded from a TOML file with strict size and path limits.
//! Unknown keys are rejected. Every section is optional and defaults to the
//! registry's built-in behavior: depth limit 32, no audit sink.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::env;
use std::fs;
use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;
use serde::Serialize;
use settings_registry::DEFAULT_MAX_DEPENDENCY_DEPTH;
use settings_registry::FileAuditSink;
use settings_registry::NoopAuditSink;
use settings_registry::RegistryAuditSink;
use settings_registry::RegistryOptions;
use settings_registry::SettingsRegistry;
use settings_registry::StderrAuditSink;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default configuration filename when no path is specified.
const DEFAULT_CONFIG_NAME: &str = "settings-registry.toml";
/// Environment variable used to override the config path.
pub const CONFIG_ENV_VAR: &str = "SETTINGS_REGISTRY_CONFIG";
/// Maximum configuration file size in bytes.
pub const MAX_CONFIG_FILE_SIZE: usize = 64 * 1024;
/// Maximum length of a single path component.
pub const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Maximum total path length.
pub const MAX_TOTAL_PATH_LENGTH: usize = 4096;
/// Largest accepted dependency depth limit.
pub const MAX_DEPENDENCY_DEPTH_LIMIT: usize = 256;

// ============================================================================
// SECTION: Configuration Model
// ============================================================================

/// Settings registry configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegistryConfig {
    /// Evaluation limits.
    #[serde(default)]
    pub limits: LimitsConfig,
    /// Audit routing.
    #[serde(default)]
    pub audit: AuditConfig,
}

impl RegistryConfig {
    /// Loads configuration from disk using the default resolution rules:
    /// explicit path, then [`CONFIG_ENV_VAR`], then `settings-registry.toml`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when loading or validation fails.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let resolved = resolve_path(path)?;
        validate_path(&resolved)?;
        let bytes = fs::read(&resolved).map_err(|err| ConfigError::Io(err.to_string()))?;
        if bytes.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::Invalid("config file exceeds size limit".to_string()));
        }
        let content = std::str::from_utf8(&bytes)
            .map_err(|_| ConfigError::Invalid("config file must be utf-8".to_string()))?;
        Self::from_toml_str(content)
    }

    /// Parses and validates configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when parsing or validation fails.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        if content.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::Invalid("config file exceeds size limit".to_string()));
        }
        let config: Self =
            toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration for internal consistency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when configuration is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.limits.validate()?;
        self.audit.validate()?;
        Ok(())
    }

    /// Returns the registry options described by this configuration.
    #[must_use]
    pub const fn registry_options(&self) -> RegistryOptions {
        RegistryOptions {
            max_dependency_depth: self.limits.max_dependency_depth,
            audit_values: self.audit.log_values,
        }
    }

    /// Opens the configured audit sink.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the file sink cannot be opened.
    pub fn build_audit_sink(&self) -> Result<Box<dyn RegistryAuditSink>, ConfigError> {
        match self.audit.sink {
            AuditSinkKind::None => Ok(Box::new(NoopAuditSink)),
            AuditSinkKind::Stderr => Ok(Box::new(StderrAuditSink)),
            AuditSinkKind::File => {
                let path = self.audit.path.as_deref().ok_or_else(|| {
                    ConfigError::Invalid("audit.path is required for the file sink".to_string())
                })?;
                let sink = FileAuditSink::new(Path::new(path))
                    .map_err(|err| ConfigError::Io(err.to_string()))?;
                Ok(Box::new(sink))
            }
        }
    }

    /// Builds an empty registry with the configured options and audit sink.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when validation fails or the audit sink cannot
    /// be opened.
    pub fn build_registry(&self) -> Result<SettingsRegistry, ConfigError> {
        self.validate()?;
        let sink = self.build_audit_sink()?;
        Ok(SettingsRegistry::with_options(self.registry_options()).with_audit_sink(sink))
    }
}

/// Evaluation limits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LimitsConfig {
    /// Maximum dependency tree depth (root group alone is 1).
    #[serde(default = "default_max_dependency_depth")]
    pub max_dependency_depth: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_dependency_depth: default_max_dependency_depth(),
        }
    }
}

impl LimitsConfig {
    /// Validates limit bounds.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.max_dependency_depth == 0 {
            return Err(ConfigError::Invalid(
                "limits.max_dependency_depth must be greater than zero".to_string(),
            ));
        }
        if self.max_dependency_depth > MAX_DEPENDENCY_DEPTH_LIMIT {
            return Err(ConfigError::Invalid(format!(
                "limits.max_dependency_depth must be at most {MAX_DEPENDENCY_DEPTH_LIMIT}"
            )));
        }
        Ok(())
    }
}

/// Audit sink selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditSinkKind {
    /// Discard audit events.
    #[default]
    None,
    /// JSON lines on stderr.
    Stderr,
    /// JSON lines appended to `audit.path`.
    File,
}

/// Audit routing configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AuditConfig {
    /// Destination of audit events.
    #[serde(default)]
    pub sink: AuditSinkKind,
    /// Log file path for the file sink.
    #[serde(default)]
    pub path: Option<String>,
    /// Include setting values in audit events (explicit opt-in).
    #[serde(default)]
    pub log_values: bool,
}

impl AuditConfig {
    /// Validates sink and path consistency.
    fn validate(&self) -> Result<(), ConfigError> {
        match (self.sink, self.path.as_deref()) {
            (AuditSinkKind::File, None) => Err(ConfigError::Invalid(
                "audit.path is required for the file sink".to_string(),
            )),
            (AuditSinkKind::File, Some(path)) => validate_path_string("audit.path", path),
            (_, Some(_)) => {
                Err(ConfigError::Invalid("audit.path is only valid for the file sink".to_string()))
            }
            (_, None) => Ok(()),
        }
    }
}

/// Returns the default dependency depth limit.
const fn default_max_dependency_depth() -> usize {
    DEFAULT_MAX_DEPENDENCY_DEPTH
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration loading or validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O failure while reading configuration.
    #[error("config io error: {0}")]
    Io(String),
    /// TOML parsing error.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Invalid configuration data.
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Resolves the config path from explicit input, env, or default name.
fn resolve_path(path: Option<&Path>) -> Result<PathBuf, ConfigError> {
    if let Some(path) = path {
        return Ok(path.to_path_buf());
    }
    if let Ok(env_path) = env::var(CONFIG_ENV_VAR) {
        if env_path.len() > MAX_TOTAL_PATH_LENGTH {
            return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
        }
        return Ok(PathBuf::from(env_path));
    }
    Ok(PathBuf::from(DEFAULT_CONFIG_NAME))
}

/// Validates the resolved path against length limits.
fn validate_path(path: &Path) -> Result<(), ConfigError> {
    let text = path.to_string_lossy();
    if text.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
    }
    for component in path.components() {
        let value = component.as_os_str().to_string_lossy();
        if value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid("config path component too long".to_string()));
        }
    }
    Ok(())
}

/// Validates a configured path string against length constraints.
fn validate_path_string(field: &str, value: &str) -> Result<(), ConfigError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::Invalid(format!("{field} must be non-empty")));
    }
    if trimmed.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid(format!("{field} exceeds max length")));
    }
    for component in Path::new(trimmed).components() {
        if component.as_os_str().to_string_lossy().len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid(format!("{field} component too long")));
        }
    }
    Ok(())
}
