// crates/settings-registry-config/src/lib.rs
// ============================================================================
// Module: Settings Registry Config Library
// Description: Config model, validation, and registry construction.
// Purpose: Single source of truth for settings-registry.toml semantics.
// Dependencies: settings-registry, serde, toml
// ============================================================================

//! ## Overview
//! `settings-registry-config` loads registry limits and audit routing from
//! TOML. Validation is strict and fails closed; a validated config builds a
//! ready-to-use [`settings_registry::SettingsRegistry`].

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;
pub mod examples;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::*;
pub use examples::config_toml_example;
