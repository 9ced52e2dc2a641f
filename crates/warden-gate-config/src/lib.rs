// crates/warden-gate-config/src/lib.rs
// ============================================================================
// Module: Warden Gate Config Library
// Description: Public API surface for Warden Gate configuration.
// Purpose: Expose the persisted configuration model and its load/save contract.
// Dependencies: crate::config
// ============================================================================

//! ## Overview
//! Configuration for the Warden Gate engine is persisted as a TOML file by
//! the host and read into a typed model here. The engine itself only reads
//! the resulting values; this crate owns the load/save contract, including
//! the lenient `load_or_default` path that keeps a broken config file from
//! taking the engine down.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::ConfigError;
pub use config::DEFAULT_CONFIG_NAME;
pub use config::GeneralConfig;
pub use config::PermissionsConfig;
pub use config::WardenConfig;
