// crates/warden-gate-config/tests/config.rs
// ============================================================================
// Module: Configuration Tests
// Description: Tests for configuration loading, defaults, and validation.
// Purpose: Ensure the strict and lenient load paths and the engine bridge hold.
// Dependencies: warden-gate-config, warden-gate-core, tempfile
// ============================================================================
//! ## Overview
//! Validates default values, TOML round-trips, unknown-field rejection,
//! validation rules, the default-fallback load path, and the mapping into
//! engine startup options.

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
    reason = "Test-only output and panic-based assertions are permitted."
)]

use std::fs;

use tempfile::TempDir;
use warden_gate_config::ConfigError;
use warden_gate_config::WardenConfig;
use warden_gate_core::GroupName;
use warden_gate_core::UnavailablePolicy;

/// Verifies the default model matches the documented startup values.
#[test]
fn defaults_match_documented_startup_values() {
    let config = WardenConfig::default();

    assert!(config.is_enabled());
    assert!(!config.is_debug());
    assert!(config.is_permission_backend_enabled());
    assert_eq!(config.language().as_str(), "en_us");
    assert_eq!(
        config.bypass_groups(),
        vec![GroupName::from("admin"), GroupName::from("mod")]
    );
    assert_eq!(config.permissions.exempt_group, "warden-exempt");
    assert_eq!(config.permissions.unavailable_policy, UnavailablePolicy::AllowElevated);
}

/// Verifies save followed by strict load round-trips the model.
#[test]
fn save_and_load_round_trip() {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("warden-gate.toml");
    let mut config = WardenConfig::default();
    config.general.language = "zh_cn".to_string();
    config.general.debug = true;
    config.permissions.unavailable_policy = UnavailablePolicy::DenyAll;

    config.save(&path).expect("save");
    let loaded = WardenConfig::load(&path).expect("load");

    assert_eq!(loaded, config);
}

/// Verifies strict load rejects unknown fields.
#[test]
fn load_rejects_unknown_fields() {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("warden-gate.toml");
    fs::write(&path, "[general]\nenabled = true\nsurprise = 1\n").expect("write");

    let result = WardenConfig::load(&path);

    assert!(matches!(result, Err(ConfigError::Parse { .. })));
}

/// Verifies omitted sections fall back to their defaults.
#[test]
fn load_fills_omitted_sections_with_defaults() {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("warden-gate.toml");
    fs::write(&path, "[general]\nlanguage = \"zh_cn\"\n").expect("write");

    let loaded = WardenConfig::load(&path).expect("load");

    assert_eq!(loaded.language().as_str(), "zh_cn");
    assert!(loaded.is_enabled());
    assert_eq!(loaded.permissions.exempt_group, "warden-exempt");
}

/// Verifies validation rejects an empty language and empty group names.
#[test]
fn validation_rejects_empty_values() {
    let mut config = WardenConfig::default();
    config.general.language = "  ".to_string();
    assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

    let mut config = WardenConfig::default();
    config.permissions.bypass_groups.push(String::new());
    assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
}

/// Verifies a missing file is created with defaults by the lenient path.
#[test]
fn load_or_default_creates_missing_file() {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("warden-gate.toml");

    let config = WardenConfig::load_or_default(&path);

    assert_eq!(config, WardenConfig::default());
    assert!(path.exists());
    let reloaded = WardenConfig::load(&path).expect("reload created file");
    assert_eq!(reloaded, config);
}

/// Verifies a broken file yields defaults and is left untouched.
#[test]
fn load_or_default_keeps_broken_file() {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("warden-gate.toml");
    fs::write(&path, "not toml at all [").expect("write");

    let config = WardenConfig::load_or_default(&path);

    assert_eq!(config, WardenConfig::default());
    let preserved = fs::read_to_string(&path).expect("read back");
    assert_eq!(preserved, "not toml at all [");
}

/// Verifies the engine bridge carries every persisted value across.
#[test]
fn engine_options_mirror_persisted_values() {
    let mut config = WardenConfig::default();
    config.general.enabled = false;
    config.general.debug = true;
    config.general.language = "ZH_CN".to_string();
    config.permissions.bypass_groups = vec!["staff".to_string()];
    config.permissions.exempt_group = "trusted".to_string();
    config.permissions.unavailable_policy = UnavailablePolicy::DenyAll;
    config.lang_dir = "translations".into();

    let options = config.engine_options();

    assert!(!options.enabled);
    assert!(options.debug);
    assert_eq!(options.default_language.as_str(), "zh_cn");
    assert_eq!(options.bypass_groups, vec![GroupName::from("staff")]);
    assert_eq!(options.exempt_group, GroupName::from("trusted"));
    assert_eq!(options.unavailable_policy, UnavailablePolicy::DenyAll);
    assert_eq!(options.lang_dir, std::path::PathBuf::from("translations"));
}
