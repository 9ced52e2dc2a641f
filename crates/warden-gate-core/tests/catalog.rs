// crates/warden-gate-core/tests/catalog.rs
// ============================================================================
// Module: Catalog Tests
// Description: Tests for translation catalog loading and bootstrap.
// Purpose: Ensure directory loading, baseline bootstrap, and skip behavior hold.
// Dependencies: warden-gate-core, serde_json, tempfile
// ============================================================================
//! ## Overview
//! Validates that the catalog build chain loads every readable language
//! file, bootstraps baseline files for built-in languages, and skips broken
//! files without failing the build.

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
use warden_gate_core::CatalogSource;
use warden_gate_core::LanguageCode;

/// Verifies an empty directory bootstraps both built-in baselines.
#[test]
fn build_bootstraps_builtin_baselines() {
    let dir = TempDir::new().expect("tempdir");
    let source = CatalogSource::new(dir.path());
    let catalog = source.build().expect("build");

    assert!(dir.path().join("en_us.json").exists());
    assert!(dir.path().join("zh_cn.json").exists());
    assert!(catalog.contains_language(&LanguageCode::new("en_us")));
    assert!(catalog.contains_language(&LanguageCode::new("zh_cn")));
    assert_eq!(
        catalog.get(&LanguageCode::new("en_us"), "warden.status.title"),
        Some("Warden Gate Status")
    );
    assert_eq!(
        catalog.get(&LanguageCode::new("zh_cn"), "warden.status.title"),
        Some("Warden Gate 状态")
    );
}

/// Verifies operator overrides survive the build while baseline gaps are
/// filled in behind them.
#[test]
fn build_keeps_overrides_and_fills_baseline_gaps() {
    let dir = TempDir::new().expect("tempdir");
    fs::write(dir.path().join("en_us.json"), r#"{"warden.status.title": "Custom Title"}"#)
        .expect("write override");

    let source = CatalogSource::new(dir.path());
    let catalog = source.build().expect("build");
    let en_us = LanguageCode::new("en_us");

    assert_eq!(catalog.get(&en_us, "warden.status.title"), Some("Custom Title"));
    assert_eq!(catalog.get(&en_us, "warden.status.enabled"), Some("Enabled"));
}

/// Verifies an unparsable file is skipped without failing the build.
#[test]
fn build_skips_unparsable_file() {
    let dir = TempDir::new().expect("tempdir");
    fs::write(dir.path().join("broken.json"), "{not json").expect("write broken");
    fs::write(dir.path().join("fr_fr.json"), r#"{"warden.status.title": "Statut"}"#)
        .expect("write fr");

    let catalog = CatalogSource::new(dir.path()).build().expect("build");

    assert!(!catalog.contains_language(&LanguageCode::new("broken")));
    assert_eq!(
        catalog.get(&LanguageCode::new("fr_fr"), "warden.status.title"),
        Some("Statut")
    );
}

/// Verifies file stems are normalized to lowercase language codes.
#[test]
fn load_normalizes_file_stem_case() {
    let dir = TempDir::new().expect("tempdir");
    fs::write(dir.path().join("FR_FR.json"), r#"{"warden.status.title": "Statut"}"#)
        .expect("write upper");

    let catalog = CatalogSource::new(dir.path()).load_all().expect("load");

    assert!(catalog.contains_language(&LanguageCode::new("fr_fr")));
}

/// Verifies a missing catalog directory is created by the build.
#[test]
fn build_creates_missing_directory() {
    let dir = TempDir::new().expect("tempdir");
    let nested = dir.path().join("data").join("lang");

    let catalog = CatalogSource::new(&nested).build().expect("build");

    assert!(nested.is_dir());
    assert!(!catalog.is_empty());
    assert!(catalog.entry_count() > 0);
}
