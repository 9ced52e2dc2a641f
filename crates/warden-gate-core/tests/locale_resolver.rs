// crates/warden-gate-core/tests/locale_resolver.rs
// ============================================================================
// Module: Locale Resolver Tests
// Description: Tests for language derivation, preferences, and fallback lookup.
// Purpose: Ensure resolution always yields text and preferences behave per mode.
// Dependencies: warden-gate-core
// ============================================================================
//! ## Overview
//! Validates language derivation from client locales, the automatic and
//! manual preference modes, the resolved-then-base-then-raw-key fallback
//! chain, and positional placeholder substitution.

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

use warden_gate_core::ActorId;
use warden_gate_core::Caller;
use warden_gate_core::CatalogHandle;
use warden_gate_core::LanguageCode;
use warden_gate_core::LanguageMode;
use warden_gate_core::LocaleError;
use warden_gate_core::LocaleResolver;
use warden_gate_core::TranslationCatalog;
use warden_gate_core::derive_language;

/// Builds a two-language catalog with a deliberate gap in `zh_cn`.
fn test_catalog() -> TranslationCatalog {
    TranslationCatalog::from_entries([
        (
            LanguageCode::new("en_us"),
            vec![
                ("warden.greeting", "Hello %s"),
                ("warden.only_english", "English only"),
                ("warden.pair", "%s and %s"),
            ],
        ),
        (LanguageCode::new("zh_cn"), vec![("warden.greeting", "你好 %s")]),
    ])
}

/// Builds a resolver over the test catalog with an `en_us` default.
fn test_resolver() -> LocaleResolver {
    LocaleResolver::new(CatalogHandle::new(test_catalog()), LanguageCode::new("en_us"))
}

/// Builds an actor caller with the given client locale.
fn actor_caller(id: &str, locale: &str) -> Caller {
    Caller::actor(ActorId::new(id), id).with_locale(LanguageCode::new(locale))
}

/// Verifies Chinese locale variants and classical Chinese derive to `zh_cn`
/// and everything else to the base language.
#[test]
fn derivation_maps_chinese_variants_and_defaults_to_base() {
    assert_eq!(derive_language(&LanguageCode::new("zh_cn")).as_str(), "zh_cn");
    assert_eq!(derive_language(&LanguageCode::new("zh_hant_tw")).as_str(), "zh_cn");
    assert_eq!(derive_language(&LanguageCode::new("lzh")).as_str(), "zh_cn");
    assert_eq!(derive_language(&LanguageCode::new("fr_fr")).as_str(), "en_us");
    assert_eq!(derive_language(&LanguageCode::new("en_gb")).as_str(), "en_us");
}

/// Verifies actors without a stored preference derive from the client
/// locale on every call.
#[test]
fn unstored_actor_derives_from_client_locale() {
    let resolver = test_resolver();
    let caller = actor_caller("a1", "zh_hant_tw");

    assert_eq!(resolver.resolved_language(&caller).as_str(), "zh_cn");
    assert_eq!(resolver.resolve(&caller, "greeting", &["Wei"]), "你好 Wei");
}

/// Verifies a manual pin overrides the client locale until changed.
#[test]
fn manual_pin_overrides_client_locale() {
    let resolver = test_resolver();
    let actor = ActorId::new("a1");
    let caller = actor_caller("a1", "zh_cn");

    resolver.set_manual(&actor, &LanguageCode::new("en_us")).expect("pin");
    assert_eq!(resolver.resolved_language(&caller).as_str(), "en_us");
    assert_eq!(resolver.resolve(&caller, "greeting", &["Wei"]), "Hello Wei");

    let preference = resolver.preference(&actor).expect("stored");
    assert_eq!(preference.mode, LanguageMode::Manual);
}

/// Verifies automatic mode recomputes from the locale supplied per call.
#[test]
fn auto_mode_follows_client_locale_changes() {
    let resolver = test_resolver();
    let actor = ActorId::new("a1");
    resolver.set_auto(&actor, &LanguageCode::new("zh_cn"));

    let chinese = actor_caller("a1", "zh_cn");
    let english = actor_caller("a1", "en_gb");
    assert_eq!(resolver.resolved_language(&chinese).as_str(), "zh_cn");
    assert_eq!(resolver.resolved_language(&english).as_str(), "en_us");
}

/// Verifies a manual set to an unloaded language fails and leaves the prior
/// preference untouched.
#[test]
fn manual_set_to_unloaded_language_fails_and_keeps_preference() {
    let resolver = test_resolver();
    let actor = ActorId::new("a1");
    resolver.set_manual(&actor, &LanguageCode::new("zh_cn")).expect("pin");

    let result = resolver.set_manual(&actor, &LanguageCode::new("fr_fr"));
    match result {
        Err(LocaleError::UnsupportedLanguage {
            requested,
            available,
        }) => {
            assert_eq!(requested.as_str(), "fr_fr");
            assert!(available.iter().any(|code| code.as_str() == "en_us"));
        }
        Ok(()) => panic!("unsupported language accepted"),
    }
    let preference = resolver.preference(&actor).expect("stored");
    assert_eq!(preference.language.as_str(), "zh_cn");
    assert_eq!(preference.mode, LanguageMode::Manual);
}

/// Verifies missing keys in the resolved language fall back to the base
/// language, and keys missing everywhere return the raw key as supplied.
#[test]
fn fallback_chain_ends_at_raw_key() {
    let resolver = test_resolver();
    let caller = actor_caller("a1", "zh_cn");

    assert_eq!(resolver.resolve(&caller, "only_english", &[]), "English only");
    assert_eq!(resolver.resolve(&caller, "missing.key", &[]), "missing.key");
    assert_eq!(resolver.resolve(&caller, "warden.missing.key", &[]), "warden.missing.key");
}

/// Verifies console callers resolve with the process default language.
#[test]
fn console_uses_process_default_language() {
    let resolver = test_resolver();
    let console = Caller::console();

    assert_eq!(resolver.resolve(&console, "greeting", &["ops"]), "Hello ops");
    resolver.set_default_language(LanguageCode::new("zh_cn"));
    assert_eq!(resolver.resolve(&console, "greeting", &["ops"]), "你好 ops");
}

/// Verifies placeholder substitution: in-order replacement, mismatch
/// returning the raw template, and surplus arguments ignored.
#[test]
fn substitution_handles_mismatches() {
    let resolver = test_resolver();
    let console = Caller::console();

    assert_eq!(resolver.resolve(&console, "pair", &["a", "b"]), "a and b");
    assert_eq!(resolver.resolve(&console, "pair", &["a"]), "%s and %s");
    assert_eq!(resolver.resolve(&console, "greeting", &["a", "extra"]), "Hello a");
}

/// Verifies clearing an actor's preference restores derivation.
#[test]
fn clear_removes_stored_preference() {
    let resolver = test_resolver();
    let actor = ActorId::new("a1");
    resolver.set_manual(&actor, &LanguageCode::new("zh_cn")).expect("pin");

    resolver.clear(&actor);

    assert!(resolver.preference(&actor).is_none());
    let caller = actor_caller("a1", "en_gb");
    assert_eq!(resolver.resolved_language(&caller).as_str(), "en_us");
}

/// Verifies preferences survive a catalog publish and lookups see the new
/// catalog immediately.
#[test]
fn publish_swaps_catalog_without_touching_preferences() {
    let resolver = test_resolver();
    let actor = ActorId::new("a1");
    resolver.set_manual(&actor, &LanguageCode::new("zh_cn")).expect("pin");

    let replacement = TranslationCatalog::from_entries([
        (LanguageCode::new("en_us"), vec![("warden.greeting", "Hi %s")]),
        (LanguageCode::new("zh_cn"), vec![("warden.greeting", "您好 %s")]),
    ]);
    resolver.catalog().publish(replacement);

    let caller = actor_caller("a1", "en_gb");
    assert_eq!(resolver.resolve(&caller, "greeting", &["Wei"]), "您好 Wei");
    assert_eq!(resolver.preference(&actor).expect("stored").language.as_str(), "zh_cn");
}
