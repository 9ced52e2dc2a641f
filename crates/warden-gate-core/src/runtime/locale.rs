// crates/warden-gate-core/src/runtime/locale.rs
// ============================================================================
// Module: Warden Gate Localization Resolver
// Description: Per-actor language preferences and fallback-chain message lookup.
// Purpose: Resolve every (caller, key) pair to renderable text without failing.
// Dependencies: crate::{core, interfaces}, tracing
// ============================================================================

//! ## Overview
//! The resolver tracks one language preference per actor (automatic or
//! manually pinned) and renders message keys against the published catalog.
//! Resolution never fails: it degrades from the resolved language to the
//! base language and finally to the raw key. Automatic mode recomputes the
//! language from the client locale on every call, so a client-side locale
//! change takes effect without an explicit command.
//!
//! ## Invariants
//! - An actor has at most one preference entry; updates replace the whole
//!   entry so readers never observe a half-written pair.
//! - Reload publishes a replacement catalog through [`CatalogHandle`]
//!   without touching the preference map.
//! - Lookups take no locks beyond a short read guard; no I/O on this path.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::PoisonError;
use std::sync::RwLock;

use thiserror::Error;
use tracing::warn;

use crate::core::catalog::TranslationCatalog;
use crate::core::identifiers::ActorId;
use crate::core::identifiers::LanguageCode;
use crate::interfaces::Caller;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Base language every resolution chain ends at.
pub const BASE_LANGUAGE: &str = "en_us";

/// Message-key prefix applied to bare keys before lookup.
const KEY_PREFIX: &str = "warden.";

/// Positional placeholder token in catalog templates.
const PLACEHOLDER: &str = "%s";

// ============================================================================
// SECTION: Language Preference
// ============================================================================

/// Whether an actor's language is recomputed from the client locale each
/// call or pinned explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LanguageMode {
    /// Derive from the client locale on every resolution.
    Auto,
    /// Use the explicitly pinned language.
    Manual,
}

/// An actor's stored language preference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguagePreference {
    /// Preferred language code.
    pub language: LanguageCode,
    /// Preference mode.
    pub mode: LanguageMode,
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Localization errors surfaced to command callers.
#[derive(Debug, Error)]
pub enum LocaleError {
    /// Manual set to a language that is not loaded.
    #[error("unsupported language {requested} (available: {})", available_list(available))]
    UnsupportedLanguage {
        /// The rejected language code.
        requested: LanguageCode,
        /// Languages currently loaded in the catalog.
        available: Vec<LanguageCode>,
    },
}

/// Joins available language codes for error display.
fn available_list(available: &[LanguageCode]) -> String {
    available.iter().map(LanguageCode::as_str).collect::<Vec<_>>().join(", ")
}

// ============================================================================
// SECTION: Language Derivation
// ============================================================================

/// Derives a supported language from a client locale code.
///
/// Any locale beginning with `zh`, or exactly `lzh` (classical Chinese),
/// maps to `zh_cn`; every other code maps to the base language.
#[must_use]
pub fn derive_language(client_locale: &LanguageCode) -> LanguageCode {
    let code = client_locale.as_str();
    if code.starts_with("zh") || code == "lzh" {
        LanguageCode::new("zh_cn")
    } else {
        LanguageCode::new(BASE_LANGUAGE)
    }
}

// ============================================================================
// SECTION: Catalog Handle
// ============================================================================

/// Shared handle to the currently published catalog.
///
/// Readers clone the inner [`Arc`] under a short read guard, so a reload
/// swapping the reference never stalls resolution and concurrent readers
/// see either the fully-old or fully-new catalog.
#[derive(Debug, Clone)]
pub struct CatalogHandle {
    /// Published catalog behind a read-mostly lock.
    inner: Arc<RwLock<Arc<TranslationCatalog>>>,
}

impl CatalogHandle {
    /// Creates a handle publishing the given catalog.
    #[must_use]
    pub fn new(catalog: TranslationCatalog) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Arc::new(catalog))),
        }
    }

    /// Returns the currently published catalog.
    #[must_use]
    pub fn current(&self) -> Arc<TranslationCatalog> {
        Arc::clone(&self.inner.read().unwrap_or_else(PoisonError::into_inner))
    }

    /// Publishes a replacement catalog with a single reference swap.
    pub fn publish(&self, catalog: TranslationCatalog) {
        *self.inner.write().unwrap_or_else(PoisonError::into_inner) = Arc::new(catalog);
    }
}

// ============================================================================
// SECTION: Locale Resolver
// ============================================================================

/// Per-actor language state machine plus fallback-chain lookup.
#[derive(Debug)]
pub struct LocaleResolver {
    /// Handle to the published catalog.
    catalog: CatalogHandle,
    /// Preference map keyed by actor. Entries persist for the engine's
    /// lifetime unless [`LocaleResolver::clear`] is invoked by the host.
    preferences: RwLock<HashMap<ActorId, LanguagePreference>>,
    /// Process-wide default language used for console/system callers.
    default_language: RwLock<LanguageCode>,
}

impl LocaleResolver {
    /// Creates a resolver over a catalog handle.
    #[must_use]
    pub fn new(catalog: CatalogHandle, default_language: LanguageCode) -> Self {
        Self {
            catalog,
            preferences: RwLock::new(HashMap::new()),
            default_language: RwLock::new(default_language),
        }
    }

    /// Returns the catalog handle shared with the engine.
    #[must_use]
    pub const fn catalog(&self) -> &CatalogHandle {
        &self.catalog
    }

    /// Returns the process-wide default language.
    #[must_use]
    pub fn default_language(&self) -> LanguageCode {
        self.default_language.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Sets the process-wide default language.
    pub fn set_default_language(&self, language: LanguageCode) {
        *self.default_language.write().unwrap_or_else(PoisonError::into_inner) = language;
    }

    /// Stores an automatic preference derived from the client locale.
    /// Always succeeds and overwrites any prior preference.
    pub fn set_auto(&self, actor: &ActorId, client_locale: &LanguageCode) -> LanguagePreference {
        let preference = LanguagePreference {
            language: derive_language(client_locale),
            mode: LanguageMode::Auto,
        };
        self.preferences
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(actor.clone(), preference.clone());
        preference
    }

    /// Pins a manual language preference.
    ///
    /// # Errors
    ///
    /// Returns [`LocaleError::UnsupportedLanguage`] when the language is
    /// not currently loaded; the prior preference is left unchanged.
    pub fn set_manual(&self, actor: &ActorId, language: &LanguageCode) -> Result<(), LocaleError> {
        let catalog = self.catalog.current();
        if !catalog.contains_language(language) {
            return Err(LocaleError::UnsupportedLanguage {
                requested: language.clone(),
                available: catalog.languages(),
            });
        }
        self.preferences.write().unwrap_or_else(PoisonError::into_inner).insert(
            actor.clone(),
            LanguagePreference {
                language: language.clone(),
                mode: LanguageMode::Manual,
            },
        );
        Ok(())
    }

    /// Returns the stored preference for an actor, if any.
    #[must_use]
    pub fn preference(&self, actor: &ActorId) -> Option<LanguagePreference> {
        self.preferences.read().unwrap_or_else(PoisonError::into_inner).get(actor).cloned()
    }

    /// Removes an actor's preference. Eviction hook for the host's
    /// session-lifecycle collaborator; never called by the engine itself.
    pub fn clear(&self, actor: &ActorId) {
        self.preferences.write().unwrap_or_else(PoisonError::into_inner).remove(actor);
    }

    /// Computes the language a caller resolves to right now.
    ///
    /// Console callers use the process default. Actors without a stored
    /// preference behave as automatic without persisting anything. Automatic
    /// mode recomputes from the supplied client locale on every call.
    #[must_use]
    pub fn resolved_language(&self, caller: &Caller) -> LanguageCode {
        let Some(actor) = caller.actor.as_ref() else {
            return self.default_language();
        };
        let derived = || {
            caller
                .client_locale
                .as_ref()
                .map_or_else(|| LanguageCode::new(BASE_LANGUAGE), derive_language)
        };
        match self.preference(actor) {
            Some(LanguagePreference {
                language,
                mode: LanguageMode::Manual,
            }) => language,
            Some(LanguagePreference {
                mode: LanguageMode::Auto,
                ..
            })
            | None => derived(),
        }
    }

    /// Resolves a message key to localized text for a caller.
    ///
    /// The fallback chain is resolved language, then the base language,
    /// then the raw key. Bare keys gain the `warden.` prefix for lookup;
    /// the final fallback returns the key exactly as supplied. When the
    /// template carries more `%s` placeholders than arguments supplied, the
    /// mismatch is logged and the unsubstituted template is returned.
    #[must_use]
    pub fn resolve(&self, caller: &Caller, key: &str, args: &[&str]) -> String {
        let full_key = prefixed_key(key);
        let language = self.resolved_language(caller);
        let catalog = self.catalog.current();
        let template = catalog.get(&language, &full_key).or_else(|| {
            let base = LanguageCode::new(BASE_LANGUAGE);
            if language.as_str() == BASE_LANGUAGE {
                None
            } else {
                catalog.get(&base, &full_key)
            }
        });
        let Some(template) = template else {
            return key.to_string();
        };
        substitute(template, args, &full_key)
    }

    /// Convenience wrapper resolving with the process default language.
    #[must_use]
    pub fn resolve_default(&self, key: &str, args: &[&str]) -> String {
        self.resolve(&Caller::console(), key, args)
    }
}

// ============================================================================
// SECTION: Template Substitution
// ============================================================================

/// Applies the `warden.` prefix to bare keys.
fn prefixed_key(key: &str) -> String {
    if key.starts_with(KEY_PREFIX) {
        key.to_string()
    } else {
        format!("{KEY_PREFIX}{key}")
    }
}

/// Substitutes positional `%s` placeholders in order. Too few arguments is
/// a format mismatch: the error is logged and the raw template returned.
/// Surplus arguments are ignored, matching positional formatter behavior.
fn substitute(template: &str, args: &[&str], key: &str) -> String {
    let placeholders = template.matches(PLACEHOLDER).count();
    if placeholders == 0 {
        return template.to_string();
    }
    if args.len() < placeholders {
        warn!(
            %key,
            placeholders,
            supplied = args.len(),
            "format argument mismatch; returning unsubstituted template"
        );
        return template.to_string();
    }
    let mut result = String::with_capacity(template.len());
    let mut rest = template;
    for arg in &args[..placeholders] {
        if let Some((head, tail)) = rest.split_once(PLACEHOLDER) {
            result.push_str(head);
            result.push_str(arg);
            rest = tail;
        }
    }
    result.push_str(rest);
    result
}
