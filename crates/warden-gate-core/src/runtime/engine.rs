// crates/warden-gate-core/src/runtime/engine.rs
// ============================================================================
// Module: Warden Gate Engine
// Description: Explicitly constructed engine instance and its lifecycle.
// Purpose: Own the shared runtime state and the init/reload/shutdown contract.
// Dependencies: crate::{core, interfaces, runtime}, tracing
// ============================================================================

//! ## Overview
//! The engine replaces the process-wide singletons of earlier designs with
//! one explicitly constructed instance passed by reference to command
//! handlers. `init` runs the catalog build chain (migrate, load, bootstrap
//! defaults); `reload` rebuilds a complete replacement catalog off to the
//! side and publishes it atomically, leaving the previous catalog intact on
//! failure. Actor language preferences survive reload.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;

use thiserror::Error;
use tracing::info;
use tracing::warn;

use crate::core::catalog::CatalogError;
use crate::core::catalog::CatalogSource;
use crate::core::identifiers::ActorId;
use crate::core::identifiers::GroupName;
use crate::core::identifiers::LanguageCode;
use crate::interfaces::PermissionService;
use crate::runtime::gate::PermissionGate;
use crate::runtime::gate::UnavailablePolicy;
use crate::runtime::locale::BASE_LANGUAGE;
use crate::runtime::locale::CatalogHandle;
use crate::runtime::locale::LocaleResolver;

// ============================================================================
// SECTION: Engine Options
// ============================================================================

/// Startup options for an engine instance, read from the persisted
/// configuration by the host.
#[derive(Debug, Clone)]
pub struct EngineOptions {
    /// Directory holding per-language translation files.
    pub lang_dir: PathBuf,
    /// Process-wide default language for console/system callers.
    pub default_language: LanguageCode,
    /// Whether enforcement starts enabled.
    pub enabled: bool,
    /// Whether debug mode starts enabled.
    pub debug: bool,
    /// Group names treated as globally exempt.
    pub bypass_groups: Vec<GroupName>,
    /// Group the exempt command adds actors to.
    pub exempt_group: GroupName,
    /// Policy applied when no permission backend is bound.
    pub unavailable_policy: UnavailablePolicy,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            lang_dir: PathBuf::from("lang"),
            default_language: LanguageCode::new(BASE_LANGUAGE),
            enabled: true,
            debug: false,
            bypass_groups: vec![GroupName::from("admin"), GroupName::from("mod")],
            exempt_group: GroupName::from("warden-exempt"),
            unavailable_policy: UnavailablePolicy::default(),
        }
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Engine lifecycle errors.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Catalog initialization failed.
    #[error("engine init failed: {0}")]
    Init(#[source] CatalogError),
    /// Catalog reload failed; the previous catalog remains published.
    #[error("engine reload failed: {0}")]
    Reload(#[source] CatalogError),
}

// ============================================================================
// SECTION: Engine
// ============================================================================

/// Runtime authorization-and-localization engine instance.
pub struct Engine {
    /// Catalog directory loader used by init and reload.
    source: CatalogSource,
    /// Handle to the published catalog.
    catalog: CatalogHandle,
    /// Localization resolver over the catalog.
    resolver: LocaleResolver,
    /// Authorization façade.
    gate: PermissionGate,
    /// Whether enforcement is currently enabled.
    enabled: AtomicBool,
    /// Whether debug mode is currently enabled.
    debug: AtomicBool,
    /// Group the exempt command mutates.
    exempt_group: GroupName,
}

impl Engine {
    /// Initializes an engine: migrates legacy files, loads every language
    /// file, bootstraps baselines, and wires the resolver and gate.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Init`] when the catalog directory cannot be
    /// prepared. Individual file failures are logged and skipped.
    pub fn init(
        options: EngineOptions,
        backend: Option<Arc<dyn PermissionService>>,
    ) -> Result<Self, EngineError> {
        let source = CatalogSource::new(options.lang_dir);
        let built = source.build().map_err(EngineError::Init)?;
        info!(
            languages = built.languages().len(),
            entries = built.entry_count(),
            "translation catalog initialized"
        );
        let catalog = CatalogHandle::new(built);
        let resolver = LocaleResolver::new(catalog.clone(), options.default_language);
        let gate =
            PermissionGate::new(backend, options.unavailable_policy, options.bypass_groups);
        Ok(Self {
            source,
            catalog,
            resolver,
            gate,
            enabled: AtomicBool::new(options.enabled),
            debug: AtomicBool::new(options.debug),
            exempt_group: options.exempt_group,
        })
    }

    /// Rebuilds the catalog from disk and publishes it atomically.
    ///
    /// Concurrent resolutions see either the old or the new catalog, never
    /// a mix. Actor language preferences are not cleared.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Reload`] when the rebuild fails; the
    /// previously published catalog stays in place.
    pub fn reload(&self) -> Result<(), EngineError> {
        match self.source.build() {
            Ok(replacement) => {
                info!(
                    languages = replacement.languages().len(),
                    entries = replacement.entry_count(),
                    "translation catalog reloaded"
                );
                self.catalog.publish(replacement);
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "catalog reload failed; keeping previous catalog");
                Err(EngineError::Reload(err))
            }
        }
    }

    /// Shuts the engine down. State is in-memory; this logs the shutdown so
    /// hosts can order it against their own teardown.
    pub fn shutdown(&self) {
        info!("warden gate engine shut down");
    }

    /// Eviction hook for the host's session-lifecycle collaborator. Not
    /// called by the engine itself: disconnect does not imply permanent
    /// removal, so eviction stays the host's choice.
    pub fn on_actor_gone(&self, actor: &ActorId) {
        self.resolver.clear(actor);
    }

    /// Returns the localization resolver.
    #[must_use]
    pub const fn resolver(&self) -> &LocaleResolver {
        &self.resolver
    }

    /// Returns the permission gate.
    #[must_use]
    pub const fn gate(&self) -> &PermissionGate {
        &self.gate
    }

    /// Returns the group the exempt command mutates.
    #[must_use]
    pub const fn exempt_group(&self) -> &GroupName {
        &self.exempt_group
    }

    /// Returns whether enforcement is currently enabled.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Relaxed)
    }

    /// Sets the enforcement flag.
    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::Relaxed);
    }

    /// Returns whether debug mode is currently enabled.
    #[must_use]
    pub fn is_debug(&self) -> bool {
        self.debug.load(Ordering::Relaxed)
    }

    /// Sets the debug flag.
    pub fn set_debug(&self, debug: bool) {
        self.debug.store(debug, Ordering::Relaxed);
    }
}
