// crates/warden-gate-core/src/runtime/mod.rs
// ============================================================================
// Module: Warden Gate Runtime
// Description: Localization resolution, permission gating, and engine lifecycle.
// Purpose: Group the active runtime modules built on the core data model.
// Dependencies: crate::{core, interfaces}
// ============================================================================

//! ## Overview
//! The runtime layer holds the shared, long-lived state read by concurrent
//! command threads: the published catalog, the per-actor language
//! preference map, and the permission gate. Reads never block each other
//! and never observe partially rebuilt state; reload publishes a complete
//! replacement catalog with a single reference swap.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod commands;
pub mod engine;
pub mod gate;
pub mod locale;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use commands::ExemptAction;
pub use engine::Engine;
pub use engine::EngineError;
pub use engine::EngineOptions;
pub use gate::PermissionGate;
pub use gate::UnavailablePolicy;
pub use locale::CatalogHandle;
pub use locale::LanguageMode;
pub use locale::LanguagePreference;
pub use locale::LocaleError;
pub use locale::LocaleResolver;
pub use locale::derive_language;
