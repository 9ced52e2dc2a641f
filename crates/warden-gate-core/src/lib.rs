// crates/warden-gate-core/src/lib.rs
// ============================================================================
// Module: Warden Gate Core Library
// Description: Public API surface for the Warden Gate core.
// Purpose: Expose core types, interfaces, and runtime helpers.
// Dependencies: crate::{core, interfaces, runtime}
// ============================================================================

//! ## Overview
//! Warden Gate core provides runtime authorization and localization
//! resolution for actor-initiated commands. It decides whether an actor may
//! perform a requested action given direct grants, group inheritance, and
//! per-feature bypass rules, and which localized message text to render for
//! that actor. It is backend-agnostic and integrates through explicit
//! interfaces rather than embedding into a host framework.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod core;
pub mod interfaces;
pub mod runtime;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use core::*;

pub use interfaces::ActorDirectory;
pub use interfaces::Caller;
pub use interfaces::Feedback;
pub use interfaces::PermissionError;
pub use interfaces::PermissionService;
pub use runtime::CatalogHandle;
pub use runtime::Engine;
pub use runtime::EngineError;
pub use runtime::EngineOptions;
pub use runtime::ExemptAction;
pub use runtime::LanguageMode;
pub use runtime::LanguagePreference;
pub use runtime::LocaleError;
pub use runtime::LocaleResolver;
pub use runtime::PermissionGate;
pub use runtime::UnavailablePolicy;
pub use runtime::commands;
pub use runtime::commands::HANDLER_FAILED;
pub use runtime::commands::HANDLER_OK;
pub use runtime::derive_language;
