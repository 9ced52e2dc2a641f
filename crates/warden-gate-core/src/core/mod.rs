// crates/warden-gate-core/src/core/mod.rs
// ============================================================================
// Module: Warden Gate Core Types
// Description: Identifiers, translation catalog, and permission node model.
// Purpose: Group the data-model modules consumed by the runtime layer.
// Dependencies: crate::core::{catalog, defaults, identifiers, nodes}
// ============================================================================

//! ## Overview
//! The core layer holds the passive data model: opaque identifiers, the
//! in-memory translation catalog with its file loaders, the built-in
//! baseline message sets, and the permission-node inventory. Runtime
//! behavior (resolution, gating, lifecycle) lives in [`crate::runtime`].

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod catalog;
pub mod defaults;
pub mod identifiers;
pub mod nodes;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use catalog::CatalogError;
pub use catalog::CatalogSource;
pub use catalog::TranslationCatalog;
pub use identifiers::ActorId;
pub use identifiers::GroupName;
pub use identifiers::LanguageCode;
pub use identifiers::PermissionNode;
