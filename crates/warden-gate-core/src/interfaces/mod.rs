// crates/warden-gate-core/src/interfaces/mod.rs
// ============================================================================
// Module: Warden Gate Interfaces
// Description: Backend-agnostic interfaces for permissions, sessions, and feedback.
// Purpose: Define the contract surfaces Warden Gate consumes from its host.
// Dependencies: crate::core
// ============================================================================

//! ## Overview
//! Interfaces define how Warden Gate integrates with external systems
//! without embedding backend-specific details. The permission backend is a
//! typed optional binding supplied at startup; when it is absent the gate
//! applies the configured unavailable-service policy instead of probing for
//! the backend at runtime.

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;

use crate::core::identifiers::ActorId;
use crate::core::identifiers::GroupName;
use crate::core::identifiers::LanguageCode;
use crate::core::identifiers::PermissionNode;

// ============================================================================
// SECTION: Caller Context
// ============================================================================

/// Context for the entity a command executes on behalf of.
///
/// Console and system callers carry no actor identifier. The client locale
/// is session-scoped and supplied per call, never stored by the engine. The
/// elevated flag is determined by the host (for example operator level) and
/// keeps administrative commands usable when the permission backend is
/// unavailable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caller {
    /// Actor identifier, absent for console/system callers.
    pub actor: Option<ActorId>,
    /// Display name used in audit log lines.
    pub name: String,
    /// Client-reported locale code for this invocation, if any.
    pub client_locale: Option<LanguageCode>,
    /// Whether the host considers this caller operator/admin-level.
    pub elevated: bool,
}

impl Caller {
    /// Creates a console/system caller context. Console callers are
    /// elevated by definition.
    #[must_use]
    pub fn console() -> Self {
        Self {
            actor: None,
            name: "console".to_string(),
            client_locale: None,
            elevated: true,
        }
    }

    /// Creates an actor caller context.
    #[must_use]
    pub fn actor(actor: ActorId, name: impl Into<String>) -> Self {
        Self {
            actor: Some(actor),
            name: name.into(),
            client_locale: None,
            elevated: false,
        }
    }

    /// Attaches the client-reported locale for this invocation.
    #[must_use]
    pub fn with_locale(mut self, locale: LanguageCode) -> Self {
        self.client_locale = Some(locale);
        self
    }

    /// Marks the caller as operator/admin-level.
    #[must_use]
    pub const fn with_elevated(mut self, elevated: bool) -> Self {
        self.elevated = elevated;
        self
    }
}

// ============================================================================
// SECTION: Permission Service
// ============================================================================

/// Permission backend errors.
#[derive(Debug, Error)]
pub enum PermissionError {
    /// No permission backend is bound.
    #[error("permission backend unavailable")]
    ServiceUnavailable,
    /// The backend reported an error.
    #[error("permission backend error: {0}")]
    Backend(String),
}

/// External permission backend consumed by the gate.
///
/// Implementations must never block the command path on I/O; checks are
/// expected to resolve against cached backend state.
pub trait PermissionService: Send + Sync {
    /// Checks whether the actor holds a permission node.
    ///
    /// # Errors
    ///
    /// Returns [`PermissionError`] when the backend call fails.
    fn check_permission(&self, actor: &ActorId, node: &PermissionNode)
    -> Result<bool, PermissionError>;

    /// Lists the groups the actor belongs to.
    ///
    /// # Errors
    ///
    /// Returns [`PermissionError`] when the backend call fails.
    fn list_groups(&self, actor: &ActorId) -> Result<Vec<GroupName>, PermissionError>;

    /// Adds the actor to a group.
    ///
    /// # Errors
    ///
    /// Returns [`PermissionError`] when the backend call fails.
    fn add_to_group(&self, actor: &ActorId, group: &GroupName) -> Result<(), PermissionError>;

    /// Removes the actor from a group.
    ///
    /// # Errors
    ///
    /// Returns [`PermissionError`] when the backend call fails.
    fn remove_from_group(&self, actor: &ActorId, group: &GroupName)
    -> Result<(), PermissionError>;
}

// ============================================================================
// SECTION: Actor Directory
// ============================================================================

/// Source of currently connected actors, used for name resolution and
/// tab-completion suggestions.
pub trait ActorDirectory {
    /// Returns the display names of currently connected actors.
    fn connected_names(&self) -> Vec<String>;

    /// Resolves a display name to an actor identifier, if connected.
    fn resolve(&self, name: &str) -> Option<ActorId>;
}

// ============================================================================
// SECTION: Feedback
// ============================================================================

/// Reply channel for command feedback.
///
/// Handlers render localized text and push it here; the host decides how
/// lines reach the caller (chat message, console line, HTTP body).
pub trait Feedback {
    /// Delivers one line of feedback to the caller.
    fn send(&mut self, line: &str);
}
