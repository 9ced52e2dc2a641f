// crates/warden-gate-core/src/runtime/gate.rs
// ============================================================================
// Module: Warden Gate Permission Gate
// Description: Authorization façade composing direct grants, bypass nodes, and groups.
// Purpose: Decide command authorization and feature exemption with a fail-soft backend.
// Dependencies: crate::{core, interfaces}, tracing
// ============================================================================

//! ## Overview
//! The gate is the façade the command layer authorizes through. It composes
//! direct permission checks, per-feature bypass nodes, and group-based
//! bypass lists against an optionally bound [`PermissionService`]. When the
//! backend is unbound the configured [`UnavailablePolicy`] applies: feature
//! checks fail closed while, under the default policy, elevated callers
//! keep access to administrative commands.
//!
//! ## Invariants
//! - No gate method panics or performs blocking I/O.
//! - Backend failures are logged per call and degrade to a deny (or to an
//!   empty group set for the group clause), never escalate.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;

use serde::Deserialize;
use serde::Serialize;
use tracing::warn;

use crate::core::identifiers::ActorId;
use crate::core::identifiers::GroupName;
use crate::core::identifiers::PermissionNode;
use crate::core::nodes;
use crate::interfaces::Caller;
use crate::interfaces::PermissionError;
use crate::interfaces::PermissionService;

// ============================================================================
// SECTION: Unavailable Policy
// ============================================================================

/// Fallback policy applied when no permission backend is bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnavailablePolicy {
    /// Deny every check unconditionally.
    DenyAll,
    /// Deny feature checks but authorize operator/admin-level callers, so
    /// administrative commands stay usable during a backend outage.
    #[default]
    AllowElevated,
}

// ============================================================================
// SECTION: Permission Gate
// ============================================================================

/// Authorization façade for command handlers and enforcement features.
#[derive(Clone)]
pub struct PermissionGate {
    /// Optionally bound permission backend.
    backend: Option<Arc<dyn PermissionService>>,
    /// Policy applied when the backend is unbound.
    policy: UnavailablePolicy,
    /// Group names treated as globally exempt.
    bypass_groups: Vec<GroupName>,
}

impl PermissionGate {
    /// Creates a gate over an optional backend binding.
    #[must_use]
    pub fn new(
        backend: Option<Arc<dyn PermissionService>>,
        policy: UnavailablePolicy,
        bypass_groups: Vec<GroupName>,
    ) -> Self {
        Self {
            backend,
            policy,
            bypass_groups,
        }
    }

    /// Returns true when a permission backend is bound.
    #[must_use]
    pub const fn is_backend_bound(&self) -> bool {
        self.backend.is_some()
    }

    /// Returns the configured bypass groups.
    #[must_use]
    pub fn bypass_groups(&self) -> &[GroupName] {
        &self.bypass_groups
    }

    /// Checks whether the caller holds a permission node.
    ///
    /// Delegates to the backend when bound; backend errors are logged and
    /// deny. When unbound, the unavailable policy applies.
    #[must_use]
    pub fn has_permission(&self, caller: &Caller, node: &PermissionNode) -> bool {
        if !node.is_valid() {
            return false;
        }
        let Some(backend) = self.backend.as_deref() else {
            return match self.policy {
                UnavailablePolicy::DenyAll => false,
                UnavailablePolicy::AllowElevated => caller.elevated,
            };
        };
        let Some(actor) = caller.actor.as_ref() else {
            // Console callers have no backend identity; elevation decides.
            return caller.elevated;
        };
        match backend.check_permission(actor, node) {
            Ok(granted) => granted,
            Err(err) => {
                warn!(actor = %actor, node = %node, error = %err, "permission check failed");
                false
            }
        }
    }

    /// Checks command authorization: the admin node or the per-command node.
    #[must_use]
    pub fn has_command_permission(&self, caller: &Caller, command: &str) -> bool {
        self.has_permission(caller, &PermissionNode::from(nodes::ADMIN))
            || self.has_permission(caller, &nodes::command_node(command))
    }

    /// Checks feature exemption: the global bypass node, the per-feature
    /// bypass node, or membership in a configured bypass group.
    ///
    /// An unbound backend denies every clause regardless of policy; the
    /// elevated shortcut is reserved for command authorization. Group
    /// listing failures degrade to an empty set and are logged.
    #[must_use]
    pub fn has_exemption(&self, caller: &Caller, feature: &str) -> bool {
        if self.backend.is_none() {
            return false;
        }
        if self.has_permission(caller, &PermissionNode::from(nodes::BYPASS_ALL))
            || self.has_permission(caller, &nodes::bypass_node(feature))
        {
            return true;
        }
        self.groups(caller).iter().any(|group| self.bypass_groups.contains(group))
    }

    /// Checks the direct per-actor exemption node.
    #[must_use]
    pub fn is_exempt(&self, caller: &Caller) -> bool {
        self.has_permission(caller, &PermissionNode::from(nodes::EXEMPT))
    }

    /// Lists the caller's groups. Unbound backends, console callers, and
    /// backend failures all yield the empty set.
    #[must_use]
    pub fn groups(&self, caller: &Caller) -> Vec<GroupName> {
        let Some(backend) = self.backend.as_deref() else {
            return Vec::new();
        };
        let Some(actor) = caller.actor.as_ref() else {
            return Vec::new();
        };
        match backend.list_groups(actor) {
            Ok(groups) => groups,
            Err(err) => {
                warn!(actor = %actor, error = %err, "group listing failed");
                Vec::new()
            }
        }
    }

    /// Checks group membership, ignoring ASCII case.
    #[must_use]
    pub fn is_in_group(&self, caller: &Caller, group: &str) -> bool {
        self.groups(caller).iter().any(|member| member.matches(group))
    }

    /// Adds an actor to a group through the backend.
    ///
    /// # Errors
    ///
    /// Returns [`PermissionError::ServiceUnavailable`] when no backend is
    /// bound, and the backend's error when the underlying call fails.
    pub fn add_to_group(&self, actor: &ActorId, group: &GroupName) -> Result<(), PermissionError> {
        self.bound_backend()?.add_to_group(actor, group)
    }

    /// Removes an actor from a group through the backend.
    ///
    /// # Errors
    ///
    /// Returns [`PermissionError::ServiceUnavailable`] when no backend is
    /// bound, and the backend's error when the underlying call fails.
    pub fn remove_from_group(
        &self,
        actor: &ActorId,
        group: &GroupName,
    ) -> Result<(), PermissionError> {
        self.bound_backend()?.remove_from_group(actor, group)
    }

    /// Returns the backend or the unavailable error for mutations.
    fn bound_backend(&self) -> Result<&dyn PermissionService, PermissionError> {
        self.backend.as_deref().ok_or(PermissionError::ServiceUnavailable)
    }
}
