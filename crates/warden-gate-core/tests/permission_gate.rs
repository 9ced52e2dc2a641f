// crates/warden-gate-core/tests/permission_gate.rs
// ============================================================================
// Module: Permission Gate Tests
// Description: Tests for command authorization and feature exemption.
// Purpose: Ensure grant composition and unavailable-backend policies hold.
// Dependencies: warden-gate-core
// ============================================================================
//! ## Overview
//! Validates the gate's three exemption clauses, the admin-or-command
//! authorization rule, and the degrade behavior for unbound and failing
//! backends.

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

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;

use warden_gate_core::ActorId;
use warden_gate_core::Caller;
use warden_gate_core::GroupName;
use warden_gate_core::PermissionError;
use warden_gate_core::PermissionGate;
use warden_gate_core::PermissionNode;
use warden_gate_core::PermissionService;
use warden_gate_core::UnavailablePolicy;

/// In-memory backend with per-actor nodes and groups, plus a failure switch.
#[derive(Default)]
struct MemoryBackend {
    /// Granted nodes keyed by actor id.
    permissions: Mutex<HashMap<String, Vec<String>>>,
    /// Group memberships keyed by actor id.
    groups: Mutex<HashMap<String, Vec<String>>>,
    /// When true every call fails with a backend error.
    failing: bool,
}

impl MemoryBackend {
    /// Grants a node to an actor.
    fn grant(&self, actor: &str, node: &str) {
        self.permissions
            .lock()
            .expect("lock")
            .entry(actor.to_string())
            .or_default()
            .push(node.to_string());
    }

    /// Places an actor in a group.
    fn join(&self, actor: &str, group: &str) {
        self.groups
            .lock()
            .expect("lock")
            .entry(actor.to_string())
            .or_default()
            .push(group.to_string());
    }
}

impl PermissionService for MemoryBackend {
    fn check_permission(
        &self,
        actor: &ActorId,
        node: &PermissionNode,
    ) -> Result<bool, PermissionError> {
        if self.failing {
            return Err(PermissionError::Backend("backend offline".to_string()));
        }
        let permissions = self.permissions.lock().expect("lock");
        Ok(permissions
            .get(actor.as_str())
            .is_some_and(|nodes| nodes.iter().any(|held| held == node.as_str())))
    }

    fn list_groups(&self, actor: &ActorId) -> Result<Vec<GroupName>, PermissionError> {
        if self.failing {
            return Err(PermissionError::Backend("backend offline".to_string()));
        }
        let groups = self.groups.lock().expect("lock");
        Ok(groups
            .get(actor.as_str())
            .map(|names| names.iter().map(|name| GroupName::from(name.as_str())).collect())
            .unwrap_or_default())
    }

    fn add_to_group(&self, actor: &ActorId, group: &GroupName) -> Result<(), PermissionError> {
        if self.failing {
            return Err(PermissionError::Backend("backend offline".to_string()));
        }
        self.join(actor.as_str(), group.as_str());
        Ok(())
    }

    fn remove_from_group(&self, actor: &ActorId, group: &GroupName) -> Result<(), PermissionError> {
        if self.failing {
            return Err(PermissionError::Backend("backend offline".to_string()));
        }
        let mut groups = self.groups.lock().expect("lock");
        if let Some(names) = groups.get_mut(actor.as_str()) {
            names.retain(|name| !name.eq_ignore_ascii_case(group.as_str()));
        }
        Ok(())
    }
}

/// Wraps a backend in a gate with the default bypass groups.
fn gate_over(backend: Arc<MemoryBackend>) -> PermissionGate {
    PermissionGate::new(
        Some(backend),
        UnavailablePolicy::default(),
        vec![GroupName::from("admin"), GroupName::from("mod")],
    )
}

/// Builds a plain, non-elevated actor caller.
fn player(id: &str) -> Caller {
    Caller::actor(ActorId::new(id), id)
}

/// Verifies the admin node authorizes every command.
#[test]
fn admin_node_authorizes_all_commands() {
    let backend = Arc::new(MemoryBackend::default());
    backend.grant("a1", "warden.admin");
    let gate = gate_over(backend);
    let caller = player("a1");

    assert!(gate.has_command_permission(&caller, "reload"));
    assert!(gate.has_command_permission(&caller, "exempt"));
}

/// Verifies a per-command node authorizes only that command.
#[test]
fn command_node_authorizes_only_its_command() {
    let backend = Arc::new(MemoryBackend::default());
    backend.grant("a1", "warden.command.toggle");
    let gate = gate_over(backend);
    let caller = player("a1");

    assert!(gate.has_command_permission(&caller, "toggle"));
    assert!(!gate.has_command_permission(&caller, "reload"));
}

/// Verifies exemption through each clause: global bypass node, per-feature
/// bypass node, and bypass-group membership.
#[test]
fn exemption_composes_three_clauses() {
    let backend = Arc::new(MemoryBackend::default());
    backend.grant("all", "warden.bypass.all");
    backend.grant("feature", "warden.bypass.speed");
    backend.join("grouped", "MOD");
    let gate = gate_over(backend);

    assert!(gate.has_exemption(&player("all"), "speed"));
    assert!(gate.has_exemption(&player("all"), "reach"));
    assert!(gate.has_exemption(&player("feature"), "speed"));
    assert!(!gate.has_exemption(&player("feature"), "reach"));
    assert!(gate.has_exemption(&player("grouped"), "speed"));
    assert!(!gate.has_exemption(&player("nobody"), "speed"));
}

/// Verifies the direct exemption node is independent of bypass clauses.
#[test]
fn direct_exempt_node_is_checked_separately() {
    let backend = Arc::new(MemoryBackend::default());
    backend.grant("a1", "warden.exempt");
    let gate = gate_over(backend);

    assert!(gate.is_exempt(&player("a1")));
    assert!(!gate.is_exempt(&player("a2")));
}

/// Verifies the allow-elevated policy keeps administrative commands usable
/// for elevated callers while denying everyone else.
#[test]
fn unbound_backend_allow_elevated_policy() {
    let gate = PermissionGate::new(None, UnavailablePolicy::AllowElevated, Vec::new());
    let operator = player("op").with_elevated(true);
    let regular = player("a1");

    assert!(gate.has_command_permission(&operator, "reload"));
    assert!(!gate.has_command_permission(&regular, "reload"));
    assert!(!gate.has_exemption(&regular, "speed"));
}

/// Verifies feature exemption stays denied for elevated callers when the
/// backend is unbound, even under the allow-elevated policy.
#[test]
fn unbound_backend_never_exempts_elevated_callers() {
    let gate = PermissionGate::new(None, UnavailablePolicy::AllowElevated, Vec::new());
    let operator = player("op").with_elevated(true);

    assert!(!gate.has_exemption(&operator, "speed"));
    assert!(!gate.has_exemption(&Caller::console(), "speed"));
}

/// Verifies the deny-all policy rejects even elevated callers.
#[test]
fn unbound_backend_deny_all_policy() {
    let gate = PermissionGate::new(None, UnavailablePolicy::DenyAll, Vec::new());
    let operator = player("op").with_elevated(true);

    assert!(!gate.has_command_permission(&operator, "reload"));
    assert!(!gate.is_exempt(&operator));
}

/// Verifies a failing backend degrades to deny and empty groups instead of
/// surfacing the error.
#[test]
fn failing_backend_degrades_to_deny() {
    let backend = Arc::new(MemoryBackend {
        failing: true,
        ..MemoryBackend::default()
    });
    let gate = gate_over(backend);
    let caller = player("a1");

    assert!(!gate.has_command_permission(&caller, "reload"));
    assert!(!gate.has_exemption(&caller, "speed"));
    assert!(gate.groups(&caller).is_empty());
}

/// Verifies console callers with a bound backend fall back to elevation.
#[test]
fn console_caller_with_backend_uses_elevation() {
    let backend = Arc::new(MemoryBackend::default());
    let gate = gate_over(backend);

    assert!(gate.has_command_permission(&Caller::console(), "reload"));
    assert!(gate.groups(&Caller::console()).is_empty());
}

/// Verifies group mutations without a backend report unavailability.
#[test]
fn group_mutation_without_backend_is_unavailable() {
    let gate = PermissionGate::new(None, UnavailablePolicy::default(), Vec::new());
    let actor = ActorId::new("a1");
    let group = GroupName::from("warden-exempt");

    let result = gate.add_to_group(&actor, &group);
    assert!(matches!(result, Err(PermissionError::ServiceUnavailable)));
    let result = gate.remove_from_group(&actor, &group);
    assert!(matches!(result, Err(PermissionError::ServiceUnavailable)));
}

/// Verifies group membership checks ignore ASCII case.
#[test]
fn group_membership_ignores_case() {
    let backend = Arc::new(MemoryBackend::default());
    backend.join("a1", "Staff");
    let gate = gate_over(backend);

    assert!(gate.is_in_group(&player("a1"), "staff"));
    assert!(!gate.is_in_group(&player("a1"), "admin"));
}
