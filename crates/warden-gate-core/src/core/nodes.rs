// crates/warden-gate-core/src/core/nodes.rs
// ============================================================================
// Module: Warden Gate Permission Nodes
// Description: Inventory of the permission nodes checked by the gate.
// Purpose: Centralize node spelling so gate and command layers stay in sync.
// Dependencies: crate::core::identifiers
// ============================================================================

//! ## Overview
//! Every permission node Warden Gate checks is defined here. Nodes are
//! dot-structured strings under the `warden.` prefix. Feature bypass nodes
//! and command nodes are derived from the prefixes at check time via
//! [`bypass_node`] and [`command_node`].

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::core::identifiers::PermissionNode;

// ============================================================================
// SECTION: Node Constants
// ============================================================================

/// Root prefix for all Warden Gate nodes.
pub const PREFIX: &str = "warden";

/// Full administrative access to every command and feature.
pub const ADMIN: &str = "warden.admin";

/// Prefix for per-command nodes (`warden.command.<command>`).
pub const COMMAND_PREFIX: &str = "warden.command";

/// Permission to reload configuration and catalogs.
pub const COMMAND_RELOAD: &str = "warden.command.reload";

/// Permission to enable or disable the engine.
pub const COMMAND_TOGGLE: &str = "warden.command.toggle";

/// Permission to manage debug mode.
pub const COMMAND_DEBUG: &str = "warden.command.debug";

/// Permission to change language settings.
pub const COMMAND_LANGUAGE: &str = "warden.command.language";

/// Permission to view engine status.
pub const COMMAND_STATUS: &str = "warden.command.status";

/// Permission to manage per-actor exemptions.
pub const COMMAND_EXEMPT: &str = "warden.command.exempt";

/// Prefix for per-feature bypass nodes (`warden.bypass.<feature>`).
pub const BYPASS_PREFIX: &str = "warden.bypass";

/// Bypass for every enforcement feature at once.
pub const BYPASS_ALL: &str = "warden.bypass.all";

/// Direct per-actor exemption from all enforcement.
pub const EXEMPT: &str = "warden.exempt";

/// Receive enforcement notifications.
pub const NOTIFICATION: &str = "warden.notification";

// ============================================================================
// SECTION: Derived Nodes
// ============================================================================

/// Builds the bypass node for a named feature.
#[must_use]
pub fn bypass_node(feature: &str) -> PermissionNode {
    PermissionNode::from(BYPASS_PREFIX).child(feature)
}

/// Builds the command node for a named command.
#[must_use]
pub fn command_node(command: &str) -> PermissionNode {
    PermissionNode::from(COMMAND_PREFIX).child(command)
}

/// Returns every statically known node, for registration with a backend.
#[must_use]
pub fn all_nodes() -> Vec<PermissionNode> {
    [
        ADMIN,
        COMMAND_RELOAD,
        COMMAND_TOGGLE,
        COMMAND_DEBUG,
        COMMAND_LANGUAGE,
        COMMAND_STATUS,
        COMMAND_EXEMPT,
        BYPASS_ALL,
        EXEMPT,
        NOTIFICATION,
    ]
    .into_iter()
    .map(PermissionNode::from)
    .collect()
}

/// Returns a human-readable description for a statically known node.
#[must_use]
pub fn describe(node: &PermissionNode) -> &'static str {
    match node.as_str() {
        ADMIN => "Full access to every Warden Gate command and feature",
        COMMAND_RELOAD => "Reload configuration and language catalogs",
        COMMAND_TOGGLE => "Enable or disable the engine",
        COMMAND_DEBUG => "Toggle debug mode",
        COMMAND_LANGUAGE => "Change language settings",
        COMMAND_STATUS => "View engine status",
        COMMAND_EXEMPT => "Manage per-actor exemptions",
        BYPASS_ALL => "Bypass every enforcement feature",
        EXEMPT => "Exempt from all enforcement",
        NOTIFICATION => "Receive enforcement notifications",
        _ => "Unknown node",
    }
}
