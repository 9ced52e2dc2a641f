// crates/warden-gate-core/src/runtime/commands.rs
// ============================================================================
// Module: Warden Gate Command Handlers
// Description: Handlers for the administrative command surface.
// Purpose: Authorize, act, and render localized feedback with stable handler codes.
// Dependencies: crate::{core, interfaces, runtime}, tracing
// ============================================================================

//! ## Overview
//! Each handler authorizes through the permission gate, performs its
//! action, and renders every line of feedback through the localization
//! resolver, so failure text reaches the caller in their own language.
//! Handlers return [`HANDLER_OK`] on success and [`HANDLER_FAILED`] on any
//! rejected or failed operation; they never panic and never propagate
//! errors past the feedback channel.

// ============================================================================
// SECTION: Imports
// ============================================================================

use tracing::info;

use crate::core::identifiers::LanguageCode;
use crate::interfaces::ActorDirectory;
use crate::interfaces::Caller;
use crate::interfaces::Feedback;
use crate::runtime::engine::Engine;
use crate::runtime::locale::BASE_LANGUAGE;
use crate::runtime::locale::LanguageMode;

// ============================================================================
// SECTION: Handler Codes
// ============================================================================

/// Handler return code for a successful operation.
pub const HANDLER_OK: i32 = 1;

/// Handler return code for a rejected or failed operation.
pub const HANDLER_FAILED: i32 = 0;

// ============================================================================
// SECTION: Exempt Action
// ============================================================================

/// Requested mutation for the exempt command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExemptAction {
    /// Add the target to the exempt group.
    Add,
    /// Remove the target from the exempt group.
    Remove,
}

impl ExemptAction {
    /// Parses the command argument, case-insensitively.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.to_ascii_lowercase().as_str() {
            "add" => Some(Self::Add),
            "remove" => Some(Self::Remove),
            _ => None,
        }
    }

    /// Returns the canonical argument spelling.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Remove => "remove",
        }
    }
}

// ============================================================================
// SECTION: Authorization Helper
// ============================================================================

/// Authorizes a caller for a named command, sending localized denial
/// feedback when the check fails.
fn authorize(engine: &Engine, caller: &Caller, command: &str, feedback: &mut dyn Feedback) -> bool {
    if caller.elevated || engine.gate().has_command_permission(caller, command) {
        return true;
    }
    feedback.send(&engine.resolver().resolve(caller, "command.no_permission", &[]));
    false
}

// ============================================================================
// SECTION: Handlers
// ============================================================================

/// Reloads the configuration-driven catalogs.
pub fn reload(engine: &Engine, caller: &Caller, feedback: &mut dyn Feedback) -> i32 {
    if !authorize(engine, caller, "reload", feedback) {
        return HANDLER_FAILED;
    }
    match engine.reload() {
        Ok(()) => {
            info!(caller = %caller.name, "configuration reloaded");
            feedback.send(&engine.resolver().resolve(caller, "command.reload.success", &[]));
            HANDLER_OK
        }
        Err(err) => {
            let message = err.to_string();
            feedback.send(&engine.resolver().resolve(caller, "command.reload.failed", &[&message]));
            HANDLER_FAILED
        }
    }
}

/// Enables or disables enforcement. Without an explicit value the current
/// state is inverted.
pub fn toggle(
    engine: &Engine,
    caller: &Caller,
    value: Option<bool>,
    feedback: &mut dyn Feedback,
) -> i32 {
    if !authorize(engine, caller, "toggle", feedback) {
        return HANDLER_FAILED;
    }
    let enabled = value.unwrap_or(!engine.is_enabled());
    engine.set_enabled(enabled);
    let key = if enabled {
        "command.toggle.enable_success"
    } else {
        "command.toggle.disable_success"
    };
    info!(caller = %caller.name, enabled, "enforcement toggled");
    feedback.send(&engine.resolver().resolve(caller, key, &[]));
    HANDLER_OK
}

/// Enables or disables debug mode. Without an explicit value the current
/// state is inverted.
pub fn debug(
    engine: &Engine,
    caller: &Caller,
    value: Option<bool>,
    feedback: &mut dyn Feedback,
) -> i32 {
    if !authorize(engine, caller, "debug", feedback) {
        return HANDLER_FAILED;
    }
    let debug_on = value.unwrap_or(!engine.is_debug());
    engine.set_debug(debug_on);
    let key = if debug_on {
        "command.debug.enable_success"
    } else {
        "command.debug.disable_success"
    };
    info!(caller = %caller.name, debug = debug_on, "debug mode toggled");
    feedback.send(&engine.resolver().resolve(caller, key, &[]));
    HANDLER_OK
}

/// Shows or changes language settings.
///
/// Without an argument the caller's current language and mode are shown.
/// `auto` switches an actor to automatic derivation; a language code pins
/// an actor preference, or sets the server default when the caller is the
/// console.
pub fn language(
    engine: &Engine,
    caller: &Caller,
    argument: Option<&str>,
    feedback: &mut dyn Feedback,
) -> i32 {
    if !authorize(engine, caller, "language", feedback) {
        return HANDLER_FAILED;
    }
    let resolver = engine.resolver();
    match argument {
        None => {
            let current = resolver.resolved_language(caller);
            let mode_key = caller.actor.as_ref().map_or(
                "command.language.server_default",
                |actor| match resolver.preference(actor) {
                    Some(preference) if preference.mode == LanguageMode::Manual => {
                        "command.language.mode_manual"
                    }
                    _ => "command.language.mode_auto",
                },
            );
            let mode = resolver.resolve(caller, mode_key, &[]);
            feedback.send(&resolver.resolve(
                caller,
                "command.language.current",
                &[current.as_str(), &mode],
            ));
            HANDLER_OK
        }
        Some("auto") => {
            let Some(actor) = caller.actor.as_ref() else {
                feedback.send(&resolver.resolve(caller, "command.language.console_auto", &[]));
                return HANDLER_FAILED;
            };
            let locale = caller
                .client_locale
                .clone()
                .unwrap_or_else(|| LanguageCode::new(BASE_LANGUAGE));
            let preference = resolver.set_auto(actor, &locale);
            info!(caller = %caller.name, language = %preference.language, "language set to auto");
            feedback.send(&resolver.resolve(
                caller,
                "command.language.auto_mode",
                &[preference.language.as_str()],
            ));
            HANDLER_OK
        }
        Some(code) => {
            let requested = LanguageCode::new(code);
            let outcome = caller.actor.as_ref().map_or_else(
                || set_console_language(engine, &requested),
                |actor| resolver.set_manual(actor, &requested).is_ok(),
            );
            if outcome {
                info!(caller = %caller.name, language = %requested, "language changed");
                feedback.send(&resolver.resolve(
                    caller,
                    "command.language.success",
                    &[requested.as_str()],
                ));
                HANDLER_OK
            } else {
                let available = resolver
                    .catalog()
                    .current()
                    .languages()
                    .iter()
                    .map(|code| code.as_str().to_string())
                    .collect::<Vec<_>>()
                    .join(", ");
                feedback.send(&resolver.resolve(
                    caller,
                    "command.language.unsupported",
                    &[requested.as_str()],
                ));
                feedback.send(&resolver.resolve(
                    caller,
                    "command.language.available",
                    &[&available],
                ));
                HANDLER_FAILED
            }
        }
    }
}

/// Sets the process-wide default language when the code is loaded.
fn set_console_language(engine: &Engine, requested: &LanguageCode) -> bool {
    let resolver = engine.resolver();
    if resolver.catalog().current().contains_language(requested) {
        resolver.set_default_language(requested.clone());
        true
    } else {
        false
    }
}

/// Shows engine status. Available to every caller.
pub fn status(engine: &Engine, caller: &Caller, feedback: &mut dyn Feedback) -> i32 {
    let resolver = engine.resolver();
    let state_key = |on: bool| if on { "status.enabled" } else { "status.disabled" };
    let engine_state = resolver.resolve(caller, state_key(engine.is_enabled()), &[]);
    let debug_state = resolver.resolve(caller, state_key(engine.is_debug()), &[]);
    let backend_key = if engine.gate().is_backend_bound() {
        "status.backend.bound"
    } else {
        "status.backend.unbound"
    };
    let backend_state = resolver.resolve(caller, backend_key, &[]);
    let language = resolver.resolved_language(caller);

    feedback.send(&resolver.resolve(caller, "status.title", &[]));
    feedback.send(&status_line(resolver.resolve(caller, "status.engine", &[]), &engine_state));
    feedback.send(&status_line(resolver.resolve(caller, "status.debug", &[]), &debug_state));
    feedback
        .send(&status_line(resolver.resolve(caller, "status.language", &[]), language.as_str()));
    feedback.send(&status_line(resolver.resolve(caller, "status.backend", &[]), &backend_state));
    HANDLER_OK
}

/// Formats one `label: value` status line.
fn status_line(label: String, value: &str) -> String {
    format!("{label}: {value}")
}

/// Shows command help. Available to every caller.
pub fn help(engine: &Engine, caller: &Caller, feedback: &mut dyn Feedback) -> i32 {
    let resolver = engine.resolver();
    feedback.send(&resolver.resolve(caller, "command.help.title", &[]));
    for key in [
        "command.help.reload",
        "command.help.toggle",
        "command.help.debug",
        "command.help.language",
        "command.help.status",
        "command.help.exempt",
        "command.help.help",
    ] {
        feedback.send(&resolver.resolve(caller, key, &[]));
    }
    HANDLER_OK
}

/// Adds or removes an actor's exemption by mutating the configured exempt
/// group through the permission backend.
pub fn exempt(
    engine: &Engine,
    directory: &dyn ActorDirectory,
    caller: &Caller,
    target_name: &str,
    action: &str,
    feedback: &mut dyn Feedback,
) -> i32 {
    if !authorize(engine, caller, "exempt", feedback) {
        return HANDLER_FAILED;
    }
    let resolver = engine.resolver();
    let Some(action) = ExemptAction::parse(action) else {
        feedback.send(&resolver.resolve(caller, "command.exempt.invalid_state", &[]));
        return HANDLER_FAILED;
    };
    let Some(target) = directory.resolve(target_name) else {
        feedback.send(&resolver.resolve(
            caller,
            "command.exempt.actor_not_found",
            &[target_name],
        ));
        return HANDLER_FAILED;
    };
    let gate = engine.gate();
    let group = engine.exempt_group();
    let result = match action {
        ExemptAction::Add => gate.add_to_group(&target, group),
        ExemptAction::Remove => gate.remove_from_group(&target, group),
    };
    match result {
        Ok(()) => {
            let key = match action {
                ExemptAction::Add => "command.exempt.added",
                ExemptAction::Remove => "command.exempt.removed",
            };
            info!(
                caller = %caller.name,
                target = target_name,
                action = action.as_str(),
                "exemption updated"
            );
            feedback.send(&resolver.resolve(caller, key, &[target_name]));
            HANDLER_OK
        }
        Err(err) => {
            let message = err.to_string();
            feedback.send(&resolver.resolve(caller, "command.exempt.failed", &[&message]));
            HANDLER_FAILED
        }
    }
}

// ============================================================================
// SECTION: Completion
// ============================================================================

/// Returns tab-completion candidates for actor-name arguments, sourced from
/// the currently connected actors.
#[must_use]
pub fn suggest_actors(directory: &dyn ActorDirectory, prefix: &str) -> Vec<String> {
    let needle = prefix.to_ascii_lowercase();
    let mut names: Vec<String> = directory
        .connected_names()
        .into_iter()
        .filter(|name| name.to_ascii_lowercase().starts_with(&needle))
        .collect();
    names.sort();
    names
}
