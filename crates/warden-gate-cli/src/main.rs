// crates/warden-gate-cli/src/main.rs
// ============================================================================
// Module: Warden Gate CLI Entry Point
// Description: Command dispatcher for the Warden Gate engine.
// Purpose: Run one administrative command against a locally constructed engine.
// Dependencies: clap, tracing-subscriber, warden-gate-config, warden-gate-core
// ============================================================================

//! ## Overview
//! The CLI constructs an engine from the persisted configuration, optionally
//! binds a JSON grants file as the permission backend, runs exactly one
//! administrative command, and exits with the handler's outcome. All
//! feedback lines are rendered through the localization resolver before they
//! reach stdout; diagnostics go to stderr via tracing.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub(crate) mod grants;

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;
use thiserror::Error;
use tracing::warn;
use warden_gate_config::DEFAULT_CONFIG_NAME;
use warden_gate_config::WardenConfig;
use warden_gate_core::ActorDirectory;
use warden_gate_core::ActorId;
use warden_gate_core::Caller;
use warden_gate_core::Engine;
use warden_gate_core::EngineError;
use warden_gate_core::Feedback;
use warden_gate_core::HANDLER_OK;
use warden_gate_core::LanguageCode;
use warden_gate_core::PermissionService;
use warden_gate_core::commands;

use crate::grants::GrantsError;
use crate::grants::StaticPermissionService;

// ============================================================================
// SECTION: CLI Types
// ============================================================================

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(name = "warden-gate", version, disable_help_subcommand = true)]
struct Cli {
    /// Path to the configuration file.
    #[arg(long, value_name = "PATH", global = true)]
    config: Option<PathBuf>,
    /// Path to the JSON grants file backing the permission service.
    #[arg(long, value_name = "PATH", global = true)]
    grants: Option<PathBuf>,
    /// Run as this actor name instead of the console.
    #[arg(long = "as", value_name = "NAME", global = true)]
    actor: Option<String>,
    /// Client locale for this invocation, overriding the grants entry.
    #[arg(long, value_name = "CODE", global = true)]
    locale: Option<String>,
    /// Selected subcommand to execute.
    #[command(subcommand)]
    command: Commands,
}

/// Supported CLI subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Reload translation catalogs from disk.
    Reload,
    /// Enable or disable enforcement; without a state the current value is
    /// inverted.
    Toggle {
        /// Explicit target state (`true` or `false`).
        state: Option<SwitchArg>,
    },
    /// Enable or disable debug mode; without a state the current value is
    /// inverted.
    Debug {
        /// Explicit target state (`true` or `false`).
        state: Option<SwitchArg>,
    },
    /// Show or change language settings (`auto` or a language code).
    Language {
        /// Language code, or `auto` for automatic derivation.
        code: Option<String>,
    },
    /// Show engine status.
    Status,
    /// Add or remove an actor's exemption.
    Exempt {
        /// Target actor display name.
        name: String,
        /// Requested mutation (`add` or `remove`).
        action: String,
    },
    /// Show localized command help.
    Help,
}

/// Explicit `true`/`false` argument for toggle-style commands.
#[derive(ValueEnum, Debug, Clone, Copy)]
enum SwitchArg {
    /// Turn the setting on.
    True,
    /// Turn the setting off.
    False,
}

impl SwitchArg {
    /// Maps the argument to the handler's boolean.
    const fn as_bool(self) -> bool {
        matches!(self, Self::True)
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// CLI execution errors.
#[derive(Debug, Error)]
enum CliError {
    /// Engine construction or lifecycle failed.
    #[error(transparent)]
    Engine(#[from] EngineError),
    /// The grants file could not be loaded.
    #[error(transparent)]
    Grants(#[from] GrantsError),
    /// `--as` was given without a grants file to resolve it against.
    #[error("--as {0} requires --grants")]
    ActorWithoutGrants(String),
    /// `--as` named an actor absent from the grants file.
    #[error("unknown actor: {0}")]
    UnknownActor(String),
}

// ============================================================================
// SECTION: Feedback and Directory
// ============================================================================

/// Feedback channel that prints each line to stdout.
struct StdoutFeedback;

impl Feedback for StdoutFeedback {
    fn send(&mut self, line: &str) {
        let _ = write_stdout_line(line);
    }
}

/// Directory used when no grants file is bound: nobody is connected.
struct EmptyDirectory;

impl ActorDirectory for EmptyDirectory {
    fn connected_names(&self) -> Vec<String> {
        Vec::new()
    }

    fn resolve(&self, _name: &str) -> Option<ActorId> {
        None
    }
}

// ============================================================================
// SECTION: Entry Point
// ============================================================================

fn main() -> ExitCode {
    init_tracing();
    match run() {
        Ok(code) => code,
        Err(err) => emit_error(&err.to_string()),
    }
}

/// Parses arguments, builds the engine, and dispatches one command.
fn run() -> Result<ExitCode, CliError> {
    let cli = Cli::parse();
    let config_path =
        cli.config.clone().unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_NAME));
    let config = WardenConfig::load_or_default(&config_path);

    let backend = match cli.grants.as_deref() {
        Some(path) if config.is_permission_backend_enabled() => {
            Some(Arc::new(StaticPermissionService::load(path)?))
        }
        _ => None,
    };
    let engine = Engine::init(
        config.engine_options(),
        backend.clone().map(|service| service as Arc<dyn PermissionService>),
    )?;
    let caller = build_caller(&cli, backend.as_deref())?;

    let mut feedback = StdoutFeedback;
    let code = match &cli.command {
        Commands::Reload => commands::reload(&engine, &caller, &mut feedback),
        Commands::Toggle {
            state,
        } => commands::toggle(&engine, &caller, state.map(SwitchArg::as_bool), &mut feedback),
        Commands::Debug {
            state,
        } => commands::debug(&engine, &caller, state.map(SwitchArg::as_bool), &mut feedback),
        Commands::Language {
            code,
        } => commands::language(&engine, &caller, code.as_deref(), &mut feedback),
        Commands::Status => commands::status(&engine, &caller, &mut feedback),
        Commands::Exempt {
            name,
            action,
        } => dispatch_exempt(&engine, backend.as_deref(), &caller, name, action, &mut feedback),
        Commands::Help => commands::help(&engine, &caller, &mut feedback),
    };
    if code == HANDLER_OK {
        persist_runtime_state(&config, &config_path, &engine);
    }
    engine.shutdown();
    Ok(if code == HANDLER_OK { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}

/// Writes engine state changed by this command back to the config file, so
/// the next invocation starts from the same values.
fn persist_runtime_state(config: &WardenConfig, path: &Path, engine: &Engine) {
    let mut updated = config.clone();
    updated.general.enabled = engine.is_enabled();
    updated.general.debug = engine.is_debug();
    updated.general.language = engine.resolver().default_language().as_str().to_string();
    if updated == *config {
        return;
    }
    if let Err(err) = updated.save(path) {
        warn!(path = %path.display(), error = %err, "could not persist runtime state");
    }
}

/// Runs the exempt handler with whichever directory is available.
fn dispatch_exempt(
    engine: &Engine,
    backend: Option<&StaticPermissionService>,
    caller: &Caller,
    name: &str,
    action: &str,
    feedback: &mut dyn Feedback,
) -> i32 {
    match backend {
        Some(service) => {
            commands::exempt(engine, &service.directory(), caller, name, action, feedback)
        }
        None => commands::exempt(engine, &EmptyDirectory, caller, name, action, feedback),
    }
}

/// Builds the caller context from the `--as` and `--locale` arguments.
fn build_caller(
    cli: &Cli,
    backend: Option<&StaticPermissionService>,
) -> Result<Caller, CliError> {
    let override_locale = cli.locale.as_deref().map(LanguageCode::new);
    let Some(name) = cli.actor.as_deref() else {
        let mut caller = Caller::console();
        if let Some(locale) = override_locale {
            caller = caller.with_locale(locale);
        }
        return Ok(caller);
    };
    let Some(service) = backend else {
        return Err(CliError::ActorWithoutGrants(name.to_string()));
    };
    let actor = service
        .directory()
        .resolve(name)
        .ok_or_else(|| CliError::UnknownActor(name.to_string()))?;
    let (display, stored_locale) = service
        .actor_profile(&actor)
        .ok_or_else(|| CliError::UnknownActor(name.to_string()))?;
    let mut caller = Caller::actor(actor, display);
    if let Some(locale) = override_locale.or(stored_locale) {
        caller = caller.with_locale(locale);
    }
    Ok(caller)
}

// ============================================================================
// SECTION: Output Helpers
// ============================================================================

/// Initializes the tracing subscriber on stderr, honoring `RUST_LOG`.
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

/// Writes a single line to stdout.
fn write_stdout_line(message: &str) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    writeln!(&mut stdout, "{message}")
}

/// Writes a single line to stderr.
fn write_stderr_line(message: &str) -> std::io::Result<()> {
    let mut stderr = std::io::stderr();
    writeln!(&mut stderr, "{message}")
}

/// Emits an error message to stderr and returns a failure exit code.
fn emit_error(message: &str) -> ExitCode {
    let _ = write_stderr_line(message);
    ExitCode::FAILURE
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    reason = "Test-only panic-based assertions are permitted."
)]
mod tests {
    use super::*;

    /// Verifies the toggle-style state argument spells `true` and `false`.
    #[test]
    fn switch_argument_uses_boolean_spellings() {
        let on = SwitchArg::from_str("true", false).expect("parse true");
        assert!(on.as_bool());
        let off = SwitchArg::from_str("false", false).expect("parse false");
        assert!(!off.as_bool());
        assert!(SwitchArg::from_str("on", false).is_err());
    }
}
