// crates/warden-gate-config/src/config.rs
// ============================================================================
// Module: Warden Gate Configuration
// Description: Configuration loading, validation, and persistence.
// Purpose: Provide strict TOML parsing with a lenient default-fallback path.
// Dependencies: warden-gate-core, serde, toml, tracing
// ============================================================================

//! ## Overview
//! Configuration is loaded from a TOML file with a size cap and unknown
//! fields rejected. [`WardenConfig::load`] fails closed for hosts that want
//! strictness; [`WardenConfig::load_or_default`] implements the engine's
//! documented behavior — a missing file is created with defaults, an
//! unreadable one is logged and replaced in memory by defaults, and startup
//! never fails on configuration alone.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;
use tracing::info;
use tracing::warn;
use warden_gate_core::EngineOptions;
use warden_gate_core::GroupName;
use warden_gate_core::LanguageCode;
use warden_gate_core::UnavailablePolicy;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default configuration filename when no path is specified.
pub const DEFAULT_CONFIG_NAME: &str = "warden-gate.toml";

/// Maximum configuration file size in bytes.
pub(crate) const MAX_CONFIG_FILE_SIZE: u64 = 1024 * 1024;

/// Maximum number of bypass group entries.
pub(crate) const MAX_BYPASS_GROUPS: usize = 64;

/// Maximum length of a single group name.
pub(crate) const MAX_GROUP_NAME_LENGTH: usize = 64;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read or written.
    #[error("config io error at {path}: {message}")]
    Io {
        /// File path.
        path: String,
        /// Underlying I/O error text.
        message: String,
    },
    /// The file exceeds the size cap.
    #[error("config file {path} is {size} bytes (limit {limit})")]
    TooLarge {
        /// File path.
        path: String,
        /// Observed size in bytes.
        size: u64,
        /// Enforced limit in bytes.
        limit: u64,
    },
    /// The file is not valid TOML for this model.
    #[error("config parse error at {path}: {message}")]
    Parse {
        /// File path.
        path: String,
        /// Parser error text.
        message: String,
    },
    /// The parsed values fail validation.
    #[error("invalid config: {0}")]
    Invalid(String),
    /// The model could not be serialized for saving.
    #[error("config serialize error: {0}")]
    Serialize(String),
}

// ============================================================================
// SECTION: Configuration Types
// ============================================================================

/// Persisted Warden Gate configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct WardenConfig {
    /// General engine settings.
    pub general: GeneralConfig,
    /// Permission backend settings.
    pub permissions: PermissionsConfig,
    /// Directory holding per-language translation files.
    pub lang_dir: PathBuf,
}

impl Default for WardenConfig {
    fn default() -> Self {
        Self {
            general: GeneralConfig::default(),
            permissions: PermissionsConfig::default(),
            lang_dir: PathBuf::from("lang"),
        }
    }
}

/// General engine settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct GeneralConfig {
    /// Whether enforcement starts enabled.
    pub enabled: bool,
    /// Whether admins receive enforcement notifications.
    pub notify_admins: bool,
    /// Whether debug mode starts enabled.
    pub debug: bool,
    /// Process-wide default language.
    pub language: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            notify_admins: true,
            debug: false,
            language: "en_us".to_string(),
        }
    }
}

/// Permission backend settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct PermissionsConfig {
    /// Whether the external permission backend is used at all.
    pub use_backend: bool,
    /// Group names treated as globally exempt.
    pub bypass_groups: Vec<String>,
    /// Policy applied when the backend is unbound.
    pub unavailable_policy: UnavailablePolicy,
    /// Group the exempt command mutates.
    pub exempt_group: String,
}

impl Default for PermissionsConfig {
    fn default() -> Self {
        Self {
            use_backend: true,
            bypass_groups: vec!["admin".to_string(), "mod".to_string()],
            unavailable_policy: UnavailablePolicy::default(),
            exempt_group: "warden-exempt".to_string(),
        }
    }
}

// ============================================================================
// SECTION: Load / Save
// ============================================================================

impl WardenConfig {
    /// Loads and validates a configuration file, failing closed.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the file is missing, oversized,
    /// unparsable, or fails validation.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let metadata = fs::metadata(path).map_err(|err| ConfigError::Io {
            path: path.display().to_string(),
            message: err.to_string(),
        })?;
        if metadata.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::TooLarge {
                path: path.display().to_string(),
                size: metadata.len(),
                limit: MAX_CONFIG_FILE_SIZE,
            });
        }
        let text = fs::read_to_string(path).map_err(|err| ConfigError::Io {
            path: path.display().to_string(),
            message: err.to_string(),
        })?;
        let config: Self = toml::from_str(&text).map_err(|err| ConfigError::Parse {
            path: path.display().to_string(),
            message: err.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Loads the configuration, falling back to defaults on any failure.
    ///
    /// A missing file is created with the default model (the engine's
    /// first-run behavior); any other failure is logged and defaults are
    /// used without touching the broken file.
    #[must_use]
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(ConfigError::Io {
                ..
            }) if !path.exists() => {
                let config = Self::default();
                match config.save(path) {
                    Ok(()) => {
                        info!(path = %path.display(), "created default configuration");
                    }
                    Err(err) => {
                        warn!(path = %path.display(), error = %err, "could not write defaults");
                    }
                }
                config
            }
            Err(err) => {
                warn!(path = %path.display(), error = %err, "config unusable; using defaults");
                Self::default()
            }
        }
    }

    /// Saves the configuration as TOML.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when serialization or the write fails.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let text =
            toml::to_string_pretty(self).map_err(|err| ConfigError::Serialize(err.to_string()))?;
        fs::write(path, text).map_err(|err| ConfigError::Io {
            path: path.display().to_string(),
            message: err.to_string(),
        })
    }

    /// Validates value-level constraints.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first violated rule.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.general.language.trim().is_empty() {
            return Err(ConfigError::Invalid("general.language must not be empty".to_string()));
        }
        if self.lang_dir.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("lang_dir must not be empty".to_string()));
        }
        if self.permissions.bypass_groups.len() > MAX_BYPASS_GROUPS {
            return Err(ConfigError::Invalid(format!(
                "permissions.bypass_groups exceeds {MAX_BYPASS_GROUPS} entries"
            )));
        }
        for group in &self.permissions.bypass_groups {
            if group.trim().is_empty() {
                return Err(ConfigError::Invalid(
                    "permissions.bypass_groups entries must not be empty".to_string(),
                ));
            }
            if group.len() > MAX_GROUP_NAME_LENGTH {
                return Err(ConfigError::Invalid(format!(
                    "group name {group:?} exceeds {MAX_GROUP_NAME_LENGTH} characters"
                )));
            }
        }
        if self.permissions.exempt_group.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "permissions.exempt_group must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    // ========================================================================
    // SECTION: Accessors
    // ========================================================================

    /// Returns whether enforcement starts enabled.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.general.enabled
    }

    /// Returns whether debug mode starts enabled.
    #[must_use]
    pub const fn is_debug(&self) -> bool {
        self.general.debug
    }

    /// Returns the configured default language.
    #[must_use]
    pub fn language(&self) -> LanguageCode {
        LanguageCode::new(&self.general.language)
    }

    /// Returns whether the external permission backend is used.
    #[must_use]
    pub const fn is_permission_backend_enabled(&self) -> bool {
        self.permissions.use_backend
    }

    /// Returns the configured bypass groups.
    #[must_use]
    pub fn bypass_groups(&self) -> Vec<GroupName> {
        self.permissions.bypass_groups.iter().map(|name| GroupName::from(name.as_str())).collect()
    }

    /// Maps the persisted values into engine startup options.
    #[must_use]
    pub fn engine_options(&self) -> EngineOptions {
        EngineOptions {
            lang_dir: self.lang_dir.clone(),
            default_language: self.language(),
            enabled: self.general.enabled,
            debug: self.general.debug,
            bypass_groups: self.bypass_groups(),
            exempt_group: GroupName::from(self.permissions.exempt_group.as_str()),
            unavailable_policy: self.permissions.unavailable_policy,
        }
    }
}
