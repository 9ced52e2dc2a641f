// crates/warden-gate-cli/src/grants.rs
// ============================================================================
// Module: Warden Gate Static Grants Backend
// Description: File-backed permission backend and actor directory.
// Purpose: Bind the engine to a JSON grants fixture for CLI sessions.
// Dependencies: serde, serde_json, thiserror, warden-gate-core
// ============================================================================

//! ## Overview
//! The CLI has no live permission service to bind, so it loads a JSON
//! grants file into memory and serves checks from it. Group mutations made
//! by the exempt command are applied in memory and written back to the file
//! on success, so repeated invocations observe each other.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::path::PathBuf;
use std::sync::PoisonError;
use std::sync::RwLock;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;
use warden_gate_core::ActorDirectory;
use warden_gate_core::ActorId;
use warden_gate_core::GroupName;
use warden_gate_core::LanguageCode;
use warden_gate_core::PermissionError;
use warden_gate_core::PermissionNode;
use warden_gate_core::PermissionService;

// ============================================================================
// SECTION: Limits
// ============================================================================

/// Maximum grants file size in bytes.
const MAX_GRANTS_FILE_SIZE: u64 = 4 * 1024 * 1024;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Grants file errors.
#[derive(Debug, Error)]
pub enum GrantsError {
    /// The file could not be read or written.
    #[error("grants io error at {path}: {message}")]
    Io {
        /// File path.
        path: String,
        /// Underlying I/O error text.
        message: String,
    },
    /// The file exceeds the size cap.
    #[error("grants file {path} is {size} bytes (limit {limit})")]
    TooLarge {
        /// File path.
        path: String,
        /// Observed size in bytes.
        size: u64,
        /// Enforced limit in bytes.
        limit: u64,
    },
    /// The file is not valid JSON for this model.
    #[error("grants parse error at {path}: {message}")]
    Parse {
        /// File path.
        path: String,
        /// Parser error text.
        message: String,
    },
}

// ============================================================================
// SECTION: Grants Model
// ============================================================================

/// One actor's grants entry.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct ActorGrants {
    /// Display name used for directory lookups.
    pub name: String,
    /// Client locale reported for this actor, if any.
    pub locale: Option<String>,
    /// Permission nodes held directly. A node ending in `.*` grants every
    /// node under that prefix.
    pub permissions: Vec<String>,
    /// Groups the actor belongs to.
    pub groups: Vec<String>,
}

/// Top-level grants file model.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct GrantsFile {
    /// Grants keyed by actor identifier.
    pub actors: HashMap<String, ActorGrants>,
}

impl GrantsFile {
    /// Loads a grants file with a size cap.
    ///
    /// # Errors
    ///
    /// Returns [`GrantsError`] when the file is missing, oversized, or
    /// unparsable.
    pub fn load(path: &Path) -> Result<Self, GrantsError> {
        let metadata = fs::metadata(path).map_err(|err| GrantsError::Io {
            path: path.display().to_string(),
            message: err.to_string(),
        })?;
        if metadata.len() > MAX_GRANTS_FILE_SIZE {
            return Err(GrantsError::TooLarge {
                path: path.display().to_string(),
                size: metadata.len(),
                limit: MAX_GRANTS_FILE_SIZE,
            });
        }
        let text = fs::read_to_string(path).map_err(|err| GrantsError::Io {
            path: path.display().to_string(),
            message: err.to_string(),
        })?;
        serde_json::from_str(&text).map_err(|err| GrantsError::Parse {
            path: path.display().to_string(),
            message: err.to_string(),
        })
    }
}

// ============================================================================
// SECTION: Static Permission Service
// ============================================================================

/// In-memory permission backend over a loaded grants file.
pub struct StaticPermissionService {
    /// Loaded grants, mutable for group updates.
    grants: RwLock<GrantsFile>,
    /// File the grants were loaded from; mutations are written back here.
    path: Option<PathBuf>,
}

impl StaticPermissionService {
    /// Wraps an already loaded grants model without write-back.
    #[must_use]
    #[allow(dead_code, reason = "Used by unit tests only.")]
    pub fn new(grants: GrantsFile) -> Self {
        Self {
            grants: RwLock::new(grants),
            path: None,
        }
    }

    /// Loads the grants file and binds write-back to the same path.
    ///
    /// # Errors
    ///
    /// Returns [`GrantsError`] when the file cannot be loaded.
    pub fn load(path: &Path) -> Result<Self, GrantsError> {
        let grants = GrantsFile::load(path)?;
        Ok(Self {
            grants: RwLock::new(grants),
            path: Some(path.to_path_buf()),
        })
    }

    /// Returns a directory view over the same grants.
    #[must_use]
    pub fn directory(&self) -> StaticDirectory<'_> {
        StaticDirectory {
            service: self,
        }
    }

    /// Returns the caller context fields recorded for an actor, if present.
    #[must_use]
    pub fn actor_profile(&self, actor: &ActorId) -> Option<(String, Option<LanguageCode>)> {
        let grants = self.grants.read().unwrap_or_else(PoisonError::into_inner);
        grants.actors.get(actor.as_str()).map(|entry| {
            (entry.name.clone(), entry.locale.as_deref().map(LanguageCode::new))
        })
    }

    /// Writes the current grants back to the bound file, if any.
    fn persist(&self, grants: &GrantsFile) -> Result<(), PermissionError> {
        let Some(path) = self.path.as_deref() else {
            return Ok(());
        };
        let text = serde_json::to_string_pretty(grants)
            .map_err(|err| PermissionError::Backend(err.to_string()))?;
        fs::write(path, text).map_err(|err| PermissionError::Backend(err.to_string()))
    }

    /// Matches a held node against a requested node, honoring `.*` suffixes.
    fn node_matches(held: &str, requested: &str) -> bool {
        if let Some(prefix) = held.strip_suffix(".*") {
            return requested == prefix
                || requested.strip_prefix(prefix).is_some_and(|rest| rest.starts_with('.'));
        }
        held == "*" || held == requested
    }
}

impl PermissionService for StaticPermissionService {
    fn check_permission(
        &self,
        actor: &ActorId,
        node: &PermissionNode,
    ) -> Result<bool, PermissionError> {
        let grants = self.grants.read().unwrap_or_else(PoisonError::into_inner);
        let Some(entry) = grants.actors.get(actor.as_str()) else {
            return Ok(false);
        };
        Ok(entry.permissions.iter().any(|held| Self::node_matches(held, node.as_str())))
    }

    fn list_groups(&self, actor: &ActorId) -> Result<Vec<GroupName>, PermissionError> {
        let grants = self.grants.read().unwrap_or_else(PoisonError::into_inner);
        let Some(entry) = grants.actors.get(actor.as_str()) else {
            return Ok(Vec::new());
        };
        Ok(entry.groups.iter().map(|name| GroupName::from(name.as_str())).collect())
    }

    fn add_to_group(&self, actor: &ActorId, group: &GroupName) -> Result<(), PermissionError> {
        let mut grants = self.grants.write().unwrap_or_else(PoisonError::into_inner);
        let entry = grants.actors.entry(actor.as_str().to_string()).or_default();
        let name = group.as_str();
        if !entry.groups.iter().any(|member| member.eq_ignore_ascii_case(name)) {
            entry.groups.push(name.to_string());
        }
        self.persist(&grants)
    }

    fn remove_from_group(&self, actor: &ActorId, group: &GroupName) -> Result<(), PermissionError> {
        let mut grants = self.grants.write().unwrap_or_else(PoisonError::into_inner);
        let name = group.as_str();
        if let Some(entry) = grants.actors.get_mut(actor.as_str()) {
            entry.groups.retain(|member| !member.eq_ignore_ascii_case(name));
        }
        self.persist(&grants)
    }
}

// ============================================================================
// SECTION: Static Directory
// ============================================================================

/// Directory view over the grants file: every listed actor counts as
/// connected for name resolution and completion.
pub struct StaticDirectory<'a> {
    /// Backing service holding the grants.
    service: &'a StaticPermissionService,
}

impl ActorDirectory for StaticDirectory<'_> {
    fn connected_names(&self) -> Vec<String> {
        let grants = self.service.grants.read().unwrap_or_else(PoisonError::into_inner);
        grants.actors.values().map(|entry| entry.name.clone()).collect()
    }

    fn resolve(&self, name: &str) -> Option<ActorId> {
        let grants = self.service.grants.read().unwrap_or_else(PoisonError::into_inner);
        grants
            .actors
            .iter()
            .find(|(_, entry)| entry.name.eq_ignore_ascii_case(name))
            .map(|(id, _)| ActorId::new(id.as_str()))
    }
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

    /// Builds a grants file with one fully populated actor.
    fn sample() -> GrantsFile {
        let mut actors = HashMap::new();
        actors.insert(
            "a1".to_string(),
            ActorGrants {
                name: "Steve".to_string(),
                locale: Some("zh_hant_tw".to_string()),
                permissions: vec!["warden.admin".to_string(), "warden.bypass.*".to_string()],
                groups: vec!["admin".to_string()],
            },
        );
        GrantsFile {
            actors,
        }
    }

    /// Verifies exact and wildcard node matching.
    #[test]
    fn node_matching_honors_wildcards() {
        assert!(StaticPermissionService::node_matches("warden.admin", "warden.admin"));
        assert!(!StaticPermissionService::node_matches("warden.admin", "warden.exempt"));
        assert!(StaticPermissionService::node_matches("warden.bypass.*", "warden.bypass.speed"));
        assert!(StaticPermissionService::node_matches("warden.bypass.*", "warden.bypass"));
        assert!(!StaticPermissionService::node_matches("warden.bypass.*", "warden.bypassed"));
        assert!(StaticPermissionService::node_matches("*", "warden.anything"));
    }

    /// Verifies checks, group listing, and profile lookup over the model.
    #[test]
    fn service_answers_from_loaded_grants() {
        let service = StaticPermissionService::new(sample());
        let actor = ActorId::new("a1");

        let granted = service
            .check_permission(&actor, &PermissionNode::from("warden.bypass.speed"))
            .expect("check");
        assert!(granted);
        assert_eq!(service.list_groups(&actor).expect("groups"), vec![GroupName::from("admin")]);

        let (name, locale) = service.actor_profile(&actor).expect("profile");
        assert_eq!(name, "Steve");
        assert_eq!(locale.expect("locale").as_str(), "zh_hant_tw");
    }

    /// Verifies group mutations are case-insensitive and deduplicated.
    #[test]
    fn group_mutations_update_in_memory() {
        let service = StaticPermissionService::new(sample());
        let actor = ActorId::new("a1");
        let group = GroupName::from("Warden-Exempt");

        service.add_to_group(&actor, &group).expect("add");
        service.add_to_group(&actor, &GroupName::from("warden-exempt")).expect("re-add");
        let groups = service.list_groups(&actor).expect("groups");
        assert_eq!(groups.len(), 2);

        service.remove_from_group(&actor, &GroupName::from("WARDEN-EXEMPT")).expect("remove");
        assert_eq!(service.list_groups(&actor).expect("groups"), vec![GroupName::from("admin")]);
    }

    /// Verifies loading from disk binds write-back, so a second load from
    /// the same file observes group mutations.
    #[test]
    fn load_binds_write_back_to_the_same_file() {
        let dir = tempfile::TempDir::new().expect("tempdir");
        let path = dir.path().join("grants.json");
        fs::write(&path, r#"{"actors": {"a1": {"name": "Steve"}}}"#).expect("write fixture");

        let service = StaticPermissionService::load(&path).expect("load");
        let actor = ActorId::new("a1");
        service.add_to_group(&actor, &GroupName::from("warden-exempt")).expect("add");

        let reloaded = StaticPermissionService::load(&path).expect("reload");
        assert_eq!(
            reloaded.list_groups(&actor).expect("groups"),
            vec![GroupName::from("warden-exempt")]
        );
    }

    /// Verifies directory resolution ignores display-name case.
    #[test]
    fn directory_resolves_names_case_insensitively() {
        let service = StaticPermissionService::new(sample());
        let directory = service.directory();

        assert_eq!(directory.connected_names(), vec!["Steve"]);
        assert_eq!(directory.resolve("steve"), Some(ActorId::new("a1")));
        assert!(directory.resolve("Nobody").is_none());
    }
}
