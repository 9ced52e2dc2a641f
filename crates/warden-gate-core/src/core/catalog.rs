// crates/warden-gate-core/src/core/catalog.rs
// ============================================================================
// Module: Warden Gate Translation Catalog
// Description: In-memory per-language message catalog and its file loaders.
// Purpose: Load, migrate, and bootstrap translation files into an immutable catalog.
// Dependencies: crate::core::{defaults, identifiers}, serde_json, tracing
// ============================================================================

//! ## Overview
//! The catalog maps `(language_code, message_key)` to a template string.
//! Catalogs are built in full by [`CatalogSource`] and immutable afterwards;
//! the runtime layer publishes a replacement catalog atomically on reload.
//!
//! Catalog storage is one flat JSON object per language code in a configured
//! directory (`<code>.json`). Older flat `key=value` `.properties` files and
//! single-level `.yml` files are converted once by [`CatalogSource::migrate_legacy`]
//! and then removed.
//!
//! ## Invariants
//! - Language codes are lowercase at every boundary (file stems are
//!   normalized on load).
//! - After [`CatalogSource::build`] the catalog contains at least `en_us`.
//! - Unreadable or unparsable files are logged and skipped, never fatal.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::path::PathBuf;

use thiserror::Error;
use tracing::debug;
use tracing::info;
use tracing::warn;

use crate::core::defaults;
use crate::core::identifiers::LanguageCode;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Catalog file errors.
///
/// Per-file load failures are logged and skipped rather than surfaced; these
/// errors cover failures of the catalog directory itself.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The catalog directory could not be created or listed.
    #[error("catalog directory error at {path}: {message}")]
    Directory {
        /// Directory path.
        path: String,
        /// Underlying I/O error text.
        message: String,
    },
    /// A baseline file could not be written during default bootstrap.
    #[error("catalog bootstrap error at {path}: {message}")]
    Bootstrap {
        /// File path.
        path: String,
        /// Underlying I/O error text.
        message: String,
    },
}

// ============================================================================
// SECTION: Translation Catalog
// ============================================================================

/// Immutable in-memory translation catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslationCatalog {
    /// Message maps keyed by lowercase language code.
    languages: BTreeMap<String, BTreeMap<String, String>>,
}

impl TranslationCatalog {
    /// Builds a catalog from language entries. Codes are normalized to
    /// lowercase; duplicate codes merge with later entries winning.
    #[must_use]
    pub fn from_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (LanguageCode, Vec<(K, V)>)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut languages: BTreeMap<String, BTreeMap<String, String>> = BTreeMap::new();
        for (code, messages) in entries {
            let map = languages.entry(code.as_str().to_string()).or_default();
            for (key, template) in messages {
                map.insert(key.into(), template.into());
            }
        }
        Self {
            languages,
        }
    }

    /// Looks up a template for a language and key. Pure lookup, no fallback.
    #[must_use]
    pub fn get(&self, language: &LanguageCode, key: &str) -> Option<&str> {
        self.languages.get(language.as_str()).and_then(|map| map.get(key)).map(String::as_str)
    }

    /// Returns the set of currently loaded language codes in sorted order.
    #[must_use]
    pub fn languages(&self) -> Vec<LanguageCode> {
        self.languages.keys().map(LanguageCode::new).collect()
    }

    /// Returns true when the language has at least one loaded message.
    #[must_use]
    pub fn contains_language(&self, language: &LanguageCode) -> bool {
        self.languages.get(language.as_str()).is_some_and(|map| !map.is_empty())
    }

    /// Returns true when no language is loaded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.languages.is_empty()
    }

    /// Returns the total number of loaded message entries.
    #[must_use]
    pub fn entry_count(&self) -> usize {
        self.languages.values().map(BTreeMap::len).sum()
    }

    /// Merges baseline entries into a language without overwriting loaded
    /// messages.
    fn merge_baseline(&mut self, code: &str, baseline: &[(&str, &str)]) {
        let map = self.languages.entry(code.to_string()).or_default();
        for (key, template) in baseline {
            map.entry((*key).to_string()).or_insert_with(|| (*template).to_string());
        }
    }
}

// ============================================================================
// SECTION: Catalog Source
// ============================================================================

/// Loader for a directory of per-language translation files.
#[derive(Debug, Clone)]
pub struct CatalogSource {
    /// Directory containing `<code>.json` files.
    dir: PathBuf,
}

impl CatalogSource {
    /// Creates a source over a catalog directory.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
        }
    }

    /// Returns the catalog directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Runs the full build chain: migrate legacy files, load every JSON
    /// file, then bootstrap baseline files for any built-in language still
    /// missing coverage.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] when the directory cannot be created or
    /// listed, or a baseline file cannot be written. Individual translation
    /// files that fail to read or parse are logged and skipped.
    pub fn build(&self) -> Result<TranslationCatalog, CatalogError> {
        self.ensure_dir()?;
        let migrated = self.migrate_legacy()?;
        if migrated > 0 {
            info!(count = migrated, dir = %self.dir.display(), "migrated legacy language files");
        }
        let mut catalog = self.load_all()?;
        self.ensure_defaults(&mut catalog)?;
        Ok(catalog)
    }

    /// Loads every `*.json` file in the directory into a catalog. The file
    /// stem, lowercased, is the language code. Unreadable or unparsable
    /// files are logged and skipped.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Directory`] when the directory cannot be
    /// created or listed.
    pub fn load_all(&self) -> Result<TranslationCatalog, CatalogError> {
        self.ensure_dir()?;
        let mut catalog = TranslationCatalog::default();
        for path in self.files_with_extension("json")? {
            let Some(code) = language_code_for(&path) else {
                continue;
            };
            match read_flat_json(&path) {
                Ok(messages) => {
                    debug!(language = %code, count = messages.len(), "loaded language file");
                    catalog.languages.insert(code.as_str().to_string(), messages);
                }
                Err(message) => {
                    warn!(path = %path.display(), %message, "skipping unreadable language file");
                }
            }
        }
        Ok(catalog)
    }

    /// Converts legacy `.properties` and `.yml` files into `<code>.json`
    /// and removes the legacy source. Running it twice is a no-op once no
    /// legacy files remain.
    ///
    /// A pre-existing JSON file for the same code wins; the legacy file is
    /// still removed. Files that fail to convert are logged and left in
    /// place so no data is destroyed.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Directory`] when the directory cannot be
    /// listed.
    pub fn migrate_legacy(&self) -> Result<usize, CatalogError> {
        self.ensure_dir()?;
        let mut migrated = 0;
        for (extension, parser) in LEGACY_FORMATS {
            for path in self.files_with_extension(extension)? {
                let Some(code) = language_code_for(&path) else {
                    continue;
                };
                match self.migrate_file(&path, &code, *parser) {
                    Ok(()) => migrated += 1,
                    Err(message) => {
                        warn!(
                            path = %path.display(),
                            %message,
                            "legacy language file left unconverted"
                        );
                    }
                }
            }
        }
        Ok(migrated)
    }

    /// Writes baseline files for built-in languages that lack a file and
    /// merges every built-in baseline into languages with gaps, so shipped
    /// keys always resolve.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Bootstrap`] when a baseline file cannot be
    /// written.
    pub fn ensure_defaults(&self, catalog: &mut TranslationCatalog) -> Result<(), CatalogError> {
        for code in defaults::BUILTIN_LANGUAGES {
            let Some(baseline) = defaults::baseline_for(code) else {
                continue;
            };
            let path = self.dir.join(format!("{code}.json"));
            if !path.exists() {
                let body: BTreeMap<&str, &str> = baseline.iter().copied().collect();
                let text = match serde_json::to_string_pretty(&body) {
                    Ok(text) => text,
                    Err(err) => {
                        return Err(CatalogError::Bootstrap {
                            path: path.display().to_string(),
                            message: err.to_string(),
                        });
                    }
                };
                fs::write(&path, text).map_err(|err| CatalogError::Bootstrap {
                    path: path.display().to_string(),
                    message: err.to_string(),
                })?;
                info!(language = code, path = %path.display(), "created baseline language file");
            }
            catalog.merge_baseline(code, baseline);
        }
        Ok(())
    }

    /// Converts one legacy file and removes it on success.
    fn migrate_file(
        &self,
        path: &Path,
        code: &LanguageCode,
        parser: LegacyParser,
    ) -> Result<(), String> {
        let text = fs::read_to_string(path).map_err(|err| err.to_string())?;
        let messages = parser(&text)?;
        let target = self.dir.join(format!("{}.json", code.as_str()));
        if target.exists() {
            debug!(language = %code, "JSON file already present; dropping legacy source");
        } else {
            let body =
                serde_json::to_string_pretty(&messages).map_err(|err| err.to_string())?;
            fs::write(&target, body).map_err(|err| err.to_string())?;
        }
        fs::remove_file(path).map_err(|err| err.to_string())?;
        info!(language = %code, path = %path.display(), "migrated legacy language file");
        Ok(())
    }

    /// Creates the catalog directory when missing.
    fn ensure_dir(&self) -> Result<(), CatalogError> {
        fs::create_dir_all(&self.dir).map_err(|err| CatalogError::Directory {
            path: self.dir.display().to_string(),
            message: err.to_string(),
        })
    }

    /// Lists regular files in the directory with the given extension.
    fn files_with_extension(&self, extension: &str) -> Result<Vec<PathBuf>, CatalogError> {
        let entries = fs::read_dir(&self.dir).map_err(|err| CatalogError::Directory {
            path: self.dir.display().to_string(),
            message: err.to_string(),
        })?;
        let mut files = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|err| CatalogError::Directory {
                path: self.dir.display().to_string(),
                message: err.to_string(),
            })?;
            let path = entry.path();
            if path.is_file()
                && path.extension().and_then(|ext| ext.to_str()).is_some_and(|ext| {
                    ext.eq_ignore_ascii_case(extension)
                })
            {
                files.push(path);
            }
        }
        files.sort();
        Ok(files)
    }
}

// ============================================================================
// SECTION: File Parsers
// ============================================================================

/// Parser signature for a legacy translation format.
type LegacyParser = fn(&str) -> Result<BTreeMap<String, String>, String>;

/// Legacy formats handled by migration, in conversion order.
const LEGACY_FORMATS: &[(&str, LegacyParser)] =
    &[("properties", parse_properties), ("yml", parse_simple_yaml)];

/// Extracts the lowercase language code from a file stem.
fn language_code_for(path: &Path) -> Option<LanguageCode> {
    let stem = path.file_stem()?.to_str()?;
    let code = LanguageCode::new(stem);
    if code.is_empty() {
        return None;
    }
    Some(code)
}

/// Reads a flat `{ "key": "template" }` JSON object.
fn read_flat_json(path: &Path) -> Result<BTreeMap<String, String>, String> {
    let text = fs::read_to_string(path).map_err(|err| err.to_string())?;
    serde_json::from_str(&text).map_err(|err| err.to_string())
}

/// Parses flat `key=value` properties text. Blank lines and lines starting
/// with `#` or `!` are ignored.
fn parse_properties(text: &str) -> Result<BTreeMap<String, String>, String> {
    let mut messages = BTreeMap::new();
    for (number, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
            continue;
        }
        let Some((key, value)) = line.split_once('=') else {
            return Err(format!("line {}: missing '=' separator", number + 1));
        };
        messages.insert(key.trim().to_string(), value.trim().to_string());
    }
    Ok(messages)
}

/// Parses single-level nested YAML of the shape the legacy files used:
/// top-level `section:` headers with indented `key: value` children, or
/// plain top-level `key: value` pairs. Section and key concatenate with a
/// dot. Deeper nesting is rejected.
fn parse_simple_yaml(text: &str) -> Result<BTreeMap<String, String>, String> {
    let mut messages = BTreeMap::new();
    let mut section: Option<String> = None;
    for (number, raw) in text.lines().enumerate() {
        let line = raw.trim_end();
        let trimmed = line.trim_start();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let indent = line.len() - trimmed.len();
        let Some((key, value)) = trimmed.split_once(':') else {
            return Err(format!("line {}: missing ':' separator", number + 1));
        };
        let key = key.trim();
        let value = strip_quotes(value.trim());
        if indent == 0 {
            if value.is_empty() {
                section = Some(key.to_string());
            } else {
                section = None;
                messages.insert(key.to_string(), value.to_string());
            }
        } else {
            let Some(prefix) = section.as_deref() else {
                return Err(format!("line {}: indented entry without a section", number + 1));
            };
            if value.is_empty() {
                return Err(format!("line {}: nesting deeper than one level", number + 1));
            }
            messages.insert(format!("{prefix}.{key}"), value.to_string());
        }
    }
    Ok(messages)
}

/// Removes one pair of matching single or double quotes.
fn strip_quotes(value: &str) -> &str {
    let bytes = value.as_bytes();
    if bytes.len() >= 2 {
        let first = bytes[0];
        if (first == b'"' || first == b'\'') && bytes[bytes.len() - 1] == first {
            return &value[1..value.len() - 1];
        }
    }
    value
}
