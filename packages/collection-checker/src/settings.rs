//! Settings file loading and section lookup.
//!
//! The settings document is a JSON (or YAML) object whose top-level keys are
//! sections:
//!
//! - conflict lists: `{ "<item id>": "<description>", ... }`, or a delimited
//!   string / array of ids without descriptions
//! - `Alternatives`: `{ "<item id>": "<alternative>", ... }`
//! - `<List>Alternative`: a string shown for every conflict of `<List>`
//!   that has no entry in `Alternatives`
//! - `ConVars`: `{ "<item id>": { "AddonName": ..., "Conflicts": [...] } }`
//! - `DefaultList`: the list checked when none is given on the command line
//!
//! Missing sections are empty, never an error.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use crate::config::{
    is_reserved_section, shared_alternative_key, ALTERNATIVES_SECTION, CONVARS_SECTION,
    DEFAULT_LIST_KEY, DEFAULT_SETTINGS_FILE, LIST_SEPARATORS,
};
use crate::error::{CheckerError, Result};
use crate::types::{ConVarConflicts, ConflictEntry, ItemId};

/// Loaded settings document.
///
/// Immutable after loading; pass it by reference to whatever needs it.
#[derive(Debug, Clone, Default)]
pub struct Settings {
    sections: Map<String, Value>,
}

impl Settings {
    /// Settings with no sections.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Load settings from a file.
    ///
    /// A file that does not exist yields empty settings. `.yaml`/`.yml`
    /// files are parsed as YAML, anything else as JSON.
    pub fn load(path: &Path) -> Result<Self> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "Settings file not found, using empty settings");
                return Ok(Self::empty());
            }
            Err(source) => {
                return Err(CheckerError::ConfigRead {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        let parse_error = |reason: String| CheckerError::ConfigParse {
            path: path.to_path_buf(),
            reason,
        };

        let document: Value = if is_yaml_path(path) {
            serde_yaml_ng::from_str(&content).map_err(|e| parse_error(e.to_string()))?
        } else {
            serde_json::from_str(&content).map_err(|e| parse_error(e.to_string()))?
        };

        let settings = Self::from_value(document).map_err(parse_error)?;
        tracing::debug!(
            path = %path.display(),
            sections = settings.sections.len(),
            "Loaded settings"
        );
        Ok(settings)
    }

    /// Parse settings from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let parse_error = |reason: String| CheckerError::ConfigParse {
            path: PathBuf::from("<inline>"),
            reason,
        };
        let document: Value = serde_json::from_str(json).map_err(|e| parse_error(e.to_string()))?;
        Self::from_value(document).map_err(parse_error)
    }

    /// Build settings from a parsed document.
    ///
    /// An empty document (`null`) is accepted as empty settings.
    fn from_value(document: Value) -> std::result::Result<Self, String> {
        match document {
            Value::Object(sections) => Ok(Self { sections }),
            Value::Null => Ok(Self::empty()),
            other => Err(format!(
                "expected an object of sections at the top level, found {}",
                value_kind(&other)
            )),
        }
    }

    /// Names of all conflict lists, in document order.
    ///
    /// Reserved sections (`Alternatives`, `ConVars`, `DefaultList`) and
    /// shared alternative scalars (`*Alternative`) are excluded.
    pub fn list_names(&self) -> Vec<String> {
        self.sections
            .keys()
            .filter(|name| !is_reserved_section(name))
            .cloned()
            .collect()
    }

    /// Check whether a section exists.
    pub fn has_section(&self, name: &str) -> bool {
        self.sections.contains_key(name)
    }

    /// Load a conflict list.
    ///
    /// Object sections map ids to descriptions; string and array sections
    /// are plain id lists.
    pub fn conflict_list(&self, name: &str) -> Result<HashMap<ItemId, ConflictEntry>> {
        let Some(section) = self.sections.get(name) else {
            return Ok(HashMap::new());
        };

        let entries = match section {
            Value::Null => Vec::new(),
            Value::Object(map) => map
                .iter()
                .map(|(id, value)| -> Result<ConflictEntry> {
                    Ok(ConflictEntry {
                        item_id: id.clone(),
                        description: Some(bind_text(name, id, value)?),
                    })
                })
                .collect::<Result<Vec<_>>>()?,
            Value::String(list) => split_id_list(list)
                .into_iter()
                .map(|id| ConflictEntry {
                    item_id: id,
                    description: None,
                })
                .collect(),
            Value::Array(items) => items
                .iter()
                .enumerate()
                .map(|(i, value)| -> Result<ConflictEntry> {
                    Ok(ConflictEntry {
                        item_id: bind_text(name, &i.to_string(), value)?,
                        description: None,
                    })
                })
                .collect::<Result<Vec<_>>>()?,
            other => {
                return Err(CheckerError::Bind {
                    section: name.to_string(),
                    key: name.to_string(),
                    reason: format!(
                        "expected an object, list or delimited string, found {}",
                        value_kind(other)
                    ),
                })
            }
        };

        Ok(entries
            .into_iter()
            .map(|entry| (entry.item_id.clone(), entry))
            .collect())
    }

    /// Load the per-item alternatives.
    pub fn alternatives(&self) -> Result<HashMap<ItemId, String>> {
        let Some(section) = self.sections.get(ALTERNATIVES_SECTION) else {
            return Ok(HashMap::new());
        };

        match section {
            Value::Null => Ok(HashMap::new()),
            Value::Object(map) => map
                .iter()
                .map(|(id, value)| -> Result<(ItemId, String)> {
                    Ok((id.clone(), bind_text(ALTERNATIVES_SECTION, id, value)?))
                })
                .collect(),
            other => Err(CheckerError::Bind {
                section: ALTERNATIVES_SECTION.to_string(),
                key: ALTERNATIVES_SECTION.to_string(),
                reason: format!("expected an object, found {}", value_kind(other)),
            }),
        }
    }

    /// Shared alternative of a list, if set and not blank.
    pub fn shared_alternative(&self, list_name: &str) -> Option<String> {
        let key = shared_alternative_key(list_name);
        match self.sections.get(&key) {
            Some(Value::String(s)) if !s.trim().is_empty() => Some(s.clone()),
            Some(Value::String(_)) | Some(Value::Null) | None => None,
            Some(other) => {
                tracing::warn!(key = %key, kind = value_kind(other), "Ignoring non-string shared alternative");
                None
            }
        }
    }

    /// Load the ConVar warnings, in document order.
    ///
    /// Every entry must bind to [`ConVarConflicts`]; the first one that does
    /// not fails the whole section.
    pub fn convars(&self) -> Result<Vec<(ItemId, ConVarConflicts)>> {
        let Some(section) = self.sections.get(CONVARS_SECTION) else {
            return Ok(Vec::new());
        };

        match section {
            Value::Null => Ok(Vec::new()),
            Value::Object(map) => map
                .iter()
                .map(|(id, value)| -> Result<(ItemId, ConVarConflicts)> {
                    let record = serde_json::from_value::<ConVarConflicts>(value.clone()).map_err(|e| {
                        CheckerError::Bind {
                            section: CONVARS_SECTION.to_string(),
                            key: id.clone(),
                            reason: e.to_string(),
                        }
                    })?;
                    Ok((id.clone(), record))
                })
                .collect(),
            other => Err(CheckerError::Bind {
                section: CONVARS_SECTION.to_string(),
                key: CONVARS_SECTION.to_string(),
                reason: format!("expected an object, found {}", value_kind(other)),
            }),
        }
    }

    /// The configured default list, if any.
    pub fn default_list(&self) -> Option<String> {
        match self.sections.get(DEFAULT_LIST_KEY) {
            Some(Value::String(s)) if !s.trim().is_empty() => Some(s.trim().to_string()),
            _ => None,
        }
    }
}

/// Locate the settings file.
///
/// An explicit path is used as is. Otherwise `appSettings.json` is looked up
/// in the working directory, then next to the executable. Returns `None`
/// when nothing is found.
pub fn resolve_settings_path(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }

    let cwd_candidate = PathBuf::from(DEFAULT_SETTINGS_FILE);
    if cwd_candidate.is_file() {
        return Some(cwd_candidate);
    }

    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join(DEFAULT_SETTINGS_FILE)))
        .filter(|path| path.is_file())
}

/// Split a delimited id list, dropping blanks.
///
/// # Examples
/// ```
/// use workshop_collection_checker::settings::split_id_list;
///
/// assert_eq!(split_id_list("1; 2,3|| 4"), vec!["1", "2", "3", "4"]);
/// ```
pub fn split_id_list(list: &str) -> Vec<ItemId> {
    list.split(LIST_SEPARATORS)
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(String::from)
        .collect()
}

/// Bind a scalar to text.
fn bind_text(section: &str, key: &str, value: &Value) -> Result<String> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        other => Err(CheckerError::Bind {
            section: section.to_string(),
            key: key.to_string(),
            reason: format!("expected text, found {}", value_kind(other)),
        }),
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}

fn is_yaml_path(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"))
}
