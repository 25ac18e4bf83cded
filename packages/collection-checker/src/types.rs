//! Core data types for the checker.
//!
//! Everything here is a read-only snapshot: settings are loaded once at
//! startup and the fetched item ids never change during a run.

use serde::{Deserialize, Deserializer};

use crate::config::{ALL_LISTS, DEFAULT_LIST};

/// Identifier of a collection member (workshop item id).
///
/// Opaque; the scraper does not deduplicate, so the same id may appear
/// more than once in a fetched collection.
pub type ItemId = String;

/// One entry of a conflict list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConflictEntry {
    /// Item id the entry applies to.
    pub item_id: ItemId,

    /// Human-readable conflict description. Delimited id lists carry none.
    pub description: Option<String>,
}

/// A single problematic ConVar setting of an addon.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ConVarConflict {
    /// ConVar name.
    #[serde(rename = "Name", alias = "name")]
    pub name: String,

    /// Value that causes problems.
    #[serde(rename = "Value", alias = "value", deserialize_with = "scalar_string")]
    pub value: String,

    /// Suggested alternative, if any.
    #[serde(rename = "Alternative", alias = "alternative", default)]
    pub alternative: Option<String>,
}

/// ConVar warnings for one addon, keyed by item id in the `ConVars` section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ConVarConflicts {
    /// Display name of the addon.
    #[serde(rename = "AddonName", alias = "addonName")]
    pub addon_name: String,

    /// Problematic settings, in configuration order.
    #[serde(rename = "Conflicts", alias = "conflicts")]
    pub conflicts: Vec<ConVarConflict>,
}

/// Accept strings, numbers and booleans as text.
fn scalar_string<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        serde_json::Value::Bool(b) => Ok(b.to_string()),
        other => Err(D::Error::custom(format!(
            "expected a string, number or boolean, found {other}"
        ))),
    }
}

/// Severity of a report line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Progress and status output.
    Info,

    /// ConVar warnings.
    Warning,

    /// Conflicts.
    Error,
}

/// A single line of checker output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub severity: Severity,
    pub message: String,
}

impl Report {
    /// Create an informational report.
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Info,
            message: message.into(),
        }
    }

    /// Create a warning report.
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            message: message.into(),
        }
    }

    /// Create an error report.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            message: message.into(),
        }
    }
}

/// Which conflict lists to check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListTarget {
    /// Every non-reserved section.
    All,

    /// Exactly one named section.
    Named(String),
}

impl ListTarget {
    /// Parse a list argument; `all` in any casing selects every list.
    ///
    /// # Examples
    /// ```
    /// use workshop_collection_checker::types::ListTarget;
    ///
    /// assert_eq!(ListTarget::parse("ALL"), ListTarget::All);
    /// assert_eq!(ListTarget::parse("Banned"), ListTarget::Named("Banned".into()));
    /// ```
    #[must_use]
    pub fn parse(name: &str) -> Self {
        if name.eq_ignore_ascii_case(ALL_LISTS) {
            Self::All
        } else {
            Self::Named(name.to_string())
        }
    }
}

impl Default for ListTarget {
    fn default() -> Self {
        Self::parse(DEFAULT_LIST)
    }
}
