//! Conflict list matching.

use std::collections::HashMap;

use crate::error::Result;
use crate::settings::Settings;
use crate::types::{ConflictEntry, ItemId, ListTarget, Report};

/// Check item ids against one conflict list.
///
/// Emits one error report per occurrence of a listed id, in input order.
/// Each conflict is followed by an alternative line when one resolves:
/// the item's entry in `alternatives` first, else `shared_alternative`
/// when it is not blank.
pub fn check_list(
    item_ids: &[ItemId],
    conflicts: &HashMap<ItemId, ConflictEntry>,
    alternatives: &HashMap<ItemId, String>,
    shared_alternative: Option<&str>,
) -> Vec<Report> {
    let shared_alternative = shared_alternative.filter(|alt| !alt.trim().is_empty());

    let mut reports = Vec::new();
    for item_id in item_ids {
        let Some(entry) = conflicts.get(item_id) else {
            continue;
        };

        reports.push(Report::error(conflict_message(entry)));

        let alternative = alternatives
            .get(item_id)
            .map(String::as_str)
            .or(shared_alternative);
        if let Some(alternative) = alternative {
            reports.push(Report::error(alternative_message(alternative)));
        }
    }
    reports
}

/// Check item ids against the list(s) selected by `target`.
///
/// For [`ListTarget::All`] every list from [`Settings::list_names`] is
/// checked in document order, each with its own shared alternative. Every
/// checked list is introduced by an informational header line.
pub fn check_target(
    item_ids: &[ItemId],
    settings: &Settings,
    target: &ListTarget,
) -> Result<Vec<Report>> {
    let alternatives = settings.alternatives()?;

    let list_names = match target {
        ListTarget::All => settings.list_names(),
        ListTarget::Named(name) => {
            if !settings.has_section(name) {
                tracing::warn!(list = %name, "List not found in settings");
            }
            vec![name.clone()]
        }
    };

    let mut reports = Vec::new();
    for name in list_names {
        let conflicts = settings.conflict_list(&name)?;
        let shared_alternative = settings.shared_alternative(&name);
        tracing::debug!(list = %name, entries = conflicts.len(), "Checking list");

        reports.push(Report::info(format!("Checking list: {name}")));
        reports.extend(check_list(
            item_ids,
            &conflicts,
            &alternatives,
            shared_alternative.as_deref(),
        ));
    }
    Ok(reports)
}

fn conflict_message(entry: &ConflictEntry) -> String {
    match &entry.description {
        Some(description) => format!("Conflict found: {description} ({})", entry.item_id),
        None => format!("Conflict found: {}", entry.item_id),
    }
}

/// Text of an alternative line.
pub fn alternative_message(alternative: &str) -> String {
    format!("  Alternative: {alternative}")
}
