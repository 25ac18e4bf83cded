//! ConVar warning matching.

use std::collections::HashSet;

use crate::matcher::alternative_message;
use crate::types::{ConVarConflicts, ItemId, Report};

/// Report ConVar warnings for addons present in the collection.
///
/// Walks `convars` in settings order, not item order. An addon that appears
/// several times in the collection is reported once.
pub fn check_convars(item_ids: &[ItemId], convars: &[(ItemId, ConVarConflicts)]) -> Vec<Report> {
    let present: HashSet<&str> = item_ids.iter().map(String::as_str).collect();

    let mut reports = Vec::new();
    for (item_id, record) in convars {
        if !present.contains(item_id.as_str()) {
            continue;
        }

        reports.push(Report::warning(format!(
            "{} ({item_id}) has known ConVar issues",
            record.addon_name
        )));

        for conflict in &record.conflicts {
            reports.push(Report::warning(format!(
                "If '{}' is set to '{}' then it can cause issues",
                conflict.name, conflict.value
            )));

            if let Some(alternative) = conflict
                .alternative
                .as_deref()
                .filter(|alt| !alt.trim().is_empty())
            {
                reports.push(Report::warning(alternative_message(alternative)));
            }
        }
    }
    reports
}
