//! Main checker service that ties all components together.

use std::io::Write;

use crate::collection::CollectionSource;
use crate::convars::check_convars;
use crate::error::Result;
use crate::matcher::check_target;
use crate::report::Reporter;
use crate::settings::Settings;
use crate::types::{ItemId, ListTarget, Report};

/// Check item ids against the selected conflict list(s) and the ConVar
/// warnings.
///
/// Conflict reports come first, then ConVar warnings. Settings are bound in
/// full before anything is returned, so a malformed entry fails the check
/// without partial output.
pub fn check_items(
    item_ids: &[ItemId],
    settings: &Settings,
    target: &ListTarget,
) -> Result<Vec<Report>> {
    let mut reports = check_target(item_ids, settings, target)?;
    let convars = settings.convars()?;
    reports.extend(check_convars(item_ids, &convars));
    Ok(reports)
}

/// Fetch a collection and report its conflicts.
///
/// # Arguments
/// * `source` - Where collection members come from
/// * `settings` - Loaded settings
/// * `collection_id` - Workshop collection id
/// * `target` - List(s) to check
/// * `reporter` - Output for progress lines and reports
///
/// # Returns
/// The fetched item ids
pub fn run<O: Write, E: Write>(
    source: &dyn CollectionSource,
    settings: &Settings,
    collection_id: &str,
    target: &ListTarget,
    reporter: &mut Reporter<O, E>,
) -> Result<Vec<ItemId>> {
    reporter.info(format!(
        "Gathering addons list from workshop collection: {collection_id}"
    ))?;
    reporter.flush()?;

    let item_ids = source.fetch(collection_id)?;
    reporter.info(format!("Found {} collection items", item_ids.len()))?;

    let reports = check_items(&item_ids, settings, target)?;
    reporter.emit_all(&reports)?;

    reporter.info("Done!")?;
    reporter.flush()?;
    Ok(item_ids)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CheckerError;
    use crate::types::Severity;

    struct FixedSource(Vec<ItemId>);

    impl CollectionSource for FixedSource {
        fn fetch(&self, _collection_id: &str) -> Result<Vec<ItemId>> {
            Ok(self.0.clone())
        }
    }

    struct FailingSource;

    impl CollectionSource for FailingSource {
        fn fetch(&self, collection_id: &str) -> Result<Vec<ItemId>> {
            Err(CheckerError::Parse {
                index: 0,
                reason: format!("broken page for {collection_id}"),
            })
        }
    }

    fn ids(ids: &[&str]) -> Vec<ItemId> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    fn run_to_strings(
        source: &dyn CollectionSource,
        settings: &Settings,
        target: &ListTarget,
    ) -> Result<(String, String)> {
        let mut reporter = Reporter::new(Vec::new(), Vec::new());
        run(source, settings, "999", target, &mut reporter)?;
        let (out, err) = reporter.into_inner();
        Ok((
            console::strip_ansi_codes(&String::from_utf8_lossy(&out)).into_owned(),
            console::strip_ansi_codes(&String::from_utf8_lossy(&err)).into_owned(),
        ))
    }

    #[test]
    fn test_conflict_and_convar_for_same_item() {
        let settings = Settings::from_json_str(
            r#"{
                "Banned": { "111": "Bad Addon" },
                "ConVars": {
                    "111": { "AddonName": "X", "Conflicts": [ { "Name": "sv_test", "Value": "1" } ] }
                }
            }"#,
        )
        .unwrap();

        let reports = check_items(&ids(&["111", "222"]), &settings, &ListTarget::All).unwrap();
        assert!(reports
            .iter()
            .any(|r| r.severity == Severity::Error && r.message.contains("111")));
        assert!(reports
            .iter()
            .any(|r| r.severity == Severity::Warning && r.message.contains("sv_test")));
        assert!(!reports.iter().any(|r| r.message.contains("222")));
    }

    #[test]
    fn test_run_output() {
        let settings = Settings::from_json_str(
            r#"{ "Banned": { "111": "Bad Addon" }, "Alternatives": { "111": "Use This Instead" } }"#,
        )
        .unwrap();
        let source = FixedSource(ids(&["111", "222"]));

        let (out, err) =
            run_to_strings(&source, &settings, &ListTarget::Named("Banned".into())).unwrap();
        assert_eq!(
            out,
            "Gathering addons list from workshop collection: 999\n\
             Found 2 collection items\n\
             Checking list: Banned\n\
             Done!\n"
        );
        assert_eq!(
            err,
            "Conflict found: Bad Addon (111)\n  Alternative: Use This Instead\n"
        );
    }

    #[test]
    fn test_run_with_empty_settings() {
        let source = FixedSource(ids(&["1", "2", "3"]));
        let (out, err) = run_to_strings(&source, &Settings::empty(), &ListTarget::All).unwrap();
        assert!(out.ends_with("Done!\n"));
        assert!(err.is_empty());
    }

    #[test]
    fn test_run_propagates_fetch_failure() {
        let result = run_to_strings(&FailingSource, &Settings::empty(), &ListTarget::All);
        assert!(matches!(result, Err(CheckerError::Parse { .. })));
    }

    #[test]
    fn test_bind_error_aborts_before_reports() {
        let settings = Settings::from_json_str(
            r#"{ "A": { "1": "one" }, "ConVars": { "1": { "AddonName": "X" } } }"#,
        )
        .unwrap();
        let mut reporter = Reporter::new(Vec::new(), Vec::new());
        let result = run(
            &FixedSource(ids(&["1"])),
            &settings,
            "999",
            &ListTarget::All,
            &mut reporter,
        );
        assert!(matches!(result, Err(CheckerError::Bind { .. })));

        let (_, err) = reporter.into_inner();
        assert!(err.is_empty());
    }
}
