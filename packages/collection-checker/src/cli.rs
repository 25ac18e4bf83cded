//! Command-line interface for the checker.

use std::path::PathBuf;

use clap::{CommandFactory, Parser};
use indicatif::{ProgressBar, ProgressStyle};

use crate::checker;
use crate::collection::{CollectionSource, WorkshopScraper};
use crate::config::WORKSHOP_BASE_URL;
use crate::error::{CheckerError, Result};
use crate::report::Reporter;
use crate::settings::{resolve_settings_path, Settings};
use crate::types::{ItemId, ListTarget};

/// Check a Steam Workshop collection against known conflict and ConVar lists.
#[derive(Parser, Debug)]
#[command(name = "workshop-collection-checker")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Workshop collection id (e.g., 123456789)
    pub collection_id: Option<String>,

    /// Conflict list to check, or "all" (default: DefaultList from settings, else All)
    pub list: Option<String>,

    /// Settings file (default: appSettings.json in the working directory or next to the executable)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Collection detail page URL, without query
    #[arg(long, env = "WORKSHOP_BASE_URL", default_value = WORKSHOP_BASE_URL)]
    pub base_url: String,
}

/// Run the CLI.
pub fn run() -> Result<()> {
    execute(Cli::parse())
}

/// Usage line for error output.
pub fn usage() -> String {
    Cli::command().render_usage().to_string()
}

/// Execute a parsed command line.
pub fn execute(cli: Cli) -> Result<()> {
    let collection_id = cli.collection_id.ok_or(CheckerError::MissingCollectionId)?;

    let settings = match resolve_settings_path(cli.config.as_deref()) {
        Some(path) => Settings::load(&path)?,
        None => {
            tracing::debug!("No settings file found, using empty settings");
            Settings::empty()
        }
    };

    let target = cli
        .list
        .or_else(|| settings.default_list())
        .map(|name| ListTarget::parse(&name))
        .unwrap_or_default();
    tracing::debug!(?target, "Resolved list target");

    let source = WithSpinner(WorkshopScraper::with_base_url(cli.base_url)?);
    let mut reporter = Reporter::stdio();
    checker::run(&source, &settings, &collection_id, &target, &mut reporter)?;
    Ok(())
}

/// Shows a spinner on stderr while the wrapped source fetches.
struct WithSpinner<S>(S);

impl<S: CollectionSource> CollectionSource for WithSpinner<S> {
    fn fetch(&self, collection_id: &str) -> Result<Vec<ItemId>> {
        let pb = ProgressBar::new_spinner();
        #[allow(clippy::expect_used)] // Static template string that is guaranteed to be valid
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .expect("valid template"),
        );
        pb.set_message("Downloading collection page...");
        pb.enable_steady_tick(std::time::Duration::from_millis(100));

        let result = self.0.fetch(collection_id);
        pb.finish_and_clear();
        result
    }
}
