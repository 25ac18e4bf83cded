//! Workshop Collection Checker - find known conflicts in a Steam Workshop collection.
//!
//! This crate fetches the member list of a workshop collection page and
//! checks the addon ids against user-maintained conflict lists and ConVar
//! warnings from a settings file.
//!
//! # Example
//!
//! ```
//! use workshop_collection_checker::{check_items, ListTarget, Settings};
//!
//! let settings = Settings::from_json_str(r#"{ "Banned": { "111": "Bad Addon" } }"#).unwrap();
//! let ids = vec!["111".to_string(), "222".to_string()];
//! let reports = check_items(&ids, &settings, &ListTarget::parse("Banned")).unwrap();
//! assert!(reports.iter().any(|r| r.message == "Conflict found: Bad Addon (111)"));
//! ```
//!
//! # Architecture
//!
//! - [`config`]: Configuration constants and validation
//! - [`types`]: Core data types (ItemId, ConVarConflicts, Report, etc.)
//! - [`error`]: Error types and Result alias
//! - [`http`]: HTTP client for downloading pages
//! - [`collection`]: Collection page scraping
//! - [`settings`]: Settings file loading and section lookup
//! - [`matcher`]: Conflict list matching
//! - [`convars`]: ConVar warning matching
//! - [`report`]: Console output
//! - [`checker`]: Main checker service
//! - [`cli`]: Command-line interface

pub mod checker;
pub mod cli;
pub mod collection;
pub mod config;
pub mod convars;
pub mod error;
pub mod http;
pub mod matcher;
pub mod report;
pub mod settings;
pub mod types;

// Re-export main functions
pub use checker::{check_items, run};

// Re-export commonly used items
pub use collection::{parse_collection_items, CollectionSource, WorkshopScraper};
pub use error::{CheckerError, Result};
pub use report::Reporter;
pub use settings::Settings;
pub use types::{ConVarConflict, ConVarConflicts, ItemId, ListTarget, Report, Severity};
