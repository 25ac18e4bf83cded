//! Error types for the collection checker.
//!
//! Every failure the checker can run into is a `CheckerError`. Missing
//! optional configuration is not an error; it resolves to empty lists.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the collection checker library.
#[derive(Debug, Error)]
pub enum CheckerError {
    /// No collection id was given on the command line.
    #[error("Missing required argument: workshop collection id")]
    MissingCollectionId,

    /// The collection id is blank.
    #[error("Invalid collection id: '{0}'. Expected a non-empty workshop id (e.g., 123456789)")]
    InvalidCollectionId(String),

    /// The base URL used to build collection page URLs is not a valid URL.
    #[error("Invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Failed to download the collection page.
    #[error("Failed to fetch workshop collection {collection_id}: {source}")]
    Fetch {
        collection_id: String,
        #[source]
        source: reqwest::Error,
    },

    /// The response body exceeded the configured limit.
    #[error("Response too large: {size} bytes (limit {limit} bytes)")]
    ResponseTooLarge { size: u64, limit: u64 },

    /// The collection page did not have the expected structure.
    #[error("Unexpected collection page structure at item {index}: {reason}")]
    Parse { index: usize, reason: String },

    /// The settings file exists but could not be read.
    #[error("Failed to read settings file {}: {source}", .path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The settings file is not valid JSON/YAML.
    #[error("Failed to parse settings file {}: {reason}", .path.display())]
    ConfigParse { path: PathBuf, reason: String },

    /// A settings entry does not have the required shape.
    #[error("Invalid entry '{key}' in section '{section}': {reason}")]
    Bind {
        section: String,
        key: String,
        reason: String,
    },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for checker operations.
pub type Result<T> = std::result::Result<T, CheckerError>;
