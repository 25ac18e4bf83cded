//! Configuration constants and validation functions for the checker.

use reqwest::Url;

use crate::error::{CheckerError, Result};

/// Base URL of the Steam Workshop item/collection detail page.
pub const WORKSHOP_BASE_URL: &str = "https://steamcommunity.com/sharedfiles/filedetails/";

/// HTTP timeout in seconds.
///
/// Collection pages are a few hundred KB at most; anything slower than this
/// is treated as a failed fetch instead of hanging the run.
pub const HTTP_TIMEOUT_SECS: u64 = 30;

/// Maximum HTTP response size in bytes (16 MB).
pub const MAX_RESPONSE_SIZE: u64 = 16 * 1024 * 1024;

/// Settings file looked up when `--config` is not given.
pub const DEFAULT_SETTINGS_FILE: &str = "appSettings.json";

/// List checked when neither the command line nor the settings name one.
pub const DEFAULT_LIST: &str = "All";

/// Target name that selects every conflict list (case-insensitive).
pub const ALL_LISTS: &str = "all";

/// Section holding per-item alternatives.
pub const ALTERNATIVES_SECTION: &str = "Alternatives";

/// Section holding ConVar warnings keyed by item id.
pub const CONVARS_SECTION: &str = "ConVars";

/// Top-level scalar naming the default list.
pub const DEFAULT_LIST_KEY: &str = "DefaultList";

/// Suffix of the per-list shared alternative scalar (`<List>Alternative`).
pub const SHARED_ALTERNATIVE_SUFFIX: &str = "Alternative";

/// Separators accepted in delimited id lists (`"111;222,333|444"`).
pub const LIST_SEPARATORS: [char; 3] = [';', ',', '|'];

/// Check whether a top-level section name is reserved.
///
/// Reserved names and the shared alternative suffix match exactly, including
/// case.
///
/// # Examples
/// ```
/// use workshop_collection_checker::config::is_reserved_section;
///
/// assert!(is_reserved_section("Alternatives"));
/// assert!(is_reserved_section("BannedAlternative"));
/// assert!(!is_reserved_section("Banned"));
/// assert!(!is_reserved_section("alternatives"));
/// ```
pub fn is_reserved_section(name: &str) -> bool {
    name == ALTERNATIVES_SECTION
        || name == CONVARS_SECTION
        || name == DEFAULT_LIST_KEY
        || name.ends_with(SHARED_ALTERNATIVE_SUFFIX)
}

/// Name of the shared alternative scalar for a list.
pub fn shared_alternative_key(list_name: &str) -> String {
    format!("{list_name}{SHARED_ALTERNATIVE_SUFFIX}")
}

/// Validate a workshop collection id.
///
/// Ids are opaque; the only requirement is that they are not blank.
///
/// # Examples
/// ```
/// use workshop_collection_checker::config::validate_collection_id;
///
/// assert!(validate_collection_id("123456789").is_ok());
/// assert!(validate_collection_id("   ").is_err());
/// ```
pub fn validate_collection_id(collection_id: &str) -> Result<()> {
    if collection_id.trim().is_empty() {
        Err(CheckerError::InvalidCollectionId(collection_id.to_string()))
    } else {
        Ok(())
    }
}

/// Build the detail page URL for a collection.
///
/// The id is percent-encoded as the value of the `id` query parameter.
///
/// # Arguments
/// * `base_url` - Detail page URL without query (see [`WORKSHOP_BASE_URL`])
/// * `collection_id` - Collection id (should be validated with `validate_collection_id` first)
pub fn collection_url(base_url: &str, collection_id: &str) -> Result<Url> {
    Url::parse_with_params(base_url, &[("id", collection_id)]).map_err(|e| {
        CheckerError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        }
    })
}
