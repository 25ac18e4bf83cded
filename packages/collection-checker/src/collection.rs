//! Workshop collection page scraping.
//!
//! A collection detail page lists its members as `div.collectionItem`
//! elements. The first link inside each one points at the item's own detail
//! page, `.../filedetails/?id=<item id>`.
//!
//! Matching code only sees [`CollectionSource`], so a different extraction
//! strategy (for example the Steam Web API) can replace the HTML scraper.

use std::sync::LazyLock;

use regex::Regex;
use reqwest::blocking::Client;
use scraper::{Html, Selector};

use crate::config::{collection_url, validate_collection_id, MAX_RESPONSE_SIZE, WORKSHOP_BASE_URL};
use crate::error::{CheckerError, Result};
use crate::http::{create_client, download_text};
use crate::types::ItemId;

/// Collection member elements.
#[allow(clippy::expect_used)] // Static selector that is guaranteed to be valid
static COLLECTION_ITEM: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div.collectionItem").expect("valid selector"));

/// Links inside a collection member.
#[allow(clippy::expect_used)] // Static selector that is guaranteed to be valid
static ANCHOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a").expect("valid selector"));

/// Item id in a detail page link.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static ITEM_ID_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r".*\?id=(.*)").expect("valid regex"));

/// Something that can list the members of a collection.
pub trait CollectionSource {
    /// Return the item ids of a collection in page order.
    fn fetch(&self, collection_id: &str) -> Result<Vec<ItemId>>;
}

/// Scrapes collection members from the workshop detail page.
pub struct WorkshopScraper {
    client: Client,
    base_url: String,
}

impl WorkshopScraper {
    /// Create a scraper for the public Steam Workshop.
    pub fn new() -> Result<Self> {
        Self::with_base_url(WORKSHOP_BASE_URL)
    }

    /// Create a scraper for another detail page URL (mirrors, tests).
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self> {
        Ok(Self {
            client: create_client()?,
            base_url: base_url.into(),
        })
    }
}

impl CollectionSource for WorkshopScraper {
    fn fetch(&self, collection_id: &str) -> Result<Vec<ItemId>> {
        validate_collection_id(collection_id)?;
        let url = collection_url(&self.base_url, collection_id)?;

        let html = download_text(&self.client, &url, MAX_RESPONSE_SIZE).map_err(|e| {
            if let CheckerError::Http(source) = e {
                CheckerError::Fetch {
                    collection_id: collection_id.to_string(),
                    source,
                }
            } else {
                e
            }
        })?;

        parse_collection_items(&html)
    }
}

/// Extract item ids from a collection page.
///
/// Every `div.collectionItem` must contain a link whose `href` carries an
/// `?id=` parameter. A member without one means the page layout changed, so
/// it fails the whole parse instead of being skipped.
///
/// # Examples
/// ```
/// use workshop_collection_checker::collection::parse_collection_items;
///
/// let html = r#"<div class="collectionItem"><a href="https://x/?id=42">A</a></div>"#;
/// assert_eq!(parse_collection_items(html).unwrap(), vec!["42".to_string()]);
/// ```
pub fn parse_collection_items(html: &str) -> Result<Vec<ItemId>> {
    let document = Html::parse_document(html);

    let mut ids = Vec::new();
    for (index, item) in document.select(&COLLECTION_ITEM).enumerate() {
        let anchor = item.select(&ANCHOR).next().ok_or_else(|| CheckerError::Parse {
            index,
            reason: "collection item has no link".to_string(),
        })?;

        let href = anchor.value().attr("href").ok_or_else(|| CheckerError::Parse {
            index,
            reason: "collection item link has no href".to_string(),
        })?;

        ids.push(extract_item_id(href).ok_or_else(|| CheckerError::Parse {
            index,
            reason: format!("no item id in link '{href}'"),
        })?);
    }

    tracing::debug!(count = ids.len(), "Parsed collection items");
    if ids.is_empty() {
        tracing::warn!("No collection items found on page");
    }
    Ok(ids)
}

/// Take the item id from a detail page link.
fn extract_item_id(href: &str) -> Option<ItemId> {
    ITEM_ID_PATTERN
        .captures(href)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}
