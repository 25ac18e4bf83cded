//! HTTP client wrapper for downloading workshop pages.

use std::io::Read;
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::Url;

use crate::config::HTTP_TIMEOUT_SECS;
use crate::error::{CheckerError, Result};

/// User agent string identifying this checker.
const USER_AGENT: &str = concat!("workshop-collection-checker/", env!("CARGO_PKG_VERSION"));

/// Create a configured HTTP client.
///
/// # Returns
/// A `reqwest::blocking::Client` configured with a request timeout and user agent.
pub fn create_client() -> Result<Client> {
    let client = Client::builder()
        .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
        .user_agent(USER_AGENT)
        .build()?;
    Ok(client)
}

/// Download a page as text.
///
/// Single attempt, no retries. Non-2xx responses are errors.
///
/// # Arguments
/// * `client` - HTTP client to use
/// * `url` - URL to download from
/// * `max_size` - Maximum body size in bytes
pub fn download_text(client: &Client, url: &Url, max_size: u64) -> Result<String> {
    tracing::debug!(%url, "Downloading");

    let response = client.get(url.clone()).send()?.error_for_status()?;

    if let Some(len) = response.content_length() {
        if len > max_size {
            return Err(CheckerError::ResponseTooLarge {
                size: len,
                limit: max_size,
            });
        }
    }

    // Content-Length can be absent or wrong; cap the read as well.
    let mut bytes = Vec::new();
    response
        .take(max_size + 1)
        .read_to_end(&mut bytes)?;
    if bytes.len() as u64 > max_size {
        return Err(CheckerError::ResponseTooLarge {
            size: bytes.len() as u64,
            limit: max_size,
        });
    }

    tracing::debug!(bytes = bytes.len(), "Download complete");
    Ok(bytes_to_string(&bytes, url.as_str()))
}

/// Decode a body as UTF-8, replacing invalid sequences.
pub fn bytes_to_string(bytes: &[u8], context: &str) -> String {
    match String::from_utf8(bytes.to_vec()) {
        Ok(s) => s,
        Err(_) => {
            tracing::warn!(context, "Response is not valid UTF-8, decoding lossily");
            String::from_utf8_lossy(bytes).into_owned()
        }
    }
}
