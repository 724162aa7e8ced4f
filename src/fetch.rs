use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::Client;

use crate::error::FetchError;

/// Total-request timeout for each page fetch.
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Build the shared HTTP client. One client for the whole batch.
pub fn build_client() -> Result<Client> {
    Client::builder()
        .timeout(FETCH_TIMEOUT)
        .build()
        .context("failed to build HTTP client")
}

/// Fetch a single page body. One GET, no retry: the batch runner treats any
/// failure as an empty result for that URL and moves on.
pub async fn fetch_page(client: &Client, url: &str) -> Result<String, FetchError> {
    let resp = client.get(url).send().await?;
    let resp = resp.error_for_status()?;
    Ok(resp.text().await?)
}

// ── Tests ──
