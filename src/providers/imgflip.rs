// SPDX-License-Identifier: MPL-2.0
//! Imgflip template catalog (`api.imgflip.com/get_memes`).
//!
//! Imgflip has no search endpoint, so [`search`] refetches the catalog and
//! filters template names locally.

use super::{MemeRecord, Provider};
use crate::error::{Error, Result};
use serde::Deserialize;

const LISTING_URL: &str = "https://api.imgflip.com/get_memes";

#[derive(Debug, Deserialize)]
pub struct ImgflipResponse {
    success: bool,
    #[serde(default)]
    data: Option<ImgflipData>,
}

#[derive(Debug, Deserialize)]
struct ImgflipData {
    #[serde(default)]
    memes: Vec<ImgflipMeme>,
}

#[derive(Debug, Deserialize)]
struct ImgflipMeme {
    url: String,
    name: String,
}

impl ImgflipResponse {
    /// Flattens the response into normalized records, keeping at most `limit`.
    pub fn normalize(self, limit: usize) -> Result<Vec<MemeRecord>> {
        if !self.success {
            return Err(Error::Network("imgflip reported failure".to_string()));
        }
        let memes = self.data.map(|d| d.memes).unwrap_or_default();
        Ok(memes
            .into_iter()
            .take(limit)
            .map(|meme| MemeRecord {
                url: meme.url,
                title: meme.name,
                provider: Provider::Imgflip,
            })
            .collect())
    }
}

async fn fetch_catalog(client: &reqwest::Client) -> Result<ImgflipResponse> {
    let response = client.get(LISTING_URL).send().await?;
    if !response.status().is_success() {
        return Err(Error::Network(format!(
            "imgflip HTTP status: {}",
            response.status()
        )));
    }
    Ok(response.json::<ImgflipResponse>().await?)
}

/// Fetches the template catalog, truncated to `limit` records.
pub async fn fetch_listing(client: &reqwest::Client, limit: usize) -> Result<Vec<MemeRecord>> {
    fetch_catalog(client).await?.normalize(limit)
}

/// Case-insensitive substring search over template names.
pub async fn search(
    client: &reqwest::Client,
    query: &str,
    limit: usize,
) -> Result<Vec<MemeRecord>> {
    let records = fetch_catalog(client).await?.normalize(usize::MAX)?;
    Ok(filter_by_title(records, query, limit))
}

/// Local substring filter used by providers without a native search endpoint.
pub(crate) fn filter_by_title(
    records: Vec<MemeRecord>,
    query: &str,
    limit: usize,
) -> Vec<MemeRecord> {
    let needle = query.to_lowercase();
    records
        .into_iter()
        .filter(|record| record.title.to_lowercase().contains(&needle))
        .take(limit)
        .collect()
}
