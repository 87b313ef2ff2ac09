// SPDX-License-Identifier: MPL-2.0
//! Memegen blank template catalog (`api.memegen.link/templates/`).
//!
//! Like Imgflip, there is no search endpoint; search filters the catalog
//! locally by template name.

use super::imgflip::filter_by_title;
use super::{MemeRecord, Provider};
use crate::error::{Error, Result};
use serde::Deserialize;

const TEMPLATES_URL: &str = "https://api.memegen.link/templates/";

#[derive(Debug, Deserialize)]
pub struct MemegenTemplate {
    name: String,
    /// URL of the template with no caption boxes rendered.
    blank: String,
}

/// Flattens the template array into normalized records, keeping `limit`.
pub fn normalize(templates: Vec<MemegenTemplate>, limit: usize) -> Vec<MemeRecord> {
    templates
        .into_iter()
        .take(limit)
        .map(|template| MemeRecord {
            url: template.blank,
            title: template.name,
            provider: Provider::Memegen,
        })
        .collect()
}

async fn fetch_catalog(client: &reqwest::Client) -> Result<Vec<MemegenTemplate>> {
    let response = client.get(TEMPLATES_URL).send().await?;
    if !response.status().is_success() {
        return Err(Error::Network(format!(
            "memegen HTTP status: {}",
            response.status()
        )));
    }
    Ok(response.json::<Vec<MemegenTemplate>>().await?)
}

/// Fetches the template catalog, truncated to `limit` records.
pub async fn fetch_listing(client: &reqwest::Client, limit: usize) -> Result<Vec<MemeRecord>> {
    Ok(normalize(fetch_catalog(client).await?, limit))
}

/// Case-insensitive substring search over template names.
pub async fn search(
    client: &reqwest::Client,
    query: &str,
    limit: usize,
) -> Result<Vec<MemeRecord>> {
    let records = normalize(fetch_catalog(client).await?, usize::MAX);
    Ok(filter_by_title(records, query, limit))
}
