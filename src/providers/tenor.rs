// SPDX-License-Identifier: MPL-2.0
//! Tenor GIF API (`tenor.googleapis.com/v2`).
//!
//! Results expose several renditions per GIF; we prefer the full `gif`
//! rendition and fall back to `tinygif`. Results with neither are skipped.

use super::{MemeRecord, Provider};
use crate::error::{Error, Result};
use serde::Deserialize;

const FEATURED_URL: &str = "https://tenor.googleapis.com/v2/featured";
const SEARCH_URL: &str = "https://tenor.googleapis.com/v2/search";

/// Title used when Tenor sends no content description.
const FALLBACK_TITLE: &str = "Tenor GIF";

#[derive(Debug, Deserialize)]
pub struct TenorResponse {
    #[serde(default)]
    results: Vec<TenorGif>,
}

#[derive(Debug, Deserialize)]
struct TenorGif {
    #[serde(default)]
    content_description: Option<String>,
    #[serde(default)]
    media_formats: TenorFormats,
}

#[derive(Debug, Default, Deserialize)]
struct TenorFormats {
    #[serde(default)]
    gif: Option<TenorMedia>,
    #[serde(default)]
    tinygif: Option<TenorMedia>,
}

#[derive(Debug, Deserialize)]
struct TenorMedia {
    url: String,
}

impl TenorResponse {
    pub fn normalize(self) -> Vec<MemeRecord> {
        self.results
            .into_iter()
            .filter_map(|gif| {
                let url = gif
                    .media_formats
                    .gif
                    .or(gif.media_formats.tinygif)
                    .map(|media| media.url)?;
                let title = gif
                    .content_description
                    .filter(|title| !title.is_empty())
                    .unwrap_or_else(|| FALLBACK_TITLE.to_string());
                Some(MemeRecord {
                    url,
                    title,
                    provider: Provider::Tenor,
                })
            })
            .collect()
    }
}

async fn fetch(client: &reqwest::Client, url: &str, query: &[(&str, &str)]) -> Result<Vec<MemeRecord>> {
    let response = client.get(url).query(query).send().await?;
    if !response.status().is_success() {
        return Err(Error::Network(format!(
            "tenor HTTP status: {}",
            response.status()
        )));
    }
    Ok(response.json::<TenorResponse>().await?.normalize())
}

/// Fetches the featured GIF rotation.
pub async fn fetch_listing(
    client: &reqwest::Client,
    api_key: &str,
    client_key: &str,
    limit: usize,
) -> Result<Vec<MemeRecord>> {
    let limit = limit.to_string();
    fetch(
        client,
        FEATURED_URL,
        &[("key", api_key), ("client_key", client_key), ("limit", &limit)],
    )
    .await
}

/// Runs a keyword search against Tenor's native search endpoint.
pub async fn search(
    client: &reqwest::Client,
    api_key: &str,
    client_key: &str,
    query: &str,
    limit: usize,
) -> Result<Vec<MemeRecord>> {
    let limit = limit.to_string();
    fetch(
        client,
        SEARCH_URL,
        &[
            ("q", query),
            ("key", api_key),
            ("client_key", client_key),
            ("limit", &limit),
        ],
    )
    .await
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "results": [
            {"id": "1", "content_description": "excited dog",
             "media_formats": {
                 "gif": {"url": "https://media.tenor.com/full.gif"},
                 "tinygif": {"url": "https://media.tenor.com/tiny.gif"}
             }},
            {"id": "2", "content_description": "",
             "media_formats": {
                 "tinygif": {"url": "https://media.tenor.com/only-tiny.gif"}
             }},
            {"id": "3", "content_description": "no renditions",
             "media_formats": {}}
        ]
    }"#;

    #[test]
    fn normalize_prefers_full_gif_rendition() {
        let response: TenorResponse = serde_json::from_str(SAMPLE).expect("parse sample");
        let records = response.normalize();
        assert_eq!(records[0].url, "https://media.tenor.com/full.gif");
        assert_eq!(records[0].title, "excited dog");
    }

    #[test]
    fn normalize_falls_back_to_tinygif_and_default_title() {
        let response: TenorResponse = serde_json::from_str(SAMPLE).expect("parse sample");
        let records = response.normalize();
        assert_eq!(records[1].url, "https://media.tenor.com/only-tiny.gif");
        assert_eq!(records[1].title, FALLBACK_TITLE);
    }

    #[test]
    fn results_without_renditions_are_skipped() {
        let response: TenorResponse = serde_json::from_str(SAMPLE).expect("parse sample");
        let records = response.normalize();
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn records_are_tagged_as_tenor() {
        let response: TenorResponse = serde_json::from_str(SAMPLE).expect("parse sample");
        assert!(response
            .normalize()
            .iter()
            .all(|r| r.provider == Provider::Tenor));
    }
}
