// SPDX-License-Identifier: MPL-2.0
//! meme-api.com, an aggregator over Reddit meme subreddits.
//!
//! The search path doubles as subreddit browsing: `gimme/<query>/<n>`
//! treats the query as a subreddit name.

use super::{MemeRecord, Provider};
use crate::error::{Error, Result};
use serde::Deserialize;

const BASE_URL: &str = "https://meme-api.com/gimme";

#[derive(Debug, Deserialize)]
pub struct RedditResponse {
    #[serde(default)]
    memes: Vec<RedditMeme>,
}

#[derive(Debug, Deserialize)]
struct RedditMeme {
    url: String,
    title: String,
}

impl RedditResponse {
    pub fn normalize(self) -> Vec<MemeRecord> {
        self.memes
            .into_iter()
            .map(|meme| MemeRecord {
                url: meme.url,
                title: meme.title,
                provider: Provider::Reddit,
            })
            .collect()
    }
}

async fn fetch(client: &reqwest::Client, url: &str) -> Result<Vec<MemeRecord>> {
    let response = client.get(url).send().await?;
    if !response.status().is_success() {
        return Err(Error::Network(format!(
            "meme-api HTTP status: {}",
            response.status()
        )));
    }
    Ok(response.json::<RedditResponse>().await?.normalize())
}

/// Fetches `limit` memes from the default subreddit rotation.
pub async fn fetch_listing(client: &reqwest::Client, limit: usize) -> Result<Vec<MemeRecord>> {
    fetch(client, &format!("{BASE_URL}/{limit}")).await
}

/// Fetches `limit` memes from the subreddit named by `query`.
pub async fn search(
    client: &reqwest::Client,
    query: &str,
    limit: usize,
) -> Result<Vec<MemeRecord>> {
    let encoded: String = url_encode(query);
    fetch(client, &format!("{BASE_URL}/{encoded}/{limit}")).await
}

/// Minimal percent-encoding for a path segment.
fn url_encode(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for byte in raw.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char);
            }
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}
