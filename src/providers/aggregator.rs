// SPDX-License-Identifier: MPL-2.0
//! Concurrent fan-out across all providers with partial-failure tolerance.
//!
//! Every provider future is driven to completion regardless of how its
//! siblings fare; failures are logged and contribute zero records. An empty
//! aggregate is an ordinary outcome, distinct from "still loading", which the
//! gallery tracks with its own flag.

use super::{imgflip, memegen, reddit, tenor, MemeRecord, Provider};
use crate::config::Config;
use crate::error::Result;
use futures_util::future::join_all;

/// One provider's outcome within an aggregation round.
pub type ProviderOutcome = (Provider, Result<Vec<MemeRecord>>);

/// Fetches the unfiltered listing from every provider concurrently.
///
/// Successes are concatenated in [`Provider::all`] order.
pub async fn fetch_all(client: &reqwest::Client, config: &Config) -> Vec<MemeRecord> {
    let limit = config.listing_page_size();
    let outcomes = join_all([
        outcome(Provider::Imgflip, imgflip::fetch_listing(client, limit)),
        outcome(Provider::Reddit, reddit::fetch_listing(client, limit)),
        outcome(
            Provider::Tenor,
            tenor::fetch_listing(
                client,
                config.tenor_api_key(),
                config.tenor_client_key(),
                limit,
            ),
        ),
        outcome(Provider::Memegen, memegen::fetch_listing(client, limit)),
    ])
    .await;
    merge_outcomes(outcomes)
}

/// Runs a keyword search against every provider concurrently.
///
/// Providers without a native search endpoint filter their catalog locally.
pub async fn search_all(client: &reqwest::Client, config: &Config, query: &str) -> Vec<MemeRecord> {
    let limit = config.search_page_size();
    let outcomes = join_all([
        outcome(Provider::Imgflip, imgflip::search(client, query, limit)),
        outcome(Provider::Reddit, reddit::search(client, query, limit)),
        outcome(
            Provider::Tenor,
            tenor::search(
                client,
                config.tenor_api_key(),
                config.tenor_client_key(),
                query,
                limit,
            ),
        ),
        outcome(Provider::Memegen, memegen::search(client, query, limit)),
    ])
    .await;
    merge_outcomes(outcomes)
}

/// Pairs a provider tag with its future so the merge step can attribute
/// failures. Boxing erases the per-provider future types for `join_all`.
fn outcome<'a>(
    provider: Provider,
    future: impl std::future::Future<Output = Result<Vec<MemeRecord>>> + Send + 'a,
) -> futures_util::future::BoxFuture<'a, ProviderOutcome> {
    Box::pin(async move { (provider, future.await) })
}

/// Concatenates successful outcomes and logs the rest.
///
/// A failing provider never fails the aggregate call.
pub fn merge_outcomes(outcomes: Vec<ProviderOutcome>) -> Vec<MemeRecord> {
    let mut merged = Vec::new();
    for (provider, result) in outcomes {
        match result {
            Ok(records) => {
                tracing::debug!(%provider, count = records.len(), "provider returned records");
                merged.extend(records);
            }
            Err(error) => {
                tracing::warn!(%provider, %error, "provider failed, contributing zero records");
            }
        }
    }
    merged
}
