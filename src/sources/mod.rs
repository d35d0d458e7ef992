//! Input adapters, one per source type, and the combinator that runs them
//! all. Per-source failures are logged and swallowed here: one broken feed
//! must not stop the digest run.

pub mod hacker_news;
pub mod manual;
pub mod reddit;
pub mod rss;

use std::path::Path;
use std::time::Duration;

use chrono::{DateTime, Utc};
use reqwest::Client;
use tracing::info;

use crate::config::SourcesConfig;
use crate::types::{Item, Result};

pub const USER_AGENT: &str = "digest-aggregator/0.1 (weekly AI/ML digest)";

/// Build the HTTP client shared by all network adapters.
pub fn build_client(timeout_secs: u64) -> Result<Client> {
    Ok(Client::builder()
        .user_agent(USER_AGENT)
        .timeout(Duration::from_secs(timeout_secs))
        .build()?)
}

/// Run every input adapter and concatenate the results, in the fixed order
/// RSS → manual links → Hacker News → Reddit. A failing source contributes
/// nothing; whatever the others return still flows through, possibly an
/// empty list.
pub async fn fetch_all_items(
    client: &Client,
    config: &SourcesConfig,
    links_path: &Path,
) -> Vec<Item> {
    let mut combined = Vec::new();

    if !config.rss.is_empty() {
        let items = rss::fetch_rss_items(client, &config.rss).await;
        info!("RSS: {} items", items.len());
        combined.extend(items);
    }

    let items = manual::fetch_manual_items(links_path);
    if !items.is_empty() {
        info!("Manual: {} items", items.len());
    }
    combined.extend(items);

    if let Some(hn) = &config.hacker_news {
        let items = hacker_news::fetch_hacker_news_items(client, hn).await;
        info!("Hacker News: {} items", items.len());
        combined.extend(items);
    }

    if let Some(reddit) = &config.reddit {
        let items = reddit::fetch_reddit_items(client, reddit).await;
        info!("Reddit: {} items", items.len());
        combined.extend(items);
    }

    combined
}

/// First http(s) link of a feed entry, if any.
pub(crate) fn entry_link(entry: &feed_rs::model::Entry) -> Option<String> {
    entry
        .links
        .iter()
        .map(|link| link.href.trim())
        .find(|href| href.starts_with("http"))
        .map(String::from)
}

/// Entry title with a placeholder for feeds that omit it.
pub(crate) fn entry_title(entry: &feed_rs::model::Entry) -> String {
    entry
        .title
        .as_ref()
        .map(|title| title.content.trim().to_string())
        .filter(|title| !title.is_empty())
        .unwrap_or_else(|| "(untitled)".to_string())
}

/// Publication date as `YYYY-MM-DD`, preferring `published` over `updated`.
pub(crate) fn entry_date(entry: &feed_rs::model::Entry) -> Option<String> {
    entry.published.or(entry.updated).map(format_date)
}

pub(crate) fn format_date(date: DateTime<Utc>) -> String {
    date.format("%Y-%m-%d").to_string()
}
