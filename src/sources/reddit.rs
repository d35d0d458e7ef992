//! Reddit adapter: each subreddit's public RSS feed, no API credentials
//! involved. Both external links and self-posts come through.

use feed_rs::parser;
use reqwest::Client;
use tracing::warn;

use crate::config::RedditConfig;
use crate::types::{DigestError, Item, Result, Source};

use super::{entry_date, entry_link, entry_title};

/// Fetch recent posts from each configured subreddit. Failures are
/// per-subreddit: one bad sub does not stop the rest.
pub async fn fetch_reddit_items(client: &Client, config: &RedditConfig) -> Vec<Item> {
    if config.subreddits.is_empty() || config.limit_per_sub == 0 {
        return Vec::new();
    }
    let mut items = Vec::new();
    for sub in &config.subreddits {
        let sub = sub.trim();
        if sub.is_empty() || sub.starts_with('/') {
            continue;
        }
        match fetch_subreddit(client, sub, config.limit_per_sub).await {
            Ok(batch) => items.extend(batch),
            Err(e) => warn!("Reddit r/{} failed: {}", sub, e),
        }
    }
    items
}

async fn fetch_subreddit(client: &Client, subreddit: &str, limit: usize) -> Result<Vec<Item>> {
    let url = format!("https://www.reddit.com/r/{subreddit}/.rss");
    let response = client
        .get(&url)
        .query(&[("limit", limit.min(25).to_string())])
        .send()
        .await?
        .error_for_status()?;
    let body = response.text().await?;
    let feed = parser::parse(body.as_bytes())
        .map_err(|e| DigestError::Parse(format!("r/{subreddit}: {e}")))?;

    let mut out = Vec::new();
    for entry in feed.entries {
        let Some(link) = entry_link(&entry) else {
            continue;
        };
        let date = entry_date(&entry);
        if let Ok(item) = Item::new(entry_title(&entry), link, Source::Reddit) {
            out.push(item.with_date(date));
        }
        if out.len() >= limit {
            break;
        }
    }
    Ok(out)
}
