//! RSS/Atom adapter: fetch each configured feed and map its entries to
//! candidate items.

use feed_rs::parser;
use reqwest::Client;
use tracing::{debug, warn};

use crate::config::RssSource;
use crate::types::{DigestError, Item, Result, Source};

use super::{entry_date, entry_link, entry_title};

/// Fetch items from every configured RSS/Atom feed. A failing feed is logged
/// and skipped; the rest still contribute.
pub async fn fetch_rss_items(client: &Client, sources: &[RssSource]) -> Vec<Item> {
    let mut items = Vec::new();
    for src in sources {
        match fetch_one_feed(client, &src.url).await {
            Ok(batch) => {
                debug!("RSS feed {}: {} entries", src.url, batch.len());
                items.extend(batch);
            }
            Err(e) => warn!("RSS feed {} failed: {}", src.url, e),
        }
    }
    items
}

async fn fetch_one_feed(client: &Client, url: &str) -> Result<Vec<Item>> {
    let response = client.get(url).send().await?.error_for_status()?;
    let body = response.text().await?;
    let feed = parser::parse(body.as_bytes())
        .map_err(|e| DigestError::Parse(format!("{url}: {e}")))?;

    let mut out = Vec::new();
    for entry in feed.entries {
        let Some(link) = entry_link(&entry) else {
            continue;
        };
        let description = entry
            .summary
            .as_ref()
            .map(|summary| summary.content.trim().to_string())
            .filter(|summary| !summary.is_empty())
            .or_else(|| entry.content.as_ref().and_then(|content| content.body.clone()));
        let date = entry_date(&entry);
        if let Ok(item) = Item::new(entry_title(&entry), link, Source::Rss) {
            out.push(item.with_description(description).with_date(date));
        }
    }
    Ok(out)
}
