//! Hacker News adapter: the Algolia search API, queried once per configured
//! search term.

use std::collections::HashSet;

use reqwest::Client;
use serde::Deserialize;
use tracing::warn;

use crate::config::HackerNewsConfig;
use crate::types::{Item, Result, Source};

const ALGOLIA_HN_SEARCH: &str = "https://hn.algolia.com/api/v1/search";

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    hits: Vec<Hit>,
}

#[derive(Debug, Deserialize)]
struct Hit {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    url: Option<String>,
    #[serde(rename = "objectID")]
    object_id: Option<String>,
    #[serde(default)]
    created_at: Option<String>,
}

/// Search Hacker News for each configured query. Hits without an external URL
/// (Ask HN and similar) link back to the news.ycombinator.com item page;
/// titleless hits are skipped. Results are deduplicated across queries and
/// capped at `config.limit` overall.
pub async fn fetch_hacker_news_items(client: &Client, config: &HackerNewsConfig) -> Vec<Item> {
    if config.queries.is_empty() || config.limit == 0 {
        return Vec::new();
    }
    let per_query = ((config.limit + config.queries.len() - 1) / config.queries.len()).max(1);

    let mut seen_urls: HashSet<String> = HashSet::new();
    let mut items = Vec::new();
    for query in &config.queries {
        if items.len() >= config.limit {
            break;
        }
        match search(client, query, per_query).await {
            Ok(batch) => {
                for item in batch {
                    if items.len() >= config.limit {
                        break;
                    }
                    if seen_urls.insert(item.url.clone()) {
                        items.push(item);
                    }
                }
            }
            Err(e) => warn!("Hacker News query {:?} failed: {}", query, e),
        }
    }
    items
}

async fn search(client: &Client, query: &str, hits_per_page: usize) -> Result<Vec<Item>> {
    let params = [
        ("query", query.to_string()),
        ("tags", "story".to_string()),
        ("hitsPerPage", hits_per_page.min(100).to_string()),
    ];
    let response = client
        .get(ALGOLIA_HN_SEARCH)
        .query(&params)
        .send()
        .await?
        .error_for_status()?;
    let data: SearchResponse = response.json().await?;

    let mut out = Vec::new();
    for hit in data.hits {
        let Some(title) = hit
            .title
            .map(|title| title.trim().to_string())
            .filter(|title| !title.is_empty())
        else {
            continue;
        };
        let url = match hit
            .url
            .as_deref()
            .map(str::trim)
            .filter(|url| url.starts_with("http"))
        {
            Some(url) => url.to_string(),
            None => match &hit.object_id {
                Some(id) => format!("https://news.ycombinator.com/item?id={id}"),
                None => continue,
            },
        };
        let date = hit
            .created_at
            .as_deref()
            .filter(|created| created.len() >= 10)
            .map(|created| created[..10].to_string());
        if let Ok(item) = Item::new(title, url, Source::HackerNews) {
            out.push(item.with_date(date));
        }
    }
    Ok(out)
}
