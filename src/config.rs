//! Sources configuration, parsed from `config/sources.yaml`.

use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::types::{DigestError, Result};

/// One RSS/Atom feed: display name and feed URL.
#[derive(Debug, Clone, Deserialize)]
pub struct RssSource {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub url: String,
}

/// Hacker News search parameters (Algolia API).
#[derive(Debug, Clone, Deserialize)]
pub struct HackerNewsConfig {
    #[serde(default)]
    pub queries: Vec<String>,
    #[serde(default = "default_hn_limit")]
    pub limit: usize,
}

fn default_hn_limit() -> usize {
    15
}

/// Reddit parameters: subreddits polled through their RSS feeds.
#[derive(Debug, Clone, Deserialize)]
pub struct RedditConfig {
    #[serde(default)]
    pub subreddits: Vec<String>,
    #[serde(default = "default_reddit_limit")]
    pub limit_per_sub: usize,
}

fn default_reddit_limit() -> usize {
    10
}

/// In-memory sources configuration. A missing section means that source type
/// is simply not polled.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SourcesConfig {
    #[serde(default)]
    pub rss: Vec<RssSource>,
    #[serde(default)]
    pub hacker_news: Option<HackerNewsConfig>,
    #[serde(default)]
    pub reddit: Option<RedditConfig>,
}

/// Load `sources.yaml`. A missing file, an empty document or a comments-only
/// document all yield the default (empty) configuration rather than an error;
/// RSS entries without a URL are dropped.
pub fn load_sources(path: &Path) -> Result<SourcesConfig> {
    if !path.exists() {
        debug!("Sources config {} not found, using empty config", path.display());
        return Ok(SourcesConfig::default());
    }

    let text = std::fs::read_to_string(path)?;
    if text.trim().is_empty() {
        return Ok(SourcesConfig::default());
    }

    // A comments-only document parses as YAML null, hence the Option.
    let mut config: SourcesConfig = serde_yaml::from_str::<Option<SourcesConfig>>(&text)
        .map_err(|e| DigestError::Config(format!("{}: {}", path.display(), e)))?
        .unwrap_or_default();

    config.rss.retain(|src| !src.url.trim().is_empty());
    for src in &mut config.rss {
        src.url = src.url.trim().to_string();
    }
    Ok(config)
}

/// Read a required environment variable, trimmed.
pub fn require_env(name: &str) -> Result<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| DigestError::Config(format!("{name} is not set")))
}
