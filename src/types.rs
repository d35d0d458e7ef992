use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Where a candidate item came from. Closed set: the grouping key for the
/// balanced prefilter and the badge shown in the email.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Source {
    Rss,
    HackerNews,
    Reddit,
    Manual,
}

impl Source {
    /// Machine tag, matching the serde representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Source::Rss => "rss",
            Source::HackerNews => "hacker_news",
            Source::Reddit => "reddit",
            Source::Manual => "manual",
        }
    }

    /// Human-readable label for emails and the Markdown archive.
    pub fn label(&self) -> &'static str {
        match self {
            Source::Rss => "RSS",
            Source::HackerNews => "Hacker News",
            Source::Reddit => "Reddit",
            Source::Manual => "Manual",
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Source {
    type Err = DigestError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "rss" => Ok(Source::Rss),
            "hacker_news" => Ok(Source::HackerNews),
            "reddit" => Ok(Source::Reddit),
            "manual" => Ok(Source::Manual),
            other => Err(DigestError::InvalidItem(format!(
                "source must be rss|hacker_news|reddit|manual, got {other:?}"
            ))),
        }
    }
}

/// One article/link considered for inclusion in a digest.
///
/// Fields are set at construction and never mutated afterwards; pipeline
/// stages only filter and reorder. Identity for dedup and history matching is
/// always the normalized URL, never the raw string or the title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub title: String,
    pub url: String,
    pub source: Source,
    pub description: Option<String>,
    /// Publication date as zero-padded `YYYY-MM-DD`; `None` means unknown,
    /// which is never treated as stale.
    pub date: Option<String>,
}

impl Item {
    /// Build a validated item. An empty or whitespace-only URL fails
    /// construction: such an item would have no identity.
    pub fn new(title: impl Into<String>, url: impl Into<String>, source: Source) -> Result<Self> {
        let url = url.into();
        if url.trim().is_empty() {
            return Err(DigestError::InvalidItem(
                "item url must not be empty".to_string(),
            ));
        }
        Ok(Self {
            title: title.into(),
            url,
            source,
            description: None,
            date: None,
        })
    }

    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = description;
        self
    }

    pub fn with_date(mut self, date: Option<String>) -> Self {
        self.date = date;
        self
    }
}

/// An item paired with the summary the LLM produced for it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemWithSummary {
    pub item: Item,
    pub summary: String,
}

#[derive(Debug, thiserror::Error)]
pub enum DigestError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Feed parse error: {0}")]
    Parse(String),

    #[error("Invalid item: {0}")]
    InvalidItem(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("LLM error: {0}")]
    Llm(String),

    #[error("Email error: {0}")]
    Email(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, DigestError>;
