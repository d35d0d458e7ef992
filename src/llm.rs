//! LLM port and adapters: per-item summaries and digest ranking.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::types::{DigestError, ItemWithSummary, Result};

/// Contract for the summarize-and-rank collaborator.
#[async_trait]
pub trait Llm: Send + Sync {
    /// Produce a 2-3 line summary from an item's title and snippet.
    async fn summarize(&self, title: &str, snippet: &str) -> Result<String>;

    /// Order items from most to least relevant and keep the top `top_n`.
    async fn rank(&self, items: Vec<ItemWithSummary>, top_n: usize)
        -> Result<Vec<ItemWithSummary>>;
}

const ANTHROPIC_MESSAGES_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";
const DEFAULT_MODEL: &str = "claude-3-5-haiku-latest";

/// Anthropic Messages API adapter.
pub struct AnthropicLlm {
    http: reqwest::Client,
    api_key: String,
    model: String,
}

impl AnthropicLlm {
    pub fn new(api_key: String, model: Option<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key,
            model: model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
        }
    }

    /// Key from `LLM_API_KEY`, model from `LLM_MODEL` (optional).
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("LLM_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| DigestError::Config("LLM_API_KEY is not set".to_string()))?;
        let model = std::env::var("LLM_MODEL").ok().filter(|m| !m.trim().is_empty());
        Ok(Self::new(api_key, model))
    }

    async fn complete(&self, prompt: &str, max_tokens: u32) -> Result<String> {
        #[derive(Serialize)]
        struct Msg<'a> {
            role: &'a str,
            content: &'a str,
        }
        #[derive(Serialize)]
        struct Req<'a> {
            model: &'a str,
            max_tokens: u32,
            messages: Vec<Msg<'a>>,
        }
        #[derive(Deserialize)]
        struct Resp {
            #[serde(default)]
            content: Vec<Block>,
        }
        #[derive(Deserialize)]
        struct Block {
            #[serde(rename = "type")]
            kind: String,
            #[serde(default)]
            text: String,
        }

        let req = Req {
            model: &self.model,
            max_tokens,
            messages: vec![Msg {
                role: "user",
                content: prompt,
            }],
        };
        let response = self
            .http
            .post(ANTHROPIC_MESSAGES_URL)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&req)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(DigestError::Llm(format!(
                "HTTP {} from Anthropic API",
                response.status()
            )));
        }
        let body: Resp = response.json().await?;
        let text: String = body
            .content
            .iter()
            .filter(|block| block.kind == "text")
            .map(|block| block.text.as_str())
            .collect();
        Ok(text.trim().to_string())
    }
}

#[async_trait]
impl Llm for AnthropicLlm {
    async fn summarize(&self, title: &str, snippet: &str) -> Result<String> {
        let snippet = if snippet.trim().is_empty() {
            "(no description)"
        } else {
            snippet
        };
        let prompt = format!(
            "Summarize the following article in 2 or 3 lines. Return only the \
             summary, without any preamble or title.\n\nTitle: {title}\n\n\
             Snippet or description:\n{snippet}"
        );
        self.complete(&prompt, 200).await
    }

    async fn rank(
        &self,
        items: Vec<ItemWithSummary>,
        top_n: usize,
    ) -> Result<Vec<ItemWithSummary>> {
        if items.len() <= top_n {
            return Ok(items);
        }
        let block = items
            .iter()
            .enumerate()
            .map(|(idx, entry)| {
                format!(
                    "[{idx}] Title: {}\nURL: {}\nSummary: {}\nSource: {}",
                    entry.item.title, entry.item.url, entry.summary, entry.item.source
                )
            })
            .collect::<Vec<_>>()
            .join("\n\n");
        let prompt = format!(
            "You are an expert in AI, machine learning and data science. Below \
             is a list of articles with title, URL, summary and source.\n\n\
             Order the articles from most to least interesting for someone \
             keeping up with AI/ML/DS. Respond ONLY with the chosen order as \
             comma-separated numbers, for example: 2, 0, 4, 1, 3\n\n\
             Articles:\n\n{block}"
        );
        let raw = self.complete(&prompt, 150).await?;
        debug!("Ranking response: {raw:?}");
        Ok(apply_ranking(items, &raw, top_n))
    }
}

/// Reorder `items` by the comma-separated indices in `raw`, then keep the
/// first `top_n`. Out-of-range and repeated indices are ignored; indices the
/// model left out follow in their original relative order.
pub fn apply_ranking(
    items: Vec<ItemWithSummary>,
    raw: &str,
    top_n: usize,
) -> Vec<ItemWithSummary> {
    let mut order: Vec<usize> = Vec::with_capacity(items.len());
    for token in raw.split(|c: char| !c.is_ascii_digit()) {
        if token.is_empty() {
            continue;
        }
        if let Ok(idx) = token.parse::<usize>() {
            if idx < items.len() && !order.contains(&idx) {
                order.push(idx);
            }
        }
    }
    for idx in 0..items.len() {
        if !order.contains(&idx) {
            order.push(idx);
        }
    }

    let mut slots: Vec<Option<ItemWithSummary>> = items.into_iter().map(Some).collect();
    order
        .into_iter()
        .filter_map(|idx| slots[idx].take())
        .take(top_n)
        .collect()
}

/// Deterministic in-process adapter for tests and offline runs: extractive
/// summaries, input order as ranking.
pub struct MockLlm;

#[async_trait]
impl Llm for MockLlm {
    async fn summarize(&self, title: &str, snippet: &str) -> Result<String> {
        let snippet = snippet.trim();
        if snippet.is_empty() {
            Ok(title.to_string())
        } else {
            Ok(format!("{title}: {}", snippet.chars().take(120).collect::<String>()))
        }
    }

    async fn rank(
        &self,
        mut items: Vec<ItemWithSummary>,
        top_n: usize,
    ) -> Result<Vec<ItemWithSummary>> {
        items.truncate(top_n);
        Ok(items)
    }
}
