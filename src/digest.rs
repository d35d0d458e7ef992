//! Digest use case: candidate pipeline → per-item LLM summaries → ranking →
//! top N, ready for the email.

use std::collections::HashSet;

use tracing::debug;

use crate::llm::Llm;
use crate::pipeline::{run_pipeline, PipelineConfig};
use crate::types::{Item, ItemWithSummary, Result};

/// How many characters of an item's description feed the summarizer.
const SNIPPET_MAX_CHARS: usize = 1500;

/// Options for one digest build.
#[derive(Debug, Clone)]
pub struct DigestOptions {
    pub pipeline: PipelineConfig,
    /// Articles kept after ranking.
    pub top_n: usize,
}

impl Default for DigestOptions {
    fn default() -> Self {
        Self {
            pipeline: PipelineConfig::default(),
            top_n: 5,
        }
    }
}

/// Run the candidate pipeline over raw items, then summarize each survivor
/// and rank them. Returns the ordered list for the email; empty when nothing
/// survives the pipeline, which callers must treat as "nothing to send".
pub async fn build_digest(
    raw_items: Vec<Item>,
    sent_urls: &HashSet<String>,
    llm: &dyn Llm,
    options: &DigestOptions,
) -> Result<Vec<ItemWithSummary>> {
    let candidates = run_pipeline(raw_items, sent_urls, &options.pipeline);
    if candidates.is_empty() {
        return Ok(Vec::new());
    }

    let mut with_summaries = Vec::with_capacity(candidates.len());
    for item in candidates {
        let snippet = snippet_of(&item);
        let summary = llm.summarize(&item.title, &snippet).await?;
        debug!("Summarized {}", item.url);
        with_summaries.push(ItemWithSummary { item, summary });
    }

    llm.rank(with_summaries, options.top_n).await
}

fn snippet_of(item: &Item) -> String {
    item.description
        .as_deref()
        .unwrap_or("")
        .chars()
        .take(SNIPPET_MAX_CHARS)
        .collect()
}
