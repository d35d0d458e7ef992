//! Core candidate pipeline: the pure, deterministic transforms that take raw
//! multi-source items down to a bounded, deduplicated, fresh, source-balanced
//! candidate list ready for summarization.
//!
//! Data flows strictly forward: raw items → dedup → sent filter → freshness
//! filter → balanced prefilter. Every stage is a total function over
//! well-formed inputs; an empty result is a normal terminal state.

use std::collections::{HashSet, VecDeque};

use chrono::{Duration, Utc};
use tracing::{debug, info};

use crate::types::{Item, Source};
use crate::urls::normalize_url;

/// Knobs for one pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Upper bound on candidates handed to the LLM stage; `None` disables
    /// the cap.
    pub prefilter_limit: Option<usize>,
    /// Items older than this many days count as stale.
    pub max_age_days: i64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            prefilter_limit: Some(30),
            max_age_days: 90,
        }
    }
}

/// Collapse items to one per normalized URL, keeping the first occurrence.
///
/// Later items sharing the same normalized key are dropped regardless of
/// title or source differences; query-only variants of the same page collapse
/// to the first-seen one.
pub fn dedup_by_url(items: Vec<Item>) -> Vec<Item> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut result = Vec::with_capacity(items.len());
    for item in items {
        if seen.insert(normalize_url(&item.url)) {
            result.push(item);
        }
    }
    result
}

/// Drop items whose normalized URL is already in the sent history.
///
/// History entries are raw URLs as stored on disk, so both sides are
/// normalized before matching. An empty history keeps everything.
pub fn filter_already_sent(items: Vec<Item>, sent_urls: &HashSet<String>) -> Vec<Item> {
    let sent_normalized: HashSet<String> = sent_urls.iter().map(|u| normalize_url(u)).collect();
    items
        .into_iter()
        .filter(|item| !sent_normalized.contains(&normalize_url(&item.url)))
        .collect()
}

/// Drop items older than `max_age_days`. Items without a date are kept:
/// unknown is not stale. If filtering would remove every item from a
/// non-empty input, the original list is returned unchanged instead.
pub fn filter_stale(items: Vec<Item>, max_age_days: i64) -> Vec<Item> {
    let cutoff = (Utc::now() - Duration::days(max_age_days))
        .format("%Y-%m-%d")
        .to_string();
    filter_stale_with_cutoff(items, &cutoff)
}

/// [`filter_stale`] with an explicit `YYYY-MM-DD` cutoff. Zero-padded ISO
/// dates compare lexicographically in chronological order, so a plain string
/// comparison is enough.
pub fn filter_stale_with_cutoff(items: Vec<Item>, cutoff: &str) -> Vec<Item> {
    if items.is_empty() {
        return items;
    }
    let is_fresh = |item: &Item| item.date.as_deref().map_or(true, |date| date >= cutoff);
    if !items.iter().any(is_fresh) {
        debug!("All {} items predate {}, keeping them anyway", items.len(), cutoff);
        return items;
    }
    items.into_iter().filter(|item| is_fresh(item)).collect()
}

/// Cap the candidate list at `limit` while keeping every source represented.
///
/// With `limit` of `None`, or when the input already fits, the list is
/// returned untouched in its original order. Over the limit, items are drawn
/// round-robin across the sources present, in first-appearance order, one
/// item per source per round; a source drops out of the rotation once its
/// supply is exhausted and the remaining sources keep filling slots. Naive
/// `items[..limit]` truncation would let whichever feed was fetched first
/// crowd out the smaller ones.
pub fn prefilter_candidates(items: Vec<Item>, limit: Option<usize>) -> Vec<Item> {
    let limit = match limit {
        Some(limit) if items.len() > limit => limit,
        _ => return items,
    };

    // Group by source, preserving both per-source order and the order in
    // which sources first appear in the input.
    let mut queues: Vec<(Source, VecDeque<Item>)> = Vec::new();
    for item in items {
        match queues.iter_mut().find(|(source, _)| *source == item.source) {
            Some((_, queue)) => queue.push_back(item),
            None => queues.push((item.source, VecDeque::from([item]))),
        }
    }

    let mut result = Vec::with_capacity(limit);
    while result.len() < limit && !queues.is_empty() {
        queues.retain_mut(|(_, queue)| {
            if result.len() >= limit {
                return true;
            }
            match queue.pop_front() {
                Some(item) => {
                    result.push(item);
                    !queue.is_empty()
                }
                None => false,
            }
        });
    }
    result
}

/// Run the full candidate pipeline over already-fetched raw items and an
/// immutable snapshot of the sent history: dedup → sent filter → freshness
/// filter → balanced prefilter.
///
/// Re-running on the same input and history yields identical output. An
/// empty return means "nothing to send", not an error.
pub fn run_pipeline(
    raw_items: Vec<Item>,
    sent_urls: &HashSet<String>,
    config: &PipelineConfig,
) -> Vec<Item> {
    let raw_count = raw_items.len();
    let deduped = dedup_by_url(raw_items);
    debug!("Dedup: {} -> {}", raw_count, deduped.len());
    let unsent = filter_already_sent(deduped, sent_urls);
    debug!("Sent filter: kept {}", unsent.len());
    let fresh = filter_stale(unsent, config.max_age_days);
    debug!("Freshness filter: kept {}", fresh.len());
    let candidates = prefilter_candidates(fresh, config.prefilter_limit);
    info!("Pipeline: {} raw items -> {} candidates", raw_count, candidates.len());
    candidates
}
