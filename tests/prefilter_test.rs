//! The balanced prefilter must distribute slots across the sources present
//! instead of letting the first-fetched feed take everything.

use digest_aggregator::pipeline::prefilter_candidates;
use digest_aggregator::{Item, Source};

fn batch(prefix: &str, count: usize, source: Source) -> Vec<Item> {
    (0..count)
        .map(|i| Item::new(format!("{prefix} {i}"), format!("https://{prefix}.com/{i}"), source).unwrap())
        .collect()
}

fn count_source(items: &[Item], source: Source) -> usize {
    items.iter().filter(|item| item.source == source).count()
}

#[test]
fn empty_returns_empty() {
    assert!(prefilter_candidates(Vec::new(), Some(10)).is_empty());
    assert!(prefilter_candidates(Vec::new(), None).is_empty());
}

#[test]
fn under_limit_input_is_unchanged() {
    let items = [
        batch("rss", 1, Source::Rss),
        batch("hn", 1, Source::HackerNews),
    ]
    .concat();
    assert_eq!(prefilter_candidates(items.clone(), Some(30)), items);
}

#[test]
fn none_limit_keeps_everything() {
    let items = batch("rss", 50, Source::Rss);
    assert_eq!(prefilter_candidates(items.clone(), None), items);
}

#[test]
fn single_source_returns_first_n_in_order() {
    let items = batch("rss", 35, Source::Rss);
    let result = prefilter_candidates(items, Some(30));
    assert_eq!(result.len(), 30);
    assert_eq!(result[0].url, "https://rss.com/0");
    assert_eq!(result[29].url, "https://rss.com/29");
}

#[test]
fn two_sources_alternate_in_round_robin_order() {
    let items = [
        batch("rss", 50, Source::Rss),
        batch("hn", 15, Source::HackerNews),
    ]
    .concat();
    let result = prefilter_candidates(items, Some(10));
    assert_eq!(result.len(), 10);
    // Sources rotate in first-appearance order: rss first, then hacker_news.
    assert_eq!(result[0].source, Source::Rss);
    assert_eq!(result[1].source, Source::HackerNews);
    assert_eq!(count_source(&result, Source::Rss), 5);
    assert_eq!(count_source(&result, Source::HackerNews), 5);
}

#[test]
fn rotation_follows_first_appearance_order() {
    let items = [
        batch("hn", 20, Source::HackerNews),
        batch("rss", 20, Source::Rss),
    ]
    .concat();
    let result = prefilter_candidates(items, Some(6));
    assert_eq!(result[0].source, Source::HackerNews);
    assert_eq!(result[1].source, Source::Rss);
}

#[test]
fn three_sources_all_represented() {
    let items = [
        batch("rss", 40, Source::Rss),
        batch("hn", 10, Source::HackerNews),
        batch("rd", 5, Source::Reddit),
    ]
    .concat();
    let result = prefilter_candidates(items, Some(9));
    assert_eq!(result.len(), 9);
    assert_eq!(count_source(&result, Source::Rss), 3);
    assert_eq!(count_source(&result, Source::HackerNews), 3);
    assert_eq!(count_source(&result, Source::Reddit), 3);
}

#[test]
fn four_sources_all_represented() {
    let items = [
        batch("rss", 30, Source::Rss),
        batch("mn", 3, Source::Manual),
        batch("hn", 10, Source::HackerNews),
        batch("rd", 5, Source::Reddit),
    ]
    .concat();
    let result = prefilter_candidates(items, Some(8));
    assert_eq!(result.len(), 8);
    for source in [Source::Rss, Source::Manual, Source::HackerNews, Source::Reddit] {
        assert!(count_source(&result, source) >= 1, "{source} missing from result");
    }
}

#[test]
fn exhausted_source_frees_slots_for_the_rest() {
    let items = [
        batch("rss", 50, Source::Rss),
        batch("hn", 2, Source::HackerNews),
    ]
    .concat();
    let result = prefilter_candidates(items, Some(10));
    assert_eq!(result.len(), 10);
    assert_eq!(count_source(&result, Source::HackerNews), 2);
    assert_eq!(count_source(&result, Source::Rss), 8);
}

#[test]
fn large_feed_cannot_crowd_out_smaller_source() {
    // 47 feed items concatenated ahead of 15 Hacker News items: naive
    // truncation at 30 would drop every Hacker News item.
    let items = [
        batch("feed", 47, Source::Rss),
        batch("hn", 15, Source::HackerNews),
    ]
    .concat();
    let result = prefilter_candidates(items, Some(30));
    assert_eq!(result.len(), 30);
    assert!(count_source(&result, Source::HackerNews) >= 10);
    assert!(count_source(&result, Source::Rss) > 0);
}

#[test]
fn never_exceeds_limit() {
    let items = [
        batch("rss", 20, Source::Rss),
        batch("hn", 20, Source::HackerNews),
    ]
    .concat();
    assert_eq!(prefilter_candidates(items, Some(15)).len(), 15);
}

#[test]
fn preserves_per_source_internal_order() {
    let items = [
        batch("rss", 10, Source::Rss),
        batch("hn", 10, Source::HackerNews),
    ]
    .concat();
    let result = prefilter_candidates(items, Some(8));
    let rss_urls: Vec<&str> = result
        .iter()
        .filter(|item| item.source == Source::Rss)
        .map(|item| item.url.as_str())
        .collect();
    assert_eq!(
        rss_urls,
        ["https://rss.com/0", "https://rss.com/1", "https://rss.com/2", "https://rss.com/3"]
    );
}
