use std::str::FromStr;

use digest_aggregator::{Item, Source};

#[test]
fn item_construction_rejects_empty_url() {
    assert!(Item::new("Title", "", Source::Rss).is_err());
    assert!(Item::new("Title", "   ", Source::Manual).is_err());
}

#[test]
fn item_construction_accepts_valid_url() {
    let item = Item::new("Title", "https://a.com/1", Source::Reddit).unwrap();
    assert_eq!(item.url, "https://a.com/1");
    assert!(item.description.is_none());
    assert!(item.date.is_none());
}

#[test]
fn source_parses_known_tags_only() {
    assert_eq!(Source::from_str("rss").unwrap(), Source::Rss);
    assert_eq!(Source::from_str("hacker_news").unwrap(), Source::HackerNews);
    assert_eq!(Source::from_str("reddit").unwrap(), Source::Reddit);
    assert_eq!(Source::from_str("manual").unwrap(), Source::Manual);
    assert!(Source::from_str("newsletter").is_err());
    assert!(Source::from_str("").is_err());
}

#[test]
fn source_display_matches_serde_tag() {
    assert_eq!(Source::HackerNews.to_string(), "hacker_news");
    assert_eq!(
        serde_json::to_string(&Source::HackerNews).unwrap(),
        "\"hacker_news\""
    );
}
