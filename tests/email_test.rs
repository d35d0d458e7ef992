use digest_aggregator::email::{digest_subject, render_digest_html, render_digest_text};
use digest_aggregator::{Item, ItemWithSummary, Source};

fn sample_items() -> Vec<ItemWithSummary> {
    vec![
        ItemWithSummary {
            item: Item::new("Tools & <Agents>", "https://a.com/1?x=\"1\"", Source::Rss).unwrap(),
            summary: "Summary one.".to_string(),
        },
        ItemWithSummary {
            item: Item::new("Plain title", "https://b.com/2", Source::Reddit).unwrap(),
            summary: "Summary two.".to_string(),
        },
    ]
}

#[test]
fn subject_carries_the_date() {
    let subject = digest_subject();
    assert!(subject.starts_with("AI/ML/DS digest - "));
    assert_eq!(subject.len(), "AI/ML/DS digest - ".len() + 10);
}

#[test]
fn html_escapes_titles_and_urls() {
    let html = render_digest_html(&sample_items());
    assert!(html.contains("Tools &amp; &lt;Agents&gt;"));
    assert!(html.contains("https://a.com/1?x=&quot;1&quot;"));
    assert!(!html.contains("<Agents>"));
}

#[test]
fn html_shows_source_badges_and_summaries() {
    let html = render_digest_html(&sample_items());
    assert!(html.contains(">RSS</span>"));
    assert!(html.contains(">Reddit</span>"));
    assert!(html.contains("Summary one."));
    assert!(html.contains("Summary two."));
}

#[test]
fn empty_digest_renders_placeholders() {
    assert!(render_digest_html(&[]).contains("No articles"));
    assert!(render_digest_text(&[]).contains("No articles"));
}

#[test]
fn text_body_lists_ranks_titles_and_urls() {
    let text = render_digest_text(&sample_items());
    assert!(text.contains("1. Tools & <Agents> [RSS]"));
    assert!(text.contains("2. Plain title [Reddit]"));
    assert!(text.contains("https://b.com/2"));
}
