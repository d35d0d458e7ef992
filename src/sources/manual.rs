//! Manual links adapter: `config/links.md`, one URL per line with an
//! optional title after it. No network involved.

use std::fs;
use std::path::Path;

use crate::types::{Item, Source};
use crate::urls::looks_like_url;

/// Read manually curated links. Blank lines and `#` comment lines are
/// ignored, as is anything that does not start with http(s).
pub fn fetch_manual_items(path: &Path) -> Vec<Item> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(_) => return Vec::new(),
    };

    let mut items = Vec::new();
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        // First token is the URL, the rest of the line is the title.
        let (url, title) = match line.split_once(char::is_whitespace) {
            Some((url, rest)) => (url.trim(), rest.trim()),
            None => (line, ""),
        };
        if !looks_like_url(url) {
            continue;
        }
        if let Ok(item) = Item::new(title, url, Source::Manual) {
            items.push(item);
        }
    }
    items
}
