//! Sent-history persistence (`data/sent-urls.json`) and the Markdown archive
//! kept for each delivered digest.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::Deserialize;
use serde_json::json;
use tracing::warn;

use crate::types::{ItemWithSummary, Result};
use crate::urls::looks_like_url;

#[derive(Debug, Deserialize)]
struct HistoryFile {
    #[serde(default)]
    urls: Vec<String>,
}

/// Load the set of already-sent URLs.
///
/// JSON format: `{"urls": [...], "updated": "YYYY-MM-DD"}`. A `.txt` path is
/// read as one URL per line instead. Missing, empty or unparsable files load
/// as the empty set.
pub fn load_sent_urls(path: &Path) -> HashSet<String> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(_) => return HashSet::new(),
    };
    let text = text.trim();
    if text.is_empty() {
        return HashSet::new();
    }

    if path.extension().and_then(|ext| ext.to_str()) == Some("txt") {
        return text
            .lines()
            .map(str::trim)
            .filter(|line| looks_like_url(line))
            .map(String::from)
            .collect();
    }

    match serde_json::from_str::<HistoryFile>(text) {
        Ok(parsed) => parsed
            .urls
            .into_iter()
            .filter(|url| !url.trim().is_empty())
            .collect(),
        Err(e) => {
            warn!("Could not parse sent-history {}: {}", path.display(), e);
            HashSet::new()
        }
    }
}

/// Persist the sent-history set as JSON, URLs sorted, creating parent
/// directories as needed.
pub fn save_sent_urls(path: &Path, urls: &HashSet<String>) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut sorted: Vec<&String> = urls.iter().collect();
    sorted.sort();
    let payload = json!({
        "urls": sorted,
        "updated": Utc::now().format("%Y-%m-%d").to_string(),
    });
    fs::write(path, serde_json::to_string_pretty(&payload)?)?;
    Ok(())
}

/// Write the digest as `<output_dir>/YYYY-MM-DD.md` and return the path.
/// One section per article: title, source label, URL, rank and summary.
pub fn save_digest_markdown(items: &[ItemWithSummary], output_dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(output_dir)?;
    let date_str = Utc::now().format("%Y-%m-%d").to_string();
    let path = output_dir.join(format!("{date_str}.md"));

    let mut lines = vec![
        format!("# AI/ML/DS digest -- {date_str}"),
        String::new(),
        format!("> Generated automatically. {} article(s) selected.", items.len()),
        String::new(),
        "---".to_string(),
        String::new(),
    ];

    for (idx, entry) in items.iter().enumerate() {
        let rank = idx + 1;
        // Escape pipes so titles stay safe inside Markdown tables.
        let title = entry.item.title.replace('|', "\\|");
        lines.extend([
            format!("## {rank}. {title}"),
            String::new(),
            format!("- **Source:** {}", entry.item.source.label()),
            format!("- **URL:** {}", entry.item.url),
            format!("- **Rank:** #{rank}"),
            String::new(),
            entry.summary.trim().to_string(),
            String::new(),
            "---".to_string(),
            String::new(),
        ]);
    }

    fs::write(&path, lines.join("\n").trim().to_string() + "\n")?;
    Ok(path)
}
