use url::Url;

/// Canonicalize a URL for identity comparison.
///
/// Drops query and fragment (tracking parameters like `utm=` must not create
/// distinct identities), lowercases scheme and host, collapses an empty path
/// to `/` and trims trailing slashes from non-root paths. Path case is
/// preserved: some servers are case-sensitive.
///
/// Never fails. Empty or whitespace-only input returns the empty string;
/// input that does not parse as an absolute URL is returned trimmed as-is.
pub fn normalize_url(url: &str) -> String {
    let trimmed = url.trim();
    if trimmed.is_empty() {
        return String::new();
    }

    let parsed = match Url::parse(trimmed) {
        Ok(parsed) => parsed,
        Err(_) => return trimmed.to_string(),
    };

    let path = parsed.path().trim_end_matches('/');
    let path = if path.is_empty() { "/" } else { path };

    match parsed.host_str() {
        Some(host) => {
            let mut out = format!("{}://{}", parsed.scheme(), host.to_lowercase());
            if let Some(port) = parsed.port() {
                out.push_str(&format!(":{port}"));
            }
            out.push_str(path);
            out
        }
        // Host-less URLs (mailto: and friends) keep scheme:path.
        None => format!("{}:{}", parsed.scheme(), path),
    }
}

/// Cheap URL shape check used when reading history and manual link files.
pub(crate) fn looks_like_url(s: &str) -> bool {
    s.starts_with("http://") || s.starts_with("https://")
}
