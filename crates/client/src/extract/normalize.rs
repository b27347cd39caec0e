//! Markdown documents with a YAML frontmatter header.

use chrono::{DateTime, Utc};
use url::Url;

/// Prefix extracted Markdown with provenance frontmatter.
///
/// ```yaml
/// ---
/// title: <page title>
/// source: <final_url>
/// fetched_at: <ISO8601 timestamp>
/// extractor: <name@version>
/// ---
/// ```
pub fn markdown_document(
    title: Option<&str>, markdown: &str, source_url: &Url, fetched_at: &DateTime<Utc>, extractor: &str,
) -> String {
    format!(
        "---\ntitle: {title}\nsource: {source}\nfetched_at: {timestamp}\nextractor: {extractor}\n---\n{body}\n",
        title = escape_yaml(title.unwrap_or("Untitled")),
        source = source_url.as_str(),
        timestamp = fetched_at.to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
        body = markdown.trim()
    )
}

fn escape_yaml(s: &str) -> String {
    let needs_quotes = s.is_empty()
        || s.contains(['\n', '"', '#'])
        || s.contains(": ")
        || s.starts_with(['-', '[', '{', '*', '&', '!', '|', '>', '\'', '%', '@', '`']);

    if needs_quotes {
        format!("\"{}\"", s.replace('\\', "\\\\").replace('"', "\\\"").replace('\n', "\\n"))
    } else {
        s.to_string()
    }
}
