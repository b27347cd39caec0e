//! Link harvesting from HTML documents.

use scraper::{Html, Selector};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::LazyLock;
use url::Url;

static ANCHOR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("a[href]").expect("invalid selector"));

/// A harvested link with text and href.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub text: String,
    pub href: String,
}

/// Collect `<a href>` targets resolved against `base_url`.
///
/// Only http(s) targets are kept, in document order, first occurrence wins.
/// Anchors without text are labelled `[link]`.
pub fn extract_links(html: &str, base_url: &Url) -> Vec<Link> {
    let document = Html::parse_document(html);
    let mut seen = HashSet::new();

    document
        .select(&ANCHOR)
        .filter_map(|element| {
            let href = element.value().attr("href")?;
            let resolved = base_url.join(href.trim()).ok()?;
            if !matches!(resolved.scheme(), "http" | "https") {
                return None;
            }

            let href = resolved.to_string();
            if !seen.insert(href.clone()) {
                return None;
            }

            let text = element.text().collect::<Vec<_>>().join(" ");
            let text = text.split_whitespace().collect::<Vec<_>>().join(" ");
            let text = if text.is_empty() { "[link]".to_string() } else { text };

            Some(Link { text, href })
        })
        .collect()
}
