//! Visible-text extraction and per-site aggregation.

use scraper::{Html, Node};
use tracing::debug;

use super::fetcher::Fetcher;

const HIDDEN_ELEMENTS: &[&str] = &["script", "style", "noscript"];

/// Visible text of an HTML document.
///
/// Text inside `script`, `style` and `noscript` is dropped. Remaining
/// text nodes are trimmed and joined with single spaces.
#[must_use]
pub fn visible_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let mut parts: Vec<&str> = Vec::new();

    for node in document.tree.root().descendants() {
        let Node::Text(text) = node.value() else {
            continue;
        };
        let hidden = node.ancestors().any(|ancestor| {
            ancestor
                .value()
                .as_element()
                .is_some_and(|element| HIDDEN_ELEMENTS.contains(&element.name()))
        });
        if hidden {
            continue;
        }
        let trimmed = text.trim();
        if !trimmed.is_empty() {
            parts.push(trimmed);
        }
    }
    parts.join(" ")
}

/// Fetches each page and concatenates their visible text.
///
/// Pages that fail to fetch are skipped. Each successful page contributes
/// a newline followed by its text, in the given order.
pub async fn aggregate_text(fetcher: &dyn Fetcher, pages: &[String]) -> String {
    let mut combined = String::new();
    let mut fetched = 0usize;
    for page in pages {
        if let Some(html) = fetcher.fetch(page).await {
            combined.push('\n');
            combined.push_str(&visible_text(&html));
            fetched += 1;
        }
    }
    debug!(pages = pages.len(), fetched, chars = combined.len(), "aggregated site text");
    combined
}
