//! Contact-page discovery from a site's homepage links.

use scraper::{ElementRef, Html};
use tracing::debug;

use super::fetcher::Fetcher;

/// Phrases that mark a link as leading to contact or outreach details.
pub const CONTACT_HINTS: &[&str] = &[
    "contact",
    "contacts",
    "about",
    "team",
    "advertise",
    "write-for-us",
    "guest-post",
    "contributors",
];

/// Upper bound on pages analysed per site, homepage included.
pub const MAX_CONTACT_PAGES: usize = 8;

/// Every hint in its original, hyphenated and spaced spelling.
fn hint_variants() -> Vec<String> {
    let mut variants: Vec<String> = Vec::with_capacity(CONTACT_HINTS.len() * 2);
    for hint in CONTACT_HINTS {
        for variant in [hint.to_string(), hint.replace(' ', "-"), hint.replace('-', " ")] {
            if !variants.contains(&variant) {
                variants.push(variant);
            }
        }
    }
    variants
}

/// Resolves an href against the homepage.
///
/// Absolute (`http...`) hrefs are kept, root-relative ones are joined to
/// the homepage origin, protocol-relative ones get `https:`. Anything
/// else (fragments, `mailto:`, relative paths) is ignored.
fn resolve_href(homepage: &str, href: &str) -> Option<String> {
    if href.starts_with("http") {
        Some(href.to_string())
    } else if href.starts_with("//") {
        Some(format!("https:{href}"))
    } else if href.starts_with('/') {
        Some(format!("{}{href}", homepage.trim_end_matches('/')))
    } else {
        None
    }
}

/// Picks likely contact/outreach pages out of the homepage HTML.
///
/// The homepage always comes first; further URLs follow document order,
/// without duplicates, up to [`MAX_CONTACT_PAGES`] in total.
#[must_use]
pub fn contact_page_candidates(html: &str, homepage: &str) -> Vec<String> {
    let mut pages = vec![homepage.to_string()];
    let hints = hint_variants();
    let document = Html::parse_document(html);

    let anchors = document
        .root_element()
        .descendants()
        .filter_map(ElementRef::wrap)
        .filter(|element| element.value().name() == "a");

    for anchor in anchors {
        if pages.len() >= MAX_CONTACT_PAGES {
            break;
        }
        let Some(href) = anchor.value().attr("href").map(str::trim) else {
            continue;
        };
        let href_lower = href.to_lowercase();
        let text_lower = anchor.text().collect::<String>().to_lowercase();
        let hinted = hints
            .iter()
            .any(|hint| href_lower.contains(hint.as_str()) || text_lower.contains(hint.as_str()));
        if !hinted {
            continue;
        }
        if let Some(url) = resolve_href(homepage, href) {
            if !pages.contains(&url) {
                pages.push(url);
            }
        }
    }
    pages
}

/// Fetches the homepage and returns it plus its contact-like pages.
///
/// When the homepage cannot be fetched only the homepage is returned.
pub async fn discover_contact_pages(fetcher: &dyn Fetcher, homepage: &str) -> Vec<String> {
    let Some(html) = fetcher.fetch(homepage).await else {
        debug!(homepage, "homepage unavailable, analysing it alone");
        return vec![homepage.to_string()];
    };
    let pages = contact_page_candidates(&html, homepage);
    debug!(homepage, pages = pages.len(), "contact pages discovered");
    pages
}
