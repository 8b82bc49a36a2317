//! Site crawling: page fetching, contact-page discovery and text
//! aggregation.

mod discovery;
mod fetcher;
mod text;

pub use discovery::{
    contact_page_candidates, discover_contact_pages, CONTACT_HINTS, MAX_CONTACT_PAGES,
};
pub use fetcher::{FetchResult, Fetcher, HttpFetcher};
pub use text::{aggregate_text, visible_text};
