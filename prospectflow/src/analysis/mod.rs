//! Site analysis: publishability scoring and email discovery.

mod emails;
mod scoring;

pub use emails::{
    extract_emails, parse_domain_search, resolve_emails, EnrichmentProvider, HunterClient,
    NoEnrichment, EMAIL_PATTERN, HUNTER_ENDPOINT, MAX_ENRICHED_EMAILS,
};
pub use scoring::{score_publishability, MAX_SCORE, SIGNAL_KEYWORDS};
