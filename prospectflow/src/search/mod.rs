//! Query planning and the search provider boundary.
//!
//! This module provides:
//! - Strategy templates and per-TLD locale mapping
//! - The [`SearchProvider`] protocol
//! - A SerpAPI implementation

mod planner;
mod provider;
mod serpapi;

pub use planner::{
    locale_for_tld, per_query_limit, LocaleParams, QueryPlan, SearchRequest, SearchStrategy,
    NICHE_PLACEHOLDER,
};
pub use provider::SearchProvider;
pub use serpapi::{parse_organic_results, SerpApiClient, SERPAPI_ENDPOINT};
