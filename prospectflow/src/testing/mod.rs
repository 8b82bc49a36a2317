//! Test doubles for the pipeline's service boundaries.
//!
//! This module provides in-memory implementations of
//! [`SearchProvider`](crate::search::SearchProvider),
//! [`Fetcher`](crate::web::Fetcher) and
//! [`EnrichmentProvider`](crate::analysis::EnrichmentProvider) that
//! answer from fixed tables and record every call.

mod fakes;

pub use fakes::{StaticEnrichment, StaticFetcher, StaticSearchProvider};
