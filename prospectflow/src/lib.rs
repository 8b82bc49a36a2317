//! # Prospectflow
//!
//! Finds websites in a niche that are likely to accept contributed
//! content, scores them and collects contact emails.
//!
//! A run goes through these steps:
//!
//! - **Search**: every niche is expanded into queries from a strategy's
//!   templates, once per allowed TLD, and sent to a search provider
//! - **Deduplicate**: result URLs are reduced to their registrable domain
//!   and kept once per run, subject to the TLD allow-list
//! - **Skip known sites**: domains present in a prior dataset are dropped
//!   before any crawling
//! - **Analyse**: the homepage and its contact-like pages are fetched,
//!   their text scored for publishability and searched for emails, with
//!   a domain-search service as fallback
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use prospectflow::prelude::*;
//! use std::sync::Arc;
//!
//! let config = ProspectConfig::new().with_credentials(Credentials::from_env());
//! config.validate()?;
//!
//! let pipeline = ProspectPipeline::new(
//!     Arc::new(SerpApiClient::new(&config)?),
//!     Arc::new(HttpFetcher::new(&config.fetch)?),
//!     Arc::new(HunterClient::new(&config)?),
//!     config.run.clone(),
//! );
//! let report = pipeline.run(&["camping".to_string()], &PriorDataset::empty()).await?;
//! export_stdout(&report.records)?;
//! ```

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    missing_docs,
    rust_2018_idioms
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc
)]

pub mod analysis;
pub mod cli;
pub mod config;
pub mod dataset;
pub mod domain;
pub mod errors;
pub mod events;
pub mod models;
pub mod pipeline;
pub mod search;
pub mod testing;
pub mod utils;
pub mod web;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::analysis::{
        extract_emails, resolve_emails, score_publishability, EnrichmentProvider, HunterClient,
        NoEnrichment,
    };
    pub use crate::config::{Credentials, FetchConfig, ProspectConfig, RunConfig};
    pub use crate::dataset::{export_csv, export_stdout, ExportMode, PriorDataset};
    pub use crate::domain::{root_domain, tld_matches, TldFilter};
    pub use crate::errors::{CallError, ProspectError, Result};
    pub use crate::events::{
        CollectingEventSink, EventSink, LoggingEventSink, NoOpEventSink, PipelineEvent,
    };
    pub use crate::models::{AnalysisResult, Candidate, ProspectRecord, RootDomain, RunReport};
    pub use crate::pipeline::{parse_niches, CandidateDeduplicator, ProspectPipeline};
    pub use crate::search::{
        QueryPlan, SearchProvider, SearchRequest, SearchStrategy, SerpApiClient,
    };
    pub use crate::utils::{iso_timestamp, Timestamp};
    pub use crate::web::{aggregate_text, discover_contact_pages, Fetcher, HttpFetcher};
}
