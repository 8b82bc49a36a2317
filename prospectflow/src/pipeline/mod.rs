//! Pipeline orchestration.
//!
//! This module provides:
//! - Run-local candidate deduplication
//! - The [`ProspectPipeline`] runner
//! - Niche text parsing

mod dedup;
mod runner;

pub use dedup::CandidateDeduplicator;
pub use runner::{parse_niches, ProspectPipeline};
