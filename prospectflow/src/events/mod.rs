//! Pipeline progress events and the sinks that receive them.

mod sink;

pub use sink::{CollectingEventSink, EventSink, LoggingEventSink, NoOpEventSink};

use serde_json::json;
use uuid::Uuid;

use crate::models::RootDomain;

/// Something that happened during a run.
#[derive(Debug, Clone, PartialEq)]
pub enum PipelineEvent {
    /// A run began.
    RunStarted {
        /// Run identifier.
        run_id: Uuid,
        /// Niches in processing order.
        niches: Vec<String>,
    },
    /// All queries for one niche finished.
    NicheSearched {
        /// The niche.
        niche: String,
        /// Queries issued.
        queries: usize,
        /// URLs returned across those queries.
        urls: usize,
        /// New candidates admitted.
        admitted: usize,
    },
    /// A candidate is already in the prior dataset.
    CandidateSkipped {
        /// Niche that surfaced it.
        niche: String,
        /// Its root domain.
        root_domain: RootDomain,
    },
    /// A candidate was crawled and scored.
    CandidateAnalyzed {
        /// Niche that surfaced it.
        niche: String,
        /// Its root domain.
        root_domain: RootDomain,
        /// Publishability score.
        score: f64,
        /// Number of emails found.
        emails: usize,
    },
    /// A run finished.
    RunCompleted {
        /// Records produced.
        records: usize,
        /// Candidates skipped as previously collected.
        skipped_prior: usize,
    },
}

impl PipelineEvent {
    /// Dotted event type name.
    #[must_use]
    pub const fn event_type(&self) -> &'static str {
        match self {
            Self::RunStarted { .. } => "run.started",
            Self::NicheSearched { .. } => "niche.searched",
            Self::CandidateSkipped { .. } => "candidate.skipped_prior",
            Self::CandidateAnalyzed { .. } => "candidate.analyzed",
            Self::RunCompleted { .. } => "run.completed",
        }
    }

    /// Event payload as JSON.
    #[must_use]
    pub fn data(&self) -> serde_json::Value {
        match self {
            Self::RunStarted { run_id, niches } => json!({
                "run_id": run_id.to_string(),
                "niches": niches,
            }),
            Self::NicheSearched { niche, queries, urls, admitted } => json!({
                "niche": niche,
                "queries": queries,
                "urls": urls,
                "admitted": admitted,
            }),
            Self::CandidateSkipped { niche, root_domain } => json!({
                "niche": niche,
                "root_domain": root_domain.as_str(),
            }),
            Self::CandidateAnalyzed { niche, root_domain, score, emails } => json!({
                "niche": niche,
                "root_domain": root_domain.as_str(),
                "score": score,
                "emails": emails,
            }),
            Self::RunCompleted { records, skipped_prior } => json!({
                "records": records,
                "skipped_prior": skipped_prior,
            }),
        }
    }
}
