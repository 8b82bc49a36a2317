//! Data models for candidates, analysis results and exported records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::utils::iso_timestamp_of;

/// Canonical registrable domain (eTLD+1), lower-cased.
///
/// The only identity key used for deduplication. Built by
/// [`crate::domain::root_domain`]; malformed input is kept as its
/// lower-cased text so it still works as a key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RootDomain(String);

impl RootDomain {
    pub(crate) fn from_normalized(value: String) -> Self {
        Self(value)
    }

    /// Returns the domain text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether normalization produced nothing usable.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Homepage URL probed for this domain.
    #[must_use]
    pub fn homepage(&self) -> String {
        format!("https://{}/", self.0)
    }
}

impl fmt::Display for RootDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for RootDomain {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A site discovered during a run, one per unique root domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    /// Niche whose queries surfaced the site first.
    pub niche: String,
    /// Identity of the site.
    pub root_domain: RootDomain,
    /// Search result URL the domain was taken from.
    pub source_url: String,
}

impl Candidate {
    /// Creates a new candidate.
    #[must_use]
    pub fn new(
        niche: impl Into<String>,
        root_domain: RootDomain,
        source_url: impl Into<String>,
    ) -> Self {
        Self {
            niche: niche.into(),
            root_domain,
            source_url: source_url.into(),
        }
    }
}

/// Outcome of analysing one candidate site.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Domain shown to the operator (same as `root_domain`).
    pub domain: String,
    /// Root domain of the site.
    pub root_domain: String,
    /// Homepage URL the analysis started from.
    pub url_found: String,
    /// Comma-joined email addresses.
    pub email: String,
    /// Publishability score, 0 to 100.
    pub score: f64,
    /// Comma-joined matched signal keywords.
    pub signals: String,
    /// Free-form operator notes.
    pub notes: String,
}

impl AnalysisResult {
    /// Builds a result for `root` from its score, signals and emails.
    #[must_use]
    pub fn new(root: &RootDomain, score: f64, signals: &[&str], emails: &[String]) -> Self {
        Self {
            domain: root.to_string(),
            root_domain: root.to_string(),
            url_found: root.homepage(),
            email: emails.join(", "),
            score,
            signals: signals.join(", "),
            notes: String::new(),
        }
    }
}

/// Column order of every exported prospect table.
pub const RECORD_COLUMNS: [&str; 9] = [
    "timestamp",
    "niche",
    "domain",
    "root_domain",
    "url_found",
    "email",
    "score",
    "signals",
    "notes",
];

/// An analysed site decorated with run metadata; the unit of export.
///
/// Field order matches [`RECORD_COLUMNS`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProspectRecord {
    /// Capture time, ISO-8601 UTC.
    pub timestamp: String,
    /// Niche the site was found for.
    pub niche: String,
    /// Domain shown to the operator.
    pub domain: String,
    /// Root domain of the site.
    pub root_domain: String,
    /// Homepage URL.
    pub url_found: String,
    /// Comma-joined email addresses.
    pub email: String,
    /// Publishability score.
    pub score: f64,
    /// Comma-joined matched signal keywords.
    pub signals: String,
    /// Free-form notes.
    pub notes: String,
}

impl ProspectRecord {
    /// Decorates an analysis result with its niche and capture time.
    #[must_use]
    pub fn from_analysis(
        niche: impl Into<String>,
        captured_at: DateTime<Utc>,
        analysis: AnalysisResult,
    ) -> Self {
        Self {
            timestamp: iso_timestamp_of(captured_at),
            niche: niche.into(),
            domain: analysis.domain,
            root_domain: analysis.root_domain,
            url_found: analysis.url_found,
            email: analysis.email,
            score: analysis.score,
            signals: analysis.signals,
            notes: analysis.notes,
        }
    }

    /// Returns the value of a named column, if the record has it.
    #[must_use]
    pub fn field(&self, column: &str) -> Option<String> {
        let value = match column {
            "timestamp" => self.timestamp.clone(),
            "niche" => self.niche.clone(),
            "domain" => self.domain.clone(),
            "root_domain" => self.root_domain.clone(),
            "url_found" => self.url_found.clone(),
            "email" => self.email.clone(),
            "score" => format!("{:.1}", self.score),
            "signals" => self.signals.clone(),
            "notes" => self.notes.clone(),
            _ => return None,
        };
        Some(value)
    }
}

/// Everything one pipeline run produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    /// Identifier of the run, used in logs.
    pub run_id: Uuid,
    /// Niches that were searched.
    pub niches: Vec<String>,
    /// Unique candidates in discovery order.
    pub candidates: Vec<Candidate>,
    /// Records for candidates not already in the prior dataset.
    pub records: Vec<ProspectRecord>,
    /// Candidates skipped because the prior dataset already had them.
    pub skipped_prior: usize,
}

impl RunReport {
    /// Creates an empty report for a new run.
    #[must_use]
    pub fn new(niches: Vec<String>) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            niches,
            candidates: Vec::new(),
            records: Vec::new(),
            skipped_prior: 0,
        }
    }

    /// Whether the run found nothing new.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
