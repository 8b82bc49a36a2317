//! Run orchestration: search fan-out, candidate collection and analysis.

use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

use super::dedup::CandidateDeduplicator;
use crate::analysis::{resolve_emails, score_publishability, EnrichmentProvider};
use crate::config::RunConfig;
use crate::dataset::PriorDataset;
use crate::domain::TldFilter;
use crate::errors::{ProspectError, Result};
use crate::events::{EventSink, NoOpEventSink, PipelineEvent};
use crate::models::{AnalysisResult, Candidate, ProspectRecord, RunReport};
use crate::search::{QueryPlan, SearchProvider};
use crate::utils::now_utc;
use crate::web::{aggregate_text, discover_contact_pages, Fetcher};

/// Splits free-form niche text into niches.
///
/// Text containing a comma is split on commas, otherwise on newlines.
/// Entries are trimmed and empties dropped.
#[must_use]
pub fn parse_niches(text: &str) -> Vec<String> {
    let separator = if text.contains(',') { ',' } else { '\n' };
    text.split(separator)
        .map(str::trim)
        .filter(|niche| !niche.is_empty())
        .map(str::to_string)
        .collect()
}

/// The prospect discovery pipeline.
///
/// Every network call runs one at a time in a single control flow. Call
/// failures degrade to empty results; only input errors fail a run.
pub struct ProspectPipeline {
    search: Arc<dyn SearchProvider>,
    fetcher: Arc<dyn Fetcher>,
    enrichment: Arc<dyn EnrichmentProvider>,
    config: RunConfig,
    events: Arc<dyn EventSink>,
}

impl std::fmt::Debug for ProspectPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProspectPipeline")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl ProspectPipeline {
    /// Creates a pipeline over the given services.
    #[must_use]
    pub fn new(
        search: Arc<dyn SearchProvider>,
        fetcher: Arc<dyn Fetcher>,
        enrichment: Arc<dyn EnrichmentProvider>,
        config: RunConfig,
    ) -> Self {
        Self {
            search,
            fetcher,
            enrichment,
            config,
            events: Arc::new(NoOpEventSink),
        }
    }

    /// Sets the sink receiving progress events.
    #[must_use]
    pub fn with_event_sink(mut self, events: Arc<dyn EventSink>) -> Self {
        self.events = events;
        self
    }

    /// Run settings in use.
    #[must_use]
    pub const fn config(&self) -> &RunConfig {
        &self.config
    }

    /// Searches every niche, then analyses each new candidate.
    ///
    /// Candidates already present in `prior` are skipped without any
    /// fetch. Records follow candidate order.
    pub async fn run(&self, niches: &[String], prior: &PriorDataset) -> Result<RunReport> {
        let niches: Vec<String> = niches
            .iter()
            .map(|niche| niche.trim())
            .filter(|niche| !niche.is_empty())
            .map(str::to_string)
            .collect();
        if niches.is_empty() {
            return Err(ProspectError::NoNiches);
        }

        let started = Instant::now();
        let mut report = RunReport::new(niches);
        info!(
            run_id = %report.run_id,
            niches = report.niches.len(),
            strategy = %self.config.strategy,
            per_niche = self.config.per_niche,
            "run started"
        );
        self.events.record(&PipelineEvent::RunStarted {
            run_id: report.run_id,
            niches: report.niches.clone(),
        });

        report.candidates = self.collect_candidates(&report.niches).await;
        info!(
            candidates = report.candidates.len(),
            niches = report.niches.len(),
            "collected unique candidate domains"
        );

        for candidate in &report.candidates {
            if prior.contains(&candidate.root_domain) {
                debug!(root_domain = %candidate.root_domain, "skipping previously collected site");
                report.skipped_prior += 1;
                self.events.record(&PipelineEvent::CandidateSkipped {
                    niche: candidate.niche.clone(),
                    root_domain: candidate.root_domain.clone(),
                });
                continue;
            }
            let analysis = self.analyze_candidate(candidate).await;
            report
                .records
                .push(ProspectRecord::from_analysis(candidate.niche.clone(), now_utc(), analysis));
        }

        info!(
            run_id = %report.run_id,
            records = report.records.len(),
            skipped_prior = report.skipped_prior,
            duration_ms = started.elapsed().as_secs_f64() * 1000.0,
            "run completed"
        );
        self.events.record(&PipelineEvent::RunCompleted {
            records: report.records.len(),
            skipped_prior: report.skipped_prior,
        });
        Ok(report)
    }

    /// Runs the query fan-out for every niche and deduplicates the results.
    ///
    /// The configured delay is observed between niches.
    pub async fn collect_candidates(&self, niches: &[String]) -> Vec<Candidate> {
        let plan = QueryPlan::new(
            self.config.strategy,
            self.config.per_niche,
            &self.config.allowed_tlds,
        );
        let mut dedup = CandidateDeduplicator::new(TldFilter::new(&self.config.allowed_tlds));
        let mut candidates = Vec::new();

        for (index, niche) in niches.iter().enumerate() {
            let requests = plan.requests(niche);
            let mut urls: Vec<String> = Vec::new();
            for request in &requests {
                let found = self.search.search(request).await;
                debug!(
                    query = %request.query,
                    host = request.locale.host,
                    found = found.len(),
                    "query complete"
                );
                urls.extend(found);
            }

            let before = candidates.len();
            candidates.extend(urls.iter().filter_map(|url| dedup.admit(niche, url)));
            let admitted = candidates.len() - before;
            info!(
                niche = %niche,
                queries = requests.len(),
                urls = urls.len(),
                admitted,
                "niche searched"
            );
            self.events.record(&PipelineEvent::NicheSearched {
                niche: niche.clone(),
                queries: requests.len(),
                urls: urls.len(),
                admitted,
            });

            let delay = self.config.niche_delay();
            if !delay.is_zero() && index + 1 < niches.len() {
                tokio::time::sleep(delay).await;
            }
        }
        candidates
    }

    /// Crawls, scores and finds emails for one candidate.
    pub async fn analyze_candidate(&self, candidate: &Candidate) -> AnalysisResult {
        let root = &candidate.root_domain;
        let homepage = root.homepage();
        let pages = discover_contact_pages(self.fetcher.as_ref(), &homepage).await;
        let text = aggregate_text(self.fetcher.as_ref(), &pages).await;
        let (score, signals) = score_publishability(&text);
        let emails = resolve_emails(&text, root, self.enrichment.as_ref()).await;

        debug!(
            root_domain = %root,
            pages = pages.len(),
            score,
            emails = emails.len(),
            "site analysed"
        );
        self.events.record(&PipelineEvent::CandidateAnalyzed {
            niche: candidate.niche.clone(),
            root_domain: root.clone(),
            score,
            emails: emails.len(),
        });
        AnalysisResult::new(root, score, &signals, &emails)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_niches_commas_win() {
        assert_eq!(
            parse_niches(" camping , hiking,\n fishing ,, "),
            vec!["camping".to_string(), "hiking".to_string(), "fishing".to_string()]
        );
    }

    #[test]
    fn test_parse_niches_newlines() {
        assert_eq!(
            parse_niches("camping gear\n\n  trail running \n"),
            vec!["camping gear".to_string(), "trail running".to_string()]
        );
        assert!(parse_niches("  \n ").is_empty());
    }
}
