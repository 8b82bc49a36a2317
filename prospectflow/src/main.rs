//! `prospectflow` command-line entry point.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use prospectflow::analysis::HunterClient;
use prospectflow::cli::{Cli, EMPTY_RESULT_HINT};
use prospectflow::dataset::{export_csv, export_stdout, PriorDataset};
use prospectflow::events::LoggingEventSink;
use prospectflow::pipeline::ProspectPipeline;
use prospectflow::search::SerpApiClient;
use prospectflow::web::HttpFetcher;

fn init_tracing(debug: bool, json: bool) {
    let default_filter = if debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into());
    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_target(false).with_writer(std::io::stderr))
            .init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.debug, cli.log_json);

    let config = cli.load_config().context("failed to load configuration")?;
    config.validate()?;
    let niches = cli.niches();

    let search = SerpApiClient::new(&config).context("failed to build search client")?;
    let fetcher = HttpFetcher::new(&config.fetch).context("failed to build page fetcher")?;
    let enrichment = HunterClient::new(&config).context("failed to build enrichment client")?;
    if !enrichment.is_enabled() {
        info!("no enrichment key configured, email fallback disabled");
    }

    let prior = PriorDataset::load(cli.prior.as_deref())
        .with_context(|| format!("failed to read prior dataset {:?}", cli.prior))?;

    let pipeline = ProspectPipeline::new(
        Arc::new(search),
        Arc::new(fetcher),
        Arc::new(enrichment),
        config.run.clone(),
    )
    .with_event_sink(Arc::new(LoggingEventSink::debug()));

    let report = pipeline.run(&niches, &prior).await?;
    if report.is_empty() {
        warn!("{EMPTY_RESULT_HINT}");
        return Ok(());
    }

    match &cli.output {
        Some(path) => export_csv(path, &report.records, cli.export_mode())
            .with_context(|| format!("failed to write {}", path.display()))?,
        None => export_stdout(&report.records).context("failed to write results")?,
    }
    info!(
        run_id = %report.run_id,
        records = report.records.len(),
        skipped_prior = report.skipped_prior,
        "done"
    );
    Ok(())
}
