//! Command-line interface.

use clap::Parser;
use std::path::PathBuf;

use crate::config::{Credentials, ProspectConfig};
use crate::dataset::ExportMode;
use crate::errors::Result;
use crate::pipeline::parse_niches;
use crate::search::SearchStrategy;

/// Shown when a run produced no new sites.
pub const EMPTY_RESULT_HINT: &str =
    "No new sites found. Try Aggressive strategy, broaden TLDs, or enable debug to inspect queries.";

/// Find niche websites that accept contributed content, score them and
/// collect contact emails.
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "prospectflow", version, about)]
pub struct Cli {
    /// Niches to search; comma- or newline-separated lists are split
    #[arg(required = true, value_name = "NICHES")]
    pub niches: Vec<String>,

    /// Websites wanted per niche (1-200)
    #[arg(long, value_name = "N")]
    pub per_niche: Option<usize>,

    /// Query strategy: balanced, aggressive or lean
    #[arg(long, value_name = "STRATEGY")]
    pub strategy: Option<String>,

    /// Allowed TLD, e.g. `.lv` or `.co.uk`; repeatable, `.any` accepts all
    #[arg(long = "tld", value_name = "TLD")]
    pub tlds: Vec<String>,

    /// CSV of previously collected prospects to skip
    #[arg(long, value_name = "CSV")]
    pub prior: Option<PathBuf>,

    /// Write results to this CSV instead of stdout
    #[arg(long, value_name = "CSV")]
    pub output: Option<PathBuf>,

    /// Append to the output file, keeping its existing columns
    #[arg(long, requires = "output")]
    pub append: bool,

    /// Verbose logging and provider error diagnostics
    #[arg(long)]
    pub debug: bool,

    /// Log as JSON lines
    #[arg(long)]
    pub log_json: bool,

    /// Pause between niches in milliseconds
    #[arg(long, value_name = "MS")]
    pub delay_ms: Option<u64>,

    /// JSON file with `fetch` and `run` settings
    #[arg(long, value_name = "JSON")]
    pub config: Option<PathBuf>,

    /// SerpAPI key; overrides SERPAPI_KEY
    #[arg(long, value_name = "KEY")]
    pub serpapi_key: Option<String>,

    /// Hunter.io key; overrides HUNTER_API_KEY
    #[arg(long, value_name = "KEY")]
    pub hunter_key: Option<String>,
}

impl Cli {
    /// Niches from every positional argument, in order.
    #[must_use]
    pub fn niches(&self) -> Vec<String> {
        self.niches.iter().flat_map(|text| parse_niches(text)).collect()
    }

    /// How results are written to `--output`.
    #[must_use]
    pub const fn export_mode(&self) -> ExportMode {
        if self.append {
            ExportMode::Append
        } else {
            ExportMode::Overwrite
        }
    }

    /// Builds the configuration: defaults, then `--config`, then the
    /// environment, then flags.
    pub fn load_config(&self) -> Result<ProspectConfig> {
        let base = match &self.config {
            Some(path) => ProspectConfig::from_json_file(path)?,
            None => ProspectConfig::new(),
        };
        self.apply(base, Credentials::from_env())
    }

    /// Applies flag overrides on top of `config` and `credentials`.
    pub fn apply(
        &self,
        mut config: ProspectConfig,
        credentials: Credentials,
    ) -> Result<ProspectConfig> {
        config.credentials = credentials
            .with_serpapi_key(self.serpapi_key.clone())
            .with_hunter_key(self.hunter_key.clone());

        let run = &mut config.run;
        if let Some(per_niche) = self.per_niche {
            run.per_niche = per_niche;
        }
        if let Some(strategy) = &self.strategy {
            run.strategy = strategy.parse::<SearchStrategy>()?;
        }
        if !self.tlds.is_empty() {
            run.allowed_tlds.clone_from(&self.tlds);
        }
        if let Some(delay_ms) = self.delay_ms {
            run.niche_delay_ms = delay_ms;
        }
        run.diagnostics |= self.debug;
        Ok(config)
    }
}
