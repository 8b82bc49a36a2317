//! Query fan-out: strategy templates and TLD locale mapping.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::{is_wildcard, normalize_tld, WILDCARD_TLD};
use crate::errors::ProspectError;

const BALANCED_TEMPLATES: &[&str] = &[
    "{niche} blogs",
    "best {niche} websites",
    "{niche} magazine",
    "{niche} write for us",
    "{niche} guest post",
];

const AGGRESSIVE_TEMPLATES: &[&str] = &[
    "{niche} blogs",
    "best {niche} websites",
    "{niche} magazine",
    "{niche} write for us",
    "{niche} guest post",
    "{niche} submit article",
    "{niche} contribute",
    "top {niche} blogs",
    "{niche} site:medium.com",
];

const LEAN_TEMPLATES: &[&str] = &["{niche} blogs", "{niche} magazine"];

/// Placeholder replaced by the niche in every template.
pub const NICHE_PLACEHOLDER: &str = "{niche}";

/// Which set of query templates a run fans out over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchStrategy {
    /// Five general-purpose templates.
    #[default]
    Balanced,
    /// Balanced plus four submission-oriented templates.
    Aggressive,
    /// Two templates, fastest.
    Lean,
}

impl SearchStrategy {
    /// All strategies, in menu order.
    pub const ALL: [Self; 3] = [Self::Balanced, Self::Aggressive, Self::Lean];

    /// The ordered query templates of this strategy.
    #[must_use]
    pub const fn templates(self) -> &'static [&'static str] {
        match self {
            Self::Balanced => BALANCED_TEMPLATES,
            Self::Aggressive => AGGRESSIVE_TEMPLATES,
            Self::Lean => LEAN_TEMPLATES,
        }
    }

    /// Instantiates every template for `niche`, in order.
    #[must_use]
    pub fn queries(self, niche: &str) -> Vec<String> {
        self.templates()
            .iter()
            .map(|template| template.replace(NICHE_PLACEHOLDER, niche))
            .collect()
    }

    /// Short lower-case name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Balanced => "balanced",
            Self::Aggressive => "aggressive",
            Self::Lean => "lean",
        }
    }
}

impl fmt::Display for SearchStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SearchStrategy {
    type Err = ProspectError;

    /// Matches by case-insensitive prefix, so menu labels such as
    /// "Aggressive (more variants)" parse too.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|strategy| lowered.starts_with(strategy.as_str()))
            .ok_or_else(|| {
                ProspectError::invalid_config(format!(
                    "unknown search strategy '{s}' (expected balanced, aggressive or lean)"
                ))
            })
    }
}

/// Search-engine locale settings for one TLD variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct LocaleParams {
    /// Search host, e.g. `google.co.uk`.
    pub host: &'static str,
    /// Geolocation code, e.g. `gb`.
    pub geo: Option<&'static str>,
    /// Interface language code, e.g. `en`.
    pub language: Option<&'static str>,
}

impl LocaleParams {
    /// Generic host without geolocation or language bias.
    pub const GENERIC: Self = Self {
        host: "google.com",
        geo: None,
        language: None,
    };

    const fn biased(host: &'static str, geo: &'static str, language: &'static str) -> Self {
        Self {
            host,
            geo: Some(geo),
            language: Some(language),
        }
    }
}

impl Default for LocaleParams {
    fn default() -> Self {
        Self::GENERIC
    }
}

const LOCALE_TABLE: &[(&str, LocaleParams)] = &[
    ("lv", LocaleParams::biased("google.lv", "lv", "lv")),
    ("gr", LocaleParams::biased("google.gr", "gr", "el")),
    ("lt", LocaleParams::biased("google.lt", "lt", "lt")),
    ("ee", LocaleParams::biased("google.ee", "ee", "et")),
    ("de", LocaleParams::biased("google.de", "de", "de")),
    ("fr", LocaleParams::biased("google.fr", "fr", "fr")),
    ("co.uk", LocaleParams::biased("google.co.uk", "gb", "en")),
    ("com", LocaleParams::biased("google.com", "us", "en")),
    ("net", LocaleParams::biased("google.com", "us", "en")),
    ("org", LocaleParams::biased("google.com", "us", "en")),
];

/// Maps a TLD selector to locale settings; wildcard and unknown TLDs get
/// [`LocaleParams::GENERIC`].
#[must_use]
pub fn locale_for_tld(tld: &str) -> LocaleParams {
    if is_wildcard(tld) {
        return LocaleParams::GENERIC;
    }
    let key = normalize_tld(tld);
    LOCALE_TABLE
        .iter()
        .find(|(suffix, _)| *suffix == key)
        .map_or(LocaleParams::GENERIC, |(_, locale)| *locale)
}

/// Result cap for each query so a niche yields roughly `per_niche` sites.
///
/// `floor(per_niche * 1.4 / template_count)` clamped to 10..=50.
#[must_use]
pub fn per_query_limit(per_niche: usize, template_count: usize) -> usize {
    let raw = per_niche.saturating_mul(14) / (10 * template_count.max(1));
    raw.clamp(10, 50)
}

/// One search call to issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchRequest {
    /// Query text.
    pub query: String,
    /// Maximum number of result URLs wanted.
    pub limit: usize,
    /// Locale settings for the provider.
    pub locale: LocaleParams,
}

impl SearchRequest {
    /// Creates a request with the generic locale.
    #[must_use]
    pub fn new(query: impl Into<String>, limit: usize) -> Self {
        Self {
            query: query.into(),
            limit,
            locale: LocaleParams::GENERIC,
        }
    }

    /// Sets the locale.
    #[must_use]
    pub const fn with_locale(mut self, locale: LocaleParams) -> Self {
        self.locale = locale;
        self
    }
}

/// The full query fan-out of a run, independent of the niche.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryPlan {
    strategy: SearchStrategy,
    per_query: usize,
    tld_variants: Vec<String>,
}

impl QueryPlan {
    /// Plans queries for `strategy`, wanting `per_niche` sites per niche,
    /// searching every non-wildcard TLD in `allowed_tlds` (or one generic
    /// variant when there are none).
    #[must_use]
    pub fn new<S: AsRef<str>>(
        strategy: SearchStrategy,
        per_niche: usize,
        allowed_tlds: &[S],
    ) -> Self {
        let mut tld_variants: Vec<String> = allowed_tlds
            .iter()
            .map(AsRef::as_ref)
            .filter(|tld| !is_wildcard(tld))
            .map(str::to_string)
            .collect();
        if tld_variants.is_empty() {
            tld_variants.push(WILDCARD_TLD.to_string());
        }
        Self {
            strategy,
            per_query: per_query_limit(per_niche, strategy.templates().len()),
            tld_variants,
        }
    }

    /// The strategy in use.
    #[must_use]
    pub const fn strategy(&self) -> SearchStrategy {
        self.strategy
    }

    /// Result cap of every request.
    #[must_use]
    pub const fn per_query(&self) -> usize {
        self.per_query
    }

    /// TLD selectors searched for every query.
    #[must_use]
    pub fn tld_variants(&self) -> &[String] {
        &self.tld_variants
    }

    /// Requests for one niche in (template, TLD variant) order.
    #[must_use]
    pub fn requests(&self, niche: &str) -> Vec<SearchRequest> {
        self.strategy
            .queries(niche)
            .into_iter()
            .flat_map(|query| {
                self.tld_variants.iter().map(move |tld| {
                    SearchRequest::new(query.clone(), self.per_query)
                        .with_locale(locale_for_tld(tld))
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_template_sets() {
        assert_eq!(SearchStrategy::Balanced.templates().len(), 5);
        assert_eq!(SearchStrategy::Lean.templates().len(), 2);

        let aggressive = SearchStrategy::Aggressive.templates();
        assert!(SearchStrategy::Balanced
            .templates()
            .iter()
            .all(|t| aggressive.contains(t)));
        assert_eq!(aggressive.len(), 9);

        for strategy in SearchStrategy::ALL {
            assert!(strategy.templates().iter().all(|t| t.contains(NICHE_PLACEHOLDER)));
        }
    }

    #[test]
    fn test_queries_substitute_niche() {
        assert_eq!(
            SearchStrategy::Lean.queries("hiking gear"),
            vec!["hiking gear blogs".to_string(), "hiking gear magazine".to_string()]
        );
        assert_eq!(SearchStrategy::Balanced.queries("solar")[1], "best solar websites");
    }

    #[test]
    fn test_strategy_from_str() {
        assert_eq!("Balanced".parse::<SearchStrategy>().unwrap(), SearchStrategy::Balanced);
        assert_eq!(
            "Aggressive (more variants)".parse::<SearchStrategy>().unwrap(),
            SearchStrategy::Aggressive
        );
        assert_eq!("lean (faster)".parse::<SearchStrategy>().unwrap(), SearchStrategy::Lean);
        assert!("deep".parse::<SearchStrategy>().is_err());
    }

    #[test]
    fn test_locale_table() {
        assert_eq!(locale_for_tld(".co.uk"), LocaleParams::biased("google.co.uk", "gb", "en"));
        assert_eq!(locale_for_tld("GR"), LocaleParams::biased("google.gr", "gr", "el"));
        assert_eq!(locale_for_tld(".net"), LocaleParams::biased("google.com", "us", "en"));
        assert_eq!(locale_for_tld(".any"), LocaleParams::GENERIC);
        assert_eq!(locale_for_tld(".io"), LocaleParams::GENERIC);
        assert_eq!(locale_for_tld(""), LocaleParams::GENERIC);
    }

    #[test]
    fn test_per_query_limit() {
        assert_eq!(per_query_limit(30, 5), 10);
        assert_eq!(per_query_limit(100, 5), 28);
        assert_eq!(per_query_limit(200, 2), 50);
        assert_eq!(per_query_limit(1, 9), 10);
        assert_eq!(per_query_limit(30, 0), 42);
    }

    #[test]
    fn test_plan_wildcard_only() {
        let plan = QueryPlan::new(SearchStrategy::Lean, 30, &[".any"]);
        assert_eq!(plan.tld_variants(), [".any"]);
        let requests = plan.requests("camping");
        assert_eq!(requests.len(), 2);
        assert!(requests.iter().all(|r| r.locale == LocaleParams::GENERIC));
    }

    #[test]
    fn test_plan_order_is_template_then_tld() {
        let plan = QueryPlan::new(SearchStrategy::Lean, 100, &[".any", ".lv", ".de"]);
        let requests: Vec<(String, &str)> = plan
            .requests("camping")
            .into_iter()
            .map(|r| (r.query, r.locale.host))
            .collect();
        assert_eq!(
            requests,
            vec![
                ("camping blogs".to_string(), "google.lv"),
                ("camping blogs".to_string(), "google.de"),
                ("camping magazine".to_string(), "google.lv"),
                ("camping magazine".to_string(), "google.de"),
            ]
        );
        assert_eq!(plan.per_query(), 50);
    }
}
