//! Public-suffix allow-list filtering.

use serde::{Deserialize, Serialize};

use super::normalizer::public_suffix;

/// Selector meaning "accept every suffix".
pub const WILDCARD_TLD: &str = ".any";

/// Whether an allow-list token is the wildcard sentinel.
#[must_use]
pub fn is_wildcard(token: &str) -> bool {
    matches!(normalize_tld(token).as_str(), "any" | "*")
}

/// Normalizes an allow-list token: trimmed, dots stripped, lower-cased.
#[must_use]
pub fn normalize_tld(token: &str) -> String {
    token.trim().trim_matches('.').to_lowercase()
}

/// Decides whether a root domain's public suffix is in an allow-list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TldFilter {
    allowed: Vec<String>,
    accept_all: bool,
}

impl TldFilter {
    /// Builds a filter from raw allow-list tokens such as `.co.uk` or `DE`.
    ///
    /// An empty list, or one containing the wildcard, accepts everything.
    #[must_use]
    pub fn new<I, S>(allowed: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut normalized: Vec<String> = Vec::new();
        for token in allowed {
            let token = token.as_ref();
            if is_wildcard(token) {
                return Self::accept_all();
            }
            let tld = normalize_tld(token);
            if !tld.is_empty() && !normalized.contains(&tld) {
                normalized.push(tld);
            }
        }
        Self {
            accept_all: normalized.is_empty(),
            allowed: normalized,
        }
    }

    /// A filter that accepts every domain.
    #[must_use]
    pub const fn accept_all() -> Self {
        Self {
            allowed: Vec::new(),
            accept_all: true,
        }
    }

    /// Whether every domain passes.
    #[must_use]
    pub const fn accepts_everything(&self) -> bool {
        self.accept_all
    }

    /// Normalized suffixes in the allow-list.
    #[must_use]
    pub fn allowed(&self) -> &[String] {
        &self.allowed
    }

    /// Whether `domain`'s public suffix is allowed.
    #[must_use]
    pub fn matches(&self, domain: &str) -> bool {
        if self.accept_all {
            return true;
        }
        public_suffix(domain).is_some_and(|suffix| self.allowed.contains(&suffix))
    }
}

/// One-shot form of [`TldFilter::matches`].
#[must_use]
pub fn tld_matches<S: AsRef<str>>(domain: &str, allowed: &[S]) -> bool {
    TldFilter::new(allowed).matches(domain)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_list_accepts_all() {
        let filter = TldFilter::new(Vec::<String>::new());
        assert!(filter.accepts_everything());
        assert!(filter.matches("example.lv"));
    }

    #[test]
    fn test_wildcard_accepts_malformed() {
        let filter = TldFilter::new([".com", ".any"]);
        assert!(filter.accepts_everything());
        assert!(filter.matches("not a domain!!"));
        assert!(filter.matches(""));
        assert!(tld_matches("???", &["*"]));
    }

    #[test]
    fn test_suffix_matching_is_normalized() {
        let filter = TldFilter::new([".CO.UK", "lv."]);
        assert_eq!(filter.allowed(), ["co.uk", "lv"]);
        assert!(filter.matches("example.co.uk"));
        assert!(filter.matches("shop.example.lv"));
        assert!(!filter.matches("example.uk"));
        assert!(!filter.matches("example.com"));
    }

    #[test]
    fn test_unparseable_rejected_without_wildcard() {
        assert!(!tld_matches("not a domain!!", &[".com"]));
        assert!(!tld_matches("", &[".com"]));
    }

    #[test]
    fn test_private_suffix_uses_icann_part() {
        assert!(tld_matches("blogspot.com", &[".com"]));
    }

    #[test]
    fn test_is_wildcard() {
        assert!(is_wildcard(".any"));
        assert!(is_wildcard("ANY"));
        assert!(!is_wildcard(".com"));
    }
}
