//! Domain canonicalization and suffix filtering.

mod normalizer;
mod tld;

pub use normalizer::{public_suffix, root_domain};
pub use tld::{is_wildcard, normalize_tld, tld_matches, TldFilter, WILDCARD_TLD};
