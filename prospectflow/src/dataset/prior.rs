//! Previously collected prospects, used to skip known sites.

use std::collections::HashSet;
use std::io::Read;
use std::path::Path;
use tracing::debug;

use crate::errors::Result;
use crate::models::RootDomain;

/// How a prior table identifies its sites.
#[derive(Debug, Clone, PartialEq, Eq)]
enum PriorIndex {
    /// Values of the `root_domain` or `domain` column.
    Column(HashSet<String>),
    /// Every cell, searched by substring.
    Cells(Vec<String>),
}

/// Domains from earlier runs.
///
/// Lookups use the `root_domain` column when present, else the `domain`
/// column, else any cell containing the domain. Column names are matched
/// case-insensitively after trimming; values are compared lower-cased.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriorDataset {
    index: PriorIndex,
    rows: usize,
}

impl Default for PriorDataset {
    fn default() -> Self {
        Self::empty()
    }
}

impl PriorDataset {
    /// A dataset that contains nothing.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            index: PriorIndex::Cells(Vec::new()),
            rows: 0,
        }
    }

    /// Reads a CSV table with a header row.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);
        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim().to_lowercase())
            .collect();
        let key_column = ["root_domain", "domain"]
            .iter()
            .find_map(|name| headers.iter().position(|h| h == name));

        let mut rows = 0usize;
        let index = match key_column {
            Some(column) => {
                let mut values = HashSet::new();
                for record in reader.records() {
                    let record = record?;
                    rows += 1;
                    if let Some(value) = record.get(column) {
                        values.insert(value.to_lowercase());
                    }
                }
                PriorIndex::Column(values)
            }
            None => {
                let mut cells = Vec::new();
                for record in reader.records() {
                    let record = record?;
                    rows += 1;
                    cells.extend(record.iter().filter(|c| !c.is_empty()).map(str::to_lowercase));
                }
                PriorIndex::Cells(cells)
            }
        };
        Ok(Self { index, rows })
    }

    /// Reads a CSV file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)?;
        let dataset = Self::from_reader(file)?;
        debug!(path = %path.display(), rows = dataset.rows, "loaded prior dataset");
        Ok(dataset)
    }

    /// Reads a CSV file when a path is given and exists, else empty.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) if path.exists() => Self::from_path(path),
            Some(path) => {
                debug!(path = %path.display(), "prior dataset not found, starting empty");
                Ok(Self::empty())
            }
            None => Ok(Self::empty()),
        }
    }

    /// Number of data rows read.
    #[must_use]
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Whether the table has no rows.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.rows == 0
    }

    /// Whether `domain` was already collected.
    #[must_use]
    pub fn contains(&self, domain: &RootDomain) -> bool {
        if domain.is_empty() {
            return false;
        }
        let needle = domain.as_str().to_lowercase();
        match &self.index {
            PriorIndex::Column(values) => values.contains(&needle),
            PriorIndex::Cells(cells) => cells.iter().any(|cell| cell.contains(&needle)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::root_domain;
    use std::io::Write;

    fn dataset(csv: &str) -> PriorDataset {
        PriorDataset::from_reader(csv.as_bytes()).unwrap()
    }

    #[test]
    fn test_root_domain_column_wins() {
        let prior = dataset(" Root_Domain ,domain\nExample.COM,other.org\n");
        assert!(prior.contains(&root_domain("example.com")));
        assert!(!prior.contains(&root_domain("other.org")));
        assert_eq!(prior.rows(), 1);
    }

    #[test]
    fn test_domain_column_fallback() {
        let prior = dataset("DOMAIN,notes\ncampblog.net,nice\n");
        assert!(prior.contains(&root_domain("https://www.campblog.net/")));
        assert!(!prior.contains(&root_domain("nice")));
    }

    #[test]
    fn test_cell_scan_fallback() {
        let prior = dataset("site,contact\nhttps://www.Hiking.co.uk/about,me@x.com\n");
        assert!(prior.contains(&root_domain("hiking.co.uk")));
        assert!(!prior.contains(&root_domain("biking.co.uk")));
    }

    #[test]
    fn test_internationalized_domain_matches() {
        let prior = dataset("root_domain\nmünchen.de\n");
        assert!(prior.contains(&root_domain("https://www.münchen.de/kontakt")));
        assert!(prior.contains(&root_domain("http://xn--mnchen-3ya.de/")));
    }

    #[test]
    fn test_empty_dataset() {
        let prior = PriorDataset::empty();
        assert!(prior.is_empty());
        assert!(!prior.contains(&root_domain("example.com")));
        assert!(!dataset("root_domain\nexample.com\n").contains(&root_domain("")));
    }

    #[test]
    fn test_load_missing_path_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("none.csv");
        assert!(PriorDataset::load(Some(&missing)).unwrap().is_empty());
        assert!(PriorDataset::load(None).unwrap().is_empty());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "timestamp,niche,root_domain").unwrap();
        writeln!(file, "2024-01-01T00:00:00+00:00,camping,tents.lv").unwrap();
        let prior = PriorDataset::load(Some(file.path())).unwrap();
        assert_eq!(prior.rows(), 1);
        assert!(prior.contains(&root_domain("shop.tents.lv")));
    }
}
