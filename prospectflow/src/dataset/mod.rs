//! Tabular datasets: prior prospects to skip and exported results.

mod export;
mod prior;

pub use export::{export_csv, export_stdout, write_records, ExportMode};
pub use prior::PriorDataset;
