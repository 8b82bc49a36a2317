//! CSV export of prospect records.

use std::fs::{File, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::Path;
use tracing::info;

use crate::errors::Result;
use crate::models::{ProspectRecord, RECORD_COLUMNS};

/// How an export treats an existing file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExportMode {
    /// Replace the file with a header and the new rows.
    #[default]
    Overwrite,
    /// Add rows under the existing header, in its column order.
    Append,
}

/// Writes records as CSV in the given column order.
///
/// Columns a record does not know are left blank.
pub fn write_records<W: Write>(
    writer: W,
    records: &[ProspectRecord],
    columns: &[String],
    include_header: bool,
) -> Result<()> {
    let mut writer = csv::WriterBuilder::new().has_headers(false).from_writer(writer);
    if include_header {
        writer.write_record(columns)?;
    }
    for record in records {
        writer.write_record(
            columns
                .iter()
                .map(|column| record.field(column.trim()).unwrap_or_default()),
        )?;
    }
    writer.flush()?;
    Ok(())
}

fn default_columns() -> Vec<String> {
    RECORD_COLUMNS.iter().map(ToString::to_string).collect()
}

/// Header of an existing CSV file, or `None` when the file is empty.
fn existing_header(file: &mut File) -> Result<Option<Vec<String>>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(&mut *file);
    let mut header = csv::StringRecord::new();
    if !reader.read_record(&mut header)? {
        return Ok(None);
    }
    Ok(Some(header.iter().map(str::to_lowercase).collect()))
}

/// Whether the file ends without a line terminator.
fn lacks_trailing_newline(file: &mut File) -> io::Result<bool> {
    if file.metadata()?.len() == 0 {
        return Ok(false);
    }
    file.seek(SeekFrom::End(-1))?;
    let mut last = [0u8; 1];
    file.read_exact(&mut last)?;
    Ok(last[0] != b'\n')
}

/// Writes records to a CSV file.
///
/// Appending to a missing or empty file writes the header first. Appending
/// to a populated file never repeats the header.
pub fn export_csv(
    path: impl AsRef<Path>,
    records: &[ProspectRecord],
    mode: ExportMode,
) -> Result<()> {
    let path = path.as_ref();
    match mode {
        ExportMode::Overwrite => {
            let file = File::create(path)?;
            write_records(file, records, &default_columns(), true)?;
        }
        ExportMode::Append => {
            let mut file = OpenOptions::new()
                .read(true)
                .append(true)
                .create(true)
                .open(path)?;
            match existing_header(&mut file)? {
                Some(columns) => {
                    if lacks_trailing_newline(&mut file)? {
                        file.write_all(b"\n")?;
                    }
                    write_records(file, records, &columns, false)?;
                }
                None => write_records(file, records, &default_columns(), true)?,
            }
        }
    }
    info!(path = %path.display(), rows = records.len(), ?mode, "exported prospects");
    Ok(())
}

/// Writes records with a header to standard output.
pub fn export_stdout(records: &[ProspectRecord]) -> Result<()> {
    let stdout = io::stdout();
    write_records(stdout.lock(), records, &default_columns(), true)
}
