//! CSV export and run summary.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;
use tracing::error;

use crate::error::{DropboxError, Result};
use crate::models::LinkRecord;

/// Default name of the output table.
pub const DEFAULT_OUTPUT_FILE: &str = "dropbox_share_links.csv";

/// UTF-8 byte-order mark, so spreadsheet tools detect the encoding.
const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

#[derive(Serialize)]
struct CsvRow<'a> {
    filename: &'a str,
    shared_link: &'a str,
}

/// Write `records` as CSV (BOM, header row, one row per record) to `writer`.
pub fn write_csv<W: Write>(records: &[LinkRecord], mut writer: W) -> Result<()> {
    writer.write_all(UTF8_BOM)?;

    let mut csv_writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(writer);

    for record in records {
        csv_writer.serialize(CsvRow {
            filename: &record.filename,
            shared_link: record.shared_link_display(),
        })?;
    }

    csv_writer.flush()?;
    Ok(())
}

/// Save `records` to the file at `path`, replacing it if it exists.
///
/// Nothing is written when `records` is empty.
pub fn save_to_csv<P: AsRef<Path>>(records: &[LinkRecord], path: P) -> Result<()> {
    if records.is_empty() {
        return Ok(());
    }

    let file = File::create(path)?;
    write_csv(records, BufWriter::new(file))
}

/// Result of exporting a finished run.
#[derive(Debug)]
pub struct ExportReport {
    pub summary: Summary,
    /// Set when the table could not be written; the summary is still valid.
    pub write_error: Option<DropboxError>,
}

/// Save `records` to `path` and summarize them.
///
/// A write failure is logged and returned in the report instead of aborting.
pub fn export_records<P: AsRef<Path>>(records: &[LinkRecord], path: P) -> ExportReport {
    let path = path.as_ref();
    let write_error = save_to_csv(records, path).err();
    if let Some(e) = &write_error {
        error!(output = %path.display(), error = %e, "Failed to write CSV");
    }

    ExportReport {
        summary: Summary::from_records(records),
        write_error,
    }
}

/// Link counts for a finished run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub processed: usize,
    pub successful: usize,
    pub failed: usize,
}

impl Summary {
    pub fn from_records(records: &[LinkRecord]) -> Self {
        let successful = records.iter().filter(|r| r.is_success()).count();
        Self {
            processed: records.len(),
            successful,
            failed: records.len() - successful,
        }
    }

    /// Console report, one line per figure.
    pub fn report(&self, output_file: &Path) -> String {
        format!(
            "\n=== Processing Results ===\n\
             Processed files: {}\n\
             Shared link creation successful: {}\n\
             Shared link creation failed: {}\n\
             Output file: {}",
            self.processed,
            self.successful,
            self.failed,
            output_file.display()
        )
    }
}
