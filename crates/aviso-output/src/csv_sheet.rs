//! Delimited-text master sheet.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use csv::{Terminator, WriterBuilder};
use tracing::info;

use aviso_model::{HtsEntry, MASTER_SHEET_HEADER};

use crate::common::ensure_parent_dir;
use crate::error::{OutputError, Result};

/// Write the master sheet as CSV, replacing any existing file.
///
/// Returns the number of data rows written.
pub fn write_csv(entries: &[HtsEntry], path: &Path) -> Result<usize> {
    ensure_parent_dir(path)?;
    let file = File::create(path).map_err(|source| OutputError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    write_csv_to(entries, file).map_err(|source| OutputError::Csv {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), rows = entries.len(), "csv written");
    Ok(entries.len())
}

/// Write the header and one row per entry to `writer`.
///
/// Records end in CRLF and fields are quoted only when needed.
pub fn write_csv_to<W: Write>(entries: &[HtsEntry], writer: W) -> csv::Result<()> {
    let mut writer = WriterBuilder::new()
        .terminator(Terminator::CRLF)
        .from_writer(writer);
    writer.write_record(MASTER_SHEET_HEADER)?;
    for entry in entries {
        writer.write_record(entry.to_row())?;
    }
    writer.flush()?;
    Ok(())
}
