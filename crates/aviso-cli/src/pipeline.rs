//! Master sheet generation pipeline.
//!
//! Loads the rules once and hands the same entries to every requested
//! serializer, in CSV, XLSX, JSON order. The first failure aborts the run;
//! files written before it stay on disk.

use std::path::{Path, PathBuf};
use std::time::Instant;

use thiserror::Error;
use tracing::{debug, info, info_span};

use aviso_ingest::{LoadError, load_rules};
use aviso_model::{Catalog, HtsEntry, OutputFormat, WrittenOutput};
use aviso_output::{OutputError, ensure_xlsx_available, write_csv, write_json, write_xlsx};

/// Exit status for configuration problems (bad rules, unavailable format).
pub const EXIT_CONFIGURATION: i32 = 2;
/// Exit status for I/O failures.
pub const EXIT_FAILURE: i32 = 1;

#[derive(Debug, Clone)]
pub struct RunRequest {
    pub rules_path: PathBuf,
    pub output_dir: PathBuf,
    pub skip_csv: bool,
    pub skip_xlsx: bool,
    pub skip_json: bool,
}

impl RunRequest {
    /// Request every format.
    pub fn new(rules_path: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            rules_path: rules_path.into(),
            output_dir: output_dir.into(),
            skip_csv: false,
            skip_xlsx: false,
            skip_json: false,
        }
    }

    /// Formats that will be written, in write order.
    pub fn requested_formats(&self) -> Vec<OutputFormat> {
        OutputFormat::ALL
            .into_iter()
            .filter(|format| match format {
                OutputFormat::Csv => !self.skip_csv,
                OutputFormat::Xlsx => !self.skip_xlsx,
                OutputFormat::Json => !self.skip_json,
            })
            .collect()
    }

    pub fn output_path(&self, format: OutputFormat) -> PathBuf {
        self.output_dir.join(format.file_name())
    }
}

#[derive(Debug)]
pub struct RunSummary {
    pub rules_path: PathBuf,
    pub output_dir: PathBuf,
    pub entry_count: usize,
    pub industry_count: usize,
    pub outputs: Vec<WrittenOutput>,
}

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error(transparent)]
    Output(#[from] OutputError),
}

impl PipelineError {
    pub fn is_configuration(&self) -> bool {
        match self {
            PipelineError::Load(err) => err.is_configuration(),
            PipelineError::Output(err) => err.is_configuration(),
        }
    }

    pub fn exit_code(&self) -> i32 {
        if self.is_configuration() {
            EXIT_CONFIGURATION
        } else {
            EXIT_FAILURE
        }
    }
}

/// Load the rules and write every requested format.
pub fn run(request: &RunRequest) -> Result<RunSummary, PipelineError> {
    run_with_capability(request, ensure_xlsx_available)
}

fn run_with_capability(
    request: &RunRequest,
    xlsx_capability: fn() -> Result<(), OutputError>,
) -> Result<RunSummary, PipelineError> {
    let span = info_span!(
        "generate",
        rules = %request.rules_path.display(),
        output_dir = %request.output_dir.display()
    );
    let _guard = span.enter();

    let formats = request.requested_formats();
    // Checked before loading so an unavailable format never leaves partial output.
    if formats.contains(&OutputFormat::Xlsx) {
        xlsx_capability()?;
    }

    let entries = load_rules(&request.rules_path)?;
    let industry_count = Catalog::from_entries(&entries).len();

    let mut outputs = Vec::with_capacity(formats.len());
    for format in formats {
        let path = request.output_path(format);
        let start = Instant::now();
        let rows = write_format(format, &entries, &path)?;
        debug!(
            %format,
            rows,
            duration_ms = start.elapsed().as_millis(),
            "format complete"
        );
        outputs.push(WrittenOutput { format, path, rows });
    }

    info!(
        entry_count = entries.len(),
        industry_count,
        output_count = outputs.len(),
        "master sheet generated"
    );
    Ok(RunSummary {
        rules_path: request.rules_path.clone(),
        output_dir: request.output_dir.clone(),
        entry_count: entries.len(),
        industry_count,
        outputs,
    })
}

/// Write `entries` in one format.
pub fn write_format(
    format: OutputFormat,
    entries: &[HtsEntry],
    path: &Path,
) -> Result<usize, OutputError> {
    match format {
        OutputFormat::Csv => write_csv(entries, path),
        OutputFormat::Xlsx => write_xlsx(entries, path),
        OutputFormat::Json => write_json(entries, path),
    }
}
