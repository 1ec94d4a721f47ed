use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Base name shared by every master-sheet output file.
pub const MASTER_SHEET_STEM: &str = "master_sheet";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Csv,
    Xlsx,
    Json,
}

impl OutputFormat {
    /// All formats in write order.
    pub const ALL: [OutputFormat; 3] = [OutputFormat::Csv, OutputFormat::Xlsx, OutputFormat::Json];

    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Xlsx => "xlsx",
            OutputFormat::Json => "json",
        }
    }

    /// Fixed output file name for this format.
    pub fn file_name(self) -> String {
        format!("{MASTER_SHEET_STEM}.{}", self.extension())
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            OutputFormat::Csv => "CSV",
            OutputFormat::Xlsx => "XLSX",
            OutputFormat::Json => "JSON",
        };
        f.write_str(label)
    }
}

/// A file written by one serializer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WrittenOutput {
    pub format: OutputFormat,
    pub path: PathBuf,
    pub rows: usize,
}
