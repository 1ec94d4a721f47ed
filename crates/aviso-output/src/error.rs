//! Error types for master sheet serialization.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OutputError {
    /// Failed to create the output directory.
    #[error("failed to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to create or write an output file.
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write CSV {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("failed to serialize JSON for {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Failed to build the tabular frame behind the spreadsheet.
    #[error("failed to build master sheet frame: {message}")]
    Frame { message: String },

    #[error("failed to write workbook {path}: {message}")]
    Workbook { path: PathBuf, message: String },

    /// The spreadsheet capability was not compiled in.
    #[error(
        "XLSX output is unavailable: rebuild with the `xlsx` feature enabled \
         or pass --no-xlsx"
    )]
    XlsxUnavailable,
}

impl OutputError {
    /// Returns true for errors the user fixes through configuration.
    pub fn is_configuration(&self) -> bool {
        matches!(self, OutputError::XlsxUnavailable)
    }
}

pub type Result<T> = std::result::Result<T, OutputError>;
