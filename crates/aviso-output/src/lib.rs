//! Master sheet serializers.
//!
//! This crate writes the flattened aviso entries in three independent
//! encodings:
//!
//! - **CSV**: header plus one projected row per entry
//! - **XLSX**: the same header and rows in a single-sheet workbook (feature `xlsx`)
//! - **JSON**: the raw entry records as a pretty-printed array

mod common;
mod csv_sheet;
pub mod error;
mod json;
mod xlsx;

pub use common::{catalog_file_name, ensure_parent_dir};
pub use csv_sheet::{write_csv, write_csv_to};
pub use error::{OutputError, Result};
pub use json::write_json;
#[cfg(feature = "xlsx")]
pub use xlsx::build_master_frame;
pub use xlsx::{ensure_xlsx_available, write_xlsx, xlsx_available};
