//! Structured-record master sheet.

use std::fs;
use std::path::Path;

use serde::Serialize;
use tracing::info;

use crate::common::ensure_parent_dir;
use crate::error::{OutputError, Result};

/// Write records as a pretty-printed JSON array.
///
/// Non-ASCII text is kept literal and `requires_notice` stays a boolean.
pub fn write_json<T: Serialize>(records: &[T], path: &Path) -> Result<usize> {
    ensure_parent_dir(path)?;
    let json = serde_json::to_string_pretty(records).map_err(|source| OutputError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    fs::write(path, json).map_err(|source| OutputError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), rows = records.len(), "json written");
    Ok(records.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use aviso_model::{HtsDetail, HtsEntry, Industry};
    use tempfile::TempDir;

    #[test]
    fn writes_two_space_indented_array() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("nested").join("master_sheet.json");
        let entry = HtsEntry::new(
            &Industry::new("auto", "Automotriz"),
            HtsDetail {
                code: "8703.23".to_string(),
                description: "Vehículos".to_string(),
                ..HtsDetail::default()
            },
        );

        write_json(&[entry], &path).expect("write json");

        let written = fs::read_to_string(&path).expect("read json");
        assert!(written.starts_with("[\n  {\n    \"industry_key\": \"auto\","));
        assert!(written.contains("\"hts_description\": \"Vehículos\""));
        assert!(written.contains("\"requires_notice\": false"));
    }

    #[test]
    fn empty_entries_write_empty_array() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("master_sheet.json");
        write_json::<HtsEntry>(&[], &path).expect("write json");
        assert_eq!(fs::read_to_string(&path).expect("read json"), "[]");
    }
}
