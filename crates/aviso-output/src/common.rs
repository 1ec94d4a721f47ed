//! Shared helpers for the serializers.

use std::fs;
use std::path::Path;

use crate::error::{OutputError, Result};

/// File name of a per-industry catalog export.
pub fn catalog_file_name(industry_key: &str) -> String {
    format!("catalogo_{industry_key}.json")
}

/// Create the parent directory of `path` when missing.
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    let Some(parent) = path.parent() else {
        return Ok(());
    };
    if parent.as_os_str().is_empty() {
        return Ok(());
    }
    fs::create_dir_all(parent).map_err(|source| OutputError::CreateDir {
        path: parent.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn catalog_file_name_embeds_key() {
        assert_eq!(catalog_file_name("textil"), "catalogo_textil.json");
    }

    #[test]
    fn ensure_parent_dir_creates_nested_dirs() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("a").join("b").join("file.csv");

        ensure_parent_dir(&path).expect("create parents");
        assert!(dir.path().join("a").join("b").is_dir());

        ensure_parent_dir(Path::new("bare.csv")).expect("no parent");
    }
}
