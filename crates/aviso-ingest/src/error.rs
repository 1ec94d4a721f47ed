//! Error types for aviso rule ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading a rules document.
#[derive(Debug, Error)]
pub enum LoadError {
    // === File System Errors ===
    /// Failed to read the rules file.
    #[error("failed to read rules file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === Document Errors ===
    /// The document is not valid YAML.
    #[error("failed to parse YAML in {origin}: {source}")]
    Parse {
        origin: String,
        #[source]
        source: serde_yaml::Error,
    },

    /// The document root is not a mapping.
    #[error("rules document {origin} must be a mapping with an 'industries' list")]
    NotAMapping { origin: String },

    /// The `industries` list is absent, null or empty.
    #[error("no industries found in {origin}")]
    MissingIndustries { origin: String },

    /// An industry or HTS entry has an unexpected shape.
    #[error("invalid {context} in {origin}: {reason}")]
    InvalidShape {
        origin: String,
        context: String,
        reason: String,
    },

    // === Validation Errors ===
    /// An industry lacks its `key` or `name`.
    #[error("industry #{position} in {origin} must define both 'key' and 'name'")]
    MissingIdentity { origin: String, position: usize },

    /// A text field holds a sequence or mapping.
    #[error("field '{field}' of {context} in {origin} must be a scalar value")]
    NonScalarField {
        origin: String,
        context: String,
        field: String,
    },
}

impl LoadError {
    /// Returns true when the error comes from the document's content rather
    /// than from reading it.
    pub fn is_configuration(&self) -> bool {
        !matches!(self, LoadError::FileRead { .. })
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, LoadError>;
