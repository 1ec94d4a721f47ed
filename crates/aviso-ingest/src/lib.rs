//! Aviso rule ingestion.
//!
//! Loads the YAML rules document and flattens industries and their HTS
//! entries into the denormalized records every output is built from.

pub mod error;
pub mod rules;

pub use error::{LoadError, Result};
pub use rules::{default_rules_path, load_rules, parse_rules};
