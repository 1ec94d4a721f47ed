//! Rules document loading.
//!
//! The rules document is a YAML mapping with an `industries` list. Each
//! industry carries its metadata and a nested `hts_entries` list; loading
//! flattens that tree into [`HtsEntry`] records in document order.
//!
//! ```yaml
//! industries:
//!   - key: auto
//!     name: Automotive
//!     sector: Manufacturing
//!     notice_type: Type A
//!     hts_entries:
//!       - code: "8703.23"
//!         description: Passenger vehicles
//!         requires_notice: true
//!         rule_reference: Art. 5
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use serde_yaml::Value;
use tracing::{debug, info, info_span};

use aviso_model::{HtsDetail, HtsEntry, Industry};

use crate::error::{LoadError, Result};

const DEFAULT_RULES_PATH: &str = "config/dof_aviso_rules.yaml";
const RULES_ENV_VAR: &str = "AVISO_RULES_PATH";

/// Default location of the rules document.
///
/// `AVISO_RULES_PATH` overrides the built-in relative path.
pub fn default_rules_path() -> PathBuf {
    if let Ok(path) = std::env::var(RULES_ENV_VAR) {
        if !path.trim().is_empty() {
            return PathBuf::from(path);
        }
    }
    PathBuf::from(DEFAULT_RULES_PATH)
}

/// Load a rules document from disk and flatten it into entries.
pub fn load_rules(path: &Path) -> Result<Vec<HtsEntry>> {
    let span = info_span!("load_rules", path = %path.display());
    let _guard = span.enter();
    let start = Instant::now();

    let contents = fs::read_to_string(path).map_err(|source| LoadError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    let entries = parse_rules(&contents, &path.display().to_string())?;

    info!(
        entry_count = entries.len(),
        duration_ms = start.elapsed().as_millis(),
        "rules loaded"
    );
    Ok(entries)
}

/// Parse an in-memory rules document.
///
/// `origin` names the document in error messages.
pub fn parse_rules(contents: &str, origin: &str) -> Result<Vec<HtsEntry>> {
    let parse_error = |source| LoadError::Parse {
        origin: origin.to_string(),
        source,
    };
    let mut document: Value = serde_yaml::from_str(contents).map_err(parse_error)?;
    document.apply_merge().map_err(parse_error)?;
    let industries = match &document {
        Value::Mapping(_) => document.get("industries"),
        Value::Null => None,
        _ => {
            return Err(LoadError::NotAMapping {
                origin: origin.to_string(),
            });
        }
    };
    let industries = match industries {
        Some(value) if !is_truthy(value) => &[][..],
        None => &[][..],
        Some(Value::Sequence(items)) => items.as_slice(),
        Some(_) => {
            return Err(LoadError::InvalidShape {
                origin: origin.to_string(),
                context: "'industries'".to_string(),
                reason: "expected a list of industries".to_string(),
            });
        }
    };
    if industries.is_empty() {
        return Err(LoadError::MissingIndustries {
            origin: origin.to_string(),
        });
    }

    let mut entries = Vec::new();
    for (idx, raw) in industries.iter().enumerate() {
        let position = idx + 1;
        let industry = parse_industry(raw, position, origin)?;
        let before = entries.len();
        for (entry_idx, raw_entry) in hts_entries(raw, &industry, origin)?.iter().enumerate() {
            let context = format!("HTS entry #{} of industry '{}'", entry_idx + 1, industry.key);
            let detail = parse_detail(raw_entry, &context, origin)?;
            entries.push(HtsEntry::new(&industry, detail));
        }
        debug!(
            industry_key = %industry.key,
            entry_count = entries.len() - before,
            "industry flattened"
        );
    }
    Ok(entries)
}

fn parse_industry(raw: &Value, position: usize, origin: &str) -> Result<Industry> {
    let context = format!("industry #{position}");
    if !raw.is_mapping() {
        return Err(LoadError::InvalidShape {
            origin: origin.to_string(),
            context,
            reason: "expected a mapping".to_string(),
        });
    }
    let key = raw.get("key").filter(|value| is_truthy(value));
    let name = raw.get("name").filter(|value| is_truthy(value));
    let (Some(key), Some(name)) = (key, name) else {
        return Err(LoadError::MissingIdentity {
            origin: origin.to_string(),
            position,
        });
    };

    Ok(Industry {
        key: scalar_text(Some(key), "key", &context, origin)?,
        name: scalar_text(Some(name), "name", &context, origin)?,
        sector: scalar_text(raw.get("sector"), "sector", &context, origin)?,
        notice_type: scalar_text(raw.get("notice_type"), "notice_type", &context, origin)?,
        notes: scalar_text(raw.get("notes"), "notes", &context, origin)?,
    })
}

fn hts_entries<'a>(raw: &'a Value, industry: &Industry, origin: &str) -> Result<&'a [Value]> {
    match raw.get("hts_entries") {
        None | Some(Value::Null) => Ok(&[]),
        Some(Value::Sequence(items)) => Ok(items.as_slice()),
        Some(_) => Err(LoadError::InvalidShape {
            origin: origin.to_string(),
            context: format!("industry '{}'", industry.key),
            reason: "'hts_entries' must be a list".to_string(),
        }),
    }
}

fn parse_detail(raw: &Value, context: &str, origin: &str) -> Result<HtsDetail> {
    if !raw.is_mapping() {
        return Err(LoadError::InvalidShape {
            origin: origin.to_string(),
            context: context.to_string(),
            reason: "expected a mapping".to_string(),
        });
    }
    Ok(HtsDetail {
        code: scalar_text(raw.get("code"), "code", context, origin)?,
        description: scalar_text(raw.get("description"), "description", context, origin)?,
        requires_notice: raw.get("requires_notice").is_some_and(is_truthy),
        rule_reference: scalar_text(raw.get("rule_reference"), "rule_reference", context, origin)?,
        comments: scalar_text(raw.get("comments"), "comments", context, origin)?,
    })
}

/// Render a scalar as text; absent and null values become empty strings.
fn scalar_text(value: Option<&Value>, field: &str, context: &str, origin: &str) -> Result<String> {
    match value {
        None | Some(Value::Null) => Ok(String::new()),
        Some(Value::String(text)) => Ok(text.clone()),
        Some(Value::Bool(flag)) => Ok(flag.to_string()),
        Some(Value::Number(number)) => Ok(number.to_string()),
        Some(Value::Tagged(tagged)) => scalar_text(Some(&tagged.value), field, context, origin),
        Some(Value::Sequence(_) | Value::Mapping(_)) => Err(LoadError::NonScalarField {
            origin: origin.to_string(),
            context: context.to_string(),
            field: field.to_string(),
        }),
    }
}

/// Truthiness used for required fields and flags: null, `false`, zero and
/// empty strings or collections are false.
///
/// The YAML 1.1 spellings (`yes`, `no`, `on`, `off` and their capitalized
/// forms) are booleans here even though the parser reads them as strings.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => legacy_bool(text).unwrap_or(!text.is_empty()),
        Value::Sequence(items) => !items.is_empty(),
        Value::Mapping(map) => !map.is_empty(),
        Value::Tagged(tagged) => is_truthy(&tagged.value),
    }
}

/// Boolean spellings of the YAML 1.1 type repository.
fn legacy_bool(text: &str) -> Option<bool> {
    match text {
        "yes" | "Yes" | "YES" | "on" | "On" | "ON" | "true" | "True" | "TRUE" => {
            Some(true)
        }
        "no" | "No" | "NO" | "off" | "Off" | "OFF" | "false" | "False" | "FALSE" => {
            Some(false)
        }
        _ => None,
    }
}
