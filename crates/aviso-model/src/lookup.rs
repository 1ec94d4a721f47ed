//! Industry catalog and tariff-code lookup.

use std::collections::HashMap;

use serde::Serialize;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

use crate::entry::{HtsEntry, Industry};

/// Strip whitespace and dots from a tariff code and upper-case it.
pub fn normalize_code(value: &str) -> String {
    value
        .chars()
        .filter(|ch| !ch.is_whitespace() && *ch != '.')
        .flat_map(char::to_uppercase)
        .collect()
}

/// Render an eight-digit fraction as `dddd.dd.dd`.
///
/// Codes that do not normalize to exactly eight characters are returned
/// trimmed but otherwise untouched.
pub fn format_code(value: &str) -> String {
    let digits = normalize_code(value);
    if digits.chars().count() != 8 {
        return value.trim().to_string();
    }
    let chars: Vec<char> = digits.chars().collect();
    let chapter: String = chars[..4].iter().collect();
    let heading: String = chars[4..6].iter().collect();
    let item: String = chars[6..].iter().collect();
    format!("{chapter}.{heading}.{item}")
}

/// Sort key approximating Spanish collation of display names.
///
/// Case and accents are folded away; `ñ` sorts between `n` and `o`.
pub fn collation_key(name: &str) -> String {
    let composed: String = name.nfc().collect();
    composed
        .to_lowercase()
        .replace('ñ', "n~")
        .nfd()
        .filter(|ch| !is_combining_mark(*ch))
        .collect()
}

/// An entry as exported in a per-industry catalog, with its code variants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry<'a> {
    #[serde(flatten)]
    pub entry: &'a HtsEntry,
    pub normalized_code: String,
    pub formatted_code: String,
}

impl<'a> CatalogEntry<'a> {
    pub fn new(entry: &'a HtsEntry) -> Self {
        Self {
            entry,
            normalized_code: normalize_code(&entry.hts_code),
            formatted_code: format_code(&entry.hts_code),
        }
    }
}

/// Entries of one industry with a normalized-code index.
#[derive(Debug, Clone)]
pub struct IndustryBucket {
    pub industry: Industry,
    pub entries: Vec<HtsEntry>,
    by_code: HashMap<String, usize>,
}

impl IndustryBucket {
    fn new(industry: Industry) -> Self {
        Self {
            industry,
            entries: Vec::new(),
            by_code: HashMap::new(),
        }
    }

    fn push(&mut self, entry: HtsEntry) {
        // Later entries with the same normalized code replace earlier ones.
        self.by_code
            .insert(normalize_code(&entry.hts_code), self.entries.len());
        self.entries.push(entry);
    }

    /// Find the entry whose code matches `code` after normalization.
    pub fn find(&self, code: &str) -> Option<&HtsEntry> {
        self.by_code
            .get(&normalize_code(code))
            .and_then(|idx| self.entries.get(*idx))
    }

    /// Entries sorted by tariff code.
    pub fn sorted_entries(&self) -> Vec<&HtsEntry> {
        let mut entries: Vec<&HtsEntry> = self.entries.iter().collect();
        entries.sort_by(|a, b| a.hts_code.cmp(&b.hts_code));
        entries
    }

    /// Entries in document order, enriched for export.
    pub fn catalog_entries(&self) -> Vec<CatalogEntry<'_>> {
        self.entries.iter().map(CatalogEntry::new).collect()
    }

    pub fn notice_count(&self) -> usize {
        self.entries.iter().filter(|entry| entry.requires_notice).count()
    }
}

/// Entries grouped by industry key, in first-seen order.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    buckets: Vec<IndustryBucket>,
    index: HashMap<String, usize>,
}

impl Catalog {
    pub fn from_entries<'a, I>(entries: I) -> Self
    where
        I: IntoIterator<Item = &'a HtsEntry>,
    {
        let mut catalog = Self::default();
        for entry in entries {
            let idx = match catalog.index.get(&entry.industry_key) {
                Some(idx) => *idx,
                None => {
                    let industry = Industry {
                        key: entry.industry_key.clone(),
                        name: entry.industry_name.clone(),
                        sector: entry.industry_sector.clone(),
                        notice_type: entry.notice_type.clone(),
                        notes: entry.notes.clone(),
                    };
                    catalog.buckets.push(IndustryBucket::new(industry));
                    let idx = catalog.buckets.len() - 1;
                    catalog.index.insert(entry.industry_key.clone(), idx);
                    idx
                }
            };
            catalog.buckets[idx].push(entry.clone());
        }
        catalog
    }

    pub fn industry(&self, key: &str) -> Option<&IndustryBucket> {
        self.index.get(key).map(|idx| &self.buckets[*idx])
    }

    pub fn industries(&self) -> impl Iterator<Item = &IndustryBucket> {
        self.buckets.iter()
    }

    /// Industries sorted by display name, ignoring case and accents.
    pub fn industries_by_name(&self) -> Vec<&IndustryBucket> {
        let mut buckets: Vec<&IndustryBucket> = self.buckets.iter().collect();
        buckets.sort_by_cached_key(|bucket| {
            (
                collation_key(&bucket.industry.name),
                bucket.industry.name.clone(),
            )
        });
        buckets
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Look up a fraction within one industry.
    pub fn lookup(&self, industry_key: &str, code: &str) -> LookupOutcome<'_> {
        let Some(bucket) = self.industry(industry_key) else {
            return LookupOutcome::UnknownIndustry;
        };
        match bucket.find(code) {
            Some(entry) => LookupOutcome::Found(entry),
            None => LookupOutcome::UnknownCode,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupOutcome<'a> {
    Found(&'a HtsEntry),
    UnknownIndustry,
    UnknownCode,
}
