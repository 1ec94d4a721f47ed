//! Industry and HTS entry records.
//!
//! An [`HtsEntry`] is the flat unit every output format is built from. All
//! industry attributes an output needs are copied onto the entry when it is
//! created, so entries never point back at their [`Industry`].

use serde::{Deserialize, Serialize};

/// Label rendered for entries that require an automatic notice.
pub const NOTICE_REQUIRED_LABEL: &str = "Sí";

/// Label rendered for entries that do not require an automatic notice.
pub const NOTICE_NOT_REQUIRED_LABEL: &str = "No";

/// Column names of the tabular outputs, in projection order.
pub const MASTER_SHEET_HEADER: [&str; 10] = [
    "industria",
    "sector",
    "tipo_aviso",
    "fraccion_arancelaria",
    "descripcion_hts",
    "requiere_aviso_automatico",
    "fundamento",
    "comentarios",
    "notas_industria",
    "industry_key",
];

/// Industry metadata shared by every HTS entry it owns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Industry {
    pub key: String,
    pub name: String,
    pub sector: String,
    pub notice_type: String,
    pub notes: String,
}

impl Industry {
    pub fn new(key: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_sector(mut self, sector: impl Into<String>) -> Self {
        self.sector = sector.into();
        self
    }

    #[must_use]
    pub fn with_notice_type(mut self, notice_type: impl Into<String>) -> Self {
        self.notice_type = notice_type.into();
        self
    }

    #[must_use]
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }
}

/// Tariff-code specific fields of an entry, before denormalization.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HtsDetail {
    pub code: String,
    pub description: String,
    pub requires_notice: bool,
    pub rule_reference: String,
    pub comments: String,
}

/// One denormalized master-sheet record.
///
/// Field order matches the structured-record output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HtsEntry {
    pub industry_key: String,
    pub industry_name: String,
    pub industry_sector: String,
    pub notice_type: String,
    pub hts_code: String,
    pub hts_description: String,
    pub requires_notice: bool,
    pub rule_reference: String,
    pub comments: String,
    pub notes: String,
}

impl HtsEntry {
    /// Build an entry by copying the owning industry's attributes.
    pub fn new(industry: &Industry, detail: HtsDetail) -> Self {
        Self {
            industry_key: industry.key.clone(),
            industry_name: industry.name.clone(),
            industry_sector: industry.sector.clone(),
            notice_type: industry.notice_type.clone(),
            hts_code: detail.code,
            hts_description: detail.description,
            requires_notice: detail.requires_notice,
            rule_reference: detail.rule_reference,
            comments: detail.comments,
            notes: industry.notes.clone(),
        }
    }

    pub fn requires_notice_label(&self) -> &'static str {
        notice_label(self.requires_notice)
    }

    /// Project the entry onto the master-sheet columns.
    pub fn to_row(&self) -> [&str; 10] {
        [
            self.industry_name.as_str(),
            self.industry_sector.as_str(),
            self.notice_type.as_str(),
            self.hts_code.as_str(),
            self.hts_description.as_str(),
            self.requires_notice_label(),
            self.rule_reference.as_str(),
            self.comments.as_str(),
            self.notes.as_str(),
            self.industry_key.as_str(),
        ]
    }
}

pub fn notice_label(requires_notice: bool) -> &'static str {
    if requires_notice {
        NOTICE_REQUIRED_LABEL
    } else {
        NOTICE_NOT_REQUIRED_LABEL
    }
}
