pub mod entry;
pub mod lookup;
pub mod processing;

pub use entry::{
    HtsDetail, HtsEntry, Industry, MASTER_SHEET_HEADER, NOTICE_NOT_REQUIRED_LABEL,
    NOTICE_REQUIRED_LABEL, notice_label,
};
pub use lookup::{
    Catalog, CatalogEntry, IndustryBucket, LookupOutcome, collation_key, format_code,
    normalize_code,
};
pub use processing::{MASTER_SHEET_STEM, OutputFormat, WrittenOutput};
