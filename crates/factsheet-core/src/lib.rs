//! Core library for fund factsheet extraction.
//!
//! This crate provides:
//! - Text canonicalization for converter output (Unicode, spaces, dashes, page breaks)
//! - Locale-aware number and date normalizers
//! - A three-stage extraction cascade (label block, windowed labels, global anchors)
//!   that recovers the NAV price, NAV date and currency from a factsheet's text
//! - Document sources reading converter output from disk

pub mod error;
pub mod extract;
pub mod models;
pub mod source;
pub mod text;

pub use error::{FactsheetError, Result};
pub use extract::{CascadeExtractor, ExtractionResult, FactsheetParser, PartialResult};
pub use models::config::{DecimalConvention, ExtractionConfig, FactsheetConfig};
pub use models::record::{FieldLabel, FinancialRecord, MatchSource, RawMatch};
pub use source::{Document, DocumentSource, TextDirSource, TextFileSource};
pub use text::normalize_text;

use lazy_static::lazy_static;

lazy_static! {
    static ref DEFAULT_EXTRACTOR: CascadeExtractor = CascadeExtractor::default();
}

/// Extract one record with the default configuration.
///
/// `None` and empty text both yield a record whose fields are all null.
pub fn extract(identifier: &str, text: Option<&str>) -> FinancialRecord {
    DEFAULT_EXTRACTOR.extract(identifier, text)
}
