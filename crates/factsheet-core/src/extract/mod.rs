//! Factsheet field extraction: three matching strategies run as a cascade.

mod block;
mod cascade;
mod global;
pub mod rules;
mod window;

pub use block::LabelBlock;
pub use cascade::{CascadeExtractor, ExtractionResult};
pub use global::GlobalFallback;
pub use window::WindowScanner;

use std::collections::BTreeMap;

use crate::models::record::{FieldLabel, RawMatch};

/// Trait for factsheet parsers.
pub trait FactsheetParser {
    /// Parse one document. `None` and empty text both mean "no data".
    fn parse(&self, identifier: &str, text: Option<&str>) -> ExtractionResult;
}

/// Raw matches gathered so far, at most one per field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PartialResult {
    matches: BTreeMap<FieldLabel, RawMatch>,
}

impl PartialResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a match unless the field is already resolved.
    pub fn insert(&mut self, raw_match: RawMatch) {
        self.matches.entry(raw_match.field).or_insert(raw_match);
    }

    /// Merge a later strategy's result; fields already resolved keep their match.
    pub fn merge(&mut self, later: PartialResult) {
        for (_, raw_match) in later.matches {
            self.insert(raw_match);
        }
    }

    pub fn get(&self, field: FieldLabel) -> Option<&RawMatch> {
        self.matches.get(&field)
    }

    pub fn contains(&self, field: FieldLabel) -> bool {
        self.matches.contains_key(&field)
    }

    /// True when every field in `fields` has a match.
    pub fn resolves(&self, fields: &[FieldLabel]) -> bool {
        fields.iter().all(|field| self.contains(*field))
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    pub fn matches(&self) -> impl Iterator<Item = &RawMatch> {
        self.matches.values()
    }

    /// Raw strings keyed by field, without provenance.
    pub fn raw_fields(&self) -> BTreeMap<FieldLabel, Option<String>> {
        self.matches
            .iter()
            .map(|(field, raw_match)| (*field, Some(raw_match.raw.clone())))
            .collect()
    }
}
