//! Extraction cascade: label block, then windowed labels, then global anchors.

use serde::Serialize;
use tracing::{debug, info};

use super::block::LabelBlock;
use super::global::GlobalFallback;
use super::window::WindowScanner;
use super::{FactsheetParser, PartialResult};
use crate::error::Result;
use crate::models::config::{DecimalConvention, ExtractionConfig};
use crate::models::record::{FieldLabel, FinancialRecord, MatchSource, RawMatch};
use crate::text::normalize_text;

/// Fields the windowed scanner is asked for, in order.
const WINDOW_FIELDS: [FieldLabel; 3] = [
    FieldLabel::NavPrice,
    FieldLabel::NavDate,
    FieldLabel::Currency,
];

/// Result of extracting one document.
#[derive(Debug, Clone, Serialize)]
pub struct ExtractionResult {
    /// The extracted record.
    pub record: FinancialRecord,
    /// Every raw match with the stage that produced it.
    pub matches: Vec<RawMatch>,
    /// Fields that were missing or failed normalization.
    pub warnings: Vec<String>,
}

/// Cascade stages. Each runs at most once, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CascadeState {
    TryBlock,
    TryWindow,
    TryGlobal,
    Done,
}

/// Factsheet extractor running the three strategies as a cascade.
///
/// Holds only configuration compiled at construction; extraction borrows it
/// immutably, so one extractor can serve any number of threads.
#[derive(Debug, Clone)]
pub struct CascadeExtractor {
    convention: DecimalConvention,
    block: LabelBlock,
    window: WindowScanner,
    global: GlobalFallback,
}

impl CascadeExtractor {
    /// Build an extractor from a validated configuration.
    pub fn new(config: &ExtractionConfig) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            convention: config.decimal_convention,
            block: LabelBlock::new(&config.label_block),
            window: WindowScanner::new(config.lookahead_lines),
            global: GlobalFallback::new(config)?,
        })
    }

    /// Extract the record for one document.
    pub fn extract(&self, identifier: &str, text: Option<&str>) -> FinancialRecord {
        self.parse(identifier, text).record
    }

    /// Run the cascade over normalized text.
    fn run(&self, text: &str) -> PartialResult {
        let mut found = PartialResult::new();
        let mut state = CascadeState::TryBlock;

        loop {
            state = match state {
                CascadeState::TryBlock => {
                    if let Some(block) = self.block.match_text(text) {
                        found.merge(block);
                    }
                    next_state(&found, CascadeState::TryWindow)
                }
                CascadeState::TryWindow => {
                    found.merge(self.run_window(text, &found));
                    next_state(&found, CascadeState::TryGlobal)
                }
                CascadeState::TryGlobal => {
                    found.merge(self.run_global(text, &found));
                    CascadeState::Done
                }
                CascadeState::Done => return found,
            };
        }
    }

    fn run_window(&self, text: &str, found: &PartialResult) -> PartialResult {
        let lines: Vec<&str> = text.lines().collect();
        let mut result = PartialResult::new();

        for field in WINDOW_FIELDS {
            if found.contains(field) {
                continue;
            }
            if let Some(raw) = self.window.scan(&lines, field) {
                result.insert(RawMatch::new(field, raw, MatchSource::Window));
            }
        }

        result
    }

    fn run_global(&self, text: &str, found: &PartialResult) -> PartialResult {
        let mut result = PartialResult::new();

        for field in FieldLabel::TARGETS {
            if found.contains(field) {
                continue;
            }
            if let Some(raw) = self.global.scan(text, field) {
                result.insert(RawMatch::new(field, raw, MatchSource::Global));
            }
        }

        result
    }
}

impl Default for CascadeExtractor {
    fn default() -> Self {
        Self::new(&ExtractionConfig::default()).expect("default extraction config is valid")
    }
}

impl FactsheetParser for CascadeExtractor {
    fn parse(&self, identifier: &str, text: Option<&str>) -> ExtractionResult {
        let Some(text) = text.filter(|t| !t.trim().is_empty()) else {
            debug!("{}: empty document text", identifier);
            return ExtractionResult {
                record: FinancialRecord::empty(identifier),
                matches: Vec::new(),
                warnings: vec!["empty document text".to_string()],
            };
        };

        let normalized = normalize_text(text);
        let found = self.run(&normalized);

        for raw_match in found.matches() {
            debug!(
                "{}: {} = {:?} via {}",
                identifier, raw_match.field, raw_match.raw, raw_match.source
            );
        }

        let record =
            FinancialRecord::from_raw_fields(identifier, found.raw_fields(), self.convention);
        let warnings = collect_warnings(&record);

        info!(
            "{}: nav={:?} nav_date={:?} currency={:?}",
            identifier,
            record.nav(),
            record.nav_date(),
            record.currency()
        );

        ExtractionResult {
            record,
            matches: found.matches().cloned().collect(),
            warnings,
        }
    }
}

fn next_state(found: &PartialResult, otherwise: CascadeState) -> CascadeState {
    if found.resolves(&FieldLabel::TARGETS) {
        CascadeState::Done
    } else {
        otherwise
    }
}

fn collect_warnings(record: &FinancialRecord) -> Vec<String> {
    let mut warnings = Vec::new();

    match (record.nav_raw(), record.nav()) {
        (None, _) => warnings.push("no trace of nav_price".to_string()),
        (Some(raw), None) => warnings.push(format!("nav_price '{}' is not a number", raw)),
        _ => {}
    }

    match (record.nav_date_raw(), record.nav_date()) {
        (None, _) => warnings.push("no trace of nav_date".to_string()),
        (Some(raw), None) => warnings.push(format!("nav_date '{}' is not a valid date", raw)),
        _ => {}
    }

    match (record.raw(FieldLabel::Currency), record.currency()) {
        (None, _) => warnings.push("no trace of currency".to_string()),
        (Some(raw), None) => warnings.push(format!("currency '{}' is not recognized", raw)),
        _ => {}
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    const BLOCK_TEXT: &str = "Opstart\nValuta\nType\nIndre værdi\nIndre værdi dato\nBæredygtighed\n2015-01-01\nDKK\nAktier\n202,69\n17-02-2026\nJa";

    fn extractor() -> CascadeExtractor {
        CascadeExtractor::default()
    }

    #[test]
    fn test_block_resolves_everything() {
        let result = extractor().parse("PFA000002738", Some(BLOCK_TEXT));

        assert_eq!(result.record.nav(), Some(dec!(202.69)));
        assert_eq!(result.record.nav_date(), NaiveDate::from_ymd_opt(2026, 2, 17));
        assert_eq!(result.record.currency(), Some("DKK"));
        assert_eq!(result.record.raw(FieldLabel::InstrumentType), Some("Aktier"));
        assert!(result.matches.iter().all(|m| m.source == MatchSource::Block));
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_block_wins_over_later_labels() {
        let text = format!("Indre værdi: 999,99\nIndre værdi dato: 01-01-2020\n{}", BLOCK_TEXT);
        let record = extractor().extract("X", Some(&text));

        assert_eq!(record.nav(), Some(dec!(202.69)));
        assert_eq!(record.nav_date(), NaiveDate::from_ymd_opt(2026, 2, 17));
    }

    #[test]
    fn test_window_fills_missing_fields() {
        let text = "Fakta\nValuta: EUR\nIndre værdi: 115,00\nIndre værdi dato: 16.02.2026";
        let result = extractor().parse("X", Some(text));

        assert_eq!(result.record.nav(), Some(dec!(115.00)));
        assert_eq!(result.record.nav_date(), NaiveDate::from_ymd_opt(2026, 2, 16));
        assert_eq!(result.record.currency(), Some("EUR"));
        assert!(result.matches.iter().all(|m| m.source == MatchSource::Window));
    }

    #[test]
    fn test_global_fills_after_window() {
        // the date label is split over two lines, which only the global anchor tolerates
        let text = "Indre værdi: 115,00\nSe indre værdi\ndato: 13/02/2026";
        let result = extractor().parse("X", Some(text));

        let date_match = result
            .matches
            .iter()
            .find(|m| m.field == FieldLabel::NavDate)
            .unwrap();
        assert_eq!(date_match.source, MatchSource::Global);
        assert_eq!(result.record.nav_date(), NaiveDate::from_ymd_opt(2026, 2, 13));
        assert_eq!(result.record.nav(), Some(dec!(115)));
    }

    #[test]
    fn test_empty_and_missing_text_agree() {
        let extractor = extractor();
        let empty = extractor.extract("X", Some(""));
        let missing = extractor.extract("X", None);
        let blank = extractor.extract("X", Some(" \n\t "));

        assert_eq!(empty, missing);
        assert_eq!(blank, missing);
        assert!(missing.is_empty());
        assert_eq!(missing.identifier(), "X");
    }

    #[test]
    fn test_unparseable_value_warns() {
        let text = "Indre værdi: 115,00\nIndre værdi dato: 31-02-2026";
        let result = extractor().parse("X", Some(text));

        assert_eq!(result.record.nav_date(), None);
        assert_eq!(result.record.nav_date_raw(), Some("31-02-2026"));
        assert!(result.warnings.iter().any(|w| w.contains("31-02-2026")));
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = ExtractionConfig {
            label_block: vec![],
            ..Default::default()
        };
        assert!(CascadeExtractor::new(&config).is_err());
    }

    #[test]
    fn test_anglo_convention() {
        let config = ExtractionConfig {
            decimal_convention: DecimalConvention::Anglo,
            ..Default::default()
        };
        let extractor = CascadeExtractor::new(&config).unwrap();
        let record = extractor.extract("X", Some("Net asset value: 1,234.56 USD"));
        assert_eq!(record.nav(), Some(dec!(1234.56)));
    }
}
