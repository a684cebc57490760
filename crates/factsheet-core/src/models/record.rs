//! Factsheet field labels and the extracted record.

use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::extract::rules::{normalize_currency, normalize_date, normalize_number};
use crate::models::config::DecimalConvention;

/// Fields the extractor looks for.
///
/// Only the NAV price, NAV date and currency reach the final record; the
/// other three anchor the fixed-order label block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldLabel {
    /// Fund start date (Opstart).
    StartDate,
    /// Currency (Valuta).
    Currency,
    /// Instrument type (Type).
    InstrumentType,
    /// Net asset value per unit (Indre værdi).
    NavPrice,
    /// Date of the NAV (Indre værdi dato).
    NavDate,
    /// Sustainability marker (Bæredygtighed).
    SustainabilityMarker,
}

impl FieldLabel {
    /// Order in which the labels appear in a factsheet's label block.
    pub const BLOCK_ORDER: [FieldLabel; 6] = [
        FieldLabel::StartDate,
        FieldLabel::Currency,
        FieldLabel::InstrumentType,
        FieldLabel::NavPrice,
        FieldLabel::NavDate,
        FieldLabel::SustainabilityMarker,
    ];

    /// Fields that must be resolved for the cascade to stop early.
    pub const TARGETS: [FieldLabel; 2] = [FieldLabel::NavPrice, FieldLabel::NavDate];

    /// Label text as printed on Danish factsheets.
    pub fn default_label(self) -> &'static str {
        match self {
            FieldLabel::StartDate => "Opstart",
            FieldLabel::Currency => "Valuta",
            FieldLabel::InstrumentType => "Type",
            FieldLabel::NavPrice => "Indre værdi",
            FieldLabel::NavDate => "Indre værdi dato",
            FieldLabel::SustainabilityMarker => "Bæredygtighed",
        }
    }
}

impl fmt::Display for FieldLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FieldLabel::StartDate => "start_date",
            FieldLabel::Currency => "currency",
            FieldLabel::InstrumentType => "instrument_type",
            FieldLabel::NavPrice => "nav_price",
            FieldLabel::NavDate => "nav_date",
            FieldLabel::SustainabilityMarker => "sustainability_marker",
        };
        f.write_str(name)
    }
}

/// Which cascade stage produced a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchSource {
    /// Fixed-order label block.
    Block,
    /// Label line plus forward window.
    Window,
    /// Anchor phrase anywhere in the text.
    Global,
}

impl fmt::Display for MatchSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchSource::Block => f.write_str("block"),
            MatchSource::Window => f.write_str("window"),
            MatchSource::Global => f.write_str("global"),
        }
    }
}

/// A field paired with the exact substring matched for it, before normalization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawMatch {
    pub field: FieldLabel,
    pub raw: String,
    pub source: MatchSource,
}

impl RawMatch {
    pub fn new(field: FieldLabel, raw: impl Into<String>, source: MatchSource) -> Self {
        Self {
            field,
            raw: raw.into(),
            source,
        }
    }
}

/// One extracted record per `(identifier, text)` pair.
///
/// Normalized values are derived from the raw strings inside the
/// constructor, so a normalized value never exists without its source
/// match. Fields are read through accessors; the record does not change
/// after construction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FinancialRecord {
    identifier: String,
    nav_raw: Option<String>,
    #[serde(with = "rust_decimal::serde::float_option")]
    nav: Option<Decimal>,
    nav_date_raw: Option<String>,
    nav_date: Option<NaiveDate>,
    currency: Option<String>,
    raw_fields: BTreeMap<FieldLabel, Option<String>>,
}

impl FinancialRecord {
    /// A record with every optional field null.
    pub fn empty(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            nav_raw: None,
            nav: None,
            nav_date_raw: None,
            nav_date: None,
            currency: None,
            raw_fields: FieldLabel::BLOCK_ORDER
                .iter()
                .map(|field| (*field, None))
                .collect(),
        }
    }

    /// Build a record from raw matches, normalizing the exposed fields.
    pub fn from_raw_fields(
        identifier: impl Into<String>,
        mut raw_fields: BTreeMap<FieldLabel, Option<String>>,
        convention: DecimalConvention,
    ) -> Self {
        for field in FieldLabel::BLOCK_ORDER {
            raw_fields.entry(field).or_insert(None);
        }

        let nav_raw = raw_fields.get(&FieldLabel::NavPrice).cloned().flatten();
        let nav_date_raw = raw_fields.get(&FieldLabel::NavDate).cloned().flatten();
        let currency = raw_fields
            .get(&FieldLabel::Currency)
            .and_then(|raw| raw.as_deref())
            .and_then(normalize_currency);

        Self {
            identifier: identifier.into(),
            nav: nav_raw
                .as_deref()
                .and_then(|raw| normalize_number(raw, convention)),
            nav_date: nav_date_raw.as_deref().and_then(normalize_date),
            nav_raw,
            nav_date_raw,
            currency,
            raw_fields,
        }
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// NAV price as matched in the text.
    pub fn nav_raw(&self) -> Option<&str> {
        self.nav_raw.as_deref()
    }

    pub fn nav(&self) -> Option<Decimal> {
        self.nav
    }

    /// NAV date as matched in the text.
    pub fn nav_date_raw(&self) -> Option<&str> {
        self.nav_date_raw.as_deref()
    }

    pub fn nav_date(&self) -> Option<NaiveDate> {
        self.nav_date
    }

    /// ISO 4217 currency code, if recognized.
    pub fn currency(&self) -> Option<&str> {
        self.currency.as_deref()
    }

    /// Raw strings for all six labels, null where nothing was matched.
    pub fn raw_fields(&self) -> &BTreeMap<FieldLabel, Option<String>> {
        &self.raw_fields
    }

    /// Raw string for a single label.
    pub fn raw(&self, field: FieldLabel) -> Option<&str> {
        self.raw_fields.get(&field).and_then(|raw| raw.as_deref())
    }

    /// True when no trace of any field was found.
    pub fn is_empty(&self) -> bool {
        self.raw_fields.values().all(Option::is_none)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    fn raw(pairs: &[(FieldLabel, &str)]) -> BTreeMap<FieldLabel, Option<String>> {
        pairs
            .iter()
            .map(|(field, value)| (*field, Some(value.to_string())))
            .collect()
    }

    #[test]
    fn test_empty_record_has_all_labels() {
        let record = FinancialRecord::empty("PFA000002738");
        assert_eq!(record.identifier(), "PFA000002738");
        assert_eq!(record.raw_fields().len(), 6);
        assert!(record.is_empty());
        assert!(record.nav().is_none());
    }

    #[test]
    fn test_from_raw_fields_normalizes() {
        let record = FinancialRecord::from_raw_fields(
            "X",
            raw(&[
                (FieldLabel::NavPrice, "1.234,56"),
                (FieldLabel::NavDate, "17.02.2026"),
                (FieldLabel::Currency, "dkk"),
            ]),
            DecimalConvention::European,
        );

        assert_eq!(record.nav(), Some(dec!(1234.56)));
        assert_eq!(record.nav_date(), NaiveDate::from_ymd_opt(2026, 2, 17));
        assert_eq!(record.currency(), Some("DKK"));
        assert_eq!(record.raw_fields().len(), 6);
        assert_eq!(record.raw(FieldLabel::StartDate), None);
    }

    #[test]
    fn test_unparseable_raw_is_kept() {
        let record = FinancialRecord::from_raw_fields(
            "X",
            raw(&[(FieldLabel::NavDate, "31-02-2026"), (FieldLabel::Currency, "Aktier")]),
            DecimalConvention::European,
        );

        assert_eq!(record.nav_date(), None);
        assert_eq!(record.nav_date_raw(), Some("31-02-2026"));
        assert_eq!(record.currency(), None);
        assert_eq!(record.raw(FieldLabel::Currency), Some("Aktier"));
        assert!(!record.is_empty());
    }

    #[test]
    fn test_serializes_flat_mapping() {
        let record = FinancialRecord::from_raw_fields(
            "PFA1",
            raw(&[(FieldLabel::NavPrice, "202,69"), (FieldLabel::NavDate, "17-02-2026")]),
            DecimalConvention::European,
        );

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["identifier"], "PFA1");
        assert_eq!(json["nav_raw"], "202,69");
        assert_eq!(json["nav"].as_f64(), Some(202.69));
        assert_eq!(json["nav_date"], "2026-02-17");
        assert!(json["currency"].is_null());
        assert_eq!(json["raw_fields"]["nav_price"], "202,69");
        assert!(json["raw_fields"]["start_date"].is_null());
    }
}
