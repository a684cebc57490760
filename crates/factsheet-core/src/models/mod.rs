//! Data models and configuration.

pub mod config;
pub mod record;

pub use config::{DecimalConvention, ExtractionConfig, FactsheetConfig};
pub use record::{FieldLabel, FinancialRecord, MatchSource, RawMatch};
