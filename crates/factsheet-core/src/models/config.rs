//! Configuration structures for the extraction cascade.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{FactsheetError, Result};
use crate::models::record::FieldLabel;

/// Main configuration for the factsheet pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FactsheetConfig {
    /// Extraction configuration.
    pub extraction: ExtractionConfig,
}

/// How to read a number that contains both `.` and `,`.
///
/// Factsheets are produced in a Danish locale, so the European reading is
/// the default. Nothing in the text signals the locale reliably, hence the
/// assumption is named here rather than inferred.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecimalConvention {
    /// `1.234,56`: `.` groups thousands, `,` is the decimal mark.
    #[default]
    European,
    /// `1,234.56`: `,` groups thousands, `.` is the decimal mark.
    Anglo,
}

/// Extraction cascade configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Separator convention for ambiguous numbers.
    pub decimal_convention: DecimalConvention,

    /// The six labels of the fixed-order block, in order.
    pub label_block: Vec<String>,

    /// Lines searched after a label line when the label line itself holds no value.
    pub lookahead_lines: usize,

    /// Characters searched after a fallback anchor.
    pub fallback_window_chars: usize,

    /// Fallback anchors for the NAV price.
    pub price_anchors: Vec<String>,

    /// Fallback anchors for the NAV date.
    pub date_anchors: Vec<String>,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            decimal_convention: DecimalConvention::European,
            label_block: FieldLabel::BLOCK_ORDER
                .iter()
                .map(|label| label.default_label().to_string())
                .collect(),
            lookahead_lines: 3,
            fallback_window_chars: 80,
            price_anchors: vec![
                "indre værdi".to_string(),
                "indre vaerdi".to_string(),
                "net asset value".to_string(),
            ],
            date_anchors: vec![
                "indre værdi dato".to_string(),
                "indre vaerdi dato".to_string(),
                "nav date".to_string(),
            ],
        }
    }
}

impl ExtractionConfig {
    /// Check the invariants the cascade relies on.
    pub fn validate(&self) -> Result<()> {
        if self.label_block.len() != FieldLabel::BLOCK_ORDER.len() {
            return Err(FactsheetError::Config(format!(
                "label_block must contain {} labels, found {}",
                FieldLabel::BLOCK_ORDER.len(),
                self.label_block.len()
            )));
        }
        if self.label_block.iter().any(|label| label.trim().is_empty()) {
            return Err(FactsheetError::Config(
                "label_block entries must not be empty".to_string(),
            ));
        }
        if self.lookahead_lines == 0 {
            return Err(FactsheetError::Config(
                "lookahead_lines must be at least 1".to_string(),
            ));
        }
        if self.fallback_window_chars == 0 {
            return Err(FactsheetError::Config(
                "fallback_window_chars must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

impl FactsheetConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.extraction.validate()?;
        Ok(config)
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
