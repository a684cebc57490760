//! Label block matching.
//!
//! Converters flatten a two-column layout (labels on the left, values on the
//! right) into one stream: six label lines followed by six value lines.
//! Pairing by position is the only association left once the columns are gone.

use tracing::debug;

use super::PartialResult;
use super::rules::patterns::WHITESPACE_RUN;
use crate::models::record::{FieldLabel, MatchSource, RawMatch};

/// A fixed, ordered sequence of labels matched against compacted lines.
#[derive(Debug, Clone)]
pub struct LabelBlock {
    keys: Vec<String>,
}

impl LabelBlock {
    /// Labels must be given in `FieldLabel::BLOCK_ORDER` order.
    pub fn new(labels: &[String]) -> Self {
        Self {
            keys: labels.iter().map(|label| label_key(label)).collect(),
        }
    }

    /// Index of the first compacted line where the whole block starts.
    pub fn find(&self, lines: &[String]) -> Option<usize> {
        let width = self.keys.len();
        if width == 0 || lines.len() < width {
            return None;
        }

        (0..=lines.len() - width).find(|&start| {
            self.keys
                .iter()
                .zip(&lines[start..start + width])
                .all(|(key, line)| label_key(line) == *key)
        })
    }

    /// Match the block in normalized text and pair each label with the value
    /// line at the same offset after the block.
    pub fn match_text(&self, text: &str) -> Option<PartialResult> {
        let lines = compact_lines(text);
        let start = self.find(&lines)?;
        let width = self.keys.len();
        let values_start = start + width;

        if values_start + width > lines.len() {
            debug!(
                "label block at line {} has only {} trailing lines",
                start,
                lines.len() - values_start
            );
            return None;
        }

        let mut result = PartialResult::new();
        for (field, value) in FieldLabel::BLOCK_ORDER
            .iter()
            .zip(&lines[values_start..values_start + width])
        {
            result.insert(RawMatch::new(*field, value.clone(), MatchSource::Block));
        }

        debug!("label block matched at compacted line {}", start);
        Some(result)
    }
}

/// Trim, collapse inner whitespace and drop empty lines.
pub(crate) fn compact_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(|line| WHITESPACE_RUN.replace_all(line.trim(), " ").into_owned())
        .filter(|line| !line.is_empty())
        .collect()
}

/// Comparison key for a label line: trailing colon dropped, case folded.
fn label_key(line: &str) -> String {
    let compact = WHITESPACE_RUN.replace_all(line.trim(), " ");
    compact
        .strip_suffix(':')
        .unwrap_or(&*compact)
        .trim_end()
        .to_lowercase()
}
