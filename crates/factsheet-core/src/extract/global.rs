//! Anchor-phrase fallback over the unsplit text.

use regex::Regex;
use tracing::trace;

use super::rules::ValueKind;
use super::rules::patterns::DATE_WORD;
use crate::error::{FactsheetError, Result};
use crate::models::config::ExtractionConfig;
use crate::models::record::FieldLabel;

/// Last-resort matcher: an anchor phrase anywhere in the text, then the first
/// value of the right kind within a fixed number of characters after it.
#[derive(Debug, Clone)]
pub struct GlobalFallback {
    price_anchor: Option<Regex>,
    date_anchor: Option<Regex>,
    window_chars: usize,
}

impl GlobalFallback {
    pub fn new(config: &ExtractionConfig) -> Result<Self> {
        Ok(Self {
            price_anchor: anchor_regex(&config.price_anchors)?,
            date_anchor: anchor_regex(&config.date_anchors)?,
            window_chars: config.fallback_window_chars,
        })
    }

    /// Find the raw value for `field`, trying each anchor occurrence in order.
    pub fn scan<'t>(&self, text: &'t str, field: FieldLabel) -> Option<&'t str> {
        let (anchor, kind) = match field {
            FieldLabel::NavPrice => (self.price_anchor.as_ref()?, ValueKind::Number),
            FieldLabel::NavDate => (self.date_anchor.as_ref()?, ValueKind::Date),
            _ => return None,
        };

        anchor.find_iter(text).find_map(|m| {
            let rest = &text[m.end()..];
            let window = char_window(rest, self.window_chars);
            // "indre værdi" also prefixes the date label
            if field == FieldLabel::NavPrice && DATE_WORD.is_match(window) {
                return None;
            }
            // the window bounds where a value starts, not where it ends
            let value = kind.find_before(extend_over_value(rest, window.len()), window.len())?;
            trace!("{} found after anchor at byte {}", field, m.start());
            Some(value)
        })
    }
}

/// Case-insensitive alternation of the anchors; inner spaces match any
/// whitespace run so anchors survive line breaks.
fn anchor_regex(anchors: &[String]) -> Result<Option<Regex>> {
    let alternatives: Vec<String> = anchors
        .iter()
        .filter(|anchor| !anchor.trim().is_empty())
        .map(|anchor| {
            anchor
                .split_whitespace()
                .map(regex::escape)
                .collect::<Vec<_>>()
                .join(r"\s+")
        })
        .collect();

    if alternatives.is_empty() {
        return Ok(None);
    }

    Regex::new(&format!("(?i)(?:{})", alternatives.join("|")))
        .map(Some)
        .map_err(|e| FactsheetError::Config(format!("invalid fallback anchor: {}", e)))
}

/// At most `limit` characters from the start of `text`.
fn char_window(text: &str, limit: usize) -> &str {
    match text.char_indices().nth(limit) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}

/// `text` up to the end of the number/date run crossing `offset`, plus one
/// character so word boundaries after the value still resolve.
fn extend_over_value(text: &str, offset: usize) -> &str {
    let tail = &text[offset..];
    let run = tail
        .find(|c: char| !is_value_char(c))
        .unwrap_or(tail.len());
    let boundary = tail[run..].chars().next().map_or(0, char::len_utf8);
    &text[..offset + run + boundary]
}

fn is_value_char(c: char) -> bool {
    c.is_ascii_digit() || c.is_whitespace() || matches!(c, '.' | ',' | '/' | '-' | '+')
}
