//! Number normalization for factsheet values.

use rust_decimal::Decimal;
use std::str::FromStr;

use super::patterns::{DATE_TOKEN, NUMBER_SHAPE, NUMBER_TOKEN};
use crate::models::config::DecimalConvention;

/// Parse a locale-formatted number (e.g. "1.234,56", "202,69", "115.00").
///
/// Everything except digits and separators is dropped; whitespace inside the
/// number groups thousands. A leading sign is kept. Candidates that are
/// themselves dates are rejected.
pub fn normalize_number(raw: &str, convention: DecimalConvention) -> Option<Decimal> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || DATE_TOKEN.is_match(trimmed) {
        return None;
    }

    let (sign, body) = match trimmed.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };

    let cleaned: String = body
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == ',' || *c == '.')
        .collect();

    let has_comma = cleaned.contains(',');
    let has_dot = cleaned.contains('.');

    let normalized = match convention {
        DecimalConvention::European if has_comma && has_dot => {
            cleaned.replace('.', "").replace(',', ".")
        }
        DecimalConvention::European if has_comma => cleaned.replace(',', "."),
        DecimalConvention::European => cleaned,
        DecimalConvention::Anglo => cleaned.replace(',', ""),
    };

    let candidate = format!("{}{}", sign, normalized);
    if !NUMBER_SHAPE.is_match(&candidate) {
        return None;
    }

    Decimal::from_str(&candidate).ok()
}

/// Find the first number-like token in `text` that is not part of a date
/// and is not glued to a preceding word (as in identifiers like "PFA000002738").
pub fn find_number(text: &str) -> Option<&str> {
    find_number_before(text, text.len())
}

/// Like [`find_number`], but only tokens starting before byte `limit` count.
///
/// The token itself may run past `limit`.
pub fn find_number_before(text: &str, limit: usize) -> Option<&str> {
    // both match streams are ordered, so one pass over the dates suffices
    let mut dates = DATE_TOKEN.find_iter(text).peekable();

    for m in NUMBER_TOKEN.find_iter(text) {
        if m.start() >= limit {
            return None;
        }
        while dates.next_if(|d| d.end() <= m.start()).is_some() {}

        let in_date = dates.peek().is_some_and(|d| d.start() < m.end());
        let glued = text[..m.start()]
            .chars()
            .next_back()
            .is_some_and(char::is_alphanumeric);
        if !in_date && !glued {
            return Some(m.as_str());
        }
    }

    None
}
