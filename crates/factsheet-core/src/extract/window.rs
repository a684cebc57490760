//! Windowed label scanning.
//!
//! For one field at a time: a value on the label's own line wins, otherwise
//! the lines right after the first label line are searched. Only the first
//! label occurrence is used for the forward window.

use tracing::trace;

use super::rules::ValueKind;
use super::rules::patterns::{
    CURRENCY_LABEL, DATE_WORD, NAV_DATE_LABEL, NAV_PRICE_LABEL, TRAILING_PUNCTUATION,
    UNIT_TOKENS,
};
use crate::models::record::FieldLabel;

/// Label-driven scanner with a bounded forward window.
#[derive(Debug, Clone)]
pub struct WindowScanner {
    lookahead: usize,
}

impl WindowScanner {
    pub fn new(lookahead: usize) -> Self {
        Self { lookahead }
    }

    /// Find the raw value for `field` in normalized lines.
    pub fn scan<'t>(&self, lines: &[&'t str], field: FieldLabel) -> Option<&'t str> {
        let kind = ValueKind::of(field)?;

        // Same line as the label.
        for (idx, &line) in lines.iter().enumerate() {
            let Some(end) = label_end(field, line) else {
                continue;
            };
            let rest = &line[end..];
            let rest = if kind == ValueKind::Currency {
                rest
            } else {
                clean_remainder(rest)
            };
            if let Some(value) = kind.find(rest) {
                trace!("{} found on label line {}", field, idx);
                return Some(value);
            }
        }

        // Lines following the first label line.
        let first = lines
            .iter()
            .position(|line| label_end(field, line).is_some())?;
        let window_end = (first + 1 + self.lookahead).min(lines.len());

        lines[first + 1..window_end]
            .iter()
            .enumerate()
            .find_map(|(offset, &line)| {
                let value = kind.find(line)?;
                trace!("{} found {} lines after label", field, offset + 1);
                Some(value)
            })
    }
}

/// Byte offset just past the field's label on `line`, if the line carries it.
fn label_end(field: FieldLabel, line: &str) -> Option<usize> {
    match field {
        FieldLabel::NavPrice => NAV_PRICE_LABEL
            .find_iter(line)
            .find(|m| !DATE_WORD.is_match(&line[m.end()..]))
            .map(|m| m.end()),
        FieldLabel::NavDate => NAV_DATE_LABEL.find(line).map(|m| m.end()),
        FieldLabel::Currency => CURRENCY_LABEL.find(line).map(|m| m.end()),
        _ => None,
    }
}

/// Drop the separator after a label and unit or punctuation tokens at either end.
fn clean_remainder(rest: &str) -> &str {
    let mut value = rest.trim_start_matches(|c: char| c == ':' || c == '=' || c.is_whitespace());

    // leading units, possibly glued to the number ("DKK115,00")
    while let Some(unit) = UNIT_TOKENS
        .iter()
        .find(|unit| starts_with_unit(value, unit))
    {
        value = value[unit.len()..].trim_start();
    }

    loop {
        let before = value.len();
        value = value.trim_end().trim_end_matches(TRAILING_PUNCTUATION);
        if let Some(unit) = UNIT_TOKENS
            .iter()
            .find(|unit| ends_with_ignore_ascii_case(value, unit))
        {
            value = &value[..value.len() - unit.len()];
        }
        if value.len() == before {
            return value;
        }
    }
}

/// `value` opens with `unit` and the unit is not the start of a longer word.
fn starts_with_unit(value: &str, unit: &str) -> bool {
    value.len() > unit.len()
        && value.is_char_boundary(unit.len())
        && value[..unit.len()].eq_ignore_ascii_case(unit)
        && !value[unit.len()..]
            .chars()
            .next()
            .is_some_and(char::is_alphabetic)
}

fn ends_with_ignore_ascii_case(value: &str, suffix: &str) -> bool {
    let Some(split) = value.len().checked_sub(suffix.len()) else {
        return false;
    };
    value.is_char_boundary(split) && value[split..].eq_ignore_ascii_case(suffix)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan(text: &str, field: FieldLabel) -> Option<String> {
        let lines: Vec<&str> = text.lines().collect();
        WindowScanner::new(3).scan(&lines, field).map(str::to_string)
    }

    #[test]
    fn test_same_line_price_with_unit() {
        assert_eq!(
            scan("Indre værdi: 115,00 DKK", FieldLabel::NavPrice),
            Some("115,00".to_string())
        );
        assert_eq!(
            scan("Indre værdi 98,10 kr.", FieldLabel::NavPrice),
            Some("98,10".to_string())
        );
    }

    #[test]
    fn test_price_label_ignores_date_line() {
        let text = "Indre værdi dato: 17-02-2026\nIndre værdi: 202,69";
        assert_eq!(scan(text, FieldLabel::NavPrice), Some("202,69".to_string()));
        assert_eq!(scan(text, FieldLabel::NavDate), Some("17-02-2026".to_string()));
    }

    #[test]
    fn test_no_date_label_means_no_date() {
        assert_eq!(scan("Indre værdi: 115,00 DKK", FieldLabel::NavDate), None);
    }

    #[test]
    fn test_forward_window() {
        let text = "Indre værdi\n\n202,69\nIndre værdi dato\n17.02.2026";
        assert_eq!(scan(text, FieldLabel::NavPrice), Some("202,69".to_string()));
        assert_eq!(scan(text, FieldLabel::NavDate), Some("17.02.2026".to_string()));
    }

    #[test]
    fn test_forward_window_is_bounded() {
        let text = "Indre værdi\na\nb\nc\n202,69";
        assert_eq!(scan(text, FieldLabel::NavPrice), None);
    }

    #[test]
    fn test_same_line_beats_earlier_label_without_value() {
        let text = "Indre værdi\nbeskrivelse\nIndre værdi: 150,25";
        assert_eq!(scan(text, FieldLabel::NavPrice), Some("150,25".to_string()));
    }

    #[test]
    fn test_first_occurrence_wins() {
        let text = "Indre værdi: 150,25\nNote: Indre værdi: 149,00";
        assert_eq!(scan(text, FieldLabel::NavPrice), Some("150,25".to_string()));
    }

    #[test]
    fn test_currency_label() {
        assert_eq!(scan("Valuta: DKK", FieldLabel::Currency), Some("DKK".to_string()));
        assert_eq!(scan("Valuta\nEUR", FieldLabel::Currency), Some("EUR".to_string()));
    }

    #[test]
    fn test_fields_without_kind() {
        assert_eq!(scan("Opstart: 2015-01-01", FieldLabel::StartDate), None);
    }

    #[test]
    fn test_clean_remainder() {
        assert_eq!(clean_remainder(": 115,00 DKK."), "115,00");
        assert_eq!(clean_remainder(" 17-02-2026;"), "17-02-2026");
        assert_eq!(clean_remainder("   "), "");
        assert_eq!(clean_remainder(" 12 %"), "12");
    }

    #[test]
    fn test_leading_unit_is_stripped() {
        assert_eq!(clean_remainder(": DKK115,00"), "115,00");
        assert_eq!(clean_remainder(" kr. 98,10"), "98,10");
        assert_eq!(clean_remainder(" Europa 12"), "Europa 12");
        assert_eq!(
            scan("Indre værdi: DKK115,00", FieldLabel::NavPrice),
            Some("115,00".to_string())
        );
    }
}
