//! Value rules: token finders and normalizers for factsheet fields.

pub mod currency;
pub mod dates;
pub mod numbers;
pub mod patterns;

pub use currency::{find_currency, find_currency_before, normalize_currency};
pub use dates::{find_date, find_date_before, normalize_date};
pub use numbers::{find_number, find_number_before, normalize_number};

use crate::models::record::FieldLabel;

/// Shape of the value a field holds, used to pick a token finder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Number,
    Date,
    Currency,
}

impl ValueKind {
    /// Value kind searched for a field, if the field is ever searched outside the label block.
    pub fn of(field: FieldLabel) -> Option<Self> {
        match field {
            FieldLabel::NavPrice => Some(ValueKind::Number),
            FieldLabel::NavDate => Some(ValueKind::Date),
            FieldLabel::Currency => Some(ValueKind::Currency),
            _ => None,
        }
    }

    /// First token in `text` that looks like a value of this kind.
    pub fn find(self, text: &str) -> Option<&str> {
        self.find_before(text, text.len())
    }

    /// First token of this kind starting before byte `limit`, kept whole.
    pub fn find_before(self, text: &str, limit: usize) -> Option<&str> {
        match self {
            ValueKind::Number => find_number_before(text, limit),
            ValueKind::Date => find_date_before(text, limit),
            ValueKind::Currency => find_currency_before(text, limit),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_per_field() {
        assert_eq!(ValueKind::of(FieldLabel::NavPrice), Some(ValueKind::Number));
        assert_eq!(ValueKind::of(FieldLabel::NavDate), Some(ValueKind::Date));
        assert_eq!(ValueKind::of(FieldLabel::StartDate), None);
    }

    #[test]
    fn test_find_by_kind() {
        let line = "17-02-2026 202,69 DKK";
        assert_eq!(ValueKind::Number.find(line), Some("202,69"));
        assert_eq!(ValueKind::Date.find(line), Some("17-02-2026"));
        assert_eq!(ValueKind::Currency.find(line), Some("DKK"));
    }
}
