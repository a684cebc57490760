//! Currency code recognition.

use super::patterns::{CURRENCY_TOKEN, KNOWN_CURRENCIES};

/// Reduce a raw currency string to an ISO 4217 code.
///
/// "kr"/"kr." read as DKK. Strings without a known code yield `None`.
pub fn normalize_currency(raw: &str) -> Option<String> {
    find_currency(raw).map(|token| {
        let upper = token.to_ascii_uppercase();
        if upper == "KR" { "DKK".to_string() } else { upper }
    })
}

/// Find the first token in `text` that names a known currency.
pub fn find_currency(text: &str) -> Option<&str> {
    find_currency_before(text, text.len())
}

/// First known currency token starting before byte `limit`.
pub fn find_currency_before(text: &str, limit: usize) -> Option<&str> {
    CURRENCY_TOKEN
        .find_iter(text)
        .take_while(|m| m.start() < limit)
        .map(|m| m.as_str())
        .find(|token| {
            let upper = token.to_ascii_uppercase();
            upper == "KR" || KNOWN_CURRENCIES.contains(&upper.as_str())
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_codes() {
        assert_eq!(normalize_currency("DKK"), Some("DKK".to_string()));
        assert_eq!(normalize_currency(" eur "), Some("EUR".to_string()));
        assert_eq!(normalize_currency("Valuta: USD"), Some("USD".to_string()));
    }

    #[test]
    fn test_kroner() {
        assert_eq!(normalize_currency("kr."), Some("DKK".to_string()));
    }

    #[test]
    fn test_unrecognized() {
        assert_eq!(normalize_currency("Aktier"), None);
        assert_eq!(normalize_currency("ABC"), None);
        assert_eq!(normalize_currency(""), None);
    }

    #[test]
    fn test_find_currency_skips_other_words() {
        assert_eq!(find_currency("Fonden handles i SEK"), Some("SEK"));
        assert_eq!(find_currency("Type Aktier"), None);
    }
}
