//! Common regex patterns and character tables for factsheet extraction.

use lazy_static::lazy_static;
use regex::Regex;

/// Dash variants folded to `-`: hyphen, non-breaking hyphen, figure dash,
/// en dash, em dash, horizontal bar, minus sign and the small/fullwidth forms.
pub const DASH_CHARS: &[char] = &[
    '\u{2010}', '\u{2011}', '\u{2012}', '\u{2013}', '\u{2014}', '\u{2015}', '\u{2212}',
    '\u{FE58}', '\u{FE63}', '\u{FF0D}',
];

/// Space variants folded to ` `, including zero-width and no-break forms.
pub const SPACE_CHARS: &[char] = &[
    '\u{00A0}', '\u{2000}', '\u{2001}', '\u{2002}', '\u{2003}', '\u{2004}', '\u{2005}',
    '\u{2006}', '\u{2007}', '\u{2008}', '\u{2009}', '\u{200A}', '\u{200B}', '\u{202F}',
    '\u{205F}', '\u{2060}', '\u{3000}', '\u{FEFF}',
];

/// Page break emitted by text converters between pages.
pub const PAGE_BREAK: char = '\u{000C}';

/// Unit tokens stripped from either end of a same-line value, compared case-insensitively.
pub const UNIT_TOKENS: &[&str] = &["dkk", "eur", "usd", "sek", "nok", "kr.", "kr", "%"];

/// Punctuation stripped from either end of a same-line value.
pub const TRAILING_PUNCTUATION: &[char] = &[':', ';', ',', '.', '*', ')', '='];

/// ISO 4217 codes recognized in the currency field.
pub const KNOWN_CURRENCIES: &[&str] = &[
    "DKK", "EUR", "USD", "SEK", "NOK", "ISK", "GBP", "CHF", "PLN", "CZK", "HUF", "JPY", "CNY",
    "HKD", "SGD", "AUD", "NZD", "CAD", "BRL", "MXN", "INR", "ZAR", "TRY", "KRW",
];

lazy_static! {
    // Labels
    pub static ref NAV_PRICE_LABEL: Regex = Regex::new(
        r"(?i)\b(?:indre\s*v(?:æ|ae|a|e)?rdi|net\s+asset\s+value|nav)\b(?:\s*\(nav\))?(?:\s+(?:pr\.?|per)\s+(?:andel|bevis|unit|share)\b)?"
    ).unwrap();

    pub static ref NAV_DATE_LABEL: Regex = Regex::new(
        r"(?i)\b(?:(?:indre\s*v(?:æ|ae|a|e)?rdi|net\s+asset\s+value|nav)(?:\s*\(nav\))?[\s-]*(?:dato|date)|kursdato)\b"
    ).unwrap();

    /// Words that turn a price label into a date label when they follow it.
    pub static ref DATE_WORD: Regex = Regex::new(
        r"(?i)^[\s-]*(?:dato|date)\b"
    ).unwrap();

    pub static ref CURRENCY_LABEL: Regex = Regex::new(
        r"(?i)\b(?:valuta|currency)\b"
    ).unwrap();

    // Value tokens
    pub static ref DATE_TOKEN: Regex = Regex::new(
        r"\b\d{1,2}\s*[-./]\s*\d{1,2}\s*[-./]\s*(?:\d{4}|\d{2})\b|\b\d{4}-\d{1,2}-\d{1,2}\b"
    ).unwrap();

    pub static ref NUMBER_TOKEN: Regex = Regex::new(
        r"[+-]?(?:\d{1,3}(?: \d{3})+(?:[.,]\d+)?|\d(?:[\d.,]*\d)?)"
    ).unwrap();

    pub static ref CURRENCY_TOKEN: Regex = Regex::new(
        r"(?i)\b(?:[a-z]{3}|kr)\b"
    ).unwrap();

    // Normalizer shapes
    pub static ref NUMBER_SHAPE: Regex = Regex::new(
        r"^[+-]?\d+(?:\.\d+)?$"
    ).unwrap();

    pub static ref DATE_DMY: Regex = Regex::new(
        r"\b(\d{1,2})-(\d{1,2})-(\d{4}|\d{2})\b"
    ).unwrap();

    pub static ref DATE_ISO: Regex = Regex::new(
        r"\b(\d{4})-(\d{1,2})-(\d{1,2})\b"
    ).unwrap();

    pub static ref SPACES_AROUND_DASH: Regex = Regex::new(
        r"\s*-\s*"
    ).unwrap();

    pub static ref WHITESPACE_RUN: Regex = Regex::new(
        r"\s+"
    ).unwrap();
}
