//! Canonical form for converter output.

use unicode_normalization::UnicodeNormalization;

use crate::extract::rules::patterns::{DASH_CHARS, PAGE_BREAK, SPACE_CHARS};

/// Canonicalize raw document text.
///
/// Applies NFKC, turns page breaks into newlines, folds space and dash
/// variants to ASCII and right-trims every line. Line order and count are
/// preserved. Idempotent.
pub fn normalize_text(raw: &str) -> String {
    let folded: String = raw
        .nfkc()
        .map(|c| {
            if c == PAGE_BREAK {
                '\n'
            } else if SPACE_CHARS.contains(&c) {
                ' '
            } else if DASH_CHARS.contains(&c) {
                '-'
            } else {
                c
            }
        })
        .collect();

    folded
        .split('\n')
        .map(str::trim_end)
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_folds_spaces_and_dashes() {
        let raw = "Indre\u{00A0}værdi\u{202F}dato:\u{2009}17\u{2013}02\u{2212}2026";
        assert_eq!(normalize_text(raw), "Indre værdi dato: 17-02-2026");
    }

    #[test]
    fn test_page_break_becomes_newline() {
        assert_eq!(normalize_text("side 1\u{000C}side 2"), "side 1\nside 2");
    }

    #[test]
    fn test_right_trims_lines() {
        assert_eq!(normalize_text("Valuta   \n  DKK\t\r\n"), "Valuta\n  DKK\n");
    }

    #[test]
    fn test_composes_decomposed_letters() {
        // "æ" is already atomic; "é" given as e + combining acute
        assert_eq!(normalize_text("Bæredygtighed cafe\u{0301}"), "Bæredygtighed café");
        // ligature folded by compatibility mapping
        assert_eq!(normalize_text("\u{FB01}nal"), "final");
    }

    #[test]
    fn test_empty() {
        assert_eq!(normalize_text(""), "");
    }

    #[test]
    fn test_idempotent() {
        for raw in [
            "Opstart:\u{00A0}\n\u{000C}Valuta \u{2014} DKK  \n",
            "Indre værdi: 1.234,56\u{2009}kr.\r\n",
            "\u{FEFF}x\u{0301}\u{200B}y",
        ] {
            let once = normalize_text(raw);
            assert_eq!(normalize_text(&once), once);
        }
    }
}
