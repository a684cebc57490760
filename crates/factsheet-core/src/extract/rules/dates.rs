//! Date normalization for factsheet values.

use chrono::NaiveDate;

use super::patterns::{DASH_CHARS, DATE_DMY, DATE_ISO, DATE_TOKEN, SPACES_AROUND_DASH};

/// Parse a day-month-year date ("17-02-2026", "17.02.2026", "17 / 2 / 26"),
/// falling back to an ISO date ("2026-02-17").
///
/// Two-digit years are read as 20yy. Impossible calendar dates yield `None`.
pub fn normalize_date(raw: &str) -> Option<NaiveDate> {
    let unified: String = raw
        .chars()
        .map(|c| {
            if c == '.' || c == '/' || DASH_CHARS.contains(&c) {
                '-'
            } else {
                c
            }
        })
        .collect();
    let unified = SPACES_AROUND_DASH.replace_all(&unified, "-");

    if let Some(caps) = DATE_DMY.captures(&unified) {
        let day: u32 = caps[1].parse().ok()?;
        let month: u32 = caps[2].parse().ok()?;
        let year = parse_year(&caps[3])?;
        return NaiveDate::from_ymd_opt(year, month, day);
    }

    let caps = DATE_ISO.captures(&unified)?;
    let year: i32 = caps[1].parse().ok()?;
    let month: u32 = caps[2].parse().ok()?;
    let day: u32 = caps[3].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Find the first date-like token in `text`.
pub fn find_date(text: &str) -> Option<&str> {
    find_date_before(text, text.len())
}

/// First date-like token starting before byte `limit`; it may end past it.
pub fn find_date_before(text: &str, limit: usize) -> Option<&str> {
    DATE_TOKEN
        .find(text)
        .filter(|m| m.start() < limit)
        .map(|m| m.as_str())
}

fn parse_year(s: &str) -> Option<i32> {
    let year: i32 = s.parse().ok()?;
    // TODO: two-digit years always land in 2000-2099; revisit if factsheets older than 2000 show up.
    if s.len() == 2 { Some(2000 + year) } else { Some(year) }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(y, m, d)
    }

    #[test]
    fn test_day_month_year_separators() {
        assert_eq!(normalize_date("17-02-2026"), ymd(2026, 2, 17));
        assert_eq!(normalize_date("17.02.2026"), ymd(2026, 2, 17));
        assert_eq!(normalize_date("17/02/2026"), ymd(2026, 2, 17));
        assert_eq!(normalize_date("17 \u{2013} 02 \u{2013} 2026"), ymd(2026, 2, 17));
        assert_eq!(normalize_date("1.2.2026"), ymd(2026, 2, 1));
    }

    #[test]
    fn test_two_digit_year() {
        assert_eq!(normalize_date("17-02-26"), ymd(2026, 2, 17));
    }

    #[test]
    fn test_iso_fallback() {
        assert_eq!(normalize_date("2026-02-17"), ymd(2026, 2, 17));
        assert_eq!(normalize_date("2015-01-01"), ymd(2015, 1, 1));
    }

    #[test]
    fn test_invalid_calendar_dates() {
        assert_eq!(normalize_date("31-02-2026"), None);
        assert_eq!(normalize_date("01-13-2026"), None);
        assert_eq!(normalize_date("31-04-2026"), None);
        assert_eq!(normalize_date("2026-02-30"), None);
    }

    #[test]
    fn test_garbage() {
        assert_eq!(normalize_date(""), None);
        assert_eq!(normalize_date("Ja"), None);
        assert_eq!(normalize_date("202,69"), None);
    }

    #[test]
    fn test_find_date() {
        assert_eq!(find_date("pr. 17.02.2026 kl. 16"), Some("17.02.2026"));
        assert_eq!(find_date("115,00 DKK"), None);
    }

    #[test]
    fn test_find_date_before_keeps_whole_token() {
        assert_eq!(find_date_before("pr. 17.02.2026", 5), Some("17.02.2026"));
        assert_eq!(find_date_before("pr. 17.02.2026", 4), None);
    }
}
