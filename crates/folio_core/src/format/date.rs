//! Lenient calendar date parsing and display formatting.

use chrono::{DateTime, NaiveDate, NaiveTime};

/// Placeholder shown for records without a date.
pub const DATE_PLACEHOLDER: &str = "Date TBD";

const DAY_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%Y.%m.%d",
    "%b %d, %Y",
    "%B %d, %Y",
    "%d %b %Y",
];

/// Parses the date spellings authors actually type.
///
/// Accepts ISO days (`2026-02-15`), RFC 3339 timestamps, slash/dot
/// separated days, `Feb 15, 2026`, `February 15, 2026`, `15 Feb 2026`,
/// year-month (`2026-02`) and bare years (`2026`, read as January 1st).
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    for format in DAY_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return Some(date);
        }
    }
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(timestamp.date_naive());
    }
    if let Ok(date) = NaiveDate::parse_from_str(&format!("{trimmed}-01"), "%Y-%m-%d") {
        return Some(date);
    }
    if trimmed.len() == 4 && trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return trimmed
            .parse::<i32>()
            .ok()
            .and_then(|year| NaiveDate::from_ymd_opt(year, 1, 1));
    }
    None
}

/// Sort key in seconds since the Unix epoch; unparseable dates map to `0`.
pub fn date_sort_key(value: &str) -> i64 {
    parse_date(value).map_or(0, |date| date.and_time(NaiveTime::MIN).and_utc().timestamp())
}

/// Formats a date for display.
///
/// Missing or blank input yields [`DATE_PLACEHOLDER`]; unparseable input is
/// returned verbatim; valid dates render as `Feb 15, 2026`.
pub fn format_date(value: Option<&str>) -> String {
    let Some(raw) = value.filter(|raw| !raw.trim().is_empty()) else {
        return DATE_PLACEHOLDER.to_string();
    };
    match parse_date(raw) {
        Some(date) => date.format("%b %-d, %Y").to_string(),
        None => raw.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::{date_sort_key, format_date, parse_date, DATE_PLACEHOLDER};
    use chrono::NaiveDate;

    #[test]
    fn parses_common_spellings() {
        let expected = NaiveDate::from_ymd_opt(2026, 2, 15);
        assert_eq!(parse_date("2026-02-15"), expected);
        assert_eq!(parse_date(" 2026/02/15 "), expected);
        assert_eq!(parse_date("Feb 15, 2026"), expected);
        assert_eq!(parse_date("February 15, 2026"), expected);
        assert_eq!(parse_date("2026-02-15T09:30:00+09:00"), expected);
        assert_eq!(parse_date("2026-02"), NaiveDate::from_ymd_opt(2026, 2, 1));
        assert_eq!(parse_date("2026"), NaiveDate::from_ymd_opt(2026, 1, 1));
        assert_eq!(parse_date("soon"), None);
        assert_eq!(parse_date(""), None);
    }

    #[test]
    fn format_date_applies_fallbacks() {
        assert_eq!(format_date(None), DATE_PLACEHOLDER);
        assert_eq!(format_date(Some("   ")), DATE_PLACEHOLDER);
        assert_eq!(format_date(Some("Spring term")), "Spring term");
        assert_eq!(format_date(Some("2026-02-15")), "Feb 15, 2026");
        assert_eq!(format_date(Some("2026-03-05")), "Mar 5, 2026");
    }

    #[test]
    fn unparseable_dates_sort_as_epoch() {
        assert_eq!(date_sort_key("not a date"), 0);
        assert!(date_sort_key("2020-01-01") > 0);
    }
}
