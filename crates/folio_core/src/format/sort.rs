//! Presentation ordering for section records.
//!
//! All sorts are stable: records with equal keys keep their stored order,
//! which is the order the editor's move-up/move-down produced.

use crate::format::date::date_sort_key;
use crate::model::record::Record;
use once_cell::sync::Lazy;
use regex::Regex;
use std::cmp::Reverse;

static YEAR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[0-9]{4}").expect("valid year regex"));

const MONTHS: [&str; 12] = [
    "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
];

/// Extracts the first run of four ASCII digits as a year, or `0`.
///
/// `"Mar.2023 -"` -> `2023`; `"99"` -> `0`.
pub fn parse_year(value: &str) -> i32 {
    YEAR_RE
        .find(value)
        .and_then(|found| found.as_str().parse().ok())
        .unwrap_or(0)
}

/// Month rank `1..=12` from the first three letters, case-insensitive;
/// anything else ranks `0`.
pub fn month_rank(value: &str) -> u8 {
    let prefix = value
        .trim()
        .chars()
        .take(3)
        .flat_map(char::to_lowercase)
        .collect::<String>();
    MONTHS
        .iter()
        .position(|month| *month == prefix)
        .map_or(0, |index| index as u8 + 1)
}

/// Newest year first, by [`parse_year`] of `records[i][key]`.
pub fn sort_by_year_desc<'a>(records: &'a [Record], key: &str) -> Vec<&'a Record> {
    let mut sorted = records.iter().collect::<Vec<_>>();
    sorted.sort_by_key(|record| Reverse(parse_year(&record.text(key))));
    sorted
}

/// Newest `date` first; missing or unparseable dates sort as the oldest.
pub fn sort_news(records: &[Record]) -> Vec<&Record> {
    let mut sorted = records.iter().collect::<Vec<_>>();
    sorted.sort_by_key(|record| Reverse(date_sort_key(&record.text("date"))));
    sorted
}

/// Newest `year` first, then latest `month` within the same year.
pub fn sort_conference(records: &[Record]) -> Vec<&Record> {
    let mut sorted = records.iter().collect::<Vec<_>>();
    sorted.sort_by_key(|record| {
        Reverse((
            parse_year(&record.text("year")),
            month_rank(&record.text("month")),
        ))
    });
    sorted
}

#[cfg(test)]
mod tests {
    use super::{month_rank, parse_year, sort_by_year_desc, sort_conference, sort_news};
    use crate::model::record::Record;
    use serde_json::json;

    fn record(value: serde_json::Value) -> Record {
        Record::from_object(value.as_object().cloned().unwrap())
    }

    fn texts(records: &[&Record], key: &str) -> Vec<String> {
        records.iter().map(|record| record.text(key)).collect()
    }

    #[test]
    fn parse_year_finds_first_four_digit_run() {
        assert_eq!(parse_year("Mar.2023 -"), 2023);
        assert_eq!(parse_year("2019 - 2021"), 2019);
        assert_eq!(parse_year(""), 0);
        assert_eq!(parse_year("no digits"), 0);
        assert_eq!(parse_year("99"), 0);
        assert_eq!(parse_year("١٢٣٤"), 0);
    }

    #[test]
    fn month_rank_uses_three_letter_prefix() {
        assert_eq!(month_rank("Jan"), 1);
        assert_eq!(month_rank("december"), 12);
        assert_eq!(month_rank(" SEPT "), 9);
        assert_eq!(month_rank("Spring"), 0);
        assert_eq!(month_rank(""), 0);
    }

    #[test]
    fn sort_by_year_desc_orders_newest_first() {
        let records = vec![
            record(json!({"year": "2020"})),
            record(json!({"year": "2023"})),
            record(json!({"year": "2019"})),
        ];
        let sorted = sort_by_year_desc(&records, "year");
        assert_eq!(texts(&sorted, "year"), ["2023", "2020", "2019"]);
    }

    #[test]
    fn sort_by_year_desc_is_stable_for_ties() {
        let records = vec![
            record(json!({"period": "2021 -", "title": "a"})),
            record(json!({"period": "Mar.2021", "title": "b"})),
            record(json!({"period": "", "title": "c"})),
            record(json!({"period": "2022", "title": "d"})),
        ];
        let sorted = sort_by_year_desc(&records, "period");
        assert_eq!(texts(&sorted, "title"), ["d", "a", "b", "c"]);
    }

    #[test]
    fn sort_conference_breaks_year_ties_by_month() {
        let records = vec![
            record(json!({"year": "2024", "month": "Mar"})),
            record(json!({"year": "2024", "month": "Jan"})),
            record(json!({"year": "2024", "month": "Dec"})),
            record(json!({"year": "2025", "month": "???"})),
        ];
        let sorted = sort_conference(&records);
        assert_eq!(texts(&sorted, "month"), ["???", "Dec", "Mar", "Jan"]);
    }

    #[test]
    fn sort_news_puts_undated_items_last() {
        let records = vec![
            record(json!({"date": "", "title": "undated"})),
            record(json!({"date": "2025-12-01", "title": "older"})),
            record(json!({"date": "2026-02-15", "title": "newest"})),
            record(json!({"title": "missing"})),
        ];
        let sorted = sort_news(&records);
        assert_eq!(texts(&sorted, "title"), ["newest", "older", "undated", "missing"]);
    }
}
