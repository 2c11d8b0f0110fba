//! Pure sort and display-format helpers shared by the renderer and editor.
//!
//! # Responsibility
//! - Order records by year, date or year+month.
//! - Turn free-text dates, links and blank fields into display strings.
//!
//! # Invariants
//! - Every helper is total; bad input degrades to a fallback, never an error.

mod date;
mod sort;

pub use date::{date_sort_key, format_date, parse_date, DATE_PLACEHOLDER};
pub use sort::{month_rank, parse_year, sort_by_year_desc, sort_conference, sort_news};

/// Generic display fallback for blank text fields.
pub const NOT_PROVIDED: &str = "Not provided";

/// Returns `value` trimmed, or `fallback` when the trimmed value is empty.
pub fn safe_text(value: &str, fallback: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        fallback.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Normalizes an author-entered link.
///
/// `mailto:`, `http://` and `https://` values pass through; a leading `www.`
/// gains an `https://` scheme; anything else (including the empty "no link"
/// value) is returned trimmed.
pub fn normalize_link(value: &str) -> String {
    let trimmed = value.trim();
    let lower = trimmed.to_ascii_lowercase();
    if lower.starts_with("mailto:") || lower.starts_with("http://") || lower.starts_with("https://")
    {
        return trimmed.to_string();
    }
    if lower.starts_with("www.") {
        return format!("https://{trimmed}");
    }
    trimmed.to_string()
}
