//! Human-readable date formatting for the three admitted input shapes.
//!
//! `YYYY-MM-DD` → "January 15, 2025", `YYYY-MM` → "January 2025",
//! `YYYY` → "2025". Anything else is passed through unchanged with a
//! warning — a single odd date never aborts generation.

use chrono::NaiveDate;
use tracing::warn;

pub fn format_date(raw: &str) -> String {
    let trimmed = raw.trim();
    match trimmed.matches('-').count() {
        2 => {
            if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
                return date.format("%B %d, %Y").to_string();
            }
        }
        1 => {
            // Borrow a day so chrono can resolve the month name.
            if let Ok(date) = NaiveDate::parse_from_str(&format!("{trimmed}-01"), "%Y-%m-%d") {
                return date.format("%B %Y").to_string();
            }
        }
        0 => {
            if trimmed.len() == 4 && trimmed.bytes().all(|b| b.is_ascii_digit()) {
                return trimmed.to_string();
            }
        }
        _ => {}
    }
    warn!("unrecognized date '{raw}', emitting it verbatim");
    raw.to_string()
}

/// Joins an optional start and end bound with " - ". `current: true`
/// forces the end bound to "Present", even when a literal end date was
/// supplied alongside it.
pub fn format_date_range(start: Option<&str>, end: Option<&str>, current: bool) -> Option<String> {
    let start = start.map(format_date);
    let end = if current {
        Some("Present".to_string())
    } else {
        end.map(format_date)
    };
    match (start, end) {
        (Some(s), Some(e)) => Some(format!("{s} - {e}")),
        (Some(s), None) => Some(s),
        (None, Some(e)) => Some(e),
        (None, None) => None,
    }
}
