//! Frontmatter date parsing and display formats.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Parse a frontmatter date.
///
/// Accepts `YYYY-MM-DD`, `YYYY-MM-DD HH:MM:SS` and RFC 3339. Dates without a
/// time are taken as midnight UTC.
pub fn parse(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
        return Some(dt.and_utc());
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

/// Post header format: `June 15, 2021`.
pub fn format_long(date: &DateTime<Utc>) -> String {
    date.format("%B %d, %Y").to_string()
}

/// Listing format: `June, 15, 2021`.
pub fn format_listing(date: &DateTime<Utc>) -> String {
    date.format("%B, %d, %Y").to_string()
}

/// `<time datetime>` attribute value: `2021-06-15`.
pub fn format_iso(date: &DateTime<Utc>) -> String {
    date.format("%Y-%m-%d").to_string()
}
