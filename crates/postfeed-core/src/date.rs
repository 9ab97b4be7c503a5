//! Publication date parsing.
//!
//! Front matter dates are free text. Zone-less forms are read as UTC, which
//! matches how a bare `YYYY-MM-DD` is treated by most feed readers.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Parse a front matter date.
///
/// Accepts RFC 3339, RFC 2822, `YYYY-MM-DD[ T]HH:MM[:SS]` and `YYYY-MM-DD`.
pub fn parse_date(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }

    if let Ok(dt) = DateTime::parse_from_rfc2822(value) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, format) {
            return Some(dt.and_utc());
        }
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()?
        .and_hms_opt(0, 0, 0)
        .map(|dt| dt.and_utc())
}

#[cfg(test)]
mod tests {
    use chrono::{Datelike, Timelike};

    use super::*;

    #[test]
    fn test_date_only() {
        let dt = parse_date("2024-06-01").expect("parse");
        assert_eq!(dt.to_rfc3339(), "2024-06-01T00:00:00+00:00");
    }

    #[test]
    fn test_rfc3339_with_offset() {
        let dt = parse_date("2024-06-01T10:00:00+08:00").expect("parse");
        assert_eq!(dt.hour(), 2);
        assert_eq!(dt.day(), 1);
    }

    #[test]
    fn test_rfc2822() {
        let dt = parse_date("Sat, 01 Jun 2024 12:30:00 GMT").expect("parse");
        assert_eq!(dt.minute(), 30);
    }

    #[test]
    fn test_naive_datetime() {
        assert!(parse_date("2024-06-01 12:30:00").is_some());
        assert!(parse_date("2024-06-01T12:30").is_some());
    }

    #[test]
    fn test_invalid_dates() {
        assert!(parse_date("").is_none());
        assert!(parse_date("yesterday").is_none());
        assert!(parse_date("2024-13-01").is_none());
        assert!(parse_date("2024-02-30").is_none());
    }
}
