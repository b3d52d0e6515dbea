//! Utilities for date and time formatting
//!
//! The gateway emits timestamps either with an offset
//! (`2024-03-15T14:02:26.123+00:00`) or naive (`2024-03-15T14:02:26.123456`).

use chrono::{DateTime, NaiveDate, NaiveDateTime};

fn parse_datetime(value: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.naive_utc());
    }
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S%.f"))
        .ok()
}

/// Format ISO datetime string to DD.MM.YYYY HH:MM
/// Example: "2024-03-15T14:02:26.123Z" -> "15.03.2024 14:02"
pub fn format_datetime(datetime_str: &str) -> String {
    parse_datetime(datetime_str)
        .map(|dt| dt.format("%d.%m.%Y %H:%M").to_string())
        .unwrap_or_else(|| datetime_str.to_string())
}

/// Same as [`format_datetime`] for optional fields, "-" when absent
pub fn format_datetime_opt(value: &Option<String>) -> String {
    value
        .as_deref()
        .map(format_datetime)
        .unwrap_or_else(|| "-".to_string())
}

/// Format a calendar day as DD.MM.YYYY
pub fn format_date(date: &NaiveDate) -> String {
    date.format("%d.%m.%Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_datetime() {
        assert_eq!(format_datetime("2024-03-15T14:02:26.123Z"), "15.03.2024 14:02");
        assert_eq!(
            format_datetime("2024-12-31T23:59:59+00:00"),
            "31.12.2024 23:59"
        );
        assert_eq!(
            format_datetime("2025-01-02T08:05:00.123456"),
            "02.01.2025 08:05"
        );
        assert_eq!(format_datetime("2025-01-02 08:05:00"), "02.01.2025 08:05");
    }

    #[test]
    fn test_format_date() {
        let d = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        assert_eq!(format_date(&d), "15.03.2024");
    }

    #[test]
    fn test_invalid_format() {
        assert_eq!(format_datetime("invalid"), "invalid");
        assert_eq!(format_datetime_opt(&None), "-");
    }
}
