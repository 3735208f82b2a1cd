//! Time helpers - business timezone formatting
//!
//! Timestamps are Unix millis everywhere; conversion to display strings
//! happens at the rendering edges (receipts, email bodies).

use chrono_tz::Tz;

/// Format unix millis as `YYYY-MM-DD HH:MM` in the given timezone
pub fn format_datetime(millis: i64, tz: Tz) -> String {
    match chrono::DateTime::from_timestamp_millis(millis) {
        Some(dt) => dt.with_timezone(&tz).format("%Y-%m-%d %H:%M").to_string(),
        None => "unknown".to_string(),
    }
}

/// Format unix millis as `YYYY-MM-DD` in the given timezone
pub fn format_date(millis: i64, tz: Tz) -> String {
    match chrono::DateTime::from_timestamp_millis(millis) {
        Some(dt) => dt.with_timezone(&tz).format("%Y-%m-%d").to_string(),
        None => "unknown".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_datetime_utc() {
        // 2024-01-22 14:32:15 UTC
        assert_eq!(format_datetime(1705912335000, chrono_tz::UTC), "2024-01-22 14:32");
        assert_eq!(format_date(1705912335000, chrono_tz::UTC), "2024-01-22");
    }

    #[test]
    fn test_format_datetime_invalid() {
        assert_eq!(format_datetime(i64::MAX, chrono_tz::UTC), "unknown");
    }
}
