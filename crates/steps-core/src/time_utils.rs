use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, NaiveDateTime, TimeZone};

use crate::error::{Result, StepsError};

// ── Timestamp parsing ─────────────────────────────────────────────────────────

/// Formats carrying an explicit UTC offset, tried before RFC 3339.
const OFFSET_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S %z", "%Y-%m-%d %H:%M:%S%z"];

/// Offset-less formats; these are read as `+00:00`.
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
];

/// Parse a health-export timestamp as written, keeping its own UTC offset.
///
/// Handles the export's native `2024-01-15 08:30:00 -0500` form, RFC 3339
/// (`Z` suffix included), and offset-less date-times or bare dates, which are
/// anchored at `+00:00`. No conversion between offsets is performed, so the
/// calendar date of the result is the one the device recorded.
pub fn parse_timestamp(s: &str) -> Result<DateTime<FixedOffset>> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Err(StepsError::TimestampParse(s.to_string()));
    }

    for fmt in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(trimmed, fmt) {
            return Ok(dt);
        }
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt);
    }

    let utc = FixedOffset::east_opt(0).ok_or_else(|| StepsError::TimestampParse(s.to_string()))?;

    for fmt in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, fmt) {
            return Ok(utc.from_utc_datetime(&naive));
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        if let Some(naive) = date.and_hms_opt(0, 0, 0) {
            return Ok(utc.from_utc_datetime(&naive));
        }
    }

    Err(StepsError::TimestampParse(s.to_string()))
}

// ── Calendar helpers ──────────────────────────────────────────────────────────

/// Truncate `date` to the first day of its month.
pub fn month_start(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Whole days from `origin` to `date` (negative when `date` is earlier).
pub fn days_between(origin: NaiveDate, date: NaiveDate) -> i64 {
    (date - origin).num_days()
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn test_parse_export_format_keeps_offset() {
        let dt = parse_timestamp("2024-01-15 23:30:00 -0500").unwrap();
        assert_eq!(dt.offset().local_minus_utc(), -5 * 3600);
        assert_eq!(dt.hour(), 23);
        // The recorded calendar day, not the UTC one.
        assert_eq!(dt.date_naive(), NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
    }

    #[test]
    fn test_parse_rfc3339_with_z_suffix() {
        let dt = parse_timestamp("2024-02-01T06:00:00Z").unwrap();
        assert_eq!(dt.offset().local_minus_utc(), 0);
        assert_eq!(dt.date_naive(), NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
    }

    #[test]
    fn test_parse_rfc3339_with_offset() {
        let dt = parse_timestamp("2024-02-01T06:00:00+02:00").unwrap();
        assert_eq!(dt.offset().local_minus_utc(), 2 * 3600);
        assert_eq!(dt.hour(), 6);
    }

    #[test]
    fn test_parse_naive_datetime_is_anchored_at_utc() {
        let dt = parse_timestamp("2024-03-10 12:00:00").unwrap();
        assert_eq!(dt.offset().local_minus_utc(), 0);
        assert_eq!(dt.hour(), 12);
    }

    #[test]
    fn test_parse_fractional_seconds() {
        let dt = parse_timestamp("2024-03-10T12:00:00.250").unwrap();
        assert_eq!(dt.nanosecond(), 250_000_000);
    }

    #[test]
    fn test_parse_bare_date() {
        let dt = parse_timestamp("2024-03-10").unwrap();
        assert_eq!(dt.hour(), 0);
        assert_eq!(dt.date_naive(), NaiveDate::from_ymd_opt(2024, 3, 10).unwrap());
    }

    #[test]
    fn test_parse_tolerates_surrounding_whitespace() {
        assert!(parse_timestamp("  2024-03-10 12:00:00 +0000 ").is_ok());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        let err = parse_timestamp("last tuesday").unwrap_err();
        assert!(matches!(err, StepsError::TimestampParse(ref s) if s == "last tuesday"));
    }

    #[test]
    fn test_parse_rejects_empty() {
        assert!(matches!(
            parse_timestamp(""),
            Err(StepsError::TimestampParse(_))
        ));
    }

    #[test]
    fn test_parse_rejects_impossible_date() {
        assert!(parse_timestamp("2024-02-30 10:00:00 +0000").is_err());
    }

    #[test]
    fn test_month_start() {
        let date = NaiveDate::from_ymd_opt(2023, 12, 31).unwrap();
        assert_eq!(month_start(date), NaiveDate::from_ymd_opt(2023, 12, 1).unwrap());
    }

    #[test]
    fn test_days_between() {
        let a = NaiveDate::from_ymd_opt(2024, 2, 27).unwrap();
        let b = NaiveDate::from_ymd_opt(2024, 3, 2).unwrap();
        assert_eq!(days_between(a, b), 4);
        assert_eq!(days_between(b, a), -4);
    }
}
