//! Date helper functions

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};

/// Parse a content date string
///
/// Date-only values mean midnight UTC. Values with a time but no offset
/// are read as UTC as well.
pub fn parse_content_date(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    let datetime_formats = [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
    ];
    for fmt in datetime_formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(Utc.from_utc_datetime(&dt));
        }
    }

    for fmt in ["%Y-%m-%d", "%Y/%m/%d"] {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(Utc.from_utc_datetime(&d.and_hms_opt(0, 0, 0)?));
        }
    }

    None
}

/// Format a content date for display (like "January 5, 2024")
///
/// Returns an empty string for empty or unparseable input.
pub fn format_date(s: &str) -> String {
    parse_content_date(s)
        .map(|d| full_date(&d))
        .unwrap_or_default()
}

/// Format date in full format (like "January 5, 2024")
pub fn full_date<Tz: TimeZone>(date: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    date.format("%B %-d, %Y").to_string()
}

/// Format a date for RSS `pubDate` / `lastBuildDate`
pub fn date_rfc2822<Tz: TimeZone>(date: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    date.to_rfc2822()
}

/// Format a date in W3C datetime form for sitemaps
pub fn date_w3c(date: &DateTime<Utc>) -> String {
    date.to_rfc3339_opts(chrono::SecondsFormat::Secs, true)
}

/// English month name for a 1-based month number
pub fn month_name(month: u32) -> Option<&'static str> {
    const MONTHS: [&str; 12] = [
        "January",
        "February",
        "March",
        "April",
        "May",
        "June",
        "July",
        "August",
        "September",
        "October",
        "November",
        "December",
    ];
    MONTHS.get(month.checked_sub(1)? as usize).copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    #[test]
    fn test_parse_date_only_is_utc_midnight() {
        let date = parse_content_date("2024-03-01").unwrap();
        assert_eq!(date, Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_datetime_variants() {
        let a = parse_content_date("2024-03-01T10:30:00Z").unwrap();
        let b = parse_content_date("2024-03-01T12:30:00+02:00").unwrap();
        let c = parse_content_date("2024-03-01T10:30:00").unwrap();
        assert_eq!(a, b);
        assert_eq!(a, c);
        assert_eq!(a.day(), 1);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_content_date("").is_none());
        assert!(parse_content_date("yesterday").is_none());
        assert!(parse_content_date("2024-13-01").is_none());
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date("2024-01-05"), "January 5, 2024");
        assert_eq!(format_date("2023-12-31T23:00:00Z"), "December 31, 2023");
        assert_eq!(format_date(""), "");
    }

    #[test]
    fn test_month_name() {
        assert_eq!(month_name(1), Some("January"));
        assert_eq!(month_name(12), Some("December"));
        assert_eq!(month_name(0), None);
        assert_eq!(month_name(13), None);
    }

    #[test]
    fn test_w3c() {
        let date = Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap();
        assert_eq!(date_w3c(&date), "2024-02-01T00:00:00Z");
    }
}
