//! Date helper functions

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};

/// Parse a date string in various formats
///
/// Timestamps without an offset are taken as UTC.
pub fn parse_date(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    // RFC 3339 / ISO 8601 first, this is what the catalog carries
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    let datetime_formats = [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M:%S",
        "%Y/%m/%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y/%m/%d %H:%M",
    ];
    for fmt in datetime_formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(Utc.from_utc_datetime(&dt));
        }
    }

    let date_formats = ["%Y-%m-%d", "%Y/%m/%d", "%B %d, %Y", "%b %d, %Y"];
    for fmt in date_formats {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            let dt = d.and_hms_opt(0, 0, 0)?;
            return Some(Utc.from_utc_datetime(&dt));
        }
    }

    None
}

/// Format date in full format (like "May 24, 2025")
pub fn full_date<Tz: TimeZone>(date: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    date.format("%B %-d, %Y").to_string()
}

/// Format date in short form (like "May 4, 2025")
pub fn short_date<Tz: TimeZone>(date: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    date.format("%b %-d, %Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date_formats() {
        let rfc = parse_date("2025-05-24T09:30:00.000Z").unwrap();
        assert_eq!(rfc.format("%Y-%m-%d %H:%M").to_string(), "2025-05-24 09:30");

        let plain = parse_date("2025-05-24").unwrap();
        assert_eq!(plain.format("%Y-%m-%d").to_string(), "2025-05-24");

        let long = parse_date("June 12, 2025").unwrap();
        assert_eq!(long.format("%Y-%m-%d").to_string(), "2025-06-12");

        assert!(parse_date("").is_none());
        assert!(parse_date("last tuesday").is_none());
    }

    #[test]
    fn test_full_date() {
        let date = Utc.with_ymd_and_hms(2025, 5, 4, 10, 30, 0).unwrap();
        assert_eq!(full_date(&date), "May 4, 2025");
    }

    #[test]
    fn test_short_date() {
        let date = Utc.with_ymd_and_hms(2025, 9, 14, 23, 0, 0).unwrap();
        assert_eq!(short_date(&date), "Sep 14, 2025");
    }
}
