use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};

/// Three-letter English month abbreviations, indexed by `month0`.
pub const MONTH_ABBREVIATIONS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];

const DATE_TIME_FORMATS: [&str; 7] = [
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%dT%H:%MZ",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
];

/// Parses the date shapes commonly found in exported sales sheets.
///
/// The calendar date is taken as written: timestamps carrying an offset keep
/// their local date rather than being shifted to UTC. Returns `None` for
/// anything unrecognised.
pub fn parse_sale_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(raw, format) {
            return Some(date);
        }
    }

    for format in DATE_TIME_FORMATS {
        if let Ok(date_time) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(date_time.date());
        }
    }

    if let Ok(date_time) = DateTime::parse_from_rfc3339(raw) {
        return Some(date_time.date_naive());
    }

    if is_year_month(raw) {
        return NaiveDate::parse_from_str(&format!("{}-01", raw), "%Y-%m-%d").ok();
    }

    None
}

/// Matches the `YYYY-MM` shape exactly.
fn is_year_month(raw: &str) -> bool {
    let bytes = raw.as_bytes();
    bytes.len() == 7
        && bytes[4] == b'-'
        && bytes[..4].iter().all(u8::is_ascii_digit)
        && bytes[5..].iter().all(u8::is_ascii_digit)
}

/// Returns the month bucket index (0 = January) for a raw date string.
pub fn month_index(raw: &str) -> Option<usize> {
    parse_sale_date(raw).map(|date| date.month0() as usize)
}

/// Short label for a 0-based month index.
pub fn month_label(month0: usize) -> &'static str {
    MONTH_ABBREVIATIONS[month0 % 12]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_iso_date() {
        assert_eq!(
            parse_sale_date("2024-01-15"),
            NaiveDate::from_ymd_opt(2024, 1, 15)
        );
        assert_eq!(
            parse_sale_date("  2024/02/29 "),
            NaiveDate::from_ymd_opt(2024, 2, 29)
        );
    }

    #[test]
    fn test_parse_us_date() {
        assert_eq!(
            parse_sale_date("03/05/2023"),
            NaiveDate::from_ymd_opt(2023, 3, 5)
        );
    }

    #[test]
    fn test_parse_timestamps() {
        assert_eq!(
            parse_sale_date("2024-04-08T10:30:00"),
            NaiveDate::from_ymd_opt(2024, 4, 8)
        );
        assert_eq!(
            parse_sale_date("2024-04-08 10:30:00.250"),
            NaiveDate::from_ymd_opt(2024, 4, 8)
        );
        // Offset timestamps keep the written calendar date
        assert_eq!(
            parse_sale_date("2024-01-01T00:30:00+05:00"),
            NaiveDate::from_ymd_opt(2024, 1, 1)
        );
    }

    #[test]
    fn test_parse_minute_precision_timestamps() {
        let expected = NaiveDate::from_ymd_opt(2024, 1, 15);
        assert_eq!(parse_sale_date("2024-01-15T10:30"), expected);
        assert_eq!(parse_sale_date("2024-01-15 10:30"), expected);
        assert_eq!(parse_sale_date("2024-01-15T10:30Z"), expected);
        assert_eq!(month_index("2024-01-15T10:30"), Some(0));
    }

    #[test]
    fn test_parse_year_month() {
        assert_eq!(
            parse_sale_date("2023-11"),
            NaiveDate::from_ymd_opt(2023, 11, 1)
        );
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(parse_sale_date(""), None);
        assert_eq!(parse_sale_date("not a date"), None);
        assert_eq!(parse_sale_date("2023-13-01"), None);
        assert_eq!(parse_sale_date("2023-02-30"), None);
        assert_eq!(parse_sale_date("5-3"), None);
        assert_eq!(parse_sale_date("24-03"), None);
        assert_eq!(parse_sale_date("2024-3"), None);
        assert_eq!(month_index("5-3"), None);
    }

    #[test]
    fn test_month_labels() {
        assert_eq!(month_index("2022-01-31"), Some(0));
        assert_eq!(month_index("2024-12-01"), Some(11));
        assert_eq!(month_label(0), "Jan");
        assert_eq!(month_label(8), "Sep");
        assert_eq!(month_label(11), "Dec");
    }
}
