//! Date attributes
//!
//! Backend dates arrive as display text in a few shapes. The visible text
//! is kept as sent; a machine-readable `datetime` value is added when the
//! text parses.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Day formats seen from the backend, tried in order
const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%b %d, %Y", "%B %d, %Y", "%m/%d/%Y"];

/// Timestamp formats seen from the backend (Gson's default date rendering)
const DATE_TIME_FORMATS: [&str; 2] = ["%b %d, %Y, %I:%M:%S %p", "%b %d, %Y %I:%M:%S %p"];

/// ISO `YYYY-MM-DD` for a backend date, if it can be read
pub fn iso_date(text: &str) -> Option<String> {
    // Newer JVMs put a narrow no-break space before AM/PM.
    let text = text.trim().replace('\u{202f}', " ");
    if text.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(&text) {
        return Some(dt.date_naive().format("%Y-%m-%d").to_string());
    }

    DATE_TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(&text, fmt).ok())
        .map(|dt| dt.date())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(&text, fmt).ok())
        })
        .map(|date| date.format("%Y-%m-%d").to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_iso_date_shapes() {
        assert_eq!(iso_date("2020-11-03").as_deref(), Some("2020-11-03"));
        assert_eq!(iso_date("2020-11-03T08:00:00Z").as_deref(), Some("2020-11-03"));
        assert_eq!(iso_date("Nov 3, 2020").as_deref(), Some("2020-11-03"));
        assert_eq!(iso_date("November 3, 2020").as_deref(), Some("2020-11-03"));
        assert_eq!(iso_date("11/03/2020").as_deref(), Some("2020-11-03"));
        assert_eq!(iso_date("Nov 3, 2020, 12:00:00 AM").as_deref(), Some("2020-11-03"));
        assert_eq!(
            iso_date("Nov 3, 2020, 12:00:00\u{202f}AM").as_deref(),
            Some("2020-11-03")
        );
    }

    #[test]
    fn test_iso_date_unreadable() {
        assert_eq!(iso_date(""), None);
        assert_eq!(iso_date("next Tuesday"), None);
    }
}
