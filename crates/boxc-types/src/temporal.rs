//! Date literal parsing for metadata properties.

use chrono::{DateTime, NaiveDate, Utc};

use crate::error::TypeError;

/// Parse a date literal from the metadata graph.
///
/// Accepts RFC 3339 timestamps (`2030-01-01T00:00:00Z`) and bare dates
/// (`2030-01-01`, read as midnight UTC). Surrounding whitespace is ignored.
pub fn parse_date(literal: &str) -> Result<DateTime<Utc>, TypeError> {
    let trimmed = literal.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| TypeError::InvalidDate(literal.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn parses_rfc3339() {
        let dt = parse_date("2031-05-04T10:30:00Z").unwrap();
        assert_eq!(dt.year(), 2031);
        assert_eq!(dt.hour(), 10);
    }

    #[test]
    fn parses_offset_into_utc() {
        let dt = parse_date("2031-05-04T10:30:00-04:00").unwrap();
        assert_eq!(dt.hour(), 14);
    }

    #[test]
    fn parses_bare_date_as_midnight() {
        let dt = parse_date(" 2030-01-01 ").unwrap();
        assert_eq!((dt.year(), dt.month(), dt.day(), dt.hour()), (2030, 1, 1, 0));
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(
            parse_date("next tuesday").unwrap_err(),
            TypeError::InvalidDate("next tuesday".into())
        );
        assert!(parse_date("2030-13-01").is_err());
    }
}
