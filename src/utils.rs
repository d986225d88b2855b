use chrono::NaiveDateTime;

use crate::errors::{EstimatorError, Result};

/// Format of the first 16 characters of every timestamp cell.
pub const MINUTE_FORMAT: &str = "%Y-%m-%d %H:%M";
const PREFIX_LEN: usize = 16;

/// Parse a float that may use comma as decimal separator
pub fn parse_locale_float(s: &str) -> std::result::Result<f64, std::num::ParseFloatError> {
    s.replace(',', ".").parse::<f64>()
}

/// Parse a raw timestamp cell with minute resolution.
///
/// Anything after the first 16 characters (seconds, fractions, zone suffix)
/// is ignored, so `2023-01-05 10:15:59.000` and `2023-01-05 10:15` parse to
/// the same value.
pub fn parse_minute_timestamp(raw: &str) -> Result<NaiveDateTime> {
    let prefix: String = raw.chars().take(PREFIX_LEN).collect();
    NaiveDateTime::parse_from_str(&prefix, MINUTE_FORMAT).map_err(|e| EstimatorError::Format {
        value: raw.to_string(),
        format: MINUTE_FORMAT.to_string(),
        message: e.to_string(),
    })
}

/// Whole minutes since 1970-01-01T00:00, truncated toward zero.
pub fn minutes_since_epoch(timestamp: &NaiveDateTime) -> i64 {
    timestamp.and_utc().timestamp() / 60
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_locale_float() {
        assert_eq!(parse_locale_float("12,5").unwrap(), 12.5);
        assert_eq!(parse_locale_float("-3.25").unwrap(), -3.25);
        assert!(parse_locale_float("abc").is_err());
    }

    #[test]
    fn test_parse_truncates_to_minute_prefix() {
        let a = parse_minute_timestamp("2023-01-05 10:15:59.123").unwrap();
        let b = parse_minute_timestamp("2023-01-05 10:15").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_parse_rejects_malformed_prefix() {
        let err = parse_minute_timestamp("05.01.2023 10:15").unwrap_err();
        assert!(matches!(err, EstimatorError::Format { .. }));
        assert!(parse_minute_timestamp("").is_err());
    }

    #[test]
    fn test_minutes_since_epoch() {
        let epoch = parse_minute_timestamp("1970-01-01 00:00").unwrap();
        assert_eq!(minutes_since_epoch(&epoch), 0);

        let t = parse_minute_timestamp("1970-01-01 01:40").unwrap();
        assert_eq!(minutes_since_epoch(&t), 100);

        let before = parse_minute_timestamp("1969-12-31 23:59").unwrap();
        assert_eq!(minutes_since_epoch(&before), -1);
    }

    #[test]
    fn test_reparse_of_canonical_form_is_idempotent() {
        for raw in ["2021-03-28 02:30:00", "1999-12-31 23:59", "2024-02-29 00:01:30+01"] {
            let parsed = parse_minute_timestamp(raw).unwrap();
            let canonical = parsed.format("%Y-%m-%d %H:%M:%S").to_string();
            let reparsed = parse_minute_timestamp(&canonical).unwrap();
            assert_eq!(minutes_since_epoch(&parsed), minutes_since_epoch(&reparsed));
        }
    }
}
