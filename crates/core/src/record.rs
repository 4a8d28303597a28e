//! Record model and timestamp helpers
//!
//! A record is an open-ended JSON object. The pipeline only looks at a handful
//! of well-known fields; everything else is carried through untouched.

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, TimeZone, Utc};
use serde_json::{Map, Value};

/// One catalog item as read from the backing store
pub type Record = Map<String, Value>;

/// Identifier field; records without it are not items
pub const ID_FIELD: &str = "id";

/// Modification timestamp field, rewritten to canonical form during normalization
pub const DATE_MODIFIED_FIELD: &str = "date_modified";

const OFFSET_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f%#z",
    "%Y-%m-%d %H:%M:%S%.f%#z",
    "%Y-%m-%dT%H:%M%#z",
    "%Y-%m-%d %H:%M%#z",
];

const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Returns the value of `field`, treating JSON `null` the same as a missing key
pub fn field<'a>(record: &'a Record, field: &str) -> Option<&'a Value> {
    record.get(field).filter(|value| !value.is_null())
}

/// Whether the record carries an identifier
pub fn has_id(record: &Record) -> bool {
    field(record, ID_FIELD).is_some()
}

/// Parse a timestamp string
///
/// Accepts RFC 3339, RFC 2822 and ISO-8601 date-times with or without seconds
/// (`T` or a space as separator; no offset means UTC). Date-only forms
/// `YYYY-MM-DD`, `YYYY-MM` and `YYYY` read as UTC midnight of the first day.
pub fn parse_timestamp(input: &str) -> Option<DateTime<Utc>> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(input, format) {
            return Some(dt.with_timezone(&Utc));
        }
    }

    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(input, format) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }

    let date = NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .ok()
        .or_else(|| parse_partial_date(input));
    if let Some(date) = date {
        return date.and_hms_opt(0, 0, 0).map(|naive| Utc.from_utc_datetime(&naive));
    }

    DateTime::parse_from_rfc2822(input)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// `YYYY-MM` or `YYYY`, pinned to the first day
fn parse_partial_date(input: &str) -> Option<NaiveDate> {
    let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());

    let (year, month) = match input.split_once('-') {
        Some((year, month)) if month.len() == 2 && all_digits(month) => (year, month.parse().ok()?),
        Some(_) => return None,
        None => (input, 1),
    };
    if year.len() != 4 || !all_digits(year) {
        return None;
    }

    NaiveDate::from_ymd_opt(year.parse().ok()?, month, 1)
}

/// Parse a timestamp held in a JSON value
///
/// Strings go through [`parse_timestamp`]; numbers are milliseconds since the
/// Unix epoch. Anything else is not a timestamp.
pub fn timestamp_from_value(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(s) => parse_timestamp(s),
        Value::Number(n) => {
            let millis = n.as_i64().or_else(|| {
                n.as_f64()
                    .filter(|f| f.is_finite() && f.abs() < i64::MAX as f64)
                    .map(|f| f.trunc() as i64)
            })?;
            DateTime::<Utc>::from_timestamp_millis(millis)
        }
        _ => None,
    }
}

/// Canonical timestamp representation: ISO-8601 UTC with millisecond precision
pub fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> Record {
        match value {
            Value::Object(map) => map,
            _ => panic!("fixture must be an object"),
        }
    }

    // ============================================================================
    // field / has_id tests
    // ============================================================================

    #[test]
    fn test_field_treats_null_as_missing() {
        let r = record(json!({"id": 1, "price": null}));
        assert!(field(&r, "price").is_none());
        assert!(field(&r, "title").is_none());
        assert_eq!(field(&r, "id"), Some(&json!(1)));
    }

    #[test]
    fn test_has_id() {
        assert!(has_id(&record(json!({"id": "item2"}))));
        assert!(has_id(&record(json!({"id": 0}))));
        assert!(!has_id(&record(json!({"id": null}))));
        assert!(!has_id(&record(json!({"name": "no id"}))));
    }

    // ============================================================================
    // parse_timestamp tests
    // ============================================================================

    #[test]
    fn test_parse_timestamp_rfc3339() {
        let ts = parse_timestamp("2024-01-01T00:00:00Z").unwrap();
        assert_eq!(format_timestamp(&ts), "2024-01-01T00:00:00.000Z");
    }

    #[test]
    fn test_parse_timestamp_with_offset() {
        let ts = parse_timestamp("2024-01-01T03:30:00+03:30").unwrap();
        assert_eq!(format_timestamp(&ts), "2024-01-01T00:00:00.000Z");
    }

    #[test]
    fn test_parse_timestamp_naive_is_utc() {
        let ts = parse_timestamp("2024-02-01T12:15:30.250").unwrap();
        assert_eq!(format_timestamp(&ts), "2024-02-01T12:15:30.250Z");

        let ts = parse_timestamp("2024-02-01 12:15:30").unwrap();
        assert_eq!(format_timestamp(&ts), "2024-02-01T12:15:30.000Z");
    }

    #[test]
    fn test_parse_timestamp_date_only() {
        let ts = parse_timestamp("2024-03-15").unwrap();
        assert_eq!(format_timestamp(&ts), "2024-03-15T00:00:00.000Z");
    }

    #[test]
    fn test_parse_timestamp_without_seconds() {
        let ts = parse_timestamp("2024-01-01T10:30").unwrap();
        assert_eq!(format_timestamp(&ts), "2024-01-01T10:30:00.000Z");

        let ts = parse_timestamp("2024-01-01 10:30").unwrap();
        assert_eq!(format_timestamp(&ts), "2024-01-01T10:30:00.000Z");
    }

    #[test]
    fn test_parse_timestamp_without_seconds_with_zone() {
        let ts = parse_timestamp("2024-01-01T10:30Z").unwrap();
        assert_eq!(format_timestamp(&ts), "2024-01-01T10:30:00.000Z");

        let ts = parse_timestamp("2024-01-01T14:00+03:30").unwrap();
        assert_eq!(format_timestamp(&ts), "2024-01-01T10:30:00.000Z");
    }

    #[test]
    fn test_parse_timestamp_year_and_month() {
        let ts = parse_timestamp("2024-05").unwrap();
        assert_eq!(format_timestamp(&ts), "2024-05-01T00:00:00.000Z");

        let ts = parse_timestamp("2024").unwrap();
        assert_eq!(format_timestamp(&ts), "2024-01-01T00:00:00.000Z");
    }

    #[test]
    fn test_parse_timestamp_rejects_bad_partial_dates() {
        assert!(parse_timestamp("2024-13").is_none());
        assert!(parse_timestamp("2024-1").is_none());
        assert!(parse_timestamp("24").is_none());
        assert!(parse_timestamp("20245").is_none());
        assert!(parse_timestamp("2024-+1").is_none());
    }

    #[test]
    fn test_parse_timestamp_reads_back_extended_years() {
        let ts = timestamp_from_value(&json!(253402300800000_i64)).unwrap();
        let canonical = format_timestamp(&ts);
        assert_eq!(canonical, "+10000-01-01T00:00:00.000Z");
        assert_eq!(parse_timestamp(&canonical), Some(ts));
    }

    #[test]
    fn test_parse_timestamp_rfc2822() {
        let ts = parse_timestamp("Mon, 01 Jan 2024 00:00:00 +0000").unwrap();
        assert_eq!(format_timestamp(&ts), "2024-01-01T00:00:00.000Z");
    }

    #[test]
    fn test_parse_timestamp_rejects_garbage() {
        assert!(parse_timestamp("").is_none());
        assert!(parse_timestamp("   ").is_none());
        assert!(parse_timestamp("not a date").is_none());
        assert!(parse_timestamp("2024-13-45").is_none());
    }

    // ============================================================================
    // timestamp_from_value tests
    // ============================================================================

    #[test]
    fn test_timestamp_from_value_epoch_millis() {
        let ts = timestamp_from_value(&json!(1704067200000_i64)).unwrap();
        assert_eq!(format_timestamp(&ts), "2024-01-01T00:00:00.000Z");
    }

    #[test]
    fn test_timestamp_from_value_non_timestamp_types() {
        assert!(timestamp_from_value(&json!(true)).is_none());
        assert!(timestamp_from_value(&json!(null)).is_none());
        assert!(timestamp_from_value(&json!(["2024-01-01"])).is_none());
        assert!(timestamp_from_value(&json!({"at": "2024-01-01"})).is_none());
    }
}
