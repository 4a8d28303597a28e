//! Record normalization
//!
//! Drops non-items and rewrites the modification timestamp into its canonical
//! form. This is the only place the pipeline changes a record's contents.

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::record::{self, format_timestamp, has_id, timestamp_from_value, Record};

/// Normalize a record collection
///
/// Records without an identifier are dropped. Every other record gets its
/// `date_modified` rewritten as ISO-8601 UTC; a missing or unparseable value is
/// replaced by `now`. Input order is preserved.
pub fn normalize_records(records: Vec<Record>, now: DateTime<Utc>) -> Vec<Record> {
    records
        .into_iter()
        .filter(has_id)
        .map(|r| normalize_record(r, now))
        .collect()
}

fn normalize_record(mut r: Record, now: DateTime<Utc>) -> Record {
    let modified = record::field(&r, record::DATE_MODIFIED_FIELD)
        .and_then(timestamp_from_value)
        .unwrap_or(now);

    r.insert(
        record::DATE_MODIFIED_FIELD.to_string(),
        Value::String(format_timestamp(&modified)),
    );
    r
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::parse_timestamp;
    use serde_json::json;

    fn now() -> DateTime<Utc> {
        parse_timestamp("2025-06-01T12:00:00Z").unwrap()
    }

    fn records(values: Vec<Value>) -> Vec<Record> {
        values
            .into_iter()
            .map(|v| match v {
                Value::Object(map) => map,
                _ => panic!("fixture must be an object"),
            })
            .collect()
    }

    #[test]
    fn test_normalize_drops_records_without_id() {
        let out = normalize_records(
            records(vec![
                json!({"id": 1, "date_modified": "2024-01-01T00:00:00Z"}),
                json!({"title": "orphan", "date_modified": "2024-01-01T00:00:00Z"}),
                json!({"id": null}),
                json!({"id": 2}),
            ]),
            now(),
        );

        assert_eq!(out.len(), 2);
        assert_eq!(out[0]["id"], json!(1));
        assert_eq!(out[1]["id"], json!(2));
    }

    #[test]
    fn test_normalize_canonicalizes_timestamps() {
        let out = normalize_records(
            records(vec![
                json!({"id": 1, "date_modified": "2024-01-01T00:00:00Z"}),
                json!({"id": 2, "date_modified": "2024-02-01"}),
                json!({"id": 3, "date_modified": 1704067200000_i64}),
            ]),
            now(),
        );

        assert_eq!(out[0]["date_modified"], json!("2024-01-01T00:00:00.000Z"));
        assert_eq!(out[1]["date_modified"], json!("2024-02-01T00:00:00.000Z"));
        assert_eq!(out[2]["date_modified"], json!("2024-01-01T00:00:00.000Z"));
    }

    #[test]
    fn test_normalize_falls_back_to_now() {
        let out = normalize_records(
            records(vec![
                json!({"id": 1, "date_modified": "last tuesday"}),
                json!({"id": 2}),
                json!({"id": 3, "date_modified": null}),
                json!({"id": 4, "date_modified": false}),
            ]),
            now(),
        );

        for r in &out {
            assert_eq!(r["date_modified"], json!("2025-06-01T12:00:00.000Z"));
        }
    }

    #[test]
    fn test_normalize_preserves_other_fields_and_order() {
        let out = normalize_records(
            records(vec![json!({
                "id": "p-1",
                "title": "چای سبز",
                "price": 120000,
                "date_modified": "2024-01-01T00:00:00Z",
                "tags": ["tea", "green"]
            })]),
            now(),
        );

        let keys: Vec<&str> = out[0].keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["id", "title", "price", "date_modified", "tags"]);
        assert_eq!(out[0]["title"], json!("چای سبز"));
        assert_eq!(out[0]["tags"], json!(["tea", "green"]));
    }
}
