//! `modified_after` filtering

use chrono::{DateTime, Utc};

use crate::record::{self, timestamp_from_value, Record};

/// Keep records modified strictly after `modified_after`
///
/// Without a cutoff every record is kept. Records are expected to be
/// normalized; one whose timestamp still does not parse is dropped once a
/// cutoff is given.
pub fn filter_modified_after(
    records: Vec<Record>,
    modified_after: Option<DateTime<Utc>>,
) -> Vec<Record> {
    let Some(cutoff) = modified_after else {
        return records;
    };

    records
        .into_iter()
        .filter(|r| {
            record::field(r, record::DATE_MODIFIED_FIELD)
                .and_then(timestamp_from_value)
                .is_some_and(|modified| modified > cutoff)
        })
        .collect()
}
