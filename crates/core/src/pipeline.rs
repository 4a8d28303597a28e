//! Query pipeline
//!
//! Normalize → Filter → Sort → Paginate, then wrap the result in the
//! [`Envelope`] the feed client expects. The pipeline is total: malformed
//! records and parameters degrade to documented defaults instead of failing.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::filter::filter_modified_after;
use crate::normalize::normalize_records;
use crate::query::{Query, QueryParams};
use crate::record::Record;
use crate::sort::{sort_records, ComparatorRegistry};

/// Response body of a listing
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Envelope {
    /// Matching records after filtering, before pagination
    pub total_count: usize,
    pub items: Vec<Record>,
}

/// Run the pipeline with the default comparator registry
///
/// `now` stands in for unparseable modification timestamps.
pub fn run_pipeline(records: Vec<Record>, params: &QueryParams, now: DateTime<Utc>) -> Envelope {
    run_query(
        records,
        &Query::from_params(params),
        &ComparatorRegistry::default(),
        now,
    )
}

/// Run the pipeline for an already parsed query
pub fn run_query(
    records: Vec<Record>,
    query: &Query,
    registry: &ComparatorRegistry,
    now: DateTime<Utc>,
) -> Envelope {
    let records = normalize_records(records, now);
    let records = filter_modified_after(records, query.modified_after);
    let total_count = records.len();

    let records = sort_records(records, &query.order_by, query.order, registry);

    Envelope {
        total_count,
        items: query.page.apply(records),
    }
}
