//! Record sorting
//!
//! Records are sorted by a single field. How values of that field compare is
//! looked up in a [`ComparatorRegistry`], so giving a field different ordering
//! rules is a registration, not a new branch.
//!
//! Regardless of comparator:
//!
//! - records whose field is missing or `null` go last, in either direction;
//! - records with equal keys keep their input order.

use std::cmp::Ordering;
use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::collation::{CollationKey, Numeral};
use crate::query::SortOrder;
use crate::record::{self, Record, DATE_MODIFIED_FIELD};

/// Field that [`ComparatorRegistry::default`] treats as a numeric amount
pub const PRICE_FIELD: &str = "price";

/// How values of a field compare
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKind {
    /// Numbers numerically, everything else as natural, Persian-aware text
    Natural,
    /// Like `Natural`, but strings holding a plain decimal compare as numbers
    Numeric,
    /// Numbers numerically and before strings, strings by code point
    Ordinal,
    /// Chronologically; values that are not timestamps rank above every
    /// timestamp and compare among themselves as `Natural`
    Timestamp,
}

/// Comparison key of a single field value
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
enum SortKey {
    Instant(DateTime<Utc>),
    Number(Numeral),
    Text(String),
    Collated(CollationKey),
}

impl SortKind {
    fn key(self, value: &Value) -> SortKey {
        match (self, value) {
            (SortKind::Timestamp, _) => match record::timestamp_from_value(value) {
                Some(instant) => SortKey::Instant(instant),
                None => SortKind::Natural.key(value),
            },
            (SortKind::Ordinal, Value::Number(n)) => match Numeral::from_json(n) {
                Some(numeral) => SortKey::Number(numeral),
                None => SortKey::Text(n.to_string()),
            },
            (SortKind::Ordinal, _) => SortKey::Text(stringify(value)),
            (_, Value::Number(n)) => SortKey::Collated(collated_number(n)),
            (SortKind::Numeric, Value::String(s)) => SortKey::Collated(
                Numeral::parse(s).map_or_else(|| CollationKey::new(s), CollationKey::from),
            ),
            (_, _) => SortKey::Collated(CollationKey::new(&stringify(value))),
        }
    }
}

/// Field name to [`SortKind`] lookup with a fallback for unregistered fields
#[derive(Debug, Clone)]
pub struct ComparatorRegistry {
    kinds: HashMap<String, SortKind>,
    fallback: SortKind,
}

impl Default for ComparatorRegistry {
    /// `date_modified` is a timestamp, `price` is numeric, everything else is
    /// natural.
    fn default() -> Self {
        Self::new(SortKind::Natural)
            .register(DATE_MODIFIED_FIELD, SortKind::Timestamp)
            .register(PRICE_FIELD, SortKind::Numeric)
    }
}

impl ComparatorRegistry {
    /// Empty registry using `fallback` for every field
    pub fn new(fallback: SortKind) -> Self {
        Self {
            kinds: HashMap::new(),
            fallback,
        }
    }

    pub fn register(mut self, field: impl Into<String>, kind: SortKind) -> Self {
        self.kinds.insert(field.into(), kind);
        self
    }

    pub fn kind_for(&self, field: &str) -> SortKind {
        self.kinds.get(field).copied().unwrap_or(self.fallback)
    }
}

/// Stable-sort `records` by `field`
///
/// Keys are computed once per record, then compared.
pub fn sort_records(
    records: Vec<Record>,
    field: &str,
    order: SortOrder,
    registry: &ComparatorRegistry,
) -> Vec<Record> {
    let kind = registry.kind_for(field);

    let mut keyed: Vec<(Option<SortKey>, Record)> = records
        .into_iter()
        .map(|r| (record::field(&r, field).map(|value| kind.key(value)), r))
        .collect();

    keyed.sort_by(|(a, _), (b, _)| compare_keys(a.as_ref(), b.as_ref(), order));

    keyed.into_iter().map(|(_, r)| r).collect()
}

fn compare_keys(a: Option<&SortKey>, b: Option<&SortKey>, order: SortOrder) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => match order {
            SortOrder::Asc => a.cmp(b),
            SortOrder::Desc => b.cmp(a),
        },
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn collated_number(n: &serde_json::Number) -> CollationKey {
    match Numeral::from_json(n) {
        Some(numeral) => CollationKey::from(numeral),
        None => CollationKey::new(&n.to_string()),
    }
}

/// String form of a non-string value used for text comparison
fn stringify(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
