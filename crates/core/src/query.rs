//! Query parameter parsing
//!
//! Raw parameters arrive as optional strings straight from the URL. Turning them
//! into a typed [`Query`] never fails: anything that does not parse falls back
//! to its default, so a bad `skip` or `modified_after` degrades the request
//! instead of rejecting it.

use chrono::{DateTime, Utc};

use crate::paginate::Page;
use crate::record::{parse_timestamp, DATE_MODIFIED_FIELD};

/// Field used for sorting when the caller does not name one
pub const DEFAULT_ORDER_BY: &str = DATE_MODIFIED_FIELD;

/// Raw query parameters as received from the caller
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct QueryParams {
    pub modified_after: Option<String>,
    pub order_by: Option<String>,
    pub order: Option<String>,
    pub skip: Option<String>,
    pub take: Option<String>,
}

impl QueryParams {
    /// Build parameters from decoded key/value pairs
    ///
    /// The first occurrence of a key wins; unknown keys are ignored.
    pub fn from_pairs<K, V, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut params = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_ref() {
                "modified_after" => &mut params.modified_after,
                "order_by" => &mut params.order_by,
                "order" => &mut params.order,
                "skip" => &mut params.skip,
                "take" => &mut params.take,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.into());
            }
        }
        params
    }
}

/// Sort direction
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    /// `"asc"` sorts ascending; any other value, or none, sorts descending
    pub fn parse(input: Option<&str>) -> Self {
        match input {
            Some("asc") => SortOrder::Asc,
            _ => SortOrder::Desc,
        }
    }
}

/// Typed, defaulted view of [`QueryParams`]
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    pub modified_after: Option<DateTime<Utc>>,
    pub order_by: String,
    pub order: SortOrder,
    pub page: Page,
}

impl Default for Query {
    fn default() -> Self {
        Self {
            modified_after: None,
            order_by: DEFAULT_ORDER_BY.to_string(),
            order: SortOrder::default(),
            page: Page::default(),
        }
    }
}

impl Query {
    pub fn from_params(params: &QueryParams) -> Self {
        let order_by = params
            .order_by
            .as_deref()
            .map(str::trim)
            .filter(|field| !field.is_empty())
            .unwrap_or(DEFAULT_ORDER_BY)
            .to_string();

        Self {
            modified_after: params.modified_after.as_deref().and_then(parse_timestamp),
            order_by,
            order: SortOrder::parse(params.order.as_deref()),
            page: Page::parse(params.skip.as_deref(), params.take.as_deref()),
        }
    }
}
