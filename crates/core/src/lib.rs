//! Core library for catalogfeed
//!
//! This crate implements the **Functional Core** of the catalogfeed server,
//! following the Functional Core - Imperative Shell architectural pattern.
//!
//! # Architecture Overview
//!
//! - **`catalogfeed_core`** (this crate): the query pipeline, with zero I/O
//! - **`catalogfeed`**: reading the store, the HTTP server and the CLI (the Imperative Shell)
//!
//! Every function here is pure. Even the current time is an argument, so the
//! same records and parameters always produce the same envelope.
//!
//! # Module Organization
//!
//! - [`record`]: the open-ended record type and timestamp parsing
//! - [`query`]: raw and typed query parameters
//! - [`normalize`], [`filter`], [`sort`], [`paginate`]: the four pipeline stages
//! - [`collation`]: natural, Persian-aware string ordering used by [`sort`]
//! - [`pipeline`]: stage composition and the response [`pipeline::Envelope`]
//!
//! # Example Usage
//!
//! ```rust,ignore
//! use catalogfeed_core::pipeline::run_pipeline;
//! use catalogfeed_core::query::QueryParams;
//!
//! let records = serde_json::from_str(r#"[{"id": 1, "date_modified": "2024-01-01"}]"#)?;
//! let params = QueryParams::from_pairs([("order", "asc"), ("take", "5")]);
//!
//! let envelope = run_pipeline(records, &params, chrono::Utc::now());
//! assert_eq!(envelope.total_count, 1);
//! ```

pub mod collation;
pub mod filter;
pub mod normalize;
pub mod paginate;
pub mod pipeline;
pub mod query;
pub mod record;
pub mod sort;
