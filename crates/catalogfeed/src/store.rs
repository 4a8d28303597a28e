//! Backing store access
//!
//! The store is a JSON file holding an array of objects. It is read fresh for
//! every listing, so edits to the file show up without a restart.

use std::path::{Path, PathBuf};

use catalogfeed_core::record::Record;

use crate::prelude::Error;

#[derive(Debug, Clone, clap::Args)]
pub struct StoreOptions {
    /// Path to the JSON record collection
    #[arg(long, env = "CATALOGFEED_STORE", default_value = "data.json")]
    pub store: PathBuf,
}

/// Read and decode the record collection at `path`
pub async fn load_records(path: &Path) -> Result<Vec<Record>, Error> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| Error::StoreUnreadable {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

    parse_records(&bytes).map_err(|e| Error::StoreMalformed {
        path: path.display().to_string(),
        reason: e.to_string(),
    })
}

/// Decode a record collection; anything but an array of objects is rejected
pub fn parse_records(bytes: &[u8]) -> Result<Vec<Record>, serde_json::Error> {
    serde_json::from_slice(bytes)
}
