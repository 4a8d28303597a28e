use crate::prelude::{eprintln, println, *};
use crate::store::{load_records, StoreOptions};
use catalogfeed_core::pipeline::{run_pipeline, Envelope};
use catalogfeed_core::query::QueryParams;

#[derive(Debug, clap::Args)]
pub struct QueryOptions {
    #[clap(flatten)]
    pub store: StoreOptions,

    /// Only list records modified strictly after this instant
    #[arg(long)]
    pub modified_after: Option<String>,

    /// Field to sort by (defaults to date_modified)
    #[arg(long)]
    pub order_by: Option<String>,

    /// Sort direction: asc or desc (defaults to desc)
    #[arg(long)]
    pub order: Option<String>,

    /// Number of records to skip
    #[arg(long, allow_hyphen_values = true)]
    pub skip: Option<String>,

    /// Page size (defaults to 10)
    #[arg(long, allow_hyphen_values = true)]
    pub take: Option<String>,
}

impl QueryOptions {
    fn params(&self) -> QueryParams {
        QueryParams {
            modified_after: self.modified_after.clone(),
            order_by: self.order_by.clone(),
            order: self.order.clone(),
            skip: self.skip.clone(),
            take: self.take.clone(),
        }
    }
}

pub async fn run(options: QueryOptions, global: crate::Global) -> Result<()> {
    if global.verbose {
        eprintln!("Reading store {}...", options.store.store.display());
    }

    let records = load_records(&options.store.store).await?;
    let envelope = run_pipeline(records, &options.params(), chrono::Utc::now());

    if global.verbose {
        eprintln!(
            "{} matching records, showing {}",
            envelope.total_count,
            envelope.items.len()
        );
    }

    println!("{}", format_envelope_json(&envelope)?);

    Ok(())
}

/// Convert an envelope to pretty JSON
fn format_envelope_json(envelope: &Envelope) -> Result<String> {
    serde_json::to_string_pretty(envelope).map_err(|e| eyre!("JSON serialization failed: {}", e))
}
