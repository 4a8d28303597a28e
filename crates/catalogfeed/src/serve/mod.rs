mod http;

pub use http::{router, ServeConfig};

use crate::prelude::{eprintln, *};
use crate::store::StoreOptions;

#[derive(Debug, clap::Args)]
pub struct ServeOptions {
    /// Port to listen on
    #[arg(short, long, env = "PORT", default_value = "3000")]
    pub port: u16,

    /// Host to bind to
    #[arg(long, env = "CATALOGFEED_HOST", default_value = "127.0.0.1")]
    pub host: String,

    #[clap(flatten)]
    pub store: StoreOptions,
}

pub async fn run(options: ServeOptions, global: crate::Global) -> Result<()> {
    let addr = format!("{}:{}", options.host, options.port);

    if global.verbose {
        eprintln!(
            "Starting feed server on {} with store {}...",
            addr,
            options.store.store.display()
        );
    }

    let config = ServeConfig {
        store: options.store.store,
    };

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| eyre!("Failed to bind to {}: {}", addr, e))?;

    log::info!("catalogfeed is running on http://{addr}");
    log::info!("All items: http://{addr}/");
    log::info!("Paginated: http://{addr}/?take=2&skip=2");
    log::info!("Sorted by price: http://{addr}/?order_by=price&order=asc");

    axum::serve(listener, router(config))
        .await
        .map_err(|e| eyre!("Server error: {e}"))?;

    Ok(())
}
