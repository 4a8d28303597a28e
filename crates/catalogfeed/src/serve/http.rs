use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use catalogfeed_core::pipeline::run_pipeline;
use catalogfeed_core::query::QueryParams;
use tower_http::cors::{Any, CorsLayer};

use crate::store::load_records;

/// Settings shared by every request
#[derive(Debug, Clone)]
pub struct ServeConfig {
    pub store: PathBuf,
}

pub fn router(config: ServeConfig) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(list_handler))
        .layer(cors)
        .with_state(Arc::new(config))
}

async fn list_handler(
    State(config): State<Arc<ServeConfig>>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Response {
    list(&config, QueryParams::from_pairs(pairs)).await
}

/// Load the store and run one listing
///
/// Store failures become a 500 with an `error` message; everything past
/// loading is infallible.
pub(crate) async fn list(config: &ServeConfig, params: QueryParams) -> Response {
    let records = match load_records(&config.store).await {
        Ok(records) => records,
        Err(e) => {
            log::error!("{e}");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({ "error": e.public_message() })),
            )
                .into_response();
        }
    };

    let loaded = records.len();
    let envelope = run_pipeline(records, &params, chrono::Utc::now());

    log::debug!(
        "listed {} of {} matching records ({} in store) for {:?}",
        envelope.items.len(),
        envelope.total_count,
        loaded,
        params
    );

    (StatusCode::OK, Json(envelope)).into_response()
}
