use crate::sync::SyncPipeline;
use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use serde::Deserialize;
use std::sync::Arc;
use tower_http::{
    cors::{AllowMethods, AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use tracing::error;

/// Query parameters of the sync endpoint
#[derive(Debug, Deserialize)]
pub struct SyncParams {
    /// Bearer token forwarded to the source API
    bearer: Option<String>,
}

/// Build the application router.
///
/// The single route accepts GET and POST; axum answers anything else
/// with 405 before any outbound call is made.
pub fn router(pipeline: Arc<SyncPipeline>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::mirror_request())
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    Router::new()
        .route("/", get(sync_handler).post(sync_handler))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(pipeline)
}

/// Handler for the sync endpoint: runs one full synchronization cycle
/// and answers with one JSON report line per shift, in fetch order.
pub async fn sync_handler(
    State(pipeline): State<Arc<SyncPipeline>>,
    Query(params): Query<SyncParams>,
) -> Response {
    let Some(token) = params.bearer.filter(|t| !t.is_empty()) else {
        return (
            StatusCode::BAD_REQUEST,
            "missing 'bearer' query parameter\n",
        )
            .into_response();
    };

    match pipeline.run(&token).await {
        Ok(report) => match report.to_ndjson() {
            Ok(body) => ([(header::CONTENT_TYPE, "text/plain")], body).into_response(),
            Err(e) => {
                error!("Failed to serialize sync report: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
            }
        },
        Err(e) => {
            // Fetch and delete failures land here; both mean the upstream
            // could not be synced from, hence 502
            error!("Sync failed: {}", e);
            (StatusCode::BAD_GATEWAY, format!("{}\n", e)).into_response()
        }
    }
}
