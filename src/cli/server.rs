//! HTTP trigger surface
//!
//! Receives storage-finalized events (`{name, bucket}`), routes the file
//! to its table by filename prefix, and invokes the bulk loader. Files
//! with no mapped prefix are acknowledged and ignored so unrelated
//! objects in the bucket never error.

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::error::{Error, Result};
use crate::load::{chunk_index, BulkLoader, LoadRequest, TableMap};
use crate::types::WriteMode;

/// Shared state for the trigger handlers
#[derive(Clone)]
pub struct ServerState {
    /// Prefix → table routing
    pub table_map: TableMap,
    /// Load backend
    pub loader: Arc<dyn BulkLoader>,
    /// Scheme for staged-file URIs (`gs`, `s3`, `az`)
    pub bucket_scheme: String,
}

/// Storage-finalized event body
#[derive(Debug, Deserialize)]
struct TriggerEvent {
    /// Object name within the bucket
    #[serde(default)]
    name: Option<String>,
    /// Bucket name
    #[serde(default)]
    bucket: Option<String>,
}

/// Build the trigger router
pub fn trigger_router(state: ServerState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route("/trigger", post(trigger_load))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}

/// Start the HTTP server
pub async fn serve(state: ServerState, port: u16) -> Result<()> {
    let app = trigger_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("starting trigger server on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| Error::config(format!("failed to bind to port {port}: {e}")))?;

    axum::serve(listener, app)
        .await
        .map_err(|e| Error::config(format!("server error: {e}")))?;

    Ok(())
}

/// Health check endpoint
async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

/// Handle one storage-finalized event
async fn trigger_load(
    State(state): State<Arc<ServerState>>,
    body: Option<Json<Value>>,
) -> impl IntoResponse {
    let Some(Json(body)) = body else {
        return (StatusCode::BAD_REQUEST, "No JSON body received").into_response();
    };

    let event: TriggerEvent = match serde_json::from_value(body) {
        Ok(event) => event,
        Err(_) => {
            return (StatusCode::BAD_REQUEST, "Malformed event body").into_response();
        }
    };

    let (Some(name), Some(bucket)) = (event.name, event.bucket) else {
        return (StatusCode::BAD_REQUEST, "Missing name or bucket").into_response();
    };

    tracing::info!(file = %name, %bucket, "received storage event");

    let Some(table) = state.table_map.resolve(&name) else {
        tracing::info!(file = %name, "file not mapped to any table, skipping");
        return (StatusCode::OK, "Ignored").into_response();
    };

    let uri = format!("{}://{bucket}/{name}", state.bucket_scheme);
    if let Some(index) = chunk_index(&name) {
        tracing::info!(%table, index, "loading staged chunk");
    } else {
        tracing::info!(%table, %uri, "loading staged file");
    }

    // Schema is table-inherited; events append so reruns of the export
    // overwrite via the configured full-reload jobs instead.
    let request = LoadRequest::single(table, uri, WriteMode::Append);

    match state.loader.load(&request).await {
        Ok(outcome) => (
            StatusCode::OK,
            Json(json!({
                "status": "success",
                "table": outcome.table,
                "rows_loaded": outcome.rows_loaded,
            })),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("bulk load failed: {e}");
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
    }
}
