use std::sync::Arc;

use axum::{
    extract::Extension,
    http::StatusCode,
    response::{sse::Event as SseEvent, IntoResponse},
    Json,
};

use crate::app::errors;
use crate::app::services::{self, AppServices};

pub async fn health() -> StatusCode {
    StatusCode::OK
}

pub async fn version() -> impl IntoResponse {
    Json(serde_json::json!({
        "version": format!("candystock v{}", env!("CARGO_PKG_VERSION")),
    }))
}

/// GET /reset
///
/// Drop all data and reload the reference dataset.
pub async fn reset(Extension(services): Extension<Arc<AppServices>>) -> axum::response::Response {
    match services.db.reset().await {
        Ok(()) => "OK".into_response(),
        Err(e) => errors::repository_error_to_response(e),
    }
}

pub async fn stream_inventory(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Sse<impl tokio_stream::Stream<Item = Result<SseEvent, std::convert::Infallible>>> {
    services::inventory_sse_stream(services)
}
