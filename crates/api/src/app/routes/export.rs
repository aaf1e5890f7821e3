use std::sync::Arc;

use axum::{
    extract::{Extension, Query},
    http::{header, StatusCode},
    response::IntoResponse,
};

use crate::app::dto;
use crate::app::services::AppServices;

/// GET /export?table=<name>
///
/// Always `200 text/csv`; an unknown table or a failed query is reported in the CSV body.
pub async fn export_table(
    Extension(services): Extension<Arc<AppServices>>,
    Query(query): Query<dto::ExportQuery>,
) -> axum::response::Response {
    let body = services.exporter.export_named(&query.table).await;
    (StatusCode::OK, [(header::CONTENT_TYPE, "text/csv")], body).into_response()
}
