use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use candystock_core::{InventoryId, ItemId};
use candystock_inventory::{StockLevels, StockStatus};

use crate::app::dto::{self, parse_id, JsonBody};
use crate::app::errors;
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_inventory).post(create_inventory))
        .route("/out-of-stock", get(out_of_stock))
        .route("/overstocked", get(overstocked))
        .route("/low-stock", get(low_stock))
        .route(
            "/:id",
            get(get_inventory).put(update_inventory).delete(delete_inventory),
        )
}

pub async fn list_inventory(Extension(services): Extension<Arc<AppServices>>) -> axum::response::Response {
    match services.analytics.all_inventory().await {
        Ok(rows) => Json(rows).into_response(),
        Err(e) => errors::repository_error_to_response(e),
    }
}

async fn report(services: &AppServices, status: StockStatus) -> axum::response::Response {
    match services.analytics.by_status(status).await {
        Ok(rows) => Json(rows).into_response(),
        Err(e) => errors::repository_error_to_response(e),
    }
}

pub async fn out_of_stock(Extension(services): Extension<Arc<AppServices>>) -> axum::response::Response {
    report(&services, StockStatus::OutOfStock).await
}

pub async fn overstocked(Extension(services): Extension<Arc<AppServices>>) -> axum::response::Response {
    report(&services, StockStatus::Overstocked).await
}

pub async fn low_stock(Extension(services): Extension<Arc<AppServices>>) -> axum::response::Response {
    report(&services, StockStatus::LowStock).await
}

/// GET /inventory/:id
///
/// A JSON array with zero or one rows.
pub async fn get_inventory(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: InventoryId = match parse_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match services.analytics.by_id(id).await {
        Ok(rows) => Json(rows).into_response(),
        Err(e) => errors::repository_error_to_response(e),
    }
}

pub async fn create_inventory(
    Extension(services): Extension<Arc<AppServices>>,
    JsonBody(body): JsonBody<dto::CreateInventoryRequest>,
) -> axum::response::Response {
    let levels = match StockLevels::new(body.stock, body.capacity) {
        Ok(v) => v,
        Err(e) => return errors::domain_error_to_response(e),
    };

    match services.catalog.add_inventory(ItemId::new(body.item), levels).await {
        Ok(row) => (StatusCode::CREATED, Json(row)).into_response(),
        Err(e) => errors::repository_error_to_response(e),
    }
}

pub async fn update_inventory(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    JsonBody(body): JsonBody<dto::UpdateInventoryRequest>,
) -> axum::response::Response {
    let id: InventoryId = match parse_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let levels = match StockLevels::new(body.stock, body.capacity) {
        Ok(v) => v,
        Err(e) => return errors::domain_error_to_response(e),
    };

    match services.catalog.update_inventory(id, levels).await {
        Ok(status) => Json(status).into_response(),
        Err(e) => errors::repository_error_to_response(e),
    }
}

pub async fn delete_inventory(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: InventoryId = match parse_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match services.catalog.delete_inventory(id).await {
        Ok(status) => Json(status).into_response(),
        Err(e) => errors::repository_error_to_response(e),
    }
}
