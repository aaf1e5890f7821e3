use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get},
    Json, Router,
};

use candystock_core::ItemId;
use candystock_inventory::EntityName;

use crate::app::dto::{self, parse_id, JsonBody};
use crate::app::errors;
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_items).post(create_item))
        .route("/:id", delete(delete_item))
        .route("/:id/distributors", get(item_offerings))
        .route("/:id/restock/:quantity/cheapest", get(cheapest_restock))
}

pub async fn list_items(Extension(services): Extension<Arc<AppServices>>) -> axum::response::Response {
    match services.catalog.list_items().await {
        Ok(rows) => Json(rows).into_response(),
        Err(e) => errors::repository_error_to_response(e),
    }
}

pub async fn create_item(
    Extension(services): Extension<Arc<AppServices>>,
    JsonBody(body): JsonBody<dto::CreateItemRequest>,
) -> axum::response::Response {
    let name = match EntityName::parse(&body.name) {
        Ok(v) => v,
        Err(e) => return errors::domain_error_to_response(e),
    };

    match services.catalog.add_item(name).await {
        Ok(item) => (StatusCode::CREATED, Json(item)).into_response(),
        Err(e) => errors::repository_error_to_response(e),
    }
}

pub async fn delete_item(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: ItemId = match parse_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match services.catalog.delete_item(id).await {
        Ok(status) => Json(status).into_response(),
        Err(e) => errors::repository_error_to_response(e),
    }
}

/// GET /items/:id/distributors
pub async fn item_offerings(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: ItemId = match parse_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match services.pricing.offerings_by_item(id).await {
        Ok(rows) => Json(rows).into_response(),
        Err(e) => errors::repository_error_to_response(e),
    }
}

/// GET /items/:id/restock/:quantity/cheapest
///
/// An item nobody sells answers `200 {"message": ...}` rather than an error.
pub async fn cheapest_restock(
    Extension(services): Extension<Arc<AppServices>>,
    Path((id, quantity)): Path<(String, String)>,
) -> axum::response::Response {
    let id: ItemId = match parse_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let quantity: u32 = match quantity.parse() {
        Ok(v) => v,
        Err(_) => return errors::json_error(StatusCode::BAD_REQUEST, "invalid quantity"),
    };

    match services.pricing.cheapest_offer(id, quantity).await {
        Ok(quote) => Json(quote).into_response(),
        Err(e) => errors::repository_error_to_response(e),
    }
}
