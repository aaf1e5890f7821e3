use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post, put},
    Json, Router,
};

use candystock_core::{DistributorId, ItemId};
use candystock_inventory::{Cost, EntityName};

use crate::app::dto::{self, parse_id, JsonBody};
use crate::app::errors;
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_distributors).post(create_distributor))
        .route("/:id", delete(delete_distributor))
        .route("/:id/items", get(distributor_offerings))
        .route("/:id/catalog", post(add_price))
        .route("/:id/catalog/:item_id", put(update_price))
}

pub async fn list_distributors(Extension(services): Extension<Arc<AppServices>>) -> axum::response::Response {
    match services.catalog.list_distributors().await {
        Ok(rows) => Json(rows).into_response(),
        Err(e) => errors::repository_error_to_response(e),
    }
}

pub async fn create_distributor(
    Extension(services): Extension<Arc<AppServices>>,
    JsonBody(body): JsonBody<dto::CreateDistributorRequest>,
) -> axum::response::Response {
    let name = match EntityName::parse(&body.name) {
        Ok(v) => v,
        Err(e) => return errors::domain_error_to_response(e),
    };

    match services.catalog.add_distributor(name).await {
        Ok(distributor) => (StatusCode::CREATED, Json(distributor)).into_response(),
        Err(e) => errors::repository_error_to_response(e),
    }
}

pub async fn delete_distributor(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: DistributorId = match parse_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match services.catalog.delete_distributor(id).await {
        Ok(status) => Json(status).into_response(),
        Err(e) => errors::repository_error_to_response(e),
    }
}

/// GET /distributors/:id/items
pub async fn distributor_offerings(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: DistributorId = match parse_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match services.pricing.offerings_by_distributor(id).await {
        Ok(rows) => Json(rows).into_response(),
        Err(e) => errors::repository_error_to_response(e),
    }
}

/// POST /distributors/:id/catalog
pub async fn add_price(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    JsonBody(body): JsonBody<dto::AddPriceRequest>,
) -> axum::response::Response {
    let distributor_id: DistributorId = match parse_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let cost = match Cost::new(body.cost) {
        Ok(v) => v,
        Err(e) => return errors::domain_error_to_response(e),
    };

    match services
        .catalog
        .add_price(distributor_id, ItemId::new(body.item), cost)
        .await
    {
        Ok(price_id) => (
            StatusCode::CREATED,
            Json(serde_json::json!({
                "status": "ok",
                "id": price_id,
            })),
        )
            .into_response(),
        Err(e) => errors::repository_error_to_response(e),
    }
}

/// PUT /distributors/:id/catalog/:item_id
pub async fn update_price(
    Extension(services): Extension<Arc<AppServices>>,
    Path((id, item_id)): Path<(String, String)>,
    JsonBody(body): JsonBody<dto::UpdatePriceRequest>,
) -> axum::response::Response {
    let distributor_id: DistributorId = match parse_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let item_id: ItemId = match parse_id(&item_id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let cost = match Cost::new(body.cost) {
        Ok(v) => v,
        Err(e) => return errors::domain_error_to_response(e),
    };

    match services.catalog.update_price(distributor_id, item_id, cost).await {
        Ok(status) => Json(status).into_response(),
        Err(e) => errors::repository_error_to_response(e),
    }
}
