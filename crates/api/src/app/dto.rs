use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::app::errors;

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct CreateItemRequest {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateInventoryRequest {
    #[serde(alias = "item_id")]
    pub item: i64,
    pub stock: i64,
    pub capacity: i64,
}

#[derive(Debug, Deserialize)]
pub struct UpdateInventoryRequest {
    pub stock: i64,
    pub capacity: i64,
}

#[derive(Debug, Deserialize)]
pub struct CreateDistributorRequest {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct AddPriceRequest {
    #[serde(alias = "item_id")]
    pub item: i64,
    pub cost: f64,
}

#[derive(Debug, Deserialize)]
pub struct UpdatePriceRequest {
    pub cost: f64,
}

#[derive(Debug, Deserialize)]
pub struct ExportQuery {
    #[serde(default)]
    pub table: String,
}

// -------------------------
// Extractors
// -------------------------

/// JSON body parsed from the raw bytes, whatever the declared content type.
///
/// Malformed or mistyped bodies are rejected with `400 {"error": "Invalid JSON body: ..."}`.
#[derive(Debug)]
pub struct JsonBody<T>(pub T);

#[axum::async_trait]
impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(IntoResponse::into_response)?;

        serde_json::from_slice(&bytes)
            .map(JsonBody)
            .map_err(|e| errors::json_error(StatusCode::BAD_REQUEST, format!("Invalid JSON body: {e}")))
    }
}

/// Parse a path segment into a typed id, or produce the `invalid id` response.
pub fn parse_id<T: std::str::FromStr>(raw: &str) -> Result<T, Response> {
    raw.parse().map_err(|_| errors::invalid_id())
}
