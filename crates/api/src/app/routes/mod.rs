use axum::{routing::get, Router};

pub mod distributors;
pub mod export;
pub mod inventory;
pub mod items;
pub mod system;

/// Router for every endpoint of the service.
pub fn router() -> Router {
    Router::new()
        .route("/health", get(system::health))
        .route("/version", get(system::version))
        .route("/reset", get(system::reset))
        .route("/export", get(export::export_table))
        .route("/stream/inventory", get(system::stream_inventory))
        .nest("/items", items::router())
        .nest("/inventory", inventory::router())
        .nest("/distributors", distributors::router())
}
