//! HTTP API application wiring (Axum router + service wiring).
//!
//! - `services.rs`: storage and query services shared by all handlers
//! - `routes/`: HTTP routes + handlers (one file per domain area)
//! - `dto.rs`: request DTOs and the JSON body extractor
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{Extension, Router};
use tower::ServiceBuilder;

use candystock_infra::RepositoryResult;

use crate::config::AppConfig;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

pub use services::AppServices;

/// Build the full HTTP router over already-wired services.
pub fn build_router(services: Arc<AppServices>) -> Router {
    routes::router().layer(ServiceBuilder::new().layer(Extension(services)))
}

/// Open storage per `config` and build the router (public entrypoint used by `main.rs`).
pub async fn build_app(config: &AppConfig) -> RepositoryResult<Router> {
    let services = Arc::new(services::build_services(config).await?);
    Ok(build_router(services))
}
