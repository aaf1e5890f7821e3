use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use candystock_core::DomainError;
use candystock_infra::RepositoryError;

pub fn repository_error_to_response(err: RepositoryError) -> axum::response::Response {
    match err {
        RepositoryError::Validation(msg) => json_error(StatusCode::BAD_REQUEST, msg),
        RepositoryError::NotFound(msg) => json_error(StatusCode::NOT_FOUND, msg),
        RepositoryError::Conflict(msg) => json_error(StatusCode::CONFLICT, msg),
        err @ (RepositoryError::Storage(_) | RepositoryError::Io(_) | RepositoryError::Export(_)) => {
            tracing::error!(error = %err, "request failed in storage");
            json_error(StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
        }
    }
}

pub fn domain_error_to_response(err: DomainError) -> axum::response::Response {
    match err {
        DomainError::Validation(msg) => json_error(StatusCode::BAD_REQUEST, msg),
        DomainError::InvalidId(_) => invalid_id(),
        DomainError::NotFound(msg) => json_error(StatusCode::NOT_FOUND, msg),
        DomainError::Conflict(msg) => json_error(StatusCode::CONFLICT, msg),
    }
}

pub fn invalid_id() -> axum::response::Response {
    json_error(StatusCode::BAD_REQUEST, "invalid id")
}

pub fn json_error(status: StatusCode, message: impl Into<String>) -> axum::response::Response {
    (status, axum::Json(json!({ "error": message.into() }))).into_response()
}
