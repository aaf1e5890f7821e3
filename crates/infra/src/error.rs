//! Storage-facing error model.

use thiserror::Error;

use candystock_core::DomainError;

pub type RepositoryResult<T> = Result<T, RepositoryError>;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("{0}")]
    Validation(String),

    /// A unique constraint rejected the write.
    #[error("{0}")]
    Conflict(String),

    /// A referenced parent row does not exist.
    #[error("{0}")]
    NotFound(String),

    #[error(transparent)]
    Storage(#[from] sqlx::Error),

    #[error("storage file error: {0}")]
    Io(#[from] std::io::Error),

    #[error("csv export failed: {0}")]
    Export(#[from] csv::Error),
}

impl From<DomainError> for RepositoryError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(msg) => Self::Validation(msg),
            DomainError::InvalidId(msg) => Self::Validation(format!("invalid identifier: {msg}")),
            DomainError::NotFound(msg) => Self::NotFound(msg),
            DomainError::Conflict(msg) => Self::Conflict(msg),
        }
    }
}

impl RepositoryError {
    /// Classify a failed write by the constraint that rejected it.
    pub(crate) fn from_write(err: sqlx::Error, on_unique: &str, on_foreign_key: &str) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.is_unique_violation() {
                return Self::Conflict(on_unique.to_string());
            }
            if db_err.is_foreign_key_violation() {
                return Self::NotFound(on_foreign_key.to_string());
            }
        }
        Self::Storage(err)
    }
}
