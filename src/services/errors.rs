use thiserror::Error;

use crate::forms::FormError;
use crate::repository::errors::RepositoryError;

/// Business and infrastructure failures surfaced by the service layer.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// A referenced client, trip or registration does not exist.
    #[error("{0}")]
    NotFound(String),

    /// A client field failed validation.
    #[error("{0}")]
    InvalidFormat(String),

    /// The trip has no free seats left.
    #[error("{0}")]
    CapacityExceeded(String),

    /// The client already holds a registration for the trip.
    #[error("{0}")]
    AlreadyRegistered(String),

    /// The data store failed; never retried.
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    /// The caller went away before the operation finished.
    #[error("Operation cancelled")]
    Cancelled,
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl From<RepositoryError> for ServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound => ServiceError::NotFound("Entity not found".to_string()),
            other => ServiceError::StoreUnavailable(other.to_string()),
        }
    }
}

impl From<FormError> for ServiceError {
    fn from(err: FormError) -> Self {
        ServiceError::InvalidFormat(err.to_string())
    }
}
