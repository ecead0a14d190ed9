//! Service facade used by the HTTP routes.
//!
//! Every operation is a free function generic over the repository traits it
//! needs and takes a [`CancellationToken`] that is checked before each store
//! access.

use tokio_util::sync::CancellationToken;

pub mod client;
pub mod errors;
pub mod registration;
pub mod trips;

pub use errors::{ServiceError, ServiceResult};

/// Fails with [`ServiceError::Cancelled`] once the caller has gone away.
pub fn ensure_active(token: &CancellationToken) -> ServiceResult<()> {
    if token.is_cancelled() {
        return Err(ServiceError::Cancelled);
    }
    Ok(())
}

/// Logs a failed operation at a level matching the kind of failure.
fn log_failure(operation: &str, err: &ServiceError) {
    match err {
        ServiceError::StoreUnavailable(_) => log::error!("Failed to {operation}: {err}"),
        ServiceError::Cancelled => log::info!("Cancelled while trying to {operation}"),
        _ => log::warn!("Failed to {operation}: {err}"),
    }
}
