//! JSON endpoints mounted under `/api`.

use actix_web::error::InternalError;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, web};
use tokio_util::sync::CancellationToken;

use crate::dto::api::ErrorResponse;
use crate::services::{ServiceError, ServiceResult};

pub mod clients;
pub mod trips;

/// Registers every endpoint on the given scope.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(trips::get_trips)
        .service(clients::get_client)
        .service(clients::get_client_trips)
        .service(clients::post_client)
        .service(clients::put_client_trip)
        .service(clients::delete_client_trip);
}

/// JSON extractor settings that report malformed bodies as `400` with an
/// [`ErrorResponse`].
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let message = format!("Invalid request body: {err}");
        log::warn!("{message}");
        let response = HttpResponse::BadRequest().json(ErrorResponse::new(message.clone()));
        InternalError::from_response(message, response).into()
    })
}

pub fn error_status(err: &ServiceError) -> StatusCode {
    match err {
        ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
        ServiceError::InvalidFormat(_) | ServiceError::CapacityExceeded(_) => {
            StatusCode::BAD_REQUEST
        }
        ServiceError::AlreadyRegistered(_) => StatusCode::CONFLICT,
        ServiceError::StoreUnavailable(_) | ServiceError::Cancelled => {
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}

pub fn error_response(err: &ServiceError) -> HttpResponse {
    HttpResponse::build(error_status(err)).json(ErrorResponse::new(err.to_string()))
}

/// Runs a synchronous service call on the blocking thread pool.
///
/// If the request future is dropped before the call finishes, the token
/// handed to `call` is cancelled.
pub async fn run_service<T, F>(call: F) -> ServiceResult<T>
where
    F: FnOnce(&CancellationToken) -> ServiceResult<T> + Send + 'static,
    T: Send + 'static,
{
    let token = CancellationToken::new();
    let _guard = token.clone().drop_guard();

    web::block(move || call(&token))
        .await
        .map_err(|err| ServiceError::StoreUnavailable(err.to_string()))?
}
