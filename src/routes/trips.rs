use actix_web::{HttpResponse, Responder, get, web};

use crate::repository::DieselRepository;
use crate::routes::{error_response, run_service};
use crate::services::trips::list_trips;

#[get("/trips")]
pub async fn get_trips(repo: web::Data<DieselRepository>) -> impl Responder {
    let repo = repo.into_inner();

    match run_service(move |token| list_trips(repo.as_ref(), token)).await {
        Ok(trips) => HttpResponse::Ok().json(trips),
        Err(err) => error_response(&err),
    }
}
