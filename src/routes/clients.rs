//! Path ids are plain lookup keys: any integer is accepted and one that
//! matches no row is reported as not found by the service.

use actix_web::http::header;
use actix_web::{HttpResponse, Responder, delete, get, post, put, web};

use crate::domain::types::{ClientId, TripId};
use crate::forms::client::ClientCreateForm;
use crate::repository::DieselRepository;
use crate::routes::{error_response, run_service};
use crate::services::client::{create_client, get_client as find_client};
use crate::services::registration::{register_client_on_trip, remove_client_from_trip};
use crate::services::trips::list_trips_for_client;

fn client_trip_keys((client_id, trip_id): (i32, i32)) -> (ClientId, TripId) {
    (
        ClientId::new_unchecked(client_id),
        TripId::new_unchecked(trip_id),
    )
}

#[get("/clients/{client_id}")]
pub async fn get_client(
    client_id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let client_id = ClientId::new_unchecked(client_id.into_inner());
    let repo = repo.into_inner();

    match run_service(move |token| find_client(repo.as_ref(), client_id, token)).await {
        Ok(client) => HttpResponse::Ok().json(client),
        Err(err) => error_response(&err),
    }
}

#[get("/clients/{client_id}/trips")]
pub async fn get_client_trips(
    client_id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let client_id = ClientId::new_unchecked(client_id.into_inner());
    let repo = repo.into_inner();

    match run_service(move |token| list_trips_for_client(repo.as_ref(), client_id, token)).await {
        Ok(trips) => HttpResponse::Ok().json(trips),
        Err(err) => error_response(&err),
    }
}

#[post("/clients")]
pub async fn post_client(
    form: web::Json<ClientCreateForm>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let form = form.into_inner();
    let repo = repo.into_inner();

    match run_service(move |token| create_client(repo.as_ref(), form, token)).await {
        Ok(client) => HttpResponse::Created()
            .insert_header((
                header::LOCATION,
                format!("/api/clients/{}", client.id_client),
            ))
            .json(client),
        Err(err) => error_response(&err),
    }
}

#[put("/clients/{client_id}/trips/{trip_id}")]
pub async fn put_client_trip(
    path: web::Path<(i32, i32)>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let (client_id, trip_id) = client_trip_keys(path.into_inner());
    let repo = repo.into_inner();

    match run_service(move |token| {
        register_client_on_trip(repo.as_ref(), client_id, trip_id, token)
    })
    .await
    {
        Ok(record) => HttpResponse::Ok().json(record),
        Err(err) => error_response(&err),
    }
}

#[delete("/clients/{client_id}/trips/{trip_id}")]
pub async fn delete_client_trip(
    path: web::Path<(i32, i32)>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let (client_id, trip_id) = client_trip_keys(path.into_inner());
    let repo = repo.into_inner();

    match run_service(move |token| {
        remove_client_from_trip(repo.as_ref(), client_id, trip_id, token)
    })
    .await
    {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(err) => error_response(&err),
    }
}
