use std::collections::BTreeMap;

use tokio_util::sync::CancellationToken;

use crate::domain::trip::Trip;
use crate::domain::types::{ClientId, CountryName, TripId};
use crate::dto::trips::{ClientTrip, TripWithCountries};
use crate::repository::{ClientReader, RegistrationReader, TripReader};
use crate::services::{ServiceError, ServiceResult, ensure_active, log_failure};

/// Lists every trip that visits at least one country, ordered by trip id.
pub fn list_trips<R>(repo: &R, token: &CancellationToken) -> ServiceResult<Vec<TripWithCountries>>
where
    R: TripReader + ?Sized,
{
    ensure_active(token)?;

    let rows = repo.list_trip_countries().map_err(|err| {
        let err = ServiceError::from(err);
        log_failure("list trips", &err);
        err
    })?;

    Ok(fold_trip_rows(rows))
}

/// Folds flat (trip, country) rows into one record per trip.
///
/// The first row seen for a trip supplies its fields; later rows only add
/// countries not listed yet. Output is sorted by trip id.
pub fn fold_trip_rows<I>(rows: I) -> Vec<TripWithCountries>
where
    I: IntoIterator<Item = (Trip, CountryName)>,
{
    let mut trips: BTreeMap<TripId, TripWithCountries> = BTreeMap::new();

    for (trip, country) in rows {
        trips
            .entry(trip.id_trip)
            .or_insert_with(|| TripWithCountries::from_trip(trip))
            .add_country(country);
    }

    trips.into_values().collect()
}

/// Lists the trips a client is registered on.
///
/// A client without registrations is reported as [`ServiceError::NotFound`].
pub fn list_trips_for_client<R>(
    repo: &R,
    client_id: ClientId,
    token: &CancellationToken,
) -> ServiceResult<Vec<ClientTrip>>
where
    R: ClientReader + RegistrationReader + ?Sized,
{
    let result = (|| -> ServiceResult<Vec<ClientTrip>> {
        ensure_active(token)?;
        if !repo.client_exists(client_id)? {
            return Err(ServiceError::NotFound(format!(
                "Client with id {client_id} does not exist."
            )));
        }

        ensure_active(token)?;
        let trips = repo
            .list_client_trips(client_id)?
            .into_iter()
            .map(ClientTrip::from)
            .collect::<Vec<_>>();

        if trips.is_empty() {
            return Err(ServiceError::NotFound(
                "No trips found for the given client.".to_string(),
            ));
        }

        Ok(trips)
    })();

    result.inspect_err(|err| log_failure("list trips for client", err))
}
