//! Repository implementation for client registrations on trips.

use diesel::dsl::exists;
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;

use crate::{
    domain::{
        registration::{NewRegistration, Registration},
        trip::Trip,
        types::{ClientId, TripId},
    },
    models::{
        registration::{ClientTrip as DbClientTrip, NewClientTrip as DbNewClientTrip},
        trip::Trip as DbTrip,
    },
    repository::{
        DieselRepository, DieselTransaction, RegistrationReader, RegistrationWriter,
        errors::RepositoryResult,
    },
};

fn count_trip_registrations(conn: &mut SqliteConnection, trip_id: TripId) -> RepositoryResult<i64> {
    use crate::schema::client_trip;

    let count = client_trip::table
        .filter(client_trip::id_trip.eq(trip_id.get()))
        .count()
        .get_result::<i64>(conn)?;

    Ok(count)
}

fn registration_exists(
    conn: &mut SqliteConnection,
    client_id: ClientId,
    trip_id: TripId,
) -> RepositoryResult<bool> {
    use crate::schema::client_trip;

    let found = diesel::select(exists(
        client_trip::table.find((client_id.get(), trip_id.get())),
    ))
    .get_result::<bool>(conn)?;

    Ok(found)
}

fn list_client_trips(
    conn: &mut SqliteConnection,
    client_id: ClientId,
) -> RepositoryResult<Vec<(Trip, Registration)>> {
    use crate::schema::{client_trip, trip};

    let rows = trip::table
        .inner_join(client_trip::table)
        .filter(client_trip::id_client.eq(client_id.get()))
        .order(trip::id_trip.asc())
        .select((DbTrip::as_select(), DbClientTrip::as_select()))
        .load::<(DbTrip, DbClientTrip)>(conn)?;

    Ok(rows
        .into_iter()
        .map(|(db_trip, db_registration)| {
            (Trip::from(db_trip), Registration::from(db_registration))
        })
        .collect())
}

fn create_registration(
    conn: &mut SqliteConnection,
    registration: &NewRegistration,
) -> RepositoryResult<Registration> {
    use crate::schema::client_trip;

    let insertable: DbNewClientTrip = registration.into();
    let db_registration = diesel::insert_into(client_trip::table)
        .values(&insertable)
        .returning(DbClientTrip::as_returning())
        .get_result::<DbClientTrip>(conn)?;

    Ok(Registration::from(db_registration))
}

fn delete_registration(
    conn: &mut SqliteConnection,
    client_id: ClientId,
    trip_id: TripId,
) -> RepositoryResult<usize> {
    use crate::schema::client_trip;

    let deleted =
        diesel::delete(client_trip::table.find((client_id.get(), trip_id.get()))).execute(conn)?;

    Ok(deleted)
}

impl RegistrationReader for DieselRepository {
    fn count_trip_registrations(&self, trip_id: TripId) -> RepositoryResult<i64> {
        let mut conn = self.conn()?;
        count_trip_registrations(&mut conn, trip_id)
    }

    fn registration_exists(&self, client_id: ClientId, trip_id: TripId) -> RepositoryResult<bool> {
        let mut conn = self.conn()?;
        registration_exists(&mut conn, client_id, trip_id)
    }

    fn list_client_trips(&self, client_id: ClientId) -> RepositoryResult<Vec<(Trip, Registration)>> {
        let mut conn = self.conn()?;
        list_client_trips(&mut conn, client_id)
    }
}

impl RegistrationWriter for DieselRepository {
    fn create_registration(
        &self,
        registration: &NewRegistration,
    ) -> RepositoryResult<Registration> {
        let mut conn = self.conn()?;
        create_registration(&mut conn, registration)
    }

    fn delete_registration(&self, client_id: ClientId, trip_id: TripId) -> RepositoryResult<usize> {
        let mut conn = self.conn()?;
        delete_registration(&mut conn, client_id, trip_id)
    }
}

impl RegistrationReader for DieselTransaction<'_> {
    fn count_trip_registrations(&self, trip_id: TripId) -> RepositoryResult<i64> {
        self.with_conn(|conn| count_trip_registrations(conn, trip_id))
    }

    fn registration_exists(&self, client_id: ClientId, trip_id: TripId) -> RepositoryResult<bool> {
        self.with_conn(|conn| registration_exists(conn, client_id, trip_id))
    }

    fn list_client_trips(&self, client_id: ClientId) -> RepositoryResult<Vec<(Trip, Registration)>> {
        self.with_conn(|conn| list_client_trips(conn, client_id))
    }
}

impl RegistrationWriter for DieselTransaction<'_> {
    fn create_registration(
        &self,
        registration: &NewRegistration,
    ) -> RepositoryResult<Registration> {
        self.with_conn(|conn| create_registration(conn, registration))
    }

    fn delete_registration(&self, client_id: ClientId, trip_id: TripId) -> RepositoryResult<usize> {
        self.with_conn(|conn| delete_registration(conn, client_id, trip_id))
    }
}
