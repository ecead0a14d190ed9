//! Repository implementation for trips and their countries.

use diesel::dsl::exists;
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;

use crate::{
    domain::{
        trip::Trip,
        types::{CountryName, TripId},
    },
    models::trip::Trip as DbTrip,
    repository::{
        DieselRepository, DieselTransaction, TripReader,
        errors::RepositoryResult,
    },
};

fn list_trip_countries(conn: &mut SqliteConnection) -> RepositoryResult<Vec<(Trip, CountryName)>> {
    use crate::schema::{country, country_trip, trip};

    let rows = trip::table
        .inner_join(country_trip::table)
        .inner_join(country::table.on(country::id_country.eq(country_trip::id_country)))
        .order((trip::id_trip.asc(), country::id_country.asc()))
        .select((DbTrip::as_select(), country::name))
        .load::<(DbTrip, String)>(conn)?;

    Ok(rows
        .into_iter()
        .map(|(db_trip, country_name)| {
            (Trip::from(db_trip), CountryName::new_unchecked(country_name))
        })
        .collect())
}

fn get_trip_by_id(conn: &mut SqliteConnection, id: TripId) -> RepositoryResult<Option<Trip>> {
    use crate::schema::trip;

    let db_trip = trip::table
        .find(id.get())
        .select(DbTrip::as_select())
        .first::<DbTrip>(conn)
        .optional()?;

    Ok(db_trip.map(Trip::from))
}

fn trip_exists(conn: &mut SqliteConnection, id: TripId) -> RepositoryResult<bool> {
    use crate::schema::trip;

    let found = diesel::select(exists(trip::table.find(id.get()))).get_result::<bool>(conn)?;
    Ok(found)
}

fn get_trip_max_people(conn: &mut SqliteConnection, id: TripId) -> RepositoryResult<Option<i32>> {
    use crate::schema::trip;

    let max_people = trip::table
        .find(id.get())
        .select(trip::max_people)
        .first::<i32>(conn)
        .optional()?;

    Ok(max_people)
}

impl TripReader for DieselRepository {
    fn list_trip_countries(&self) -> RepositoryResult<Vec<(Trip, CountryName)>> {
        let mut conn = self.conn()?;
        list_trip_countries(&mut conn)
    }

    fn get_trip_by_id(&self, id: TripId) -> RepositoryResult<Option<Trip>> {
        let mut conn = self.conn()?;
        get_trip_by_id(&mut conn, id)
    }

    fn trip_exists(&self, id: TripId) -> RepositoryResult<bool> {
        let mut conn = self.conn()?;
        trip_exists(&mut conn, id)
    }

    fn get_trip_max_people(&self, id: TripId) -> RepositoryResult<Option<i32>> {
        let mut conn = self.conn()?;
        get_trip_max_people(&mut conn, id)
    }
}

impl TripReader for DieselTransaction<'_> {
    fn list_trip_countries(&self) -> RepositoryResult<Vec<(Trip, CountryName)>> {
        self.with_conn(list_trip_countries)
    }

    fn get_trip_by_id(&self, id: TripId) -> RepositoryResult<Option<Trip>> {
        self.with_conn(|conn| get_trip_by_id(conn, id))
    }

    fn trip_exists(&self, id: TripId) -> RepositoryResult<bool> {
        self.with_conn(|conn| trip_exists(conn, id))
    }

    fn get_trip_max_people(&self, id: TripId) -> RepositoryResult<Option<i32>> {
        self.with_conn(|conn| get_trip_max_people(conn, id))
    }
}
