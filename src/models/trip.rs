//! Diesel models for trips.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::trip::Trip as DomainTrip;
use crate::domain::types::{TripId, TripName};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::trip)]
#[diesel(primary_key(id_trip))]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
/// Diesel model for [`crate::domain::trip::Trip`].
pub struct Trip {
    pub id_trip: i32,
    pub name: String,
    pub description: String,
    pub date_from: NaiveDateTime,
    pub date_to: NaiveDateTime,
    pub max_people: i32,
}

impl From<Trip> for DomainTrip {
    fn from(trip: Trip) -> Self {
        Self {
            id_trip: TripId::new_unchecked(trip.id_trip),
            name: TripName::new_unchecked(trip.name),
            description: trip.description,
            date_from: trip.date_from,
            date_to: trip.date_to,
            max_people: trip.max_people,
        }
    }
}
