//! Trip projections served by the listing endpoints.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::registration::Registration;
use crate::domain::trip::Trip;
use crate::domain::types::{CountryName, DateCode, TripId, TripName};

/// A trip together with the unique names of the countries it visits.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TripWithCountries {
    pub id_trip: TripId,
    pub name: TripName,
    pub description: String,
    pub date_from: NaiveDateTime,
    pub date_to: NaiveDateTime,
    pub max_people: i32,
    /// Insertion-ordered, without duplicates.
    pub countries: Vec<CountryName>,
}

impl TripWithCountries {
    /// Starts a record with an empty country list.
    pub fn from_trip(trip: Trip) -> Self {
        Self {
            id_trip: trip.id_trip,
            name: trip.name,
            description: trip.description,
            date_from: trip.date_from,
            date_to: trip.date_to,
            max_people: trip.max_people,
            countries: Vec::new(),
        }
    }

    /// Appends the country unless it is already listed.
    pub fn add_country(&mut self, country: CountryName) {
        if !self.countries.contains(&country) {
            self.countries.push(country);
        }
    }
}

/// One of a client's trips with the registration metadata.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ClientTrip {
    pub id_trip: TripId,
    pub name: TripName,
    pub description: String,
    pub date_from: NaiveDateTime,
    pub date_to: NaiveDateTime,
    pub max_people: i32,
    pub registered_at: DateCode,
    pub payment_date: Option<DateCode>,
}

impl From<(Trip, Registration)> for ClientTrip {
    fn from((trip, registration): (Trip, Registration)) -> Self {
        Self {
            id_trip: trip.id_trip,
            name: trip.name,
            description: trip.description,
            date_from: trip.date_from,
            date_to: trip.date_to,
            max_people: trip.max_people,
            registered_at: registration.registered_at,
            payment_date: registration.payment_date,
        }
    }
}
