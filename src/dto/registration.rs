use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::client::Client;
use crate::domain::trip::Trip;
use crate::domain::types::{
    ClientEmail, ClientId, FirstName, LastName, Pesel, Telephone, TripId, TripName,
};

/// Result of a successful registration with the client and trip denormalized.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationRecord {
    pub id_client: ClientId,
    pub first_name: FirstName,
    pub last_name: LastName,
    pub email: ClientEmail,
    pub telephone: Telephone,
    pub pesel: Pesel,
    pub id_trip: TripId,
    pub trip_name: TripName,
    pub trip_description: String,
    pub date_from: NaiveDateTime,
    pub date_to: NaiveDateTime,
}

impl RegistrationRecord {
    pub fn new(client: Client, trip: Trip) -> Self {
        Self {
            id_client: client.id_client,
            first_name: client.first_name,
            last_name: client.last_name,
            email: client.email,
            telephone: client.telephone,
            pesel: client.pesel,
            id_trip: trip.id_trip,
            trip_name: trip.name,
            trip_description: trip.description,
            date_from: trip.date_from,
            date_to: trip.date_to,
        }
    }
}
