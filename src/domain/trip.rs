use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{TripId, TripName};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Trip {
    pub id_trip: TripId,
    pub name: TripName,
    pub description: String,
    pub date_from: NaiveDateTime,
    pub date_to: NaiveDateTime,
    /// Capacity of the trip.
    pub max_people: i32,
}
