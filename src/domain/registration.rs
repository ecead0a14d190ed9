use serde::{Deserialize, Serialize};

use crate::domain::types::{ClientId, DateCode, TripId};

/// A client booked on a trip.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    pub id_client: ClientId,
    pub id_trip: TripId,
    pub registered_at: DateCode,
    pub payment_date: Option<DateCode>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NewRegistration {
    pub id_client: ClientId,
    pub id_trip: TripId,
    pub registered_at: DateCode,
    pub payment_date: Option<DateCode>,
}

impl NewRegistration {
    /// Registration and payment are both stamped with the same day.
    #[must_use]
    pub fn new(id_client: ClientId, id_trip: TripId, today: DateCode) -> Self {
        Self {
            id_client,
            id_trip,
            registered_at: today,
            payment_date: Some(today),
        }
    }
}

impl From<NewRegistration> for Registration {
    fn from(value: NewRegistration) -> Self {
        Self {
            id_client: value.id_client,
            id_trip: value.id_trip,
            registered_at: value.registered_at,
            payment_date: value.payment_date,
        }
    }
}
