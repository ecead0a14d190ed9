//! Diesel models for the `client_trip` association table.

use diesel::prelude::*;

use crate::domain::registration::{
    NewRegistration as DomainNewRegistration, Registration as DomainRegistration,
};
use crate::domain::types::{ClientId, DateCode, TripId};
use crate::models::client::Client;
use crate::models::trip::Trip;

#[derive(Debug, Clone, Queryable, Selectable, Associations, Identifiable)]
#[diesel(primary_key(id_client, id_trip))]
#[diesel(belongs_to(Client, foreign_key = id_client))]
#[diesel(belongs_to(Trip, foreign_key = id_trip))]
#[diesel(table_name = crate::schema::client_trip)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
/// Association row linking a client to a trip.
pub struct ClientTrip {
    pub id_client: i32,
    pub id_trip: i32,
    pub registered_at: i32,
    pub payment_date: Option<i32>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::client_trip)]
/// Insertable variant of [`ClientTrip`].
pub struct NewClientTrip {
    pub id_client: i32,
    pub id_trip: i32,
    pub registered_at: i32,
    pub payment_date: Option<i32>,
}

impl From<ClientTrip> for DomainRegistration {
    fn from(row: ClientTrip) -> Self {
        Self {
            id_client: ClientId::new_unchecked(row.id_client),
            id_trip: TripId::new_unchecked(row.id_trip),
            registered_at: DateCode::new_unchecked(row.registered_at),
            payment_date: row.payment_date.map(DateCode::new_unchecked),
        }
    }
}

impl From<&DomainNewRegistration> for NewClientTrip {
    fn from(registration: &DomainNewRegistration) -> Self {
        Self {
            id_client: registration.id_client.get(),
            id_trip: registration.id_trip.get(),
            registered_at: registration.registered_at.get(),
            payment_date: registration.payment_date.map(DateCode::get),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_domain_new_registration() {
        let today = DateCode::new(20261019).expect("valid date code");
        let domain = DomainNewRegistration::new(
            ClientId::new(1).expect("valid client id"),
            TripId::new(2).expect("valid trip id"),
            today,
        );
        let row: NewClientTrip = (&domain).into();
        assert_eq!(row.id_client, 1);
        assert_eq!(row.id_trip, 2);
        assert_eq!(row.registered_at, 20261019);
        assert_eq!(row.payment_date, Some(20261019));
    }

    #[test]
    fn unpaid_row_into_domain() {
        let row = ClientTrip {
            id_client: 1,
            id_trip: 2,
            registered_at: 20260101,
            payment_date: None,
        };
        let domain = DomainRegistration::from(row);
        assert_eq!(domain.registered_at.get(), 20260101);
        assert!(domain.payment_date.is_none());
    }

    #[test]
    fn undecodable_date_code_is_kept() {
        let row = ClientTrip {
            id_client: 1,
            id_trip: 2,
            registered_at: 0,
            payment_date: Some(0),
        };
        let domain = DomainRegistration::from(row);
        assert_eq!(domain.registered_at.get(), 0);
        assert_eq!(domain.payment_date.map(DateCode::get), Some(0));
    }
}
