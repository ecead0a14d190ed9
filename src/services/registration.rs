use tokio_util::sync::CancellationToken;

use crate::domain::registration::NewRegistration;
use crate::domain::types::{ClientId, DateCode, TripId};
use crate::dto::registration::RegistrationRecord;
use crate::repository::errors::RepositoryError;
use crate::repository::{RegistrationWriter, TravelStore, TravelUnitOfWork};
use crate::services::{ServiceError, ServiceResult, ensure_active, log_failure};

fn client_not_found(client_id: ClientId) -> ServiceError {
    ServiceError::NotFound(format!("Client with id {client_id} does not exist."))
}

fn trip_not_found(trip_id: TripId) -> ServiceError {
    ServiceError::NotFound(format!("Trip with id {trip_id} does not exist."))
}

fn already_registered() -> ServiceError {
    ServiceError::AlreadyRegistered("Client is already registered on the trip.".to_string())
}

/// Books a client on a trip, stamping registration and payment with today.
///
/// All checks and the insert share one transaction, so a failure or a
/// cancellation at any step leaves the store untouched.
pub fn register_client_on_trip<R>(
    repo: &R,
    client_id: ClientId,
    trip_id: TripId,
    token: &CancellationToken,
) -> ServiceResult<RegistrationRecord>
where
    R: TravelUnitOfWork,
{
    register_client_on_trip_at(repo, client_id, trip_id, DateCode::today(), token)
}

/// Same as [`register_client_on_trip`] with an explicit registration day.
pub fn register_client_on_trip_at<R>(
    repo: &R,
    client_id: ClientId,
    trip_id: TripId,
    today: DateCode,
    token: &CancellationToken,
) -> ServiceResult<RegistrationRecord>
where
    R: TravelUnitOfWork,
{
    let result = ensure_active(token).and_then(|()| {
        repo.atomically(|store| register_within(store, client_id, trip_id, today, token))
    });

    match &result {
        Ok(_) => log::info!("Registered client {client_id} on trip {trip_id}"),
        Err(err) => log_failure("register client on trip", err),
    }

    result
}

fn register_within(
    store: &dyn TravelStore,
    client_id: ClientId,
    trip_id: TripId,
    today: DateCode,
    token: &CancellationToken,
) -> ServiceResult<RegistrationRecord> {
    ensure_active(token)?;
    if !store.client_exists(client_id)? {
        return Err(client_not_found(client_id));
    }

    ensure_active(token)?;
    if !store.trip_exists(trip_id)? {
        return Err(trip_not_found(trip_id));
    }

    ensure_active(token)?;
    let max_people = store
        .get_trip_max_people(trip_id)?
        .ok_or_else(|| trip_not_found(trip_id))?;
    ensure_active(token)?;
    let registered = store.count_trip_registrations(trip_id)?;
    if registered == i64::from(max_people) {
        return Err(ServiceError::CapacityExceeded(
            "This trip is full.".to_string(),
        ));
    }

    ensure_active(token)?;
    if store.registration_exists(client_id, trip_id)? {
        return Err(already_registered());
    }

    ensure_active(token)?;
    let registration = NewRegistration::new(client_id, trip_id, today);
    store
        .create_registration(&registration)
        .map_err(|err| match err {
            RepositoryError::UniqueViolation(_) => already_registered(),
            other => ServiceError::from(other),
        })?;

    ensure_active(token)?;
    let client = store
        .get_client_by_id(client_id)?
        .ok_or_else(|| client_not_found(client_id))?;
    ensure_active(token)?;
    let trip = store
        .get_trip_by_id(trip_id)?
        .ok_or_else(|| trip_not_found(trip_id))?;

    Ok(RegistrationRecord::new(client, trip))
}

/// Deletes the client's registration on the trip.
pub fn remove_client_from_trip<R>(
    repo: &R,
    client_id: ClientId,
    trip_id: TripId,
    token: &CancellationToken,
) -> ServiceResult<()>
where
    R: RegistrationWriter + ?Sized,
{
    let result = (|| -> ServiceResult<()> {
        ensure_active(token)?;
        if repo.delete_registration(client_id, trip_id)? == 0 {
            return Err(ServiceError::NotFound(format!(
                "The client with id {client_id} is not registered on the trip with id {trip_id}."
            )));
        }
        Ok(())
    })();

    match &result {
        Ok(()) => log::info!("Removed client {client_id} from trip {trip_id}"),
        Err(err) => log_failure("remove client from trip", err),
    }

    result
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};

    use chrono::NaiveDate;

    use super::*;
    use crate::domain::client::{Client, NewClient};
    use crate::domain::registration::Registration;
    use crate::domain::trip::Trip;
    use crate::domain::types::{
        ClientEmail, CountryName, FirstName, LastName, Pesel, Telephone, TripName,
    };
    use crate::repository::errors::RepositoryResult;
    use crate::repository::mock::MockRepository;
    use crate::repository::{ClientReader, RegistrationReader, TripReader};

    #[derive(Clone, Default)]
    struct State {
        clients: Vec<Client>,
        trips: Vec<Trip>,
        registrations: Vec<Registration>,
    }

    /// In-memory store that snapshots its state around `atomically`.
    #[derive(Default)]
    struct FakeStore {
        state: RefCell<State>,
        /// Reports "no duplicate" even when one exists, as a racing writer would.
        hide_duplicates: Cell<bool>,
        /// Cancelled right after a registration row is inserted.
        cancel_after_insert: Option<CancellationToken>,
    }

    impl FakeStore {
        fn with_trip(max_people: i32) -> Self {
            let store = FakeStore::default();
            {
                let mut state = store.state.borrow_mut();
                state.clients.push(client(1));
                state.clients.push(client(2));
                state.clients.push(client(3));
                state.trips.push(trip(10, max_people));
            }
            store
        }

        fn registration_count(&self) -> usize {
            self.state.borrow().registrations.len()
        }
    }

    impl ClientReader for FakeStore {
        fn get_client_by_id(&self, id: ClientId) -> RepositoryResult<Option<Client>> {
            Ok(self
                .state
                .borrow()
                .clients
                .iter()
                .find(|c| c.id_client == id)
                .cloned())
        }

        fn client_exists(&self, id: ClientId) -> RepositoryResult<bool> {
            Ok(self.get_client_by_id(id)?.is_some())
        }
    }

    impl TripReader for FakeStore {
        fn list_trip_countries(&self) -> RepositoryResult<Vec<(Trip, CountryName)>> {
            Ok(Vec::new())
        }

        fn get_trip_by_id(&self, id: TripId) -> RepositoryResult<Option<Trip>> {
            Ok(self
                .state
                .borrow()
                .trips
                .iter()
                .find(|t| t.id_trip == id)
                .cloned())
        }

        fn trip_exists(&self, id: TripId) -> RepositoryResult<bool> {
            Ok(self.get_trip_by_id(id)?.is_some())
        }

        fn get_trip_max_people(&self, id: TripId) -> RepositoryResult<Option<i32>> {
            Ok(self.get_trip_by_id(id)?.map(|t| t.max_people))
        }
    }

    impl RegistrationReader for FakeStore {
        fn count_trip_registrations(&self, trip_id: TripId) -> RepositoryResult<i64> {
            let count = self
                .state
                .borrow()
                .registrations
                .iter()
                .filter(|r| r.id_trip == trip_id)
                .count();
            Ok(count as i64)
        }

        fn registration_exists(
            &self,
            client_id: ClientId,
            trip_id: TripId,
        ) -> RepositoryResult<bool> {
            if self.hide_duplicates.get() {
                return Ok(false);
            }
            Ok(self
                .state
                .borrow()
                .registrations
                .iter()
                .any(|r| r.id_client == client_id && r.id_trip == trip_id))
        }

        fn list_client_trips(
            &self,
            _client_id: ClientId,
        ) -> RepositoryResult<Vec<(Trip, Registration)>> {
            Ok(Vec::new())
        }
    }

    impl RegistrationWriter for FakeStore {
        fn create_registration(
            &self,
            registration: &NewRegistration,
        ) -> RepositoryResult<Registration> {
            let mut state = self.state.borrow_mut();
            if state.registrations.iter().any(|r| {
                r.id_client == registration.id_client && r.id_trip == registration.id_trip
            }) {
                return Err(RepositoryError::UniqueViolation(
                    "UNIQUE constraint failed: client_trip.id_client, client_trip.id_trip"
                        .to_string(),
                ));
            }
            let created = Registration::from(registration.clone());
            state.registrations.push(created.clone());
            if let Some(token) = &self.cancel_after_insert {
                token.cancel();
            }
            Ok(created)
        }

        fn delete_registration(
            &self,
            client_id: ClientId,
            trip_id: TripId,
        ) -> RepositoryResult<usize> {
            let mut state = self.state.borrow_mut();
            let before = state.registrations.len();
            state
                .registrations
                .retain(|r| !(r.id_client == client_id && r.id_trip == trip_id));
            Ok(before - state.registrations.len())
        }
    }

    impl TravelUnitOfWork for FakeStore {
        fn atomically<T, E, F>(&self, work: F) -> Result<T, E>
        where
            F: FnOnce(&dyn TravelStore) -> Result<T, E>,
            E: From<RepositoryError>,
        {
            let snapshot = self.state.borrow().clone();
            let result = work(self);
            if result.is_err() {
                self.state.replace(snapshot);
            }
            result
        }
    }

    fn client(id: i32) -> Client {
        NewClient::new(
            FirstName::new(format!("First{id}")).expect("valid first name"),
            LastName::new(format!("Last{id}")).expect("valid last name"),
            ClientEmail::new(format!("client{id}@example.com")).expect("valid email"),
            Telephone::new("+48123456789").expect("valid telephone"),
            Pesel::new("12345678901").expect("valid pesel"),
        )
        .into_client(ClientId::new(id).expect("valid client id"))
    }

    fn trip(id: i32, max_people: i32) -> Trip {
        let from = NaiveDate::from_ymd_opt(2027, 7, 1)
            .and_then(|d| d.and_hms_opt(8, 0, 0))
            .expect("valid date");
        let to = NaiveDate::from_ymd_opt(2027, 7, 14)
            .and_then(|d| d.and_hms_opt(20, 0, 0))
            .expect("valid date");
        Trip {
            id_trip: TripId::new(id).expect("valid trip id"),
            name: TripName::new("Alps").expect("valid trip name"),
            description: "Hiking in the Alps".to_string(),
            date_from: from,
            date_to: to,
            max_people,
        }
    }

    fn cid(id: i32) -> ClientId {
        ClientId::new(id).expect("valid client id")
    }

    fn tid(id: i32) -> TripId {
        TripId::new(id).expect("valid trip id")
    }

    fn today() -> DateCode {
        DateCode::new(20261019).expect("valid date code")
    }

    fn register(store: &FakeStore, client: i32, trip: i32) -> ServiceResult<RegistrationRecord> {
        register_client_on_trip_at(store, cid(client), tid(trip), today(), &CancellationToken::new())
    }

    #[test]
    fn registers_client_and_stamps_today() {
        let store = FakeStore::with_trip(2);

        let record = register(&store, 1, 10).expect("registered");

        assert_eq!(record.id_client, cid(1));
        assert_eq!(record.first_name.as_str(), "First1");
        assert_eq!(record.trip_name.as_str(), "Alps");
        assert_eq!(record.trip_description, "Hiking in the Alps");

        let state = store.state.borrow();
        assert_eq!(state.registrations.len(), 1);
        assert_eq!(state.registrations[0].registered_at, today());
        assert_eq!(state.registrations[0].payment_date, Some(today()));
    }

    #[test]
    fn unknown_client_is_reported_before_unknown_trip() {
        let store = FakeStore::with_trip(2);

        match register(&store, 99, 77) {
            Err(ServiceError::NotFound(message)) => {
                assert_eq!(message, "Client with id 99 does not exist.")
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn unknown_trip_is_not_found() {
        let store = FakeStore::with_trip(2);

        match register(&store, 1, 77) {
            Err(ServiceError::NotFound(message)) => {
                assert_eq!(message, "Trip with id 77 does not exist.")
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn last_free_seat_can_be_taken_once() {
        let store = FakeStore::with_trip(2);
        register(&store, 1, 10).expect("first seat");

        register(&store, 2, 10).expect("last seat");
        assert_eq!(store.registration_count(), 2);

        match register(&store, 3, 10) {
            Err(ServiceError::CapacityExceeded(message)) => {
                assert_eq!(message, "This trip is full.")
            }
            other => panic!("unexpected result: {other:?}"),
        }
        assert_eq!(store.registration_count(), 2);
    }

    #[test]
    fn overbooked_trip_still_accepts_registrations() {
        let store = FakeStore::with_trip(1);
        {
            let mut state = store.state.borrow_mut();
            for id in [1, 2] {
                state.registrations.push(Registration {
                    id_client: cid(id),
                    id_trip: tid(10),
                    registered_at: today(),
                    payment_date: None,
                });
            }
        }

        register(&store, 3, 10).expect("count differs from max_people");
        assert_eq!(store.registration_count(), 3);
    }

    #[test]
    fn full_trip_is_reported_before_duplicate() {
        let store = FakeStore::with_trip(1);
        register(&store, 1, 10).expect("only seat");

        assert!(matches!(
            register(&store, 1, 10),
            Err(ServiceError::CapacityExceeded(_))
        ));
    }

    #[test]
    fn duplicate_registration_leaves_state_unchanged() {
        let store = FakeStore::with_trip(5);
        register(&store, 1, 10).expect("registered");

        match register(&store, 1, 10) {
            Err(ServiceError::AlreadyRegistered(message)) => {
                assert_eq!(message, "Client is already registered on the trip.")
            }
            other => panic!("unexpected result: {other:?}"),
        }
        assert_eq!(store.registration_count(), 1);
    }

    #[test]
    fn unique_violation_on_insert_is_already_registered() {
        let store = FakeStore::with_trip(5);
        register(&store, 1, 10).expect("registered");
        store.hide_duplicates.set(true);

        assert!(matches!(
            register(&store, 1, 10),
            Err(ServiceError::AlreadyRegistered(_))
        ));
        assert_eq!(store.registration_count(), 1);
    }

    #[test]
    fn cancellation_after_insert_rolls_back() {
        let token = CancellationToken::new();
        let mut store = FakeStore::with_trip(5);
        store.cancel_after_insert = Some(token.clone());

        let result = register_client_on_trip_at(&store, cid(1), tid(10), today(), &token);

        assert!(matches!(result, Err(ServiceError::Cancelled)));
        assert_eq!(store.registration_count(), 0);
    }

    #[test]
    fn cancelled_token_skips_the_store() {
        let store = FakeStore::with_trip(5);
        let token = CancellationToken::new();
        token.cancel();

        let result = register_client_on_trip_at(&store, cid(1), tid(10), today(), &token);

        assert!(matches!(result, Err(ServiceError::Cancelled)));
        assert_eq!(store.registration_count(), 0);
    }

    #[test]
    fn removal_deletes_once_then_reports_not_found() {
        let store = FakeStore::with_trip(5);
        register(&store, 1, 10).expect("registered");
        let token = CancellationToken::new();

        remove_client_from_trip(&store, cid(1), tid(10), &token).expect("removed");
        assert_eq!(store.registration_count(), 0);

        match remove_client_from_trip(&store, cid(1), tid(10), &token) {
            Err(ServiceError::NotFound(message)) => assert_eq!(
                message,
                "The client with id 1 is not registered on the trip with id 10."
            ),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn removal_store_failure_is_unavailable() {
        let mut repo = MockRepository::new();
        repo.expect_delete_registration()
            .times(1)
            .returning(|_, _| Err(RepositoryError::ConnectionError("timed out".to_string())));

        let result = remove_client_from_trip(&repo, cid(1), tid(10), &CancellationToken::new());

        assert!(matches!(result, Err(ServiceError::StoreUnavailable(_))));
    }
}
