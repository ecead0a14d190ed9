//! Mock repository implementations for isolating services in tests.

use mockall::mock;

use crate::domain::client::{Client, NewClient};
use crate::domain::registration::{NewRegistration, Registration};
use crate::domain::trip::Trip;
use crate::domain::types::{ClientId, CountryName, TripId};
use crate::repository::errors::RepositoryResult;
use crate::repository::{
    ClientReader, ClientWriter, RegistrationReader, RegistrationWriter, TripReader,
};

mock! {
    pub Repository {}

    impl ClientReader for Repository {
        fn get_client_by_id(&self, id: ClientId) -> RepositoryResult<Option<Client>>;
        fn client_exists(&self, id: ClientId) -> RepositoryResult<bool>;
    }

    impl ClientWriter for Repository {
        fn create_client(&self, new_client: &NewClient) -> RepositoryResult<Client>;
    }

    impl TripReader for Repository {
        fn list_trip_countries(&self) -> RepositoryResult<Vec<(Trip, CountryName)>>;
        fn get_trip_by_id(&self, id: TripId) -> RepositoryResult<Option<Trip>>;
        fn trip_exists(&self, id: TripId) -> RepositoryResult<bool>;
        fn get_trip_max_people(&self, id: TripId) -> RepositoryResult<Option<i32>>;
    }

    impl RegistrationReader for Repository {
        fn count_trip_registrations(&self, trip_id: TripId) -> RepositoryResult<i64>;
        fn registration_exists(
            &self,
            client_id: ClientId,
            trip_id: TripId,
        ) -> RepositoryResult<bool>;
        fn list_client_trips(
            &self,
            client_id: ClientId,
        ) -> RepositoryResult<Vec<(Trip, Registration)>>;
    }

    impl RegistrationWriter for Repository {
        fn create_registration(
            &self,
            registration: &NewRegistration,
        ) -> RepositoryResult<Registration>;
        fn delete_registration(
            &self,
            client_id: ClientId,
            trip_id: TripId,
        ) -> RepositoryResult<usize>;
    }
}
