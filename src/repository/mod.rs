//! Persistence ports and their Diesel implementation.
//!
//! Services depend only on the reader/writer traits below. [`DieselRepository`]
//! checks a fresh pooled connection out for every call, while
//! [`TravelUnitOfWork::atomically`] hands the closure a [`TravelStore`] bound
//! to one connection inside a single transaction.

use std::cell::RefCell;

use diesel::SqliteConnection;
use diesel::result::Error as DieselError;

use crate::db::{DbConnection, DbPool, get_connection};
use crate::domain::client::{Client, NewClient};
use crate::domain::registration::{NewRegistration, Registration};
use crate::domain::trip::Trip;
use crate::domain::types::{ClientId, CountryName, TripId};
use crate::repository::errors::{RepositoryError, RepositoryResult};

pub mod client;
pub mod errors;
#[cfg(any(test, feature = "test-mocks"))]
pub mod mock;
pub mod registration;
pub mod trip;

pub trait ClientReader {
    fn get_client_by_id(&self, id: ClientId) -> RepositoryResult<Option<Client>>;
    fn client_exists(&self, id: ClientId) -> RepositoryResult<bool>;
}

pub trait ClientWriter {
    fn create_client(&self, new_client: &NewClient) -> RepositoryResult<Client>;
}

pub trait TripReader {
    /// One row per (trip, country) pair; trips without countries are absent.
    fn list_trip_countries(&self) -> RepositoryResult<Vec<(Trip, CountryName)>>;
    fn get_trip_by_id(&self, id: TripId) -> RepositoryResult<Option<Trip>>;
    fn trip_exists(&self, id: TripId) -> RepositoryResult<bool>;
    fn get_trip_max_people(&self, id: TripId) -> RepositoryResult<Option<i32>>;
}

pub trait RegistrationReader {
    fn count_trip_registrations(&self, trip_id: TripId) -> RepositoryResult<i64>;
    fn registration_exists(&self, client_id: ClientId, trip_id: TripId) -> RepositoryResult<bool>;
    fn list_client_trips(&self, client_id: ClientId) -> RepositoryResult<Vec<(Trip, Registration)>>;
}

pub trait RegistrationWriter {
    fn create_registration(&self, registration: &NewRegistration)
    -> RepositoryResult<Registration>;
    /// Returns the number of deleted rows.
    fn delete_registration(&self, client_id: ClientId, trip_id: TripId) -> RepositoryResult<usize>;
}

/// Everything the registration workflow reads and writes.
pub trait TravelStore: ClientReader + TripReader + RegistrationReader + RegistrationWriter {}

impl<T> TravelStore for T where
    T: ClientReader + TripReader + RegistrationReader + RegistrationWriter + ?Sized
{
}

/// Transaction scoping for multi-step workflows.
pub trait TravelUnitOfWork {
    /// Runs `work` inside one transaction. Returning `Err` rolls back every
    /// write made through the provided store.
    fn atomically<T, E, F>(&self, work: F) -> Result<T, E>
    where
        F: FnOnce(&dyn TravelStore) -> Result<T, E>,
        E: From<RepositoryError>;
}

/// Diesel-backed repository over a SQLite connection pool.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool,
}

impl DieselRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(get_connection(&self.pool)?)
    }
}

/// A [`TravelStore`] bound to a connection that is inside a transaction.
pub struct DieselTransaction<'c> {
    conn: RefCell<&'c mut SqliteConnection>,
}

impl<'c> DieselTransaction<'c> {
    fn new(conn: &'c mut SqliteConnection) -> Self {
        Self {
            conn: RefCell::new(conn),
        }
    }

    fn with_conn<T>(
        &self,
        query: impl FnOnce(&mut SqliteConnection) -> RepositoryResult<T>,
    ) -> RepositoryResult<T> {
        let mut conn = self.conn.borrow_mut();
        query(&mut **conn)
    }
}

/// Keeps the caller's error apart from failures of the transaction itself.
enum TransactionError<E> {
    Store(DieselError),
    Work(E),
}

impl<E> From<DieselError> for TransactionError<E> {
    fn from(err: DieselError) -> Self {
        TransactionError::Store(err)
    }
}

impl TravelUnitOfWork for DieselRepository {
    fn atomically<T, E, F>(&self, work: F) -> Result<T, E>
    where
        F: FnOnce(&dyn TravelStore) -> Result<T, E>,
        E: From<RepositoryError>,
    {
        let mut conn = self.conn().map_err(E::from)?;

        // IMMEDIATE takes the write lock at BEGIN so concurrent workflows
        // serialize instead of interleaving their checks.
        conn.immediate_transaction::<T, TransactionError<E>, _>(|conn| {
            let store = DieselTransaction::new(conn);
            work(&store).map_err(TransactionError::Work)
        })
        .map_err(|err| match err {
            TransactionError::Work(err) => err,
            TransactionError::Store(err) => E::from(RepositoryError::from(err)),
        })
    }
}
