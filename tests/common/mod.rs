#![allow(dead_code)]

use diesel::connection::SimpleConnection;
use tempfile::TempDir;
use travel_agency::db::{DbPool, establish_connection_pool, run_migrations};

/// Migrated SQLite database living in a temporary directory.
pub struct TestDb {
    _dir: TempDir,
    pool: DbPool,
}

impl TestDb {
    pub fn new(filename: &str) -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join(filename);
        let url = path.to_str().expect("utf-8 temp path").to_string();
        let pool = establish_connection_pool(&url).expect("create pool");
        run_migrations(&pool).expect("run migrations");
        Self { _dir: dir, pool }
    }

    pub fn pool(&self) -> DbPool {
        self.pool.clone()
    }

    pub fn execute(&self, sql: &str) {
        let mut conn = self.pool.get().expect("get connection");
        conn.batch_execute(sql).expect("execute seed sql");
    }

    pub fn insert_client(&self, id: i32, first_name: &str) {
        self.execute(&format!(
            "INSERT INTO client (id_client, first_name, last_name, email, telephone, pesel) \
             VALUES ({id}, '{first_name}', 'Kowalski', '{first_name}@example.com', '+48123456789', '12345678901');"
        ));
    }

    pub fn insert_trip(&self, id: i32, name: &str, max_people: i32) {
        self.execute(&format!(
            "INSERT INTO trip (id_trip, name, description, date_from, date_to, max_people) \
             VALUES ({id}, '{name}', '{name} tour', '2027-07-01 08:00:00', '2027-07-14 20:00:00', {max_people});"
        ));
    }

    pub fn insert_country(&self, id: i32, name: &str) {
        self.execute(&format!(
            "INSERT INTO country (id_country, name) VALUES ({id}, '{name}');"
        ));
    }

    pub fn link_country(&self, country_id: i32, trip_id: i32) {
        self.execute(&format!(
            "INSERT INTO country_trip (id_country, id_trip) VALUES ({country_id}, {trip_id});"
        ));
    }

    pub fn insert_registration(&self, client_id: i32, trip_id: i32, registered_at: i32) {
        self.execute(&format!(
            "INSERT INTO client_trip (id_client, id_trip, registered_at, payment_date) \
             VALUES ({client_id}, {trip_id}, {registered_at}, NULL);"
        ));
    }

    /// Two trips with countries plus one trip without any.
    pub fn seed_catalog(&self) {
        self.insert_trip(2, "Andes", 3);
        self.insert_trip(1, "Baltic", 2);
        self.insert_trip(3, "Nowhere", 5);
        self.insert_country(1, "Poland");
        self.insert_country(2, "Lithuania");
        self.insert_country(3, "Peru");
        self.insert_country(4, "Chile");
        self.link_country(3, 2);
        self.link_country(4, 2);
        self.link_country(2, 1);
        self.link_country(1, 1);
    }

    pub fn registration_count(&self, trip_id: i32) -> i64 {
        use diesel::prelude::*;
        use travel_agency::schema::client_trip;

        let mut conn = self.pool.get().expect("get connection");
        client_trip::table
            .filter(client_trip::id_trip.eq(trip_id))
            .count()
            .get_result(&mut conn)
            .expect("count registrations")
    }
}
