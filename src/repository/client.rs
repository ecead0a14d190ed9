//! Repository implementation for clients.

use diesel::dsl::exists;
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;

use crate::{
    domain::{
        client::{Client, NewClient},
        types::ClientId,
    },
    models::client::{Client as DbClient, NewClient as DbNewClient},
    repository::{
        ClientReader, ClientWriter, DieselRepository, DieselTransaction,
        errors::RepositoryResult,
    },
};

fn get_client_by_id(conn: &mut SqliteConnection, id: ClientId) -> RepositoryResult<Option<Client>> {
    use crate::schema::client;

    let db_client = client::table
        .find(id.get())
        .select(DbClient::as_select())
        .first::<DbClient>(conn)
        .optional()?;

    Ok(db_client.map(Client::from))
}

fn client_exists(conn: &mut SqliteConnection, id: ClientId) -> RepositoryResult<bool> {
    use crate::schema::client;

    let found = diesel::select(exists(client::table.find(id.get()))).get_result::<bool>(conn)?;
    Ok(found)
}

fn create_client(conn: &mut SqliteConnection, new_client: &NewClient) -> RepositoryResult<Client> {
    use crate::schema::client;

    let insertable: DbNewClient = new_client.into();
    let db_client = diesel::insert_into(client::table)
        .values(&insertable)
        .returning(DbClient::as_returning())
        .get_result::<DbClient>(conn)?;

    Ok(Client::from(db_client))
}

impl ClientReader for DieselRepository {
    fn get_client_by_id(&self, id: ClientId) -> RepositoryResult<Option<Client>> {
        let mut conn = self.conn()?;
        get_client_by_id(&mut conn, id)
    }

    fn client_exists(&self, id: ClientId) -> RepositoryResult<bool> {
        let mut conn = self.conn()?;
        client_exists(&mut conn, id)
    }
}

impl ClientWriter for DieselRepository {
    fn create_client(&self, new_client: &NewClient) -> RepositoryResult<Client> {
        let mut conn = self.conn()?;
        create_client(&mut conn, new_client)
    }
}

impl ClientReader for DieselTransaction<'_> {
    fn get_client_by_id(&self, id: ClientId) -> RepositoryResult<Option<Client>> {
        self.with_conn(|conn| get_client_by_id(conn, id))
    }

    fn client_exists(&self, id: ClientId) -> RepositoryResult<bool> {
        self.with_conn(|conn| client_exists(conn, id))
    }
}
