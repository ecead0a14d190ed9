use serde::{Deserialize, Serialize};

use crate::domain::types::{ClientEmail, ClientId, FirstName, LastName, Pesel, Telephone};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub id_client: ClientId,
    pub first_name: FirstName,
    pub last_name: LastName,
    pub email: ClientEmail,
    pub telephone: Telephone,
    pub pesel: Pesel,
}

/// Validated payload for a client that has not been stored yet.
#[derive(Clone, Debug, PartialEq)]
pub struct NewClient {
    pub first_name: FirstName,
    pub last_name: LastName,
    pub email: ClientEmail,
    pub telephone: Telephone,
    pub pesel: Pesel,
}

impl NewClient {
    #[must_use]
    pub fn new(
        first_name: FirstName,
        last_name: LastName,
        email: ClientEmail,
        telephone: Telephone,
        pesel: Pesel,
    ) -> Self {
        Self {
            first_name,
            last_name,
            email,
            telephone,
            pesel,
        }
    }

    /// Attach the identifier assigned by the store.
    #[must_use]
    pub fn into_client(self, id_client: ClientId) -> Client {
        Client {
            id_client,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            telephone: self.telephone,
            pesel: self.pesel,
        }
    }
}
