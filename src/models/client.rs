use diesel::prelude::*;

use crate::domain::client::{Client as DomainClient, NewClient as DomainNewClient};
use crate::domain::types::{ClientEmail, ClientId, FirstName, LastName, Pesel, Telephone};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::client)]
#[diesel(primary_key(id_client))]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
/// Diesel model for [`crate::domain::client::Client`].
pub struct Client {
    pub id_client: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub telephone: String,
    pub pesel: String,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::client)]
/// Insertable form of [`Client`].
pub struct NewClient<'a> {
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub email: &'a str,
    pub telephone: &'a str,
    pub pesel: &'a str,
}

/// Stored rows are taken as they are; the format rules apply only to new
/// clients.
impl From<Client> for DomainClient {
    fn from(client: Client) -> Self {
        Self {
            id_client: ClientId::new_unchecked(client.id_client),
            first_name: FirstName::new_unchecked(client.first_name),
            last_name: LastName::new_unchecked(client.last_name),
            email: ClientEmail::new_unchecked(client.email),
            telephone: Telephone::new_unchecked(client.telephone),
            pesel: Pesel::new_unchecked(client.pesel),
        }
    }
}

impl<'a> From<&'a DomainNewClient> for NewClient<'a> {
    fn from(client: &'a DomainNewClient) -> Self {
        Self {
            first_name: client.first_name.as_str(),
            last_name: client.last_name.as_str(),
            email: client.email.as_str(),
            telephone: client.telephone.as_str(),
            pesel: client.pesel.as_str(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_domain_new() -> DomainNewClient {
        DomainNewClient::new(
            FirstName::new("Jan").expect("valid first name"),
            LastName::new("Kowalski").expect("valid last name"),
            ClientEmail::new("jan@example.com").expect("valid email"),
            Telephone::new("+48123456789").expect("valid telephone"),
            Pesel::new("90010112345").expect("valid pesel"),
        )
    }

    #[test]
    fn from_domain_new_creates_newclient() {
        let domain = sample_domain_new();
        let new: NewClient = (&domain).into();
        assert_eq!(new.first_name, "Jan");
        assert_eq!(new.last_name, "Kowalski");
        assert_eq!(new.email, "jan@example.com");
        assert_eq!(new.telephone, "+48123456789");
        assert_eq!(new.pesel, "90010112345");
    }

    #[test]
    fn client_into_domain() {
        let db_client = Client {
            id_client: 3,
            first_name: "Anna".to_string(),
            last_name: "Nowak".to_string(),
            email: "anna@example.com".to_string(),
            telephone: "+48987654321".to_string(),
            pesel: "85050554321".to_string(),
        };
        let domain = DomainClient::from(db_client);
        assert_eq!(domain.id_client.get(), 3);
        assert_eq!(domain.first_name.as_str(), "Anna");
        assert_eq!(domain.pesel.as_str(), "85050554321");
    }

    #[test]
    fn legacy_row_is_read_as_stored() {
        let db_client = Client {
            id_client: 4,
            first_name: "Piotr".to_string(),
            last_name: "Zielinski".to_string(),
            email: "piotr@example.com".to_string(),
            telephone: "600700800".to_string(),
            pesel: "85050554321".to_string(),
        };
        let domain = DomainClient::from(db_client);
        assert_eq!(domain.telephone.as_str(), "600700800");
        assert_eq!(domain.id_client.get(), 4);
    }
}
