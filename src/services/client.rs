use tokio_util::sync::CancellationToken;

use crate::domain::client::Client;
use crate::domain::types::ClientId;
use crate::forms::client::ClientCreateForm;
use crate::repository::{ClientReader, ClientWriter};
use crate::services::{ServiceError, ServiceResult, ensure_active, log_failure};

/// Reads a single client.
pub fn get_client<R>(repo: &R, client_id: ClientId, token: &CancellationToken) -> ServiceResult<Client>
where
    R: ClientReader + ?Sized,
{
    let result = (|| -> ServiceResult<Client> {
        ensure_active(token)?;
        repo.get_client_by_id(client_id)?.ok_or_else(|| {
            ServiceError::NotFound(format!("Client with id {client_id} does not exist."))
        })
    })();

    result.inspect_err(|err| log_failure("get client", err))
}

/// Validates the payload and stores a new client.
///
/// Nothing is written unless every field passes validation.
pub fn create_client<R>(
    repo: &R,
    form: ClientCreateForm,
    token: &CancellationToken,
) -> ServiceResult<Client>
where
    R: ClientWriter + ?Sized,
{
    let result = (|| -> ServiceResult<Client> {
        let new_client = form.into_new_client()?;

        ensure_active(token)?;
        let client = repo.create_client(&new_client)?;
        log::info!("Created client {}", client.id_client);

        Ok(client)
    })();

    result.inspect_err(|err| log_failure("create client", err))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::errors::RepositoryError;
    use crate::repository::mock::MockRepository;

    fn form() -> ClientCreateForm {
        ClientCreateForm {
            first_name: "Anna".to_string(),
            last_name: "Nowak".to_string(),
            email: "anna@example.com".to_string(),
            telephone: "+48111222333".to_string(),
            pesel: "90010112345".to_string(),
        }
    }

    #[test]
    fn stores_valid_client() {
        let mut repo = MockRepository::new();
        repo.expect_create_client()
            .times(1)
            .withf(|new_client| new_client.pesel.as_str() == "90010112345")
            .returning(|new_client| {
                Ok(new_client
                    .clone()
                    .into_client(ClientId::new(42).expect("valid id")))
            });

        let client = create_client(&repo, form(), &CancellationToken::new()).expect("created");

        assert_eq!(client.id_client.get(), 42);
        assert_eq!(client.first_name.as_str(), "Anna");
    }

    #[test]
    fn invalid_payload_is_never_persisted() {
        let mut repo = MockRepository::new();
        repo.expect_create_client().times(0);
        let mut payload = form();
        payload.telephone = "48111222333".to_string();

        let result = create_client(&repo, payload, &CancellationToken::new());

        match result {
            Err(ServiceError::InvalidFormat(message)) => {
                assert_eq!(message, "Phone number must start with '+'.")
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn store_failure_is_unavailable() {
        let mut repo = MockRepository::new();
        repo.expect_create_client()
            .times(1)
            .returning(|_| Err(RepositoryError::DatabaseError("disk I/O error".to_string())));

        let result = create_client(&repo, form(), &CancellationToken::new());

        assert!(matches!(result, Err(ServiceError::StoreUnavailable(_))));
    }

    #[test]
    fn cancelled_request_does_not_write() {
        let mut repo = MockRepository::new();
        repo.expect_create_client().times(0);
        let token = CancellationToken::new();
        token.cancel();

        let result = create_client(&repo, form(), &token);

        assert!(matches!(result, Err(ServiceError::Cancelled)));
    }

    #[test]
    fn missing_client_is_not_found() {
        let mut repo = MockRepository::new();
        repo.expect_get_client_by_id()
            .times(1)
            .withf(|id| id.get() == 0)
            .returning(|_| Ok(None));

        let result = get_client(&repo, ClientId::new_unchecked(0), &CancellationToken::new());

        match result {
            Err(ServiceError::NotFound(message)) => {
                assert_eq!(message, "Client with id 0 does not exist.")
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
