use serde::Deserialize;
use validator::Validate;

use crate::domain::client::NewClient;
use crate::domain::types::{ClientEmail, FirstName, LastName, Pesel, Telephone};
use crate::forms::FormError;

#[derive(Clone, Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
/// Body of the create-client request.
pub struct ClientCreateForm {
    #[validate(length(min = 1, max = 120))]
    pub first_name: String,
    #[validate(length(min = 1, max = 120))]
    pub last_name: String,
    #[validate(length(min = 1, max = 120))]
    pub email: String,
    #[validate(length(min = 1, max = 120))]
    pub telephone: String,
    #[validate(length(equal = 11))]
    pub pesel: String,
}

/// Name of a form field as it appears in the JSON body.
fn json_field_name(field: &str) -> &str {
    match field {
        "first_name" => "firstName",
        "last_name" => "lastName",
        other => other,
    }
}

impl ClientCreateForm {
    /// Checks field lengths, then email, pesel and telephone formats in that
    /// order, stopping at the first failure.
    pub fn validate_fields(&self) -> Result<(), FormError> {
        self.validate().map_err(|errors| {
            let mut fields = errors
                .field_errors()
                .keys()
                .map(|field| json_field_name(field).to_string())
                .collect::<Vec<_>>();
            fields.sort();
            FormError::InvalidLength(fields)
        })?;

        ClientEmail::new(self.email.as_str())?;
        Pesel::new(self.pesel.as_str())?;
        Telephone::new(self.telephone.as_str())?;

        Ok(())
    }

    /// Validates the payload and converts it into a domain [`NewClient`].
    pub fn into_new_client(self) -> Result<NewClient, FormError> {
        self.validate_fields()?;

        let first_name =
            FirstName::new(self.first_name).map_err(|_| FormError::EmptyField("firstName"))?;
        let last_name =
            LastName::new(self.last_name).map_err(|_| FormError::EmptyField("lastName"))?;

        Ok(NewClient::new(
            first_name,
            last_name,
            ClientEmail::new(self.email)?,
            Telephone::new(self.telephone)?,
            Pesel::new(self.pesel)?,
        ))
    }
}
