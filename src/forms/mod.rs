//! Request payloads accepted by the travel routes.

use thiserror::Error;

use crate::domain::types::TypeConstraintError;

pub mod client;

#[derive(Debug, Error, PartialEq)]
/// Errors that can occur when processing request data.
pub enum FormError {
    #[error("Invalid length of field(s): {}.", .0.join(", "))]
    InvalidLength(Vec<String>),

    #[error("Field {0} cannot be empty.")]
    EmptyField(&'static str),

    #[error("{0}")]
    Format(#[from] TypeConstraintError),
}
