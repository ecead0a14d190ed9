//! Strongly-typed value objects used by domain entities.
//!
//! These wrappers enforce basic invariants (positive identifiers, the simple
//! contact-field formats accepted by the agency, well-formed date codes) so
//! that once a value reaches the domain layer it can be treated as trusted.
use std::ops::Deref;

use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use thiserror::Error;

/// Errors produced when attempting to construct a constrained value object.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeConstraintError {
    /// Provided identifier is zero or negative.
    #[error("id must be greater than zero")]
    NonPositiveId,
    /// Provided string contained no non-whitespace characters.
    #[error("value cannot be empty")]
    EmptyString,
    /// Email lacks either `@` or `.`.
    #[error("Invalid email format.")]
    InvalidEmail,
    /// Pesel contains something other than decimal digits.
    #[error("Pesel must only contain digits.")]
    NonDigitPesel,
    /// Pesel is not exactly [`PESEL_LENGTH`] characters long.
    #[error("Pesel must be exactly 11 digits long.")]
    InvalidPeselLength,
    /// Phone number does not begin with `+`.
    #[error("Phone number must start with '+'.")]
    PhoneMissingPlus,
    /// Phone number has a non-digit after the leading `+`.
    #[error("Phone number must contain only digits and '+' at the beginning.")]
    PhoneNonDigit,
    /// Integer is not a valid `yyyyMMdd` calendar date.
    #[error("invalid date code: {0}")]
    InvalidDateCode(i32),
}

/// Number of characters in a national identification number.
pub const PESEL_LENGTH: usize = 11;

/// Macro to generate lightweight newtypes for positive identifiers.
macro_rules! id_newtype {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(i32);

        impl $name {
            /// Creates a new identifier ensuring it is greater than zero.
            pub fn new(value: i32) -> Result<Self, TypeConstraintError> {
                if value > 0 {
                    Ok(Self(value))
                } else {
                    Err(TypeConstraintError::NonPositiveId)
                }
            }

            /// Wraps a key without checking it. Used for rows read back from
            /// the store and for lookup keys, where a non-positive value
            /// simply matches nothing.
            pub const fn new_unchecked(value: i32) -> Self {
                Self(value)
            }

            /// Returns the raw `i32` backing this identifier.
            pub const fn get(self) -> i32 {
                self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<i32> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: i32) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for i32 {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

id_newtype!(ClientId, "Unique identifier for a client.");
id_newtype!(TripId, "Unique identifier for a trip.");

/// Implements the shared accessors and conversions of a string newtype whose
/// constructor is `new`.
macro_rules! string_newtype_impls {
    ($name:ident) => {
        impl $name {
            /// Wraps a stored value as is, skipping the input format rules.
            pub fn new_unchecked<S: Into<String>>(value: S) -> Self {
                Self(value.into())
            }

            /// Borrow the value as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the wrapper and return the owned string.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl Deref for $name {
            type Target = str;

            fn deref(&self) -> &Self::Target {
                &self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<String> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl TryFrom<&str> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: &str) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

/// Wrapper for non-empty, trimmed strings.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NonEmptyString(String);

impl NonEmptyString {
    /// Trims whitespace and rejects empty inputs.
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let trimmed = value.into().trim().to_string();
        if trimmed.is_empty() {
            return Err(TypeConstraintError::EmptyString);
        }
        Ok(Self(trimmed))
    }
}

string_newtype_impls!(NonEmptyString);

macro_rules! non_empty_string_newtype {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(String);

        impl $name {
            /// Constructs a trimmed, non-empty value.
            pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
                let inner = NonEmptyString::new(value)?;
                Ok(Self(inner.into_inner()))
            }
        }

        string_newtype_impls!($name);
    };
}

non_empty_string_newtype!(FirstName, "Client first name enforcing non-empty values.");
non_empty_string_newtype!(LastName, "Client last name enforcing non-empty values.");
non_empty_string_newtype!(TripName, "Trip title enforcing non-empty values.");
non_empty_string_newtype!(CountryName, "Country name enforcing non-empty values.");

/// Client contact email.
///
/// Only checks that both `@` and `.` are present; anything stricter is left to
/// the mail system. The format newtypes below never trim their input.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct ClientEmail(String);

impl ClientEmail {
    pub fn new<S: Into<String>>(email: S) -> Result<Self, TypeConstraintError> {
        let email = email.into();
        if email.contains('@') && email.contains('.') {
            Ok(Self(email))
        } else {
            Err(TypeConstraintError::InvalidEmail)
        }
    }
}

string_newtype_impls!(ClientEmail);

/// National identification number: exactly [`PESEL_LENGTH`] decimal digits.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Pesel(String);

impl Pesel {
    /// Rejects non-digit characters first, then a wrong length.
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let value = value.into();
        if !value.chars().all(|c| c.is_ascii_digit()) {
            return Err(TypeConstraintError::NonDigitPesel);
        }
        if value.len() != PESEL_LENGTH {
            return Err(TypeConstraintError::InvalidPeselLength);
        }
        Ok(Self(value))
    }
}

string_newtype_impls!(Pesel);

/// Phone number in `+<digits>` form.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Telephone(String);

impl Telephone {
    /// A missing leading `+` and a non-digit tail are reported separately.
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let value = value.into();
        let Some(digits) = value.strip_prefix('+') else {
            return Err(TypeConstraintError::PhoneMissingPlus);
        };
        if !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(TypeConstraintError::PhoneNonDigit);
        }
        Ok(Self(value))
    }
}

string_newtype_impls!(Telephone);

/// Calendar day encoded as the integer `yyyyMMdd`, e.g. `20261019`.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DateCode(i32);

impl DateCode {
    /// Validates that the integer decodes to an existing calendar day.
    pub fn new(value: i32) -> Result<Self, TypeConstraintError> {
        let code = Self(value);
        code.to_date()
            .map(|_| code)
            .ok_or(TypeConstraintError::InvalidDateCode(value))
    }

    /// Wraps a stored code as is; [`DateCode::to_date`] reports whether it
    /// decodes.
    pub const fn new_unchecked(value: i32) -> Self {
        Self(value)
    }

    /// Encodes the given calendar day.
    pub fn from_date(date: NaiveDate) -> Self {
        Self(date.year() * 10_000 + date.month() as i32 * 100 + date.day() as i32)
    }

    /// Date code for the current local day.
    pub fn today() -> Self {
        Self::from_date(Local::now().date_naive())
    }

    /// Decodes back into a calendar day.
    pub fn to_date(self) -> Option<NaiveDate> {
        let year = self.0 / 10_000;
        let month = u32::try_from(self.0 / 100 % 100).ok()?;
        let day = u32::try_from(self.0 % 100).ok()?;
        NaiveDate::from_ymd_opt(year, month, day)
    }

    /// Returns the raw `yyyyMMdd` integer.
    pub const fn get(self) -> i32 {
        self.0
    }
}

impl Display for DateCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<i32> for DateCode {
    type Error = TypeConstraintError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<DateCode> for i32 {
    fn from(value: DateCode) -> Self {
        value.0
    }
}
