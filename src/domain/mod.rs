//! Domain aggregates exposed by the travel service layer.

pub mod client;
pub mod registration;
pub mod trip;
pub mod types;
