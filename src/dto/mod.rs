//! DTOs returned by the service layer and serialized by the JSON API.

pub mod api;
pub mod registration;
pub mod trips;
