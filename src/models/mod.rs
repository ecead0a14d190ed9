//! Database models shared across the travel repository.

pub mod client;
pub mod config;
pub mod registration;
pub mod trip;
