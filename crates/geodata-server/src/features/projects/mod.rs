//! Project registry feature
//!
//! Projects are addressed by 6-digit human-shareable identifiers minted by
//! rejection sampling against the store's primary-key constraint.

pub mod commands;
pub mod queries;
pub mod routes;

pub use routes::routes;
