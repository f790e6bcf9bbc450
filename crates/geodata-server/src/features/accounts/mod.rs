//! Account and token feature
//!
//! Username/password login issuing access and refresh tokens, refresh-token
//! exchange, and admin-only account management.

pub mod commands;
pub mod routes;

pub use routes::routes;
