//! Geolocation data feature
//!
//! Batched ingestion of `(longitude, latitude, timestamp)` readings tagged
//! with an `upload_id`, and the read queries over stored readings: raw rows
//! for one upload plus latest-timestamp summaries per upload and per user.

pub mod commands;
pub mod queries;
pub mod routes;

pub use routes::routes;
