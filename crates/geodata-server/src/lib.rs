//! Geodata Server Library
//!
//! HTTP backend for collecting batched geolocation readings.
//!
//! # Overview
//!
//! The server exposes a small REST API:
//!
//! - **Project registry**: create and look up projects addressed by 6-digit
//!   human-shareable identifiers
//! - **Ingestion**: batched `(longitude, latitude, timestamp)` uploads tagged
//!   with an `upload_id`, one stored row per reading
//! - **Queries**: raw rows per upload plus latest-timestamp summaries per
//!   upload and per user
//! - **Auth**: username/password login issuing access and refresh tokens,
//!   guarding the admin account-management endpoints
//!
//! # Architecture
//!
//! Each feature is a vertical slice under [`features`] with its own
//! `commands/` (writes), `queries/` (reads) and `routes.rs`. Handlers are
//! standalone async functions taking the connection pool; all persistent
//! state lives in PostgreSQL, and the store's constraints (primary keys,
//! unique indexes, foreign keys) are the authoritative integrity checks.
//!
//! ## Framework Stack
//!
//! - **Axum**: web framework and routing
//! - **SQLx**: PostgreSQL access and migrations
//! - **Tower**: middleware (tracing, CORS, compression)
//!
//! # Example
//!
//! ```no_run
//! use geodata_server::{api, config::Config, db};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load()?;
//!     let pool = db::create_pool(&config.database).await?;
//!     api::serve(config, pool).await?;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod features;
pub mod middleware;
