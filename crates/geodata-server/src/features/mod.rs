//! Feature modules implementing the geodata API
//!
//! Each feature is a vertical slice with its own commands (writes), queries
//! (reads) and route definitions:
//!
//! - **projects**: project registry (create, get, list)
//! - **user_data**: batched geolocation ingestion and the read queries over
//!   stored readings
//! - **accounts**: token issuance (`/token`, `/refresh`) and admin-gated
//!   account management (`/admin/users`)
//!
//! Commands and queries are standalone async `handle()` functions taking the
//! connection pool, wired to HTTP in each feature's `routes.rs`.

pub mod accounts;
pub mod projects;
pub mod shared;
pub mod user_data;

use axum::Router;

use crate::api::AppState;

/// Creates the main router with all feature routes mounted.
pub fn router(state: AppState) -> Router<()> {
    let project_routes = Router::new()
        .merge(projects::routes())
        .merge(user_data::routes())
        .with_state(state.db.clone());

    Router::new()
        .nest("/project", project_routes)
        .merge(accounts::routes().with_state(state))
}
