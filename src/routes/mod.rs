//! HTTP route definitions and handlers.
//!
//! This module organizes all HTTP endpoints into logical groups:
//! the config exposure route and health checks.

mod config_routes;
mod health_routes;

pub use config_routes::RegistrationError;

use crate::state::AppState;
use axum::Router;

/// Creates the application router with all configured routes.
///
/// Combines all route modules into a single router and attaches
/// the application state for access in handlers.
///
/// # Errors
///
/// Fails when the config route cannot be registered (missing secure key,
/// unresolvable auth scheme). No routes are installed in that case.
pub fn create_router(state: AppState) -> Result<Router, RegistrationError> {
    let router = Router::new()
        .merge(config_routes::routes(&state)?)
        .merge(health_routes::routes())
        .with_state(state);

    Ok(router)
}
