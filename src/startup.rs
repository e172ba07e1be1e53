//! Application startup and server initialization.
//!
//! This module handles the creation and configuration of the HTTP server,
//! including the auth scheme registry, the live settings map, and route setup.

use std::sync::{Arc, RwLock};

use tokio::net::TcpListener;
use tracing::info;

use crate::config::ConfigV1;
use crate::routes;
use crate::schemes::SchemeRegistry;
use crate::state::AppState;

/// Initializes and runs the application server.
///
/// Seeds the live settings map from the configuration, instantiates the
/// configured auth schemes, and registers the routes. Binds to the address
/// specified in the configuration and starts serving requests.
///
/// # Errors
///
/// Returns an error if route registration fails (missing secure key or an
/// unknown auth scheme), if the server fails to bind to the specified
/// address, or on a runtime error during execution. Registration failures
/// happen before the listener is opened, so no route becomes reachable.
pub async fn run(config: Arc<ConfigV1>) -> Result<(), Box<dyn std::error::Error>> {
    let settings = Arc::new(RwLock::new(config.app.clone()));
    let schemes = Arc::new(SchemeRegistry::new(&config.schemes));

    let state = AppState {
        config: config.clone(),
        settings,
        schemes,
    };

    let app = routes::create_router(state)?;

    info!("Starting server on {}", config.bind_address);

    let listener = TcpListener::bind(&config.bind_address).await?;

    axum::serve(listener, app).await?;

    Ok(())
}
