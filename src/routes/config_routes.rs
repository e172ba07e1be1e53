//! The config exposure endpoint.
//!
//! Installs a single GET route that returns the server's application
//! settings and, optionally, the process environment. Access is gated by a
//! shared-secret query parameter unless the route was attached to a named
//! authentication scheme, in which case the scheme decides alone.

use std::sync::Arc;

use axum::extract::{Query, Request, State};
use axum::http::StatusCode;
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::config::{ExposureConfig, OutputMode, RouteAuth};
use crate::models::ConfigSnapshot;
use crate::schemes::{self, Scheme};
use crate::state::AppState;
use crate::utils::http_helpers::HTTPError;

/// Body returned in log output mode instead of the snapshot.
const LOG_MODE_BODY: &str = "See server log for config info (target is \"config\")";

/// Why the config route could not be registered.
#[derive(Debug, Error)]
pub enum RegistrationError {
    #[error("config route requires a secure key")]
    MissingKey,
    #[error("config route references unknown auth scheme '{0}'")]
    UnknownScheme(String),
    #[error("config route auth must be false or a scheme name")]
    UnsupportedAuth,
}

/// Registers the config route at the configured endpoint.
///
/// Options are validated before any route exists: the secure key must be
/// non-empty, and a named auth scheme must resolve in the registry. With a
/// scheme configured the route runs behind that scheme's middleware and
/// the handler skips its own key check.
pub fn routes(state: &AppState) -> Result<Router<AppState>, RegistrationError> {
    let options = &state.config.config_route;

    if options.key.is_empty() {
        return Err(RegistrationError::MissingKey);
    }

    let scheme = resolve_scheme(options, state)?;

    let router = Router::new().route(&options.endpoint, get(get_config));
    let router = match scheme {
        Some(scheme) => router.layer(middleware::from_fn(move |request: Request, next: Next| {
            let scheme = scheme.clone();
            async move { schemes::require(scheme, request, next).await }
        })),
        None => router,
    };

    info!("Config route registered at {}", options.endpoint);
    Ok(router)
}

/// Resolves the route's auth option against the scheme registry.
fn resolve_scheme(
    options: &ExposureConfig,
    state: &AppState,
) -> Result<Option<Arc<dyn Scheme>>, RegistrationError> {
    match &options.auth {
        None | Some(RouteAuth::Enabled(false)) => Ok(None),
        Some(RouteAuth::Enabled(true)) => Err(RegistrationError::UnsupportedAuth),
        Some(RouteAuth::Scheme(name)) => state
            .schemes
            .get(name)
            .map(Some)
            .ok_or_else(|| RegistrationError::UnknownScheme(name.clone())),
    }
}

#[derive(Deserialize)]
struct ConfigQuery {
    key: Option<String>,
}

/// Returns the live config snapshot, or 401 when the shared-secret check
/// fails and no auth scheme guards the route.
///
/// The settings map and the process environment are read at request time,
/// so changes made after registration show up in the response.
async fn get_config(
    State(state): State<AppState>,
    Query(query): Query<ConfigQuery>,
) -> Result<Response, HTTPError> {
    let options = &state.config.config_route;

    // A named scheme already ran in middleware; only key-gate otherwise.
    if !scheme_guards(options) && query.key.as_deref() != Some(options.key.as_str()) {
        debug!("Config request rejected: bad or missing key");
        return Err(HTTPError::new(
            StatusCode::UNAUTHORIZED,
            "Unauthorized access",
        ));
    }

    let snapshot = ConfigSnapshot::capture(&state.settings, options.include_env_vars);

    match options.output {
        OutputMode::Response => Ok(Json(snapshot).into_response()),
        OutputMode::Log => {
            info!(target: "config", snapshot = ?snapshot, "config snapshot");
            Ok(LOG_MODE_BODY.into_response())
        }
    }
}

/// True when a named scheme gates this route and the key check is skipped.
fn scheme_guards(options: &ExposureConfig) -> bool {
    options
        .auth
        .as_ref()
        .and_then(RouteAuth::scheme_name)
        .is_some()
}
