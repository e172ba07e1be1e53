use std::sync::{Arc, RwLock};

use axum::body::Body;
use axum::http::{Method, Request};
use axum::Router;
use configotron::config::{Config, ConfigV1};
use configotron::routes::{create_router, RegistrationError};
use configotron::schemes::SchemeRegistry;
use configotron::state::AppState;
use figment::providers::{Format, Yaml};
use figment::Figment;

/// Parse an inline YAML document into a v1 configuration.
pub fn load_config(yaml: &str) -> ConfigV1 {
    let config: Config = Figment::new()
        .merge(Yaml::string(yaml))
        .extract()
        .expect("Failed to parse test config YAML");

    match config {
        Config::ConfigV1(cfg) => cfg,
    }
}

/// Build the application router and its state from a configuration, the
/// same way startup does, minus the listener.
pub fn build_app(config: ConfigV1) -> Result<(Router, AppState), RegistrationError> {
    let config = Arc::new(config);

    let state = AppState {
        config: config.clone(),
        settings: Arc::new(RwLock::new(config.app.clone())),
        schemes: Arc::new(SchemeRegistry::new(&config.schemes)),
    };

    let router = create_router(state.clone())?;
    Ok((router, state))
}

/// A plain GET request with an empty body.
pub fn get_request(path: &str) -> Request<Body> {
    Request::builder()
        .method(Method::GET)
        .uri(path)
        .body(Body::empty())
        .expect("failed to build request")
}

/// A GET request carrying a `Cookie` header.
pub fn get_request_with_cookie(path: &str, cookie: &str) -> Request<Body> {
    Request::builder()
        .method(Method::GET)
        .uri(path)
        .header("Cookie", cookie)
        .body(Body::empty())
        .expect("failed to build request")
}
