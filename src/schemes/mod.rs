//! Named authentication schemes that routes can be gated behind.
//!
//! A scheme inspects an incoming request and either lets it through or
//! answers with its own challenge response (a 401, a redirect to a login
//! page). Routes reference schemes by name; the registry resolves them at
//! setup time, so a dangling name fails before any route exists.

pub mod basic_scheme;
pub mod redirect_scheme;

use std::sync::Arc;

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;
use http::request::Parts;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use basic_scheme::{BasicScheme, BasicSchemeConfig};
use redirect_scheme::{RedirectScheme, RedirectSchemeConfig};

/// Configuration options for each authentication scheme.
#[derive(Deserialize, Serialize, JsonSchema, Debug)]
#[serde(tag = "type")]
pub enum SchemeConfig {
    #[serde(rename = "basic")]
    Basic(BasicSchemeConfig),
    #[serde(rename = "redirect")]
    Redirect(RedirectSchemeConfig),
}

/// An authentication scheme either passes a request through or answers it
/// with its own challenge response, which is returned to the client as-is.
#[async_trait::async_trait]
pub trait Scheme: Send + Sync {
    fn get_name(&self) -> &str;
    fn get_type(&self) -> &str;
    async fn authenticate(&self, parts: &Parts) -> Result<(), Response>;
}

/// Create an authentication scheme from a given config.
pub fn create_scheme(config: &SchemeConfig) -> Arc<dyn Scheme> {
    match config {
        SchemeConfig::Basic(cfg) => Arc::new(BasicScheme::new(cfg)),
        SchemeConfig::Redirect(cfg) => Arc::new(RedirectScheme::new(cfg)),
    }
}

/// Holds all configured schemes, looked up by name at route setup time.
pub struct SchemeRegistry {
    schemes: Vec<Arc<dyn Scheme>>,
}

impl SchemeRegistry {
    /// Instantiate every configured scheme.
    pub fn new(configs: &[SchemeConfig]) -> Self {
        if !configs.is_empty() {
            info!("Creating {} auth scheme(s)...", configs.len());
        }
        let schemes = configs.iter().map(create_scheme).collect();
        SchemeRegistry { schemes }
    }

    /// Look up a scheme by its configured name.
    pub fn get(&self, name: &str) -> Option<Arc<dyn Scheme>> {
        self.schemes.iter().find(|s| s.get_name() == name).cloned()
    }
}

/// Middleware adapter: runs the scheme against the request and forwards to
/// the inner handler only when it passes. A rejected request gets the
/// scheme's own response, untouched.
pub async fn require(scheme: Arc<dyn Scheme>, request: Request, next: Next) -> Response {
    let (parts, body) = request.into_parts();
    match scheme.authenticate(&parts).await {
        Ok(()) => next.run(Request::from_parts(parts, body)).await,
        Err(challenge) => {
            debug!("Scheme '{}' rejected the request", scheme.get_name());
            challenge
        }
    }
}
