//! Shared application state.
//!
//! Contains the state that is shared across all request handlers,
//! including configuration, live application settings, and the
//! auth scheme registry.

use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use serde_json::Value;

use crate::config::ConfigV1;
use crate::schemes::SchemeRegistry;

/// Live application settings, owned by the server process.
///
/// Handlers read this at request time rather than caching a copy, so
/// mutations made while the server runs show up in later responses.
pub type SharedSettings = Arc<RwLock<BTreeMap<String, Value>>>;

/// Application state shared across all HTTP handlers.
///
/// This state is cloned for each request handler and contains
/// references to the configuration, settings, and auth schemes.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration loaded at startup.
    pub config: Arc<ConfigV1>,
    /// Live application settings exposed by the config route.
    pub settings: SharedSettings,
    /// Authentication schemes registered by name.
    pub schemes: Arc<SchemeRegistry>,
}
