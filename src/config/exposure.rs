use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Options for the config route, resolved once when the route is set up.
///
/// Supplied values win over the documented defaults; unspecified fields
/// keep them. The secure key has no default on purpose: an empty key is a
/// registration error, never a reachable route.
#[derive(Deserialize, Serialize, Debug, Clone, JsonSchema)]
#[serde(default)]
pub struct ExposureConfig {
    /// Path the route is installed at.
    pub endpoint: String,
    /// Shared secret compared against the `key` query parameter.
    pub key: String,
    /// Whether the process environment is included in the snapshot.
    pub include_env_vars: bool,
    /// Framework-level auth for the route. Absent or `false` leaves access
    /// to the in-handler key check; a string names a registered scheme,
    /// which then decides alone.
    pub auth: Option<RouteAuth>,
    /// Where the snapshot goes: the response body or the server log.
    pub output: OutputMode,
}

impl Default for ExposureConfig {
    fn default() -> Self {
        ExposureConfig {
            endpoint: "/_config".to_string(),
            key: String::new(),
            include_env_vars: true,
            auth: None,
            output: OutputMode::Response,
        }
    }
}

/// Route-level auth selector: `false` explicitly opts out of framework
/// auth, a string names a scheme from the registry.
#[derive(Deserialize, Serialize, Debug, Clone, JsonSchema)]
#[serde(untagged)]
pub enum RouteAuth {
    Enabled(bool),
    Scheme(String),
}

impl RouteAuth {
    /// The scheme name, if this selector names one.
    pub fn scheme_name(&self) -> Option<&str> {
        match self {
            RouteAuth::Scheme(name) => Some(name),
            RouteAuth::Enabled(_) => None,
        }
    }
}

/// Output mode for the config snapshot.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    Response,
    Log,
}
