use async_trait::async_trait;
use axum::response::{IntoResponse, Response};
use base64::{engine::general_purpose, Engine as _};
use http::request::Parts;
use http::{header, StatusCode};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::Scheme;

/// BasicSchemeConfig defines the data for Basic authentication.
#[derive(Deserialize, Serialize, Debug, JsonSchema, Clone)]
pub struct BasicSchemeConfig {
    /// The name routes use to reference this scheme.
    pub name: String,
    /// The realm announced in the challenge.
    pub realm: String,
    /// A list of username/password pairs.
    pub users: Vec<BasicUserEntry>,
}

/// Represents a single user entry (username + password).
#[derive(Deserialize, Serialize, Debug, JsonSchema, Clone)]
pub struct BasicUserEntry {
    pub username: String,
    pub password: String,
}

/// A `BasicScheme` that implements Basic authentication by comparing
/// credentials to the user list in `BasicSchemeConfig`.
pub struct BasicScheme {
    pub config: BasicSchemeConfig,
}

impl BasicScheme {
    /// Create a new `BasicScheme` from the config struct.
    pub fn new(config: &BasicSchemeConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }

    /// The 401 challenge sent when credentials are missing or wrong.
    fn challenge(&self) -> Response {
        (
            StatusCode::UNAUTHORIZED,
            [(
                header::WWW_AUTHENTICATE,
                format!("Basic realm=\"{}\"", self.config.realm),
            )],
            "Unauthorized",
        )
            .into_response()
    }

    /// Decode an `Authorization: Basic <base64>` value and check the
    /// credentials against the config's user list. Returns the username
    /// on success.
    fn check(&self, authorization: &str) -> Result<String, String> {
        // 1) Strip the scheme prefix
        let encoded = authorization
            .strip_prefix("Basic ")
            .ok_or_else(|| "Not a Basic authorization header".to_string())?;

        // 2) Decode base64 -> bytes
        let decoded_bytes = match general_purpose::STANDARD.decode(encoded.trim()) {
            Ok(b) => b,
            Err(e) => {
                warn!("Base64 decode error: {}", e);
                return Err("Invalid base64 in Basic auth".to_string());
            }
        };

        // 3) Convert bytes -> UTF-8 string
        let decoded_str = match String::from_utf8(decoded_bytes) {
            Ok(s) => s,
            Err(e) => {
                warn!("Invalid UTF-8 in Basic auth: {}", e);
                return Err("Invalid UTF-8 in Basic auth".to_string());
            }
        };

        // 4) Split into "username:password"
        let mut parts = decoded_str.splitn(2, ':');
        let user_part = parts.next().unwrap_or("");
        let pass_part = parts.next().unwrap_or("");

        if user_part.is_empty() {
            return Err("No username in Basic credentials".to_string());
        }

        // 5) Compare with the user list in config
        debug!("Basic auth attempt for user '{}'", user_part);
        for entry in &self.config.users {
            if entry.username == user_part && entry.password == pass_part {
                return Ok(user_part.to_string());
            }
        }

        Err("Wrong username or password".to_string())
    }
}

#[async_trait]
impl Scheme for BasicScheme {
    /// The name routes reference this scheme by.
    fn get_name(&self) -> &str {
        &self.config.name
    }

    fn get_type(&self) -> &str {
        "basic"
    }

    /// Check the `Authorization` header; a missing or failing one is
    /// answered with this scheme's 401 challenge.
    async fn authenticate(&self, parts: &Parts) -> Result<(), Response> {
        let authorization = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .unwrap_or("");

        match self.check(authorization) {
            Ok(username) => {
                debug!("Basic auth passed for user '{}'", username);
                Ok(())
            }
            Err(reason) => {
                debug!("Basic auth failed: {}", reason);
                Err(self.challenge())
            }
        }
    }
}
