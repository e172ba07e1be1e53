use async_trait::async_trait;
use axum::body::Body;
use axum::response::Response;
use http::request::Parts;
use http::{header, StatusCode};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::Scheme;

/// RedirectSchemeConfig describes a login-redirect gate: requests without a
/// valid session cookie are sent to the login URL instead of the handler.
#[derive(Deserialize, Serialize, Debug, JsonSchema, Clone)]
pub struct RedirectSchemeConfig {
    /// The name routes use to reference this scheme.
    pub name: String,
    /// Where unauthenticated clients are redirected.
    pub login_url: String,
    /// The cookie carrying the session token.
    #[serde(default = "default_cookie")]
    pub cookie: String,
    /// The token value the cookie must carry.
    pub token: String,
}

fn default_cookie() -> String {
    "sid".to_string()
}

/// A session-cookie gate that answers 302 until the cookie matches.
pub struct RedirectScheme {
    pub config: RedirectSchemeConfig,
}

impl RedirectScheme {
    /// Create a new `RedirectScheme` from the config struct.
    pub fn new(config: &RedirectSchemeConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }

    /// The 302 response pointing at the login URL.
    fn redirect(&self) -> Response {
        Response::builder()
            .status(StatusCode::FOUND)
            .header(header::LOCATION, self.config.login_url.as_str())
            .body(Body::empty())
            .unwrap()
    }

    /// Pull the configured cookie's value out of the `Cookie` header.
    fn session_token<'a>(&self, parts: &'a Parts) -> Option<&'a str> {
        let cookies = parts.headers.get(header::COOKIE)?.to_str().ok()?;
        cookies.split(';').find_map(|pair| {
            let (name, value) = pair.trim().split_once('=')?;
            (name == self.config.cookie).then_some(value)
        })
    }
}

#[async_trait]
impl Scheme for RedirectScheme {
    /// The name routes reference this scheme by.
    fn get_name(&self) -> &str {
        &self.config.name
    }

    fn get_type(&self) -> &str {
        "redirect"
    }

    /// Pass requests carrying the expected session token; send everything
    /// else to the login URL.
    async fn authenticate(&self, parts: &Parts) -> Result<(), Response> {
        match self.session_token(parts) {
            Some(token) if token == self.config.token => Ok(()),
            _ => {
                debug!("No valid session, redirecting to {}", self.config.login_url);
                Err(self.redirect())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_config() -> RedirectSchemeConfig {
        RedirectSchemeConfig {
            name: "portal".to_string(),
            login_url: "https://login.example.com/start".to_string(),
            cookie: "sid".to_string(),
            token: "opensesame".to_string(),
        }
    }

    fn parts_with_cookie(cookie: Option<&str>) -> Parts {
        let mut builder = http::Request::builder().uri("/_config");
        if let Some(value) = cookie {
            builder = builder.header(header::COOKIE, value);
        }
        let (parts, _) = builder.body(()).unwrap().into_parts();
        parts
    }

    /// Test that a request without the cookie is redirected to the login URL.
    #[tokio::test]
    async fn test_redirects_without_cookie() {
        let scheme = RedirectScheme::new(&create_test_config());

        let response = scheme
            .authenticate(&parts_with_cookie(None))
            .await
            .unwrap_err();

        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(
            response
                .headers()
                .get(header::LOCATION)
                .and_then(|v| v.to_str().ok()),
            Some("https://login.example.com/start")
        );
    }

    /// Test that a wrong session token is redirected too.
    #[tokio::test]
    async fn test_redirects_with_wrong_token() {
        let scheme = RedirectScheme::new(&create_test_config());

        let result = scheme
            .authenticate(&parts_with_cookie(Some("sid=wrong")))
            .await;

        assert!(result.is_err());
    }

    /// Test that the expected token passes, also when other cookies are
    /// present in the header.
    #[tokio::test]
    async fn test_passes_with_valid_token() {
        let scheme = RedirectScheme::new(&create_test_config());

        let result = scheme
            .authenticate(&parts_with_cookie(Some("theme=dark; sid=opensesame")))
            .await;

        assert!(result.is_ok());
    }

    /// Test that only the configured cookie name is consulted.
    #[tokio::test]
    async fn test_ignores_other_cookie_names() {
        let scheme = RedirectScheme::new(&create_test_config());

        let result = scheme
            .authenticate(&parts_with_cookie(Some("session=opensesame")))
            .await;

        assert!(result.is_err());
    }

    /// Test that scheme metadata is correct.
    #[test]
    fn test_scheme_metadata() {
        let scheme = RedirectScheme::new(&create_test_config());

        assert_eq!(scheme.get_name(), "portal");
        assert_eq!(scheme.get_type(), "redirect");
    }
}
