//! Login and token-refresh endpoints.

use std::time::Duration;

use reqwest::{Client, Url};
use serde::Deserialize;
use serde_json::Value;

use crate::error::ApiError;
use crate::session::{AdminUser, BackendTokens, Session};

/// Client for the authentication endpoints (`/login`, `/refresh-token`).
///
/// Separate from [`crate::AdminClient`] because the refresh call must not go
/// through the bearer-attaching pipeline: it authenticates with the refresh
/// token instead.
#[derive(Debug, Clone)]
pub struct AuthClient {
    http: Client,
    base_url: Url,
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    admin: AdminUser,
    #[serde(flatten)]
    tokens: BackendTokens,
}

impl AuthClient {
    /// Creates an auth client for the given base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Http`] if the underlying `reqwest::Client` cannot
    /// be constructed, or [`ApiError::InvalidUrl`] for an unparseable base.
    pub fn new(base_url: &str, timeout_secs: u64) -> Result<Self, ApiError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("scentops/0.1 (admin-tooling)")
            .build()?;
        Self::with_client(http, base_url)
    }

    /// Creates an auth client reusing an existing `reqwest::Client`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidUrl`] for an unparseable base URL.
    pub fn with_client(http: Client, base_url: &str) -> Result<Self, ApiError> {
        // Normalise: ensure the base URL ends with exactly one slash so that
        // join() appends to the path rather than replacing the last segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised)
            .map_err(|e| ApiError::InvalidUrl(format!("invalid base URL '{base_url}': {e}")))?;
        Ok(Self { http, base_url })
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        self.base_url
            .join(path)
            .map_err(|e| ApiError::InvalidUrl(format!("invalid endpoint '{path}': {e}")))
    }

    /// Exchanges credentials for a session via `POST /login`.
    ///
    /// # Errors
    ///
    /// - [`ApiError::Api`] if the backend answers `ok: false` (bad credentials).
    /// - [`ApiError::Http`] / [`ApiError::Status`] on transport failure.
    /// - [`ApiError::Deserialize`] if the response shape is unexpected.
    pub async fn login(&self, email: &str, password: &str) -> Result<Session, ApiError> {
        let url = self.endpoint("login")?;
        let response = self
            .http
            .post(url)
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                status,
                context: "login".to_string(),
            });
        }

        let body: Value = response.json().await?;
        check_envelope(&body)?;

        let parsed: LoginResponse =
            serde_json::from_value(body).map_err(|e| ApiError::Deserialize {
                context: "login".to_string(),
                source: e,
            })?;

        Ok(Session {
            user: parsed.admin,
            tokens: parsed.tokens,
        })
    }

    /// Trades a refresh token for a new token triple via `POST /refresh-token`.
    ///
    /// The refresh token travels in the `Authorization: Refresh <token>`
    /// header with an empty body.
    ///
    /// # Errors
    ///
    /// - [`ApiError::Api`] if the backend rejects the refresh token.
    /// - [`ApiError::Http`] / [`ApiError::Status`] on transport failure.
    /// - [`ApiError::Deserialize`] if the response shape is unexpected.
    pub async fn refresh(&self, refresh_token: &str) -> Result<BackendTokens, ApiError> {
        let url = self.endpoint("refresh-token")?;
        let response = self
            .http
            .post(url)
            .header("Authorization", format!("Refresh {refresh_token}"))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                status,
                context: "refresh-token".to_string(),
            });
        }

        let body: Value = response.json().await?;
        check_envelope(&body)?;

        serde_json::from_value(body).map_err(|e| ApiError::Deserialize {
            context: "refresh-token".to_string(),
            source: e,
        })
    }
}

/// Rejects bodies whose `{ok, error}` envelope reports failure.
pub(crate) fn check_envelope(body: &Value) -> Result<(), ApiError> {
    if body.get("ok").and_then(Value::as_bool) == Some(false) {
        let msg = body
            .get("error")
            .and_then(Value::as_str)
            .unwrap_or("unknown error")
            .to_string();
        return Err(ApiError::Api(msg));
    }
    Ok(())
}
