//! The session-attaching HTTP client and its unauthenticated sibling.

use std::time::Duration;

use chrono::Utc;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Method, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use scentops_core::models::Category;
use scentops_core::AppConfig;

use crate::auth::{check_envelope, AuthClient};
use crate::error::ApiError;
use crate::session::SessionStore;

/// An in-memory file destined for a multipart `files` field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl FileUpload {
    #[must_use]
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes,
        }
    }
}

/// Client for the authenticated admin API.
///
/// Every request reads the current session through [`SessionStore::current`]
/// (refreshing an expired token first) and attaches
/// `Authorization: Bearer <accessToken>` when a session exists; without one
/// the request goes out unauthenticated and the backend answers 401.
#[derive(Debug, Clone)]
pub struct AdminClient {
    http: Client,
    base_url: Url,
    session: SessionStore,
    auth: AuthClient,
}

impl AdminClient {
    /// Creates a client from the application configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Http`] if the underlying `reqwest::Client` cannot
    /// be constructed, or [`ApiError::InvalidUrl`] for an unparseable base.
    pub fn new(config: &AppConfig) -> Result<Self, ApiError> {
        let session = SessionStore::new(config.refresh_failure_policy);
        Self::with_base_url(
            &config.api_base_url,
            &config.auth_base_url,
            config.request_timeout_secs,
            session,
        )
    }

    /// Creates a client with explicit base URLs (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Http`] if the underlying `reqwest::Client` cannot
    /// be constructed, or [`ApiError::InvalidUrl`] for an unparseable base.
    pub fn with_base_url(
        api_base_url: &str,
        auth_base_url: &str,
        timeout_secs: u64,
        session: SessionStore,
    ) -> Result<Self, ApiError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("scentops/0.1 (admin-tooling)")
            .build()?;

        // Normalise: ensure the base URL ends with exactly one slash so that
        // join() appends to the path rather than replacing the last segment.
        let normalised = format!("{}/", api_base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised)
            .map_err(|e| ApiError::InvalidUrl(format!("invalid base URL '{api_base_url}': {e}")))?;

        let auth = AuthClient::with_client(http.clone(), auth_base_url)?;

        Ok(Self {
            http,
            base_url,
            session,
            auth,
        })
    }

    #[must_use]
    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    #[must_use]
    pub fn auth(&self) -> &AuthClient {
        &self.auth
    }

    /// Logs in and stores the resulting session.
    ///
    /// # Errors
    ///
    /// Propagates the [`AuthClient::login`] errors.
    pub async fn login(&self, email: &str, password: &str) -> Result<(), ApiError> {
        let session = self.auth.login(email, password).await?;
        self.session.set(session).await;
        Ok(())
    }

    /// Discards the stored session.
    pub async fn logout(&self) {
        self.session.clear().await;
    }

    pub(crate) fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| ApiError::InvalidUrl(format!("invalid endpoint '{path}': {e}")))
    }

    /// Starts a request with the bearer token attached when a session exists.
    async fn request(&self, method: Method, url: Url) -> Result<RequestBuilder, ApiError> {
        let builder = self.http.request(method, url);
        let session = self.session.current(&self.auth, Utc::now()).await?;
        Ok(match session {
            Some(s) => builder.bearer_auth(&s.tokens.access_token),
            None => builder,
        })
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
        context: &str,
    ) -> Result<T, ApiError> {
        tracing::debug!(context, "issuing admin API request");
        let response = builder.send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                status,
                context: context.to_string(),
            });
        }

        let body: Value = response.json().await?;
        check_envelope(&body)?;

        serde_json::from_value(body).map_err(|e| ApiError::Deserialize {
            context: context.to_string(),
            source: e,
        })
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        context: &str,
    ) -> Result<T, ApiError> {
        let url = self.endpoint(path)?;
        let builder = self.request(Method::GET, url).await?;
        self.execute(builder, context).await
    }

    pub(crate) async fn post_json<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        context: &str,
    ) -> Result<T, ApiError> {
        let url = self.endpoint(path)?;
        let builder = self.request(Method::POST, url).await?.json(body);
        self.execute(builder, context).await
    }

    pub(crate) async fn put_json<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        context: &str,
    ) -> Result<T, ApiError> {
        let url = self.endpoint(path)?;
        let builder = self.request(Method::PUT, url).await?.json(body);
        self.execute(builder, context).await
    }

    pub(crate) async fn delete_json<T: DeserializeOwned>(
        &self,
        path: &str,
        context: &str,
    ) -> Result<T, ApiError> {
        let url = self.endpoint(path)?;
        let builder = self.request(Method::DELETE, url).await?;
        self.execute(builder, context).await
    }

    pub(crate) async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: Form,
        context: &str,
    ) -> Result<T, ApiError> {
        let url = self.endpoint(path)?;
        let builder = self.request(Method::POST, url).await?.multipart(form);
        self.execute(builder, context).await
    }

    pub(crate) async fn put_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: Form,
        context: &str,
    ) -> Result<T, ApiError> {
        let url = self.endpoint(path)?;
        let builder = self.request(Method::PUT, url).await?.multipart(form);
        self.execute(builder, context).await
    }
}

/// Appends in-memory files to a multipart form under the `files` field.
pub(crate) fn attach_files(mut form: Form, files: &[FileUpload]) -> Form {
    for file in files {
        let part = Part::bytes(file.bytes.clone()).file_name(file.file_name.clone());
        form = form.part("files", part);
    }
    form
}

/// Unauthenticated client for the public read-only endpoints.
#[derive(Debug, Clone)]
pub struct PublicClient {
    http: Client,
    base_url: Url,
}

#[derive(Debug, serde::Deserialize)]
struct CategoriesResponse {
    categories: Vec<Category>,
}

impl PublicClient {
    /// Creates a public client for the given base URL.
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

        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised)
            .map_err(|e| ApiError::InvalidUrl(format!("invalid base URL '{base_url}': {e}")))?;

        Ok(Self { http, base_url })
    }

    /// Fetches the public category listing, no auth header attached.
    ///
    /// # Errors
    ///
    /// - [`ApiError::Http`] / [`ApiError::Status`] on transport failure.
    /// - [`ApiError::Deserialize`] if the response shape is unexpected.
    pub async fn categories(&self) -> Result<Vec<Category>, ApiError> {
        let url = self
            .base_url
            .join("categories")
            .map_err(|e| ApiError::InvalidUrl(format!("invalid endpoint 'categories': {e}")))?;

        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                status,
                context: "categories".to_string(),
            });
        }

        let body: Value = response.json().await?;
        check_envelope(&body)?;

        let parsed: CategoriesResponse =
            serde_json::from_value(body).map_err(|e| ApiError::Deserialize {
                context: "categories".to_string(),
                source: e,
            })?;
        Ok(parsed.categories)
    }
}
