use reqwest::StatusCode;
use thiserror::Error;

/// Errors returned by the admin API client.
///
/// Transport failures, non-2xx statuses, and API-level `ok:false` envelopes
/// are all distinct variants: callers can always tell "request failed" from
/// "no data" and decide whether a retry makes sense.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered with a non-2xx status.
    #[error("unexpected status {status} from {context}")]
    Status { status: StatusCode, context: String },

    /// The backend answered 2xx but the envelope carried `ok: false`.
    #[error("admin API error: {0}")]
    Api(String),

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// Client-side validation failed before any network call was made.
    #[error("validation error: {0}")]
    Validation(String),

    /// An edit form was submitted with zero changed fields.
    #[error("no changes to submit")]
    NoChanges,

    /// A request URL could not be built from the configured base.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// Failure in the pure domain layer (diffing, serialization).
    #[error(transparent)]
    Core(#[from] scentops_core::CoreError),
}

impl ApiError {
    /// `true` for transient failures worth retrying: network-level errors
    /// and 5xx responses. Validation, no-op, and application errors are not
    /// retryable.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            ApiError::Http(e) => {
                e.is_timeout() || e.is_connect() || e.status().is_some_and(|s| s.is_server_error())
            }
            ApiError::Status { status, .. } => status.is_server_error(),
            ApiError::Api(_)
            | ApiError::Deserialize { .. }
            | ApiError::Validation(_)
            | ApiError::NoChanges
            | ApiError::InvalidUrl(_)
            | ApiError::Core(_) => false,
        }
    }

    /// `true` when the backend rejected the bearer token.
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        match self {
            ApiError::Status { status, .. } => *status == StatusCode::UNAUTHORIZED,
            ApiError::Http(e) => e.status() == Some(StatusCode::UNAUTHORIZED),
            _ => false,
        }
    }
}
