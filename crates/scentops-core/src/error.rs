use thiserror::Error;

/// Errors from the pure domain-logic layer.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A record passed to the differ did not serialize to a JSON object.
    #[error("record did not serialize to a JSON object")]
    NonObjectRecord,

    /// Serde serialization failed while flattening a record for diffing.
    #[error("JSON serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// A variant carries a discounted price without both window bounds.
    #[error("variant '{fragrance}' has a discounted price but an incomplete discount window")]
    IncompleteDiscountWindow { fragrance: String },
}

/// Errors produced while loading [`crate::AppConfig`] from the environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for environment variable {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
