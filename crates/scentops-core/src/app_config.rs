/// What the session store does with a session whose token refresh failed.
///
/// The backend leaves this ambiguous: a stale access token is not fatal (the
/// next authenticated call simply comes back unauthorized), so the default
/// keeps the stale triple in place. Deployments that prefer a hard re-login
/// can opt into `ForceLogout`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshFailurePolicy {
    /// Keep the expired token triple; the next authenticated call surfaces
    /// the unauthorized response.
    KeepStale,
    /// Clear the session entirely, forcing a fresh login.
    ForceLogout,
}

impl std::fmt::Display for RefreshFailurePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RefreshFailurePolicy::KeepStale => write!(f, "keep-stale"),
            RefreshFailurePolicy::ForceLogout => write!(f, "force-logout"),
        }
    }
}

/// Runtime configuration for the admin API tooling.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Base URL of the authenticated admin API, e.g.
    /// `http://localhost:8000/api/v1/admins`.
    pub api_base_url: String,
    /// Base URL for `/login` and `/refresh-token`. Defaults to
    /// `api_base_url` when not set separately.
    pub auth_base_url: String,
    pub request_timeout_secs: u64,
    pub log_level: String,
    pub refresh_failure_policy: RefreshFailurePolicy,
}
