//! Session state and token refresh.
//!
//! The backend issues a token triple on login: a short-lived access token, a
//! refresh token, and the access token's absolute expiry in epoch
//! milliseconds. [`SessionStore`] is the single shared handle to that state;
//! every authenticated request reads the session through
//! [`SessionStore::current`], which transparently refreshes an expired
//! triple first.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use scentops_core::RefreshFailurePolicy;

use crate::auth::AuthClient;
use crate::error::ApiError;

/// The token triple issued by `/login` and replaced by `/refresh-token`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendTokens {
    #[serde(rename = "accessToken")]
    pub access_token: String,
    #[serde(rename = "refreshToken")]
    pub refresh_token: String,
    /// Absolute expiry of the access token, epoch milliseconds.
    #[serde(rename = "expiresIn")]
    pub expires_at_ms: i64,
}

impl BackendTokens {
    #[must_use]
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now.timestamp_millis() >= self.expires_at_ms
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminUser {
    #[serde(rename = "_id")]
    pub id: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub user: AdminUser,
    pub tokens: BackendTokens,
}

/// Shared, cheaply clonable session state.
///
/// The lock is never held across a network call: `current` reads a snapshot,
/// refreshes without the lock, then writes the new triple back. Two callers
/// racing past the expiry check may both trigger a refresh; each refresh
/// independently succeeds or fails, so this is redundant work rather than a
/// correctness problem.
#[derive(Debug, Clone)]
pub struct SessionStore {
    inner: Arc<RwLock<Option<Session>>>,
    policy: RefreshFailurePolicy,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new(RefreshFailurePolicy::KeepStale)
    }
}

impl SessionStore {
    #[must_use]
    pub fn new(policy: RefreshFailurePolicy) -> Self {
        Self {
            inner: Arc::new(RwLock::new(None)),
            policy,
        }
    }

    pub async fn set(&self, session: Session) {
        *self.inner.write().await = Some(session);
    }

    pub async fn clear(&self) {
        *self.inner.write().await = None;
    }

    /// The session as currently stored, without any refresh attempt.
    pub async fn snapshot(&self) -> Option<Session> {
        self.inner.read().await.clone()
    }

    /// Materializes the session, refreshing the token triple when expired.
    ///
    /// A failed refresh is absorbed according to the configured
    /// [`RefreshFailurePolicy`]: `KeepStale` hands back the stale session
    /// (the next authenticated call will surface the unauthorized response),
    /// `ForceLogout` clears the store and returns `None`.
    ///
    /// # Errors
    ///
    /// Never fails today; the `Result` leaves room for policies that want to
    /// surface refresh failures instead of absorbing them.
    pub async fn current(
        &self,
        auth: &AuthClient,
        now: DateTime<Utc>,
    ) -> Result<Option<Session>, ApiError> {
        let Some(session) = self.snapshot().await else {
            return Ok(None);
        };

        if !session.tokens.is_expired(now) {
            return Ok(Some(session));
        }

        match auth.refresh(&session.tokens.refresh_token).await {
            Ok(tokens) => {
                let refreshed = Session {
                    user: session.user,
                    tokens,
                };
                let mut guard = self.inner.write().await;
                // Only replace if nobody logged out while we were refreshing.
                if guard.is_some() {
                    *guard = Some(refreshed.clone());
                }
                Ok(Some(refreshed))
            }
            Err(err) => match self.policy {
                RefreshFailurePolicy::KeepStale => {
                    tracing::warn!(error = %err, "token refresh failed, keeping stale session");
                    Ok(Some(session))
                }
                RefreshFailurePolicy::ForceLogout => {
                    tracing::warn!(error = %err, "token refresh failed, clearing session");
                    self.clear().await;
                    Ok(None)
                }
            },
        }
    }
}
