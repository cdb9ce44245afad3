//! Integration tests for `AdminClient` session handling using wiremock.

use chrono::Utc;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use scentops_client::{AdminClient, AdminUser, ApiError, BackendTokens, Session, SessionStore};
use scentops_core::RefreshFailurePolicy;

const FAR_FUTURE_MS: i64 = 4_102_444_800_000; // 2100-01-01
const LONG_AGO_MS: i64 = 946_684_800_000; // 2000-01-01

fn session(access: &str, refresh: &str, expires_at_ms: i64) -> Session {
    Session {
        user: AdminUser {
            id: "admin-1".to_string(),
            email: "ops@example.com".to_string(),
        },
        tokens: BackendTokens {
            access_token: access.to_string(),
            refresh_token: refresh.to_string(),
            expires_at_ms,
        },
    }
}

fn client_with(store: SessionStore, base: &str) -> AdminClient {
    AdminClient::with_base_url(base, base, 30, store).expect("client construction should not fail")
}

#[tokio::test]
async fn bearer_token_is_attached_when_a_session_exists() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/admin-categories"))
        .and(header("authorization", "Bearer access-1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "ok": true, "categories": [] })),
        )
        .mount(&server)
        .await;

    let store = SessionStore::default();
    store
        .set(session("access-1", "refresh-1", FAR_FUTURE_MS))
        .await;

    let client = client_with(store, &server.uri());
    let categories = client.list_categories().await.expect("should list");
    assert!(categories.is_empty());
}

#[tokio::test]
async fn requests_go_out_unauthenticated_without_a_session() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/admin-categories"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "ok": true, "categories": [] })),
        )
        .mount(&server)
        .await;

    let client = client_with(SessionStore::default(), &server.uri());
    client.list_categories().await.expect("should list");

    let requests = server.received_requests().await.expect("recording enabled");
    assert_eq!(requests.len(), 1);
    assert!(
        !requests[0].headers.contains_key("authorization"),
        "no auth header expected without a session"
    );
}

#[tokio::test]
async fn expired_token_is_refreshed_before_the_request() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/refresh-token"))
        .and(header("authorization", "Refresh refresh-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "ok": true,
            "accessToken": "access-2",
            "refreshToken": "refresh-2",
            "expiresIn": FAR_FUTURE_MS,
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/admin-categories"))
        .and(header("authorization", "Bearer access-2"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "ok": true, "categories": [] })),
        )
        .mount(&server)
        .await;

    let store = SessionStore::default();
    store.set(session("access-1", "refresh-1", LONG_AGO_MS)).await;

    let client = client_with(store.clone(), &server.uri());
    client.list_categories().await.expect("should list");

    let refreshed = store.snapshot().await.expect("session still present");
    assert_eq!(refreshed.tokens.access_token, "access-2");
    assert_eq!(refreshed.tokens.refresh_token, "refresh-2");
}

#[tokio::test]
async fn failed_refresh_keeps_the_stale_session_by_default() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/refresh-token"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    // The stale token still travels; the backend answers 401.
    Mock::given(method("GET"))
        .and(path("/admin-categories"))
        .and(header("authorization", "Bearer access-1"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let store = SessionStore::default();
    store.set(session("access-1", "refresh-1", LONG_AGO_MS)).await;

    let client = client_with(store.clone(), &server.uri());
    let err = client.list_categories().await.expect_err("401 expected");
    assert!(err.is_unauthorized(), "got: {err:?}");

    assert!(
        store.snapshot().await.is_some(),
        "keep-stale policy must retain the session"
    );
}

#[tokio::test]
async fn failed_refresh_clears_the_session_under_force_logout() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/refresh-token"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/admin-categories"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let store = SessionStore::new(RefreshFailurePolicy::ForceLogout);
    store.set(session("access-1", "refresh-1", LONG_AGO_MS)).await;

    let client = client_with(store.clone(), &server.uri());
    let err = client.list_categories().await.expect_err("401 expected");
    assert!(err.is_unauthorized(), "got: {err:?}");

    assert!(
        store.snapshot().await.is_none(),
        "force-logout policy must clear the session"
    );
}

#[tokio::test]
async fn a_valid_token_is_not_refreshed() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/refresh-token"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/admin-categories"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "ok": true, "categories": [] })),
        )
        .mount(&server)
        .await;

    let store = SessionStore::default();
    let original = session("access-1", "refresh-1", FAR_FUTURE_MS);
    store.set(original.clone()).await;

    let client = client_with(store.clone(), &server.uri());
    client.list_categories().await.expect("should list");

    assert_eq!(store.snapshot().await, Some(original));
}

#[tokio::test]
async fn login_stores_the_session() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "ok": true,
            "admin": { "_id": "admin-1", "email": "ops@example.com" },
            "accessToken": "access-1",
            "refreshToken": "refresh-1",
            "expiresIn": FAR_FUTURE_MS,
        })))
        .mount(&server)
        .await;

    let store = SessionStore::default();
    let client = client_with(store.clone(), &server.uri());
    client
        .login("ops@example.com", "hunter2")
        .await
        .expect("login should succeed");

    let session = store.snapshot().await.expect("session stored");
    assert_eq!(session.user.email, "ops@example.com");
    assert_eq!(session.tokens.access_token, "access-1");
}

#[tokio::test]
async fn rejected_credentials_surface_as_api_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(
            serde_json::json!({ "ok": false, "error": "Invalid email or password" }),
        ))
        .mount(&server)
        .await;

    let client = client_with(SessionStore::default(), &server.uri());
    let err = client
        .login("ops@example.com", "wrong")
        .await
        .expect_err("login should fail");
    assert!(
        matches!(err, ApiError::Api(ref msg) if msg == "Invalid email or password"),
        "got: {err:?}"
    );
}

#[tokio::test]
async fn ok_false_envelope_surfaces_as_api_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/admin-products"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "ok": false, "error": "boom" })),
        )
        .mount(&server)
        .await;

    let store = SessionStore::default();
    store
        .set(session("access-1", "refresh-1", FAR_FUTURE_MS))
        .await;
    let client = client_with(store, &server.uri());

    let err = client.list_products().await.expect_err("should fail");
    assert!(matches!(err, ApiError::Api(ref msg) if msg == "boom"), "got: {err:?}");
    assert!(!err.is_retryable());
}

#[tokio::test]
async fn server_errors_are_marked_retryable() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/admin-coupons"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let store = SessionStore::default();
    store
        .set(session("access-1", "refresh-1", FAR_FUTURE_MS))
        .await;
    let client = client_with(store, &server.uri());

    let err = client.list_coupons().await.expect_err("should fail");
    assert!(matches!(err, ApiError::Status { .. }), "got: {err:?}");
    assert!(err.is_retryable());
}

#[tokio::test]
async fn session_expiry_check_uses_the_injected_instant() {
    let tokens = BackendTokens {
        access_token: "a".to_string(),
        refresh_token: "r".to_string(),
        expires_at_ms: Utc::now().timestamp_millis() + 60_000,
    };
    assert!(!tokens.is_expired(Utc::now()));
    assert!(tokens.is_expired(Utc::now() + chrono::Duration::minutes(2)));
}
