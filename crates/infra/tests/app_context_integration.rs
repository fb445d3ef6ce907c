//! End-to-end tests for `AppContext`
//!
//! A single wiremock server stands in for both Keycloak and the backend.

use std::sync::Arc;

use gymreview_common::auth::{CallbackParams, CallbackState};
use gymreview_common::config::{ConfigKey, Environment};
use gymreview_common::storage::{KeyValueStore, MemoryStorage};
use gymreview_common::testing::{MockClock, RecordingNavigator};
use gymreview_domain::constants::{SESSION_KEY_CODE_VERIFIER, STORAGE_KEY_ACCESS_TOKEN};
use gymreview_domain::ReviewUpsertRequest;
use gymreview_infra::api::ApiError;
use gymreview_infra::AppContext;
use serde_json::json;
use url::Url;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ORIGIN: &str = "https://gyms.example.com";

struct Harness {
    server: MockServer,
    durable: Arc<MemoryStorage>,
    session_scoped: Arc<MemoryStorage>,
    navigator: RecordingNavigator,
    ctx: AppContext,
}

impl Harness {
    async fn new() -> Self {
        let server = MockServer::start().await;
        let env = Environment::browser(ORIGIN)
            .with_override(ConfigKey::KeycloakUrl, server.uri())
            .with_override(ConfigKey::ApiUrl, format!("{}/api", server.uri()));
        let durable = Arc::new(MemoryStorage::new());
        let session_scoped = Arc::new(MemoryStorage::new());
        let navigator = RecordingNavigator::new();

        let ctx = AppContext::with_storage(
            env,
            durable.clone(),
            session_scoped.clone(),
            Arc::new(MockClock::new(1_700_000_000_000)),
            Arc::new(navigator.clone()),
        );

        Self { server, durable, session_scoped, navigator, ctx }
    }
}

/// Validates `AppContext` behavior for the full login to logout scenario.
///
/// # Test Steps
/// 1. Start a login and follow the recorded navigation
/// 2. Feed an authorization code to the callback handler
/// 3. Create a review with the new session
/// 4. Log out
///
/// Assertions:
/// - The authorization URL targets the configured realm and callback
/// - The token lands in durable storage and the verifier is consumed
/// - The backend sees the bearer token
/// - Logout clears the session and hands Keycloak the ID token
#[tokio::test]
async fn test_login_write_logout_round_trip() {
    let h = Harness::new().await;

    Mock::given(method("POST"))
        .and(path("/realms/gym-review/protocol/openid-connect/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "access-abc",
            "id_token": "id-xyz",
            "expires_in": 300,
            "token_type": "Bearer"
        })))
        .expect(1)
        .mount(&h.server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/gyms/g1/reviews"))
        .and(header("authorization", "Bearer access-abc"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": "r1", "rating": 5})))
        .expect(1)
        .mount(&h.server)
        .await;

    // Step 1
    assert!(!h.ctx.is_logged_in());
    h.ctx.login().await.unwrap();

    let auth_url = Url::parse(&h.navigator.assigned()[0]).unwrap();
    assert_eq!(auth_url.path(), "/realms/gym-review/protocol/openid-connect/auth");
    let redirect = auth_url.query_pairs().find(|(k, _)| k == "redirect_uri").map(|(_, v)| v);
    assert_eq!(redirect.as_deref(), Some("https://gyms.example.com/keycloak-callback"));
    assert!(h.session_scoped.contains(SESSION_KEY_CODE_VERIFIER));

    // Step 2
    let handler = h.ctx.callback_handler();
    let state = handler.handle(CallbackParams::from_query("?code=abc&session_state=s")).await;

    assert_eq!(state, CallbackState::Success);
    assert_eq!(h.navigator.routes(), vec!["/".to_string()]);
    assert!(h.ctx.is_logged_in());
    assert_eq!(
        h.durable.get_item(STORAGE_KEY_ACCESS_TOKEN).unwrap().as_deref(),
        Some("access-abc")
    );
    assert!(!h.session_scoped.contains(SESSION_KEY_CODE_VERIFIER));

    // Step 3
    let review = h
        .ctx
        .api()
        .create_review(
            "g1",
            &ReviewUpsertRequest { content: "Great".to_string(), rating: 5, photo_ids: Vec::new() },
        )
        .await
        .unwrap();
    assert_eq!(review.id.as_deref(), Some("r1"));

    // Step 4
    h.ctx.logout().await.unwrap();

    assert!(!h.ctx.is_logged_in());
    assert!(h.durable.is_empty());
    let logout_url = Url::parse(&h.navigator.assigned()[1]).unwrap();
    assert_eq!(logout_url.path(), "/realms/gym-review/protocol/openid-connect/logout");
    let hint = logout_url.query_pairs().find(|(k, _)| k == "id_token_hint").map(|(_, v)| v);
    assert_eq!(hint.as_deref(), Some("id-xyz"));
}

/// Validates `AppContext` behavior for the identity provider error scenario.
///
/// Assertions:
/// - The callback ends in `Error` without a token request
/// - Writes stay unauthenticated
#[tokio::test]
async fn test_callback_error_leaves_logged_out() {
    let h = Harness::new().await;

    let handler = h.ctx.callback_handler();
    let state = handler
        .handle(CallbackParams::from_query("error=access_denied&error_description=User%20cancelled"))
        .await;

    assert_eq!(
        state,
        CallbackState::Error("Keycloak error: access_denied - User cancelled".to_string())
    );
    assert!(h.server.received_requests().await.unwrap().is_empty());

    let err = h.ctx.api().delete_review("g1", "r1").await.unwrap_err();
    assert!(matches!(err, ApiError::NotAuthenticated));
}

/// Validates `AppContext::detached` behavior for the non-page scenario.
///
/// Assertions:
/// - Logout performs no navigation
/// - Nobody is ever logged in
#[tokio::test]
async fn test_detached_context_is_inert() {
    let navigator = RecordingNavigator::new();
    let ctx = AppContext::detached(Environment::default(), Arc::new(navigator.clone()));

    ctx.logout().await.unwrap();

    assert!(!ctx.is_logged_in());
    assert!(navigator.assigned().is_empty());
    assert!(ctx.session().is_detached());
}
