//! Mock implementations for testing
//!
//! All mocks are cheap to clone; clones share state, so a test can hand one
//! copy to the code under test and inspect another.

use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::auth::{AuthError, Navigator, TokenExchange, TokenResponse};
use crate::time::Clock;

/// Wall clock that only moves when told to
#[derive(Debug, Clone)]
pub struct MockClock {
    now_ms: Arc<AtomicI64>,
}

impl MockClock {
    /// Clock frozen at `now_ms` (epoch milliseconds)
    #[must_use]
    pub fn new(now_ms: i64) -> Self {
        Self { now_ms: Arc::new(AtomicI64::new(now_ms)) }
    }

    pub fn advance(&self, duration: Duration) {
        let millis = i64::try_from(duration.as_millis()).unwrap_or(i64::MAX);
        self.advance_millis(millis);
    }

    pub fn advance_millis(&self, millis: i64) {
        self.now_ms.fetch_add(millis, Ordering::SeqCst);
    }

    pub fn set(&self, now_ms: i64) {
        self.now_ms.store(now_ms, Ordering::SeqCst);
    }
}

impl Default for MockClock {
    fn default() -> Self {
        Self::new(0)
    }
}

impl Clock for MockClock {
    fn now_millis(&self) -> i64 {
        self.now_ms.load(Ordering::SeqCst)
    }
}

/// Navigator that remembers where it was sent
#[derive(Debug, Clone, Default)]
pub struct RecordingNavigator {
    assigned: Arc<Mutex<Vec<String>>>,
    routes: Arc<Mutex<Vec<String>>>,
}

impl RecordingNavigator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Full-page navigations, oldest first
    #[must_use]
    pub fn assigned(&self) -> Vec<String> {
        self.assigned.lock().clone()
    }

    /// In-app route pushes, oldest first
    #[must_use]
    pub fn routes(&self) -> Vec<String> {
        self.routes.lock().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn assign(&self, url: &str) {
        self.assigned.lock().push(url.to_string());
    }

    fn push_route(&self, path: &str) {
        self.routes.lock().push(path.to_string());
    }
}

type ExchangeScript = Arc<dyn Fn(&str) -> Result<TokenResponse, AuthError> + Send + Sync>;

/// Token exchanger answering from a script
#[derive(Clone)]
pub struct MockTokenExchanger {
    script: ExchangeScript,
    calls: Arc<AtomicUsize>,
    codes: Arc<Mutex<Vec<String>>>,
}

impl MockTokenExchanger {
    /// Exchanger computing each answer with `script`
    pub fn new<F>(script: F) -> Self
    where
        F: Fn(&str) -> Result<TokenResponse, AuthError> + Send + Sync + 'static,
    {
        Self {
            script: Arc::new(script),
            calls: Arc::new(AtomicUsize::new(0)),
            codes: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Exchanger that always succeeds with `response`
    #[must_use]
    pub fn succeeding(response: TokenResponse) -> Self {
        Self::new(move |_| Ok(response.clone()))
    }

    /// Exchanger that always fails with the given token endpoint answer
    #[must_use]
    pub fn rejecting(status: u16, body: &str) -> Self {
        let body = body.to_string();
        Self::new(move |_| Err(AuthError::TokenExchangeFailed { status, body: body.clone() }))
    }

    /// Exchanger that always reports a missing verifier
    #[must_use]
    pub fn without_verifier() -> Self {
        Self::new(|_| Err(AuthError::MissingVerifier))
    }

    #[must_use]
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Codes received, oldest first
    #[must_use]
    pub fn codes(&self) -> Vec<String> {
        self.codes.lock().clone()
    }
}

impl std::fmt::Debug for MockTokenExchanger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockTokenExchanger").field("calls", &self.call_count()).finish()
    }
}

#[async_trait]
impl TokenExchange for MockTokenExchanger {
    async fn exchange_code_for_token(&self, code: &str) -> Result<TokenResponse, AuthError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.codes.lock().push(code.to_string());
        (self.script)(code)
    }
}
