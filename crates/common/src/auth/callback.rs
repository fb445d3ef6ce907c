//! Redirect-callback state machine
//!
//! The identity provider sends the browser back to `/keycloak-callback` with
//! either `code` or `error`/`error_description`. [`resolve`] turns those
//! parameters into a stored session (or an error); [`CallbackHandler`] wraps
//! it with the observable state, the feedback delay and the final route push.
//!
//! ```text
//!            ┌──────── ok ───────► Success ──(1500 ms)──┐
//! Loading ───┤                                           ├──► push "/"
//!            └────── error ──────► Error(msg) ─(3000 ms)─┘
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use gymreview_domain::constants::{
    CALLBACK_ERROR_REDIRECT_MS, CALLBACK_SUCCESS_REDIRECT_MS, HOME_ROUTE,
};
use tokio::sync::watch;
use tracing::{error, info};
use url::{form_urlencoded, Url};

use super::error::AuthError;
use super::session::SessionStore;
use super::traits::{Navigator, TokenExchange};

/// What the callback page shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallbackState {
    Loading,
    Success,
    /// Human-readable failure message
    Error(String),
}

impl CallbackState {
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        !matches!(self, Self::Loading)
    }
}

/// Query parameters the identity provider appends to the redirect URI
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallbackParams {
    pub code: Option<String>,
    pub error: Option<String>,
    pub error_description: Option<String>,
}

impl CallbackParams {
    /// Parse a raw query string (with or without the leading `?`)
    ///
    /// Empty values count as absent; the first occurrence of a key wins.
    #[must_use]
    pub fn from_query(query: &str) -> Self {
        let mut params = Self::default();
        for (key, value) in form_urlencoded::parse(query.trim_start_matches('?').as_bytes()) {
            if value.is_empty() {
                continue;
            }
            let slot = match &*key {
                "code" => &mut params.code,
                "error" => &mut params.error,
                "error_description" => &mut params.error_description,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.into_owned());
            }
        }
        params
    }

    /// Parse the full callback URL
    ///
    /// # Errors
    /// `InvalidUrl` if `url` is not absolute
    pub fn from_url(url: &str) -> Result<Self, AuthError> {
        let url = Url::parse(url)?;
        Ok(Self::from_query(url.query().unwrap_or_default()))
    }
}

/// Run the callback transition: exchange the code and persist the session
///
/// # Errors
/// `IdentityProvider` or `MissingAuthorizationCode` when no code came back,
/// otherwise whatever the exchange or the save reports
pub async fn resolve(
    params: &CallbackParams,
    exchanger: &dyn TokenExchange,
    session: &SessionStore,
) -> Result<(), AuthError> {
    let Some(code) = params.code.as_deref() else {
        return Err(match &params.error {
            Some(error) => AuthError::IdentityProvider {
                error: error.clone(),
                description: params.error_description.clone(),
            },
            None => AuthError::MissingAuthorizationCode,
        });
    };

    let tokens = exchanger.exchange_code_for_token(code).await?;
    session.save(&tokens.access_token, tokens.expires_in, tokens.id_token.as_deref())?;
    Ok(())
}

/// Delays before leaving the callback page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallbackTimings {
    pub success_redirect: Duration,
    pub error_redirect: Duration,
}

impl Default for CallbackTimings {
    fn default() -> Self {
        Self {
            success_redirect: Duration::from_millis(CALLBACK_SUCCESS_REDIRECT_MS),
            error_redirect: Duration::from_millis(CALLBACK_ERROR_REDIRECT_MS),
        }
    }
}

/// One callback page load
///
/// The exchange runs at most once per instance; later [`handle`](Self::handle)
/// calls just report the current state.
pub struct CallbackHandler {
    exchanger: Arc<dyn TokenExchange>,
    session: SessionStore,
    navigator: Arc<dyn Navigator>,
    timings: CallbackTimings,
    started: AtomicBool,
    state: watch::Sender<CallbackState>,
}

impl CallbackHandler {
    pub fn new(
        exchanger: Arc<dyn TokenExchange>,
        session: SessionStore,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self::with_timings(exchanger, session, navigator, CallbackTimings::default())
    }

    pub fn with_timings(
        exchanger: Arc<dyn TokenExchange>,
        session: SessionStore,
        navigator: Arc<dyn Navigator>,
        timings: CallbackTimings,
    ) -> Self {
        let (state, _) = watch::channel(CallbackState::Loading);
        Self { exchanger, session, navigator, timings, started: AtomicBool::new(false), state }
    }

    /// Current state
    #[must_use]
    pub fn state(&self) -> CallbackState {
        self.state.borrow().clone()
    }

    /// Receiver notified on every transition
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<CallbackState> {
        self.state.subscribe()
    }

    /// Process the redirect, wait out the feedback delay and go home
    ///
    /// Returns the terminal state. A repeated call returns the current state
    /// without exchanging, waiting or navigating.
    pub async fn handle(&self, params: CallbackParams) -> CallbackState {
        if self.started.swap(true, Ordering::SeqCst) {
            return self.state();
        }

        let (next, delay) = match resolve(&params, self.exchanger.as_ref(), &self.session).await {
            Ok(()) => {
                info!("Login callback completed");
                (CallbackState::Success, self.timings.success_redirect)
            }
            Err(e) => {
                error!(error = %e, "Login callback failed");
                (CallbackState::Error(e.user_message()), self.timings.error_redirect)
            }
        };

        self.state.send_replace(next.clone());

        tokio::time::sleep(delay).await;
        self.navigator.push_route(HOME_ROUTE);

        next
    }
}
