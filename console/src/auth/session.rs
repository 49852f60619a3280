//! Process-wide session state with change notification.
//!
//! The store owns the only copy of the current [`Session`]. Login and logout
//! are the sole mutators; every change is published on a `watch` channel so
//! dependent views observe a logout the moment it happens.
//!
//! Logout is local: the backend's session cookie stays in the HTTP client's
//! jar, so a later [`SessionStore::restore`] on the same client can bring the
//! session back. A restore that is still in flight when logout happens is
//! discarded.

use crate::auth::models::{LoginRequest, Session};
use crate::auth::service::Authenticator;
use crate::errors::{ApiError, ApiResult};
use chrono::Utc;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;
use tracing::{debug, info, warn};
use validator::Validate;

/// What protected views render from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuthState {
    pub session: Option<Session>,
    /// True until the startup restore check has finished.
    pub loading: bool,
}

impl AuthState {
    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }
}

#[derive(Clone)]
pub struct SessionStore {
    authenticator: Arc<dyn Authenticator>,
    state: Arc<watch::Sender<AuthState>>,
    /// Bumped by every logout.
    logouts: Arc<AtomicU64>,
}

impl SessionStore {
    pub fn new(authenticator: Arc<dyn Authenticator>) -> Self {
        let (state, _) = watch::channel(AuthState {
            session: None,
            loading: true,
        });
        Self {
            authenticator,
            state: Arc::new(state),
            logouts: Arc::new(AtomicU64::new(0)),
        }
    }

    /// One-time restore check. Any failure leaves the store unauthenticated.
    pub async fn restore(&self) -> bool {
        let epoch = self.logouts.load(Ordering::SeqCst);
        let restored = match self.authenticator.restore().await {
            Ok(session) => session,
            Err(e) => {
                warn!("Session restore failed, continuing unauthenticated: {}", e);
                None
            }
        };

        let mut authenticated = false;
        self.state.send_modify(|state| {
            if self.logouts.load(Ordering::SeqCst) != epoch {
                debug!("Logged out during restore, discarding restored session");
            } else if state.session.is_none() {
                // A login that finished first wins over the restored session.
                state.session = restored;
            }
            state.loading = false;
            authenticated = state.is_authenticated();
        });
        authenticated
    }

    /// Returns `Ok(false)` for rejected or malformed credentials; only
    /// transport and unexpected server failures are errors.
    pub async fn login(&self, email: &str, password: &str) -> ApiResult<bool> {
        let request = LoginRequest {
            email: email.trim().to_string(),
            password: password.to_string(),
        };
        if let Err(errors) = request.validate() {
            debug!("Login blocked by validation: {}", errors);
            return Ok(false);
        }

        match self.authenticator.login(&request).await? {
            Some(session) => {
                info!("Session started for {}", session.email);
                self.state.send_modify(|state| {
                    state.session = Some(session);
                    state.loading = false;
                });
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub fn logout(&self) {
        self.logouts.fetch_add(1, Ordering::SeqCst);
        self.state.send_modify(|state| {
            if let Some(session) = state.session.take() {
                info!("Session ended for {}", session.email);
            }
        });
    }

    /// Current state, dropping the session first if it has expired.
    pub fn snapshot(&self) -> AuthState {
        let expired = self
            .state
            .borrow()
            .session
            .as_ref()
            .is_some_and(|s| s.is_expired_at(Utc::now()));
        if expired {
            info!("Session expired");
            self.logout();
        }
        self.state.borrow().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.snapshot().is_authenticated()
    }

    pub fn is_loading(&self) -> bool {
        self.state.borrow().loading
    }

    pub fn current_session(&self) -> Option<Session> {
        self.snapshot().session
    }

    /// Gate for protected views.
    pub fn require_session(&self) -> ApiResult<Session> {
        self.current_session().ok_or(ApiError::Unauthenticated)
    }

    pub fn subscribe(&self) -> watch::Receiver<AuthState> {
        self.state.subscribe()
    }

    /// Stream of states, starting with the current one.
    pub fn changes(&self) -> WatchStream<AuthState> {
        WatchStream::new(self.state.subscribe())
    }
}
