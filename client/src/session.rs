//! Session state machine and single-flight refresh coordination.
//!
//! One mutex guards the state. A refresh in flight is represented *in* the
//! state as a shared future, so any number of callers hitting a stale
//! access token at once coalesce onto one wire request and all observe its
//! outcome. An epoch counter detects logout racing a refresh: a result
//! that comes back under an older epoch is discarded instead of
//! resurrecting the session.

use std::sync::Arc;

use futures::future::{BoxFuture, FutureExt, Shared};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::error::{RefreshError, SessionError};
use crate::transport::{AuthTransport, SessionTokens, TransportError};

/// Observable session phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No session; nobody has signed in
    Anonymous,
    /// A token pair is held and presumed usable
    Authenticated,
    /// A refresh is in flight; the previous pair is kept until it settles
    Refreshing,
    /// The session was rejected by the server; a new login is required
    Unauthorized,
}

type PendingRefresh = Shared<BoxFuture<'static, Result<SessionTokens, RefreshError>>>;

enum State {
    Anonymous,
    Authenticated(SessionTokens),
    Refreshing {
        tokens: SessionTokens,
        pending: PendingRefresh,
    },
    Unauthorized,
}

struct Inner {
    state: State,
    /// Bumped by login, logout, and clear; a refresh settling under an
    /// older epoch must not touch the state.
    epoch: u64,
}

/// Client-side session coordinator
pub struct SessionCoordinator<T: AuthTransport + 'static> {
    transport: Arc<T>,
    inner: Mutex<Inner>,
}

impl<T: AuthTransport + 'static> SessionCoordinator<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport: Arc::new(transport),
            inner: Mutex::new(Inner {
                state: State::Anonymous,
                epoch: 0,
            }),
        }
    }

    /// The underlying transport, for instrumentation.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Current observable phase.
    pub async fn state(&self) -> SessionState {
        match &self.inner.lock().await.state {
            State::Anonymous => SessionState::Anonymous,
            State::Authenticated(_) => SessionState::Authenticated,
            State::Refreshing { .. } => SessionState::Refreshing,
            State::Unauthorized => SessionState::Unauthorized,
        }
    }

    /// The access token to attach to requests, if a session exists.
    ///
    /// During a refresh the previous token is returned; it may still be
    /// accepted, and if not, the caller lands in [`Self::refresh`] where
    /// it joins the in-flight rotation.
    pub async fn access_token(&self) -> Option<String> {
        match &self.inner.lock().await.state {
            State::Authenticated(tokens) | State::Refreshing { tokens, .. } => {
                Some(tokens.access_token.clone())
            }
            State::Anonymous | State::Unauthorized => None,
        }
    }

    /// Sign in, replacing whatever session existed before.
    pub async fn login(&self, email: &str, password: &str) -> Result<(), SessionError> {
        let tokens = self
            .transport
            .login(email, password)
            .await
            .map_err(login_error)?;

        let mut inner = self.inner.lock().await;
        inner.epoch += 1;
        inner.state = State::Authenticated(tokens);

        info!("session established");
        Ok(())
    }

    /// Drop the session locally and revoke it server-side, best effort.
    ///
    /// The local state is cleared first; a transport failure on the wire
    /// call leaves the server-side session to expire on its own.
    pub async fn logout(&self) {
        let access_token = {
            let mut inner = self.inner.lock().await;
            inner.epoch += 1;
            let previous = std::mem::replace(&mut inner.state, State::Anonymous);
            match previous {
                State::Authenticated(tokens) | State::Refreshing { tokens, .. } => {
                    Some(tokens.access_token)
                }
                State::Anonymous | State::Unauthorized => None,
            }
        };

        if let Some(token) = access_token {
            if let Err(e) = self.transport.logout(&token).await {
                warn!("server-side logout failed, session left to expire: {}", e);
            }
        }
    }

    /// Forget the session locally without calling the server.
    pub async fn clear(&self) {
        let mut inner = self.inner.lock().await;
        inner.epoch += 1;
        inner.state = State::Anonymous;
    }

    /// Rotate the refresh token and return the new access token.
    ///
    /// Concurrent callers coalesce: exactly one wire request is made no
    /// matter how many tasks call this at once, and every caller gets the
    /// outcome of that one rotation.
    pub async fn refresh(&self) -> Result<String, SessionError> {
        let (pending, epoch) = {
            let mut inner = self.inner.lock().await;
            let epoch = inner.epoch;

            match &inner.state {
                State::Refreshing { pending, .. } => {
                    debug!("joining in-flight refresh");
                    (pending.clone(), epoch)
                }
                State::Authenticated(tokens) => {
                    let current = tokens.clone();
                    let transport = Arc::clone(&self.transport);
                    let secret = current.refresh_token.clone();
                    let future: BoxFuture<'static, Result<SessionTokens, RefreshError>> =
                        Box::pin(async move {
                            transport
                                .refresh(&secret)
                                .await
                                .map_err(RefreshError::from)
                        });
                    let pending = future.shared();

                    inner.state = State::Refreshing {
                        tokens: current,
                        pending: pending.clone(),
                    };
                    (pending, epoch)
                }
                State::Anonymous => return Err(SessionError::NotAuthenticated),
                State::Unauthorized => return Err(SessionError::SessionExpired),
            }
        };

        let result = pending.await;
        self.settle(epoch, &result).await;

        match result {
            Ok(tokens) => Ok(tokens.access_token),
            Err(RefreshError::Rejected { message }) => {
                warn!("refresh rejected: {}", message);
                Err(SessionError::SessionExpired)
            }
            Err(RefreshError::Transient(message)) => Err(SessionError::Transport(message)),
        }
    }

    /// Apply the outcome of a settled refresh to the state machine.
    ///
    /// Every waiter calls this; only the first one under a still-current
    /// epoch actually transitions the state.
    async fn settle(&self, epoch: u64, result: &Result<SessionTokens, RefreshError>) {
        let mut inner = self.inner.lock().await;

        if inner.epoch != epoch {
            debug!("discarding refresh outcome from a superseded session");
            return;
        }

        if let State::Refreshing { tokens, .. } = &inner.state {
            let previous = tokens.clone();
            inner.state = match result {
                Ok(new_tokens) => State::Authenticated(new_tokens.clone()),
                Err(RefreshError::Rejected { .. }) => State::Unauthorized,
                // The old pair may still be valid; keep the session alive
                Err(RefreshError::Transient(_)) => State::Authenticated(previous),
            };
        }
    }

    /// Run `operation` with the current access token, refreshing and
    /// retrying once if the server rejects the token.
    pub async fn authorized<R, F, Fut>(&self, operation: F) -> Result<R, SessionError>
    where
        F: Fn(String) -> Fut,
        Fut: std::future::Future<Output = Result<R, SessionError>>,
    {
        let token = self
            .access_token()
            .await
            .ok_or(SessionError::NotAuthenticated)?;

        match operation(token).await {
            Err(SessionError::Rejected { status: 401, .. }) => {
                debug!("access token rejected, refreshing and retrying once");
                let token = self.refresh().await?;
                operation(token).await
            }
            other => other,
        }
    }
}

impl From<TransportError> for RefreshError {
    fn from(error: TransportError) -> Self {
        match error {
            // Only a 401 is a verdict on the session; any other status is
            // server-side trouble and the old pair may still be good.
            TransportError::Rejected {
                status: 401,
                message,
            } => RefreshError::Rejected {
                message: format!("401: {}", message),
            },
            TransportError::Rejected { status, message } => {
                RefreshError::Transient(format!("{}: {}", status, message))
            }
            // A timed-out rotation may have consumed the single-use secret
            // server-side; the old pair cannot be trusted anymore.
            TransportError::Timeout => RefreshError::Rejected {
                message: "rotation timed out".to_string(),
            },
            TransportError::Connection(message) => RefreshError::Transient(message),
        }
    }
}

fn login_error(error: TransportError) -> SessionError {
    match error {
        TransportError::Rejected { status, message } => {
            SessionError::Rejected { status, message }
        }
        TransportError::Timeout => SessionError::Transport("request timed out".to_string()),
        TransportError::Connection(message) => SessionError::Transport(message),
    }
}
