//! Client-side error types.

use thiserror::Error;

/// Errors surfaced by the session coordinator
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SessionError {
    /// The session could not be refreshed; the user must sign in again
    #[error("Session expired, sign in again")]
    SessionExpired,

    /// No session exists to operate on
    #[error("Not authenticated")]
    NotAuthenticated,

    /// The server could not be reached; the session is still intact
    #[error("Transport failure: {0}")]
    Transport(String),

    /// The server answered with a non-success status
    #[error("Request rejected ({status}): {message}")]
    Rejected { status: u16, message: String },
}

/// Outcome of a coalesced refresh, shared between every waiter.
///
/// Must stay `Clone`: all tasks awaiting the same in-flight refresh receive
/// a copy of this value.
#[derive(Debug, Clone, Error)]
pub(crate) enum RefreshError {
    /// The server refused the rotation; the session is dead
    #[error("refresh rejected: {message}")]
    Rejected { message: String },

    /// The server was unreachable; the old session may still be valid
    #[error("refresh transport failure: {0}")]
    Transient(String),
}
