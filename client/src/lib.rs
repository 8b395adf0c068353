//! # Client Session Coordinator
//!
//! Client-side companion to the DevPath auth API: holds the current token
//! pair, coalesces concurrent refresh attempts into a single request, and
//! keeps the session state machine honest across logout and failure.
//!
//! ```no_run
//! use dp_client::{HttpTransport, SessionCoordinator};
//!
//! # async fn run() -> Result<(), dp_client::SessionError> {
//! let transport = HttpTransport::new("https://api.devpath.dev")?;
//! let session = SessionCoordinator::new(transport);
//!
//! session.login("u@x.com", "password").await?;
//! let token = session.refresh().await?;
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod session;
pub mod transport;

pub use error::SessionError;
pub use session::{SessionCoordinator, SessionState};
pub use transport::{AuthTransport, HttpTransport, SessionTokens, TransportError};
