//! Request middleware: JWT validation and the revocation gateway.

pub mod auth;
pub mod revocation;

pub use auth::{AuthContext, JwtAuth};
pub use revocation::RevocationGate;
