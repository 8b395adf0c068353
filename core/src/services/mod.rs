//! Business services composing the ports into the auth subsystem.

pub mod session;
pub mod token;

pub use session::SessionService;
pub use token::{TokenService, TokenServiceConfig};
