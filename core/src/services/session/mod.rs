//! Session service module
//!
//! Server-side façade over the credential store and the token service,
//! exposing the login / refresh / logout operations the API layer serves.

mod service;

#[cfg(test)]
mod tests;

pub use service::SessionService;
